//! Expression-level AST: literals, column references, predicates and the
//! restricted `UPDATE` assignment expression form.

use crate::types::Value;

/// A literal value as written in source (`NUMBER` or `STRING`).
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Null,
}

impl From<&Literal> for Value {
    fn from(lit: &Literal) -> Self {
        match lit {
            Literal::Int(n) => Value::Int(*n),
            Literal::Float(f) => Value::Float(*f),
            Literal::Str(s) => Value::Str(s.clone()),
            Literal::Null => Value::Null,
        }
    }
}

/// A possibly-qualified column reference (`alias.column` or bare `column`).
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    pub table: Option<String>,
    pub column: String,
}

impl ColumnRef {
    pub fn bare(column: impl Into<String>) -> Self {
        Self {
            table: None,
            column: column.into(),
        }
    }

    pub fn qualified(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            column: column.into(),
        }
    }
}

/// The right-hand side of a `WHERE` comparison: a literal or another
/// column reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparand {
    Column(ColumnRef),
    Literal(Literal),
}

/// A `WHERE`-clause comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
}

/// A boolean predicate tree: `Compare` leaves combined with `And`/`Or`.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare {
        left: ColumnRef,
        op: CompareOp,
        right: Comparand,
    },
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
}

/// An arithmetic operator for the restricted `UPDATE` expression form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// An operand of an `UPDATE` assignment expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Column(ColumnRef),
    Literal(Literal),
}

/// The right-hand side of an `UPDATE ... SET col = <expr>` assignment: a
/// single literal/column, or a single `left OP right` arithmetic node.
/// Richer expression trees are a non-goal, per spec.md §4.3.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateExpr {
    Operand(Operand),
    BinOp {
        left: Operand,
        op: ArithOp,
        right: Operand,
    },
}
