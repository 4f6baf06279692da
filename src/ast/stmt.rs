//! Statement-level AST.

use super::expr::{ColumnRef, Literal, Predicate, UpdateExpr};
use crate::types::SqlType;

/// A column constraint. `constraints ⊆ {PRIMARY KEY, NOT NULL, UNIQUE}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    PrimaryKey,
    NotNull,
    Unique,
}

/// A single column definition inside `CREATE TABLE`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub sql_type: SqlType,
    pub constraints: Vec<Constraint>,
}

/// A table reference in a `FROM` clause; `alias` defaults to `name`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRef {
    pub name: String,
    pub alias: String,
}

/// An aggregate function name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunc {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateFunc {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateFunc::Count => "COUNT",
            AggregateFunc::Sum => "SUM",
            AggregateFunc::Avg => "AVG",
            AggregateFunc::Min => "MIN",
            AggregateFunc::Max => "MAX",
        }
    }
}

/// The argument to an aggregate call: `*` or a column reference.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateArg {
    Star,
    Column(ColumnRef),
}

/// One item in a `SELECT` projection list.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionItem {
    Star,
    Column {
        column: ColumnRef,
        alias: Option<String>,
    },
    Aggregate {
        func: AggregateFunc,
        arg: AggregateArg,
        distinct: bool,
        alias: Option<String>,
    },
}

/// Sort direction for `ORDER BY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDir {
    Asc,
    Desc,
}

/// One `ORDER BY` term.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub column: ColumnRef,
    pub dir: OrderDir,
}

/// A `col = <expr>` assignment inside `UPDATE ... SET`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: String,
    pub expr: UpdateExpr,
}

/// A full `SELECT` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub distinct: bool,
    pub projection: Vec<ProjectionItem>,
    pub from: Vec<TableRef>,
    pub predicate: Option<Predicate>,
    pub group_by: Vec<ColumnRef>,
    pub order_by: Vec<OrderItem>,
    pub limit: Option<i64>,
}

/// A top-level SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateTable {
        name: String,
        columns: Vec<ColumnDef>,
    },
    DropTable {
        name: String,
    },
    Insert {
        table: String,
        values: Vec<Literal>,
    },
    Update {
        table: String,
        assignments: Vec<Assignment>,
        predicate: Option<Predicate>,
    },
    Delete {
        table: String,
        predicate: Option<Predicate>,
    },
    Select(SelectStatement),
}
