//! Shared `WHERE`/`UPDATE`/`DELETE` predicate evaluation: column
//! resolution is supplied by the caller via a closure, so the same tree
//! walk serves both the single-table `UPDATE`/`DELETE` context and the
//! multi-table `SELECT` context.

use crate::ast::{ColumnRef, Comparand, CompareOp, Predicate};
use crate::catalog::{Row, Table};
use crate::error::{Error, ErrorKind, Result};
use crate::types::Value;
use regex::RegexBuilder;

/// Walk a predicate tree, resolving column references through `resolve`.
pub(super) fn eval_predicate(
    pred: &Predicate,
    resolve: &mut dyn FnMut(&ColumnRef) -> Result<Value>,
) -> Result<bool> {
    match pred {
        Predicate::Compare { left, op, right } => {
            let lv = resolve(left)?;
            let rv = match right {
                Comparand::Column(c) => resolve(c)?,
                Comparand::Literal(lit) => Value::from(lit),
            };
            compare(*op, &lv, &rv)
        }
        Predicate::And(a, b) => Ok(eval_predicate(a, resolve)? && eval_predicate(b, resolve)?),
        Predicate::Or(a, b) => Ok(eval_predicate(a, resolve)? || eval_predicate(b, resolve)?),
    }
}

fn compare(op: CompareOp, left: &Value, right: &Value) -> Result<bool> {
    match op {
        CompareOp::Eq => Ok(values_equal(left, right)),
        CompareOp::Neq => Ok(!values_equal(left, right)),
        CompareOp::Lt | CompareOp::Lte | CompareOp::Gt | CompareOp::Gte => {
            let (a, b) = numeric_pair(left, right)?;
            Ok(match op {
                CompareOp::Lt => a < b,
                CompareOp::Lte => a <= b,
                CompareOp::Gt => a > b,
                CompareOp::Gte => a >= b,
                _ => unreachable!(),
            })
        }
        CompareOp::Like => {
            let text = left
                .as_str_lossy()
                .ok_or_else(|| Error::new(ErrorKind::InvalidLikeOperand))?;
            let pattern = right
                .as_str_lossy()
                .ok_or_else(|| Error::new(ErrorKind::InvalidLikeOperand))?;
            like_match(&text, &pattern)
        }
    }
}

fn numeric_pair(left: &Value, right: &Value) -> Result<(f64, f64)> {
    let a = left
        .as_f64()
        .ok_or_else(|| Error::new(ErrorKind::TypeCoercion {
            value: left.to_string(),
            target: "a number".to_string(),
        }))?;
    let b = right
        .as_f64()
        .ok_or_else(|| Error::new(ErrorKind::TypeCoercion {
            value: right.to_string(),
            target: "a number".to_string(),
        }))?;
    Ok((a, b))
}

/// `EQ`/`NEQ` compare raw values: numerically when both sides have a
/// numeric view, otherwise as strings. `NULL` is equal only to `NULL`.
pub(super) fn values_equal(left: &Value, right: &Value) -> bool {
    match (left.is_null(), right.is_null()) {
        (true, true) => true,
        (true, false) | (false, true) => false,
        (false, false) => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => left.as_str_lossy() == right.as_str_lossy(),
        },
    }
}

/// Translate a `LIKE` pattern (`%` → `.*`, `_` → `.`, other characters
/// regex-escaped) and match it full-string, case-insensitively.
pub(super) fn like_match(text: &str, pattern: &str) -> Result<bool> {
    let mut body = String::from("^");
    for c in pattern.chars() {
        match c {
            '%' => body.push_str(".*"),
            '_' => body.push('.'),
            other => body.push_str(&regex::escape(&other.to_string())),
        }
    }
    body.push('$');
    let re = RegexBuilder::new(&body)
        .case_insensitive(true)
        .build()
        .map_err(|_| Error::new(ErrorKind::InvalidLikeOperand))?;
    Ok(re.is_match(text))
}

/// Resolve a column reference against a single table's row, for `UPDATE`
/// and `DELETE` predicates, which never see a multi-table `FROM`.
pub(super) fn resolve_against_table(table: &Table, row: &Row, col: &ColumnRef) -> Result<Value> {
    if let Some(qualifier) = &col.table {
        if qualifier != &table.name {
            return Err(Error::new(ErrorKind::UnresolvedColumn(format!(
                "{}.{}",
                qualifier, col.column
            ))));
        }
    }
    if !table.has_column(&col.column) {
        return Err(Error::new(ErrorKind::UnknownColumn(col.column.clone())));
    }
    Ok(Table::row_value(row, &col.column)
        .cloned()
        .unwrap_or(Value::Null))
}
