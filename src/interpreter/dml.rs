//! `INSERT`, `UPDATE` and `DELETE`.
//!
//! `UPDATE` validates every target row's new values against every
//! constraint before mutating any of them, so a constraint violation
//! discovered on a later row cannot leave the table half-updated within a
//! single statement (spec.md §9's non-atomic-`UPDATE` Open Question,
//! resolved here as validate-then-apply).

use super::predicate::{eval_predicate, resolve_against_table};
use super::Interpreter;
use crate::ast::{ArithOp, Assignment, ColumnRef, Literal, Operand, Predicate, UpdateExpr};
use crate::catalog::{ColumnSchema, Row, Table};
use crate::error::{Error, ErrorKind, Result};
use crate::types::Value;

impl Interpreter {
    pub(super) fn insert(&mut self, table_name: &str, values: &[Literal]) -> Result<()> {
        let table = self
            .catalog()
            .table(table_name)
            .ok_or_else(|| Error::new(ErrorKind::UnknownTable(table_name.to_string())))?;

        if values.len() != table.columns.len() {
            return Err(Error::new(ErrorKind::ColumnCountMismatch {
                expected: table.columns.len(),
                found: values.len(),
            }));
        }

        let columns = table.columns.clone();
        let mut row: Row = Vec::with_capacity(columns.len());
        for (col, lit) in columns.iter().zip(values.iter()) {
            let raw = Value::from(lit);
            let value = check_column_value(table, &row, col, &raw, None)?;
            row.push((col.name.clone(), value));
        }

        self.catalog_mut().table_mut(table_name).unwrap().rows.push(row);
        Ok(())
    }

    pub(super) fn update(
        &mut self,
        table_name: &str,
        assignments: &[Assignment],
        predicate: Option<&Predicate>,
    ) -> Result<usize> {
        let table = self
            .catalog()
            .table(table_name)
            .ok_or_else(|| Error::new(ErrorKind::UnknownTable(table_name.to_string())))?;

        for assignment in assignments {
            if !table.has_column(&assignment.column) {
                return Err(Error::new(ErrorKind::UnknownColumn(assignment.column.clone())));
            }
        }

        let mut target_indices = Vec::new();
        for (i, row) in table.rows.iter().enumerate() {
            let keep = match predicate {
                Some(pred) => eval_predicate(pred, &mut |c: &ColumnRef| {
                    resolve_against_table(table, row, c)
                })?,
                None => true,
            };
            if keep {
                target_indices.push(i);
            }
        }

        if target_indices.is_empty() && predicate.is_some() {
            return Err(Error::new(ErrorKind::EmptyUpdateTarget));
        }

        // Phase 1: compute and validate every candidate row without mutating the table.
        let mut candidates = Vec::with_capacity(target_indices.len());
        for &idx in &target_indices {
            let mut candidate = table.rows[idx].clone();
            for assignment in assignments {
                let new_value = eval_update_expr(table, &candidate, &assignment.expr)?;
                let col = table.column(&assignment.column).unwrap();
                let checked =
                    check_column_value(table, &candidate, col, &new_value, Some(idx))?;
                set_row_value(&mut candidate, &assignment.column, checked);
            }
            candidates.push((idx, candidate));
        }

        // Also validate each candidate against the other candidates in this
        // same batch, so two rows in one UPDATE cannot collide with each
        // other on a unique column.
        for (pos, (_, candidate)) in candidates.iter().enumerate() {
            for col in &table.columns {
                if !col.has_constraint(crate::ast::Constraint::PrimaryKey)
                    && !col.has_constraint(crate::ast::Constraint::Unique)
                {
                    continue;
                }
                let value = Table::row_value(candidate, &col.name).cloned().unwrap_or(Value::Null);
                if value.is_null() {
                    continue;
                }
                for (other_pos, (_, other)) in candidates.iter().enumerate() {
                    if other_pos == pos {
                        continue;
                    }
                    let other_value =
                        Table::row_value(other, &col.name).cloned().unwrap_or(Value::Null);
                    if !other_value.is_null() && super::predicate::values_equal(&value, &other_value) {
                        return Err(Error::new(ErrorKind::UniqueViolation {
                            column: col.name.clone(),
                            value: value.to_string(),
                        }));
                    }
                }
            }
        }

        // Phase 2: apply.
        let count = candidates.len();
        let table = self.catalog_mut().table_mut(table_name).unwrap();
        for (idx, candidate) in candidates {
            table.rows[idx] = candidate;
        }
        Ok(count)
    }

    pub(super) fn delete(&mut self, table_name: &str, predicate: Option<&Predicate>) -> Result<usize> {
        let table = self
            .catalog()
            .table(table_name)
            .ok_or_else(|| Error::new(ErrorKind::UnknownTable(table_name.to_string())))?;

        let mut keep_mask = Vec::with_capacity(table.rows.len());
        let mut removed = 0;
        for row in &table.rows {
            let matches = match predicate {
                Some(pred) => eval_predicate(pred, &mut |c: &ColumnRef| {
                    resolve_against_table(table, row, c)
                })?,
                None => true,
            };
            if matches {
                removed += 1;
            }
            keep_mask.push(!matches);
        }

        if removed == 0 && predicate.is_some() {
            return Err(Error::new(ErrorKind::EmptyDeleteTarget));
        }

        let table = self.catalog_mut().table_mut(table_name).unwrap();
        let mut mask = keep_mask.into_iter();
        table.rows.retain(|_| mask.next().unwrap_or(true));
        Ok(removed)
    }
}

/// Apply, in order: type coercion, `NOT NULL`, primary-key uniqueness,
/// `UNIQUE` uniqueness. `exclude_row` excludes a row (by index, identified
/// by its primary-key/unique value) from the uniqueness comparison set —
/// used by `UPDATE` to exclude the row being updated from colliding with
/// itself.
pub(super) fn check_column_value(
    table: &Table,
    _current_row: &Row,
    col: &ColumnSchema,
    raw: &Value,
    exclude_row: Option<usize>,
) -> Result<Value> {
    let coerced = raw.coerce_to(&col.sql_type).ok_or_else(|| {
        Error::new(ErrorKind::TypeCoercion {
            value: raw.to_string(),
            target: col.sql_type.to_string(),
        })
    })?;

    if col.has_constraint(crate::ast::Constraint::NotNull) && coerced.is_null() {
        return Err(Error::new(ErrorKind::NotNullViolation(col.name.clone())));
    }

    let is_primary_key = col.has_constraint(crate::ast::Constraint::PrimaryKey);
    let is_unique = col.has_constraint(crate::ast::Constraint::Unique);
    if (is_primary_key || is_unique) && !coerced.is_null() {
        for (i, row) in table.rows.iter().enumerate() {
            if Some(i) == exclude_row {
                continue;
            }
            let existing = Table::row_value(row, &col.name).cloned().unwrap_or(Value::Null);
            if !existing.is_null() && super::predicate::values_equal(&existing, &coerced) {
                return Err(if is_primary_key {
                    Error::new(ErrorKind::PrimaryKeyViolation {
                        column: col.name.clone(),
                        value: coerced.to_string(),
                    })
                } else {
                    Error::new(ErrorKind::UniqueViolation {
                        column: col.name.clone(),
                        value: coerced.to_string(),
                    })
                });
            }
        }
    }

    Ok(coerced)
}

pub(super) fn set_row_value(row: &mut Row, column: &str, value: Value) {
    if let Some(entry) = row.iter_mut().find(|(c, _)| c == column) {
        entry.1 = value;
    }
}

fn eval_update_expr(table: &Table, row: &Row, expr: &UpdateExpr) -> Result<Value> {
    match expr {
        UpdateExpr::Operand(op) => eval_operand(table, row, op),
        UpdateExpr::BinOp { left, op, right } => {
            let l = eval_operand(table, row, left)?;
            let r = eval_operand(table, row, right)?;
            apply_arith(*op, &l, &r)
        }
    }
}

fn eval_operand(table: &Table, row: &Row, operand: &Operand) -> Result<Value> {
    match operand {
        Operand::Literal(lit) => Ok(Value::from(lit)),
        Operand::Column(col) => resolve_against_table(table, row, col),
    }
}

fn apply_arith(op: ArithOp, left: &Value, right: &Value) -> Result<Value> {
    let a = left.as_f64().ok_or_else(|| {
        Error::new(ErrorKind::TypeCoercion {
            value: left.to_string(),
            target: "a number".to_string(),
        })
    })?;
    let b = right.as_f64().ok_or_else(|| {
        Error::new(ErrorKind::TypeCoercion {
            value: right.to_string(),
            target: "a number".to_string(),
        })
    })?;

    if op == ArithOp::Div && b == 0.0 {
        return Err(Error::new(ErrorKind::DivideByZero));
    }

    let result = match op {
        ArithOp::Add => a + b,
        ArithOp::Sub => a - b,
        ArithOp::Mul => a * b,
        ArithOp::Div => a / b,
    };

    let both_int = matches!(left, Value::Int(_)) && matches!(right, Value::Int(_));
    if both_int && result.fract() == 0.0 {
        Ok(Value::Int(result as i64))
    } else {
        Ok(Value::Float(result))
    }
}
