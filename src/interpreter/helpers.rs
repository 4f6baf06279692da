//! Row-level admin surface: a non-SQL way to read and mutate rows directly
//! by primary key, for embedders that want table access without going
//! through the lexer/parser. Empty strings passed here are treated as
//! `NULL`, unlike the SQL path, where only the literal `NULL` is null.

use super::dml::{check_column_value, set_row_value};
use super::predicate::values_equal;
use super::Interpreter;
use crate::catalog::Row;
use crate::error::{Error, ErrorKind, Result};
use crate::types::Value;

impl Interpreter {
    /// The first `limit` rows of `table`, in storage order.
    pub fn get_table_data(&self, table: &str, limit: usize) -> Result<Vec<Row>> {
        let table = self
            .catalog()
            .table(table)
            .ok_or_else(|| Error::new(ErrorKind::UnknownTable(table.to_string())))?;
        Ok(table.rows.iter().take(limit).cloned().collect())
    }

    /// Insert a row given positional values, in declared column order.
    /// Returns the stored row (after type coercion).
    pub fn insert_row(&mut self, table_name: &str, values: Vec<Value>) -> Result<Row> {
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
        for (col, raw) in columns.iter().zip(values.into_iter()) {
            let raw = empty_string_to_null(raw);
            let value = check_column_value(table, &row, col, &raw, None)?;
            row.push((col.name.clone(), value));
        }

        let stored = row.clone();
        self.catalog_mut().table_mut(table_name).unwrap().rows.push(row);
        Ok(stored)
    }

    /// Update the row whose primary-key value equals `pk`. Returns whether
    /// a row was found and updated.
    pub fn update_row(
        &mut self,
        table_name: &str,
        pk: Value,
        updates: Vec<(String, Value)>,
    ) -> Result<bool> {
        let table = self
            .catalog()
            .table(table_name)
            .ok_or_else(|| Error::new(ErrorKind::UnknownTable(table_name.to_string())))?;
        let pk_column = table
            .primary_key
            .clone()
            .ok_or_else(|| Error::new(ErrorKind::Internal(format!(
                "table '{}' has no primary key",
                table_name
            ))))?;
        let pk_type = table.column(&pk_column).unwrap().sql_type.clone();
        let Some(pk) = pk.coerce_to(&pk_type) else {
            return Ok(false);
        };

        let Some(idx) = table.rows.iter().position(|row| {
            crate::catalog::Table::row_value(row, &pk_column)
                .map(|v| values_equal(v, &pk))
                .unwrap_or(false)
        }) else {
            return Ok(false);
        };

        let mut candidate = table.rows[idx].clone();
        for (column, raw) in &updates {
            let col = table
                .column(column)
                .ok_or_else(|| Error::new(ErrorKind::UnknownColumn(column.clone())))?;
            let raw = empty_string_to_null(raw.clone());
            let checked = check_column_value(table, &candidate, col, &raw, Some(idx))?;
            set_row_value(&mut candidate, column, checked);
        }

        let table = self.catalog_mut().table_mut(table_name).unwrap();
        table.rows[idx] = candidate;
        Ok(true)
    }

    /// Delete the row whose primary-key value equals `pk`. Returns whether
    /// a row was found and removed.
    pub fn delete_row(&mut self, table_name: &str, pk: Value) -> Result<bool> {
        let table = self
            .catalog()
            .table(table_name)
            .ok_or_else(|| Error::new(ErrorKind::UnknownTable(table_name.to_string())))?;
        let pk_column = table
            .primary_key
            .clone()
            .ok_or_else(|| Error::new(ErrorKind::Internal(format!(
                "table '{}' has no primary key",
                table_name
            ))))?;
        let pk_type = table.column(&pk_column).unwrap().sql_type.clone();
        let Some(pk) = pk.coerce_to(&pk_type) else {
            return Ok(false);
        };

        let before = table.rows.len();
        let table = self.catalog_mut().table_mut(table_name).unwrap();
        table.rows.retain(|row| {
            crate::catalog::Table::row_value(row, &pk_column)
                .map(|v| !values_equal(v, &pk))
                .unwrap_or(true)
        });
        Ok(table.rows.len() != before)
    }
}

fn empty_string_to_null(value: Value) -> Value {
    match &value {
        Value::Str(s) if s.is_empty() => Value::Null,
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::parser::parse;

    fn setup() -> Interpreter {
        let mut interp = Interpreter::new();
        let stmts = parse(lex("CREATE TABLE t (id INT PRIMARY KEY, name VARCHAR(20));").unwrap()).unwrap();
        interp.execute(&stmts);
        interp
    }

    #[test]
    fn insert_row_returns_stored_row() {
        let mut interp = setup();
        let row = interp.insert_row("t", vec![Value::Int(1), Value::Str("Alice".into())]).unwrap();
        assert_eq!(row.len(), 2);
        assert_eq!(interp.get_table_data("t", 10).unwrap().len(), 1);
    }

    #[test]
    fn empty_string_is_treated_as_null() {
        let mut interp = Interpreter::new();
        let stmts = parse(lex("CREATE TABLE t (id INT PRIMARY KEY, note VARCHAR(20));").unwrap()).unwrap();
        interp.execute(&stmts);
        interp.insert_row("t", vec![Value::Int(1), Value::Str(String::new())]).unwrap();
        let rows = interp.get_table_data("t", 10).unwrap();
        assert_eq!(crate::catalog::Table::row_value(&rows[0], "note"), Some(&Value::Null));
    }

    #[test]
    fn update_row_by_primary_key() {
        let mut interp = setup();
        interp.insert_row("t", vec![Value::Int(1), Value::Str("Alice".into())]).unwrap();
        let found = interp
            .update_row("t", Value::Int(1), vec![("name".to_string(), Value::Str("Bob".into()))])
            .unwrap();
        assert!(found);
        let rows = interp.get_table_data("t", 10).unwrap();
        assert_eq!(crate::catalog::Table::row_value(&rows[0], "name"), Some(&Value::Str("Bob".into())));
    }

    #[test]
    fn update_row_missing_pk_returns_false() {
        let mut interp = setup();
        let found = interp.update_row("t", Value::Int(99), vec![]).unwrap();
        assert!(!found);
    }

    #[test]
    fn update_row_coerces_pk_before_comparison() {
        let mut interp = setup();
        interp.insert_row("t", vec![Value::Int(5), Value::Str("Alice".into())]).unwrap();
        // "5.0" does not coerce to an INT pk, so this must not match id = 5.
        let found = interp
            .update_row("t", Value::Str("5.0".into()), vec![("name".to_string(), Value::Str("Bob".into()))])
            .unwrap();
        assert!(!found);
        let rows = interp.get_table_data("t", 10).unwrap();
        assert_eq!(crate::catalog::Table::row_value(&rows[0], "name"), Some(&Value::Str("Alice".into())));
    }

    #[test]
    fn delete_row_by_primary_key() {
        let mut interp = setup();
        interp.insert_row("t", vec![Value::Int(1), Value::Str("Alice".into())]).unwrap();
        assert!(interp.delete_row("t", Value::Int(1)).unwrap());
        assert_eq!(interp.get_table_data("t", 10).unwrap().len(), 0);
    }

    #[test]
    fn get_table_data_respects_limit() {
        let mut interp = setup();
        interp.insert_row("t", vec![Value::Int(1), Value::Str("A".into())]).unwrap();
        interp.insert_row("t", vec![Value::Int(2), Value::Str("B".into())]).unwrap();
        assert_eq!(interp.get_table_data("t", 1).unwrap().len(), 1);
    }
}
