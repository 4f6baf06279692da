//! In-memory table storage: schema plus row data.

use crate::ast::Constraint;
use crate::types::{SqlType, Value};

/// Schema information for a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchema {
    pub name: String,
    pub sql_type: SqlType,
    pub constraints: Vec<Constraint>,
}

impl ColumnSchema {
    pub fn has_constraint(&self, c: Constraint) -> bool {
        self.constraints.contains(&c)
    }
}

/// A row: an ordered sequence of `(column name, value)` pairs, one per
/// declared column of its table, in declaration order.
pub type Row = Vec<(String, Value)>;

/// A single in-memory table: an ordered column schema list, the optional
/// primary-key column name, and the row data.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub name: String,
    pub columns: Vec<ColumnSchema>,
    pub primary_key: Option<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnSchema>) -> Self {
        let primary_key = columns
            .iter()
            .find(|c| c.has_constraint(Constraint::PrimaryKey))
            .map(|c| c.name.clone());
        Self {
            name: name.into(),
            columns,
            primary_key,
            rows: Vec::new(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Value of `column` in `row`, by linear scan (rows are small in this
    /// engine's scope; no secondary index is maintained).
    pub fn row_value<'a>(row: &'a Row, column: &str) -> Option<&'a Value> {
        row.iter().find(|(c, _)| c == column).map(|(_, v)| v)
    }
}
