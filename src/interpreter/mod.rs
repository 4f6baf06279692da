//! The interpreter: executes statements against a shared [`Catalog`].
//!
//! Statements run in order against the same catalog instance. A failing
//! statement is captured as an [`ExecResult::Error`] and does not abort the
//! batch (spec.md §4.4, §7).

mod ddl;
mod dml;
mod helpers;
mod predicate;
mod select;

use crate::ast::Statement;
use crate::catalog::{Catalog, Row, Table};

/// The outcome of executing one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecResult {
    /// A human-readable success message for DDL/DML.
    Message(String),
    /// The output rows of a `SELECT`.
    Rows(Vec<Row>),
    /// A captured error message; does not halt the batch.
    Error(String),
}

/// Owns the catalog and dispatches statements to it.
#[derive(Debug, Default)]
pub struct Interpreter {
    catalog: Catalog,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::new(),
        }
    }

    /// Execute a batch of statements in order, one [`ExecResult`] per
    /// statement.
    pub fn execute(&mut self, statements: &[Statement]) -> Vec<ExecResult> {
        statements
            .iter()
            .map(|stmt| self.execute_one(stmt))
            .collect()
    }

    fn execute_one(&mut self, stmt: &Statement) -> ExecResult {
        let result = match stmt {
            Statement::CreateTable { name, columns } => self
                .create_table(name, columns)
                .map(|_| ExecResult::Message(format!("Table '{}' created.", name))),
            Statement::DropTable { name } => self
                .drop_table(name)
                .map(|_| ExecResult::Message(format!("Table '{}' dropped.", name))),
            Statement::Insert { table, values } => self
                .insert(table, values)
                .map(|_| ExecResult::Message("1 row inserted.".to_string())),
            Statement::Update {
                table,
                assignments,
                predicate,
            } => self
                .update(table, assignments, predicate.as_ref())
                .map(|n| ExecResult::Message(format!("{} row(s) updated.", n))),
            Statement::Delete { table, predicate } => self
                .delete(table, predicate.as_ref())
                .map(|n| ExecResult::Message(format!("{} row(s) deleted.", n))),
            Statement::Select(select) => self.select(select).map(ExecResult::Rows),
        };
        result.unwrap_or_else(|e| ExecResult::Error(e.to_string()))
    }

    /// Schema introspection: the table's ordered column list and primary
    /// key, or `None` if the table does not exist.
    pub fn schema(&self, table: &str) -> Option<&Table> {
        self.catalog.table(table)
    }

    pub(crate) fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub(crate) fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::parser::parse;

    fn run(interp: &mut Interpreter, sql: &str) -> Vec<ExecResult> {
        let stmts = parse(lex(sql).unwrap()).unwrap();
        interp.execute(&stmts)
    }

    #[test]
    fn failing_statement_does_not_abort_batch() {
        let mut interp = Interpreter::new();
        let results = run(
            &mut interp,
            "CREATE TABLE t (id INT PRIMARY KEY); DROP TABLE missing; INSERT INTO t VALUES (1);",
        );
        assert!(matches!(results[0], ExecResult::Message(_)));
        assert!(matches!(results[1], ExecResult::Error(_)));
        assert!(matches!(results[2], ExecResult::Message(_)));
    }

    #[test]
    fn select_never_mutates_catalog() {
        let mut interp = Interpreter::new();
        run(&mut interp, "CREATE TABLE t (id INT PRIMARY KEY); INSERT INTO t VALUES (1);");
        let before = interp.schema("t").unwrap().rows.len();
        run(&mut interp, "SELECT * FROM t;");
        let after = interp.schema("t").unwrap().rows.len();
        assert_eq!(before, after);
    }
}
