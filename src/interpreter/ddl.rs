//! `CREATE TABLE` and `DROP TABLE`.

use super::Interpreter;
use crate::ast::{ColumnDef, Constraint};
use crate::catalog::{ColumnSchema, Table};
use crate::error::{Error, ErrorKind, Result};

impl Interpreter {
    pub(super) fn create_table(&mut self, name: &str, columns: &[ColumnDef]) -> Result<()> {
        if self.catalog().contains(name) {
            return Err(Error::new(ErrorKind::DuplicateTable(name.to_string())));
        }

        let pk_count = columns
            .iter()
            .filter(|c| c.constraints.contains(&Constraint::PrimaryKey))
            .count();
        if pk_count > 1 {
            return Err(Error::new(ErrorKind::DuplicatePrimaryKey(name.to_string())));
        }

        let columns = columns
            .iter()
            .map(|c| ColumnSchema {
                name: c.name.clone(),
                sql_type: c.sql_type.clone(),
                constraints: c.constraints.clone(),
            })
            .collect();

        self.catalog_mut().add_table(Table::new(name, columns));
        Ok(())
    }

    pub(super) fn drop_table(&mut self, name: &str) -> Result<()> {
        if !self.catalog_mut().remove_table(name) {
            return Err(Error::new(ErrorKind::UnknownTable(name.to_string())));
        }
        Ok(())
    }
}
