//! # minisql
//!
//! A small embeddable SQL lexer, parser and in-memory interpreter.
//!
//! This library parses and executes a deliberately small SQL subset —
//! `CREATE`/`DROP TABLE`, `INSERT`/`UPDATE`/`DELETE`, and `SELECT` with
//! projection, filtering, grouping, aggregation, ordering and `LIMIT` —
//! against an in-process catalog with no persistence. It is meant as an
//! embeddable query layer, not a server: there is no wire protocol, no
//! on-disk format, and no concurrency model beyond `&mut self`.
//!
//! ## Quick start
//!
//! ```rust
//! use minisql::{lex, parse, Interpreter};
//!
//! let sql = "CREATE TABLE users (id INT PRIMARY KEY, name VARCHAR(20));
//!            INSERT INTO users VALUES (1, 'Ada');
//!            SELECT name FROM users WHERE id = 1;";
//!
//! let tokens = lex(sql).expect("lex error");
//! let statements = parse(tokens).expect("parse error");
//!
//! let mut interp = Interpreter::new();
//! let results = interp.execute(&statements);
//! ```
//!
//! ## Supported SQL
//!
//! | Statement | Notes |
//! |-----------|-------|
//! | `CREATE TABLE` | `INT` / `VARCHAR(n)`, `PRIMARY KEY` / `NOT NULL` / `UNIQUE` |
//! | `DROP TABLE` | |
//! | `INSERT INTO ... VALUES (...)` | positional, declared column order |
//! | `UPDATE ... SET ... WHERE ...` | `WHERE` optional; single arithmetic expr per assignment |
//! | `DELETE FROM ... WHERE ...` | `WHERE` optional |
//! | `SELECT` | `*`, columns, `COUNT`/`SUM`/`AVG`/`MIN`/`MAX`, `DISTINCT`, multi-table `FROM` (Cartesian product), `WHERE`, `GROUP BY`, `ORDER BY`, `LIMIT` |

pub mod ast;
pub mod catalog;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod reader;
pub mod types;

pub use ast::*;
pub use catalog::{Catalog, ColumnSchema, Row, Table as TableSchema};
pub use error::{Error, ErrorKind, Result};
pub use interpreter::{ExecResult, Interpreter};
pub use lexer::{lex, Keyword, Token, TokenKind};
pub use parser::parse;
pub use types::{SqlType, Value};
