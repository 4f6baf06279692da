//! `CREATE TABLE`, `DROP TABLE`, `INSERT`, `UPDATE` and `DELETE` parsing.

use super::Parser;
use crate::ast::{ArithOp, Assignment, ColumnDef, Constraint, Literal, Operand, Statement, UpdateExpr};
use crate::error::{Error, Result};
use crate::lexer::{Keyword, TokenKind};
use crate::types::SqlType;

impl Parser {
    /// `CREATE TABLE <ident> ( <col-def> (, <col-def>)* )`.
    pub(super) fn parse_create_table(&mut self) -> Result<Statement> {
        self.expect_keyword(Keyword::Create)?;
        self.expect_keyword(Keyword::Table)?;
        let name = self.expect_identifier()?;
        self.expect_kind(TokenKind::LParen, "'('")?;

        let mut columns = vec![self.parse_column_def()?];
        while self.consume_kind(&TokenKind::Comma) {
            columns.push(self.parse_column_def()?);
        }
        self.expect_kind(TokenKind::RParen, "')'")?;

        Ok(Statement::CreateTable { name, columns })
    }

    /// `<ident> <type> [(N)] <constraint>*`.
    fn parse_column_def(&mut self) -> Result<ColumnDef> {
        let name = self.expect_identifier()?;
        let sql_type = self.parse_sql_type()?;

        let mut constraints = Vec::new();
        loop {
            if self.consume_keyword(Keyword::Primary) {
                self.expect_keyword(Keyword::Key)?;
                constraints.push(Constraint::PrimaryKey);
            } else if self.consume_keyword(Keyword::Not) {
                self.expect_keyword(Keyword::Null)?;
                constraints.push(Constraint::NotNull);
            } else if self.consume_keyword(Keyword::Unique) {
                constraints.push(Constraint::Unique);
            } else {
                break;
            }
        }

        Ok(ColumnDef {
            name,
            sql_type,
            constraints,
        })
    }

    fn parse_sql_type(&mut self) -> Result<SqlType> {
        let tok = self.current();
        let sql_type = match tok.kind {
            TokenKind::Keyword(Keyword::Int) => {
                self.advance();
                SqlType::Int
            }
            TokenKind::Keyword(Keyword::Varchar) => {
                self.advance();
                let len = if self.consume_kind(&TokenKind::LParen) {
                    let len_tok = self.current();
                    let n = match len_tok.kind {
                        TokenKind::Integer(n) if n > 0 => n as u32,
                        _ => {
                            return Err(Error::unexpected_token(
                                "a positive integer length",
                                len_tok.to_string(),
                                len_tok.span,
                            ))
                        }
                    };
                    self.advance();
                    self.expect_kind(TokenKind::RParen, "')'")?;
                    Some(n)
                } else {
                    None
                };
                SqlType::Varchar(len)
            }
            _ => {
                return Err(Error::unexpected_token(
                    "a column type (INT or VARCHAR)",
                    tok.to_string(),
                    tok.span,
                ))
            }
        };
        Ok(sql_type)
    }

    /// `DROP TABLE <ident>`.
    pub(super) fn parse_drop_table(&mut self) -> Result<Statement> {
        self.expect_keyword(Keyword::Drop)?;
        self.expect_keyword(Keyword::Table)?;
        let name = self.expect_identifier()?;
        Ok(Statement::DropTable { name })
    }

    /// `INSERT INTO <ident> VALUES ( <literal> (, <literal>)* )`.
    pub(super) fn parse_insert(&mut self) -> Result<Statement> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;
        let table = self.expect_identifier()?;
        self.expect_keyword(Keyword::Values)?;
        self.expect_kind(TokenKind::LParen, "'('")?;

        let mut values = vec![self.parse_literal()?];
        while self.consume_kind(&TokenKind::Comma) {
            values.push(self.parse_literal()?);
        }
        self.expect_kind(TokenKind::RParen, "')'")?;

        Ok(Statement::Insert { table, values })
    }

    fn parse_literal(&mut self) -> Result<Literal> {
        let tok = self.current();
        let lit = match tok.kind {
            TokenKind::Integer(n) => Literal::Int(n),
            TokenKind::Float(f) => Literal::Float(f),
            TokenKind::String(ref s) => Literal::Str(s.clone()),
            TokenKind::Keyword(Keyword::Null) => Literal::Null,
            _ => {
                return Err(Error::unexpected_token(
                    "a number, string, or NULL literal",
                    tok.to_string(),
                    tok.span,
                ))
            }
        };
        self.advance();
        Ok(lit)
    }

    /// `UPDATE <ident> SET <ident> = <expr> (, <ident> = <expr>)* [WHERE <pred>]`.
    pub(super) fn parse_update(&mut self) -> Result<Statement> {
        self.expect_keyword(Keyword::Update)?;
        let table = self.expect_identifier()?;
        self.expect_keyword(Keyword::Set)?;

        let mut assignments = vec![self.parse_assignment()?];
        while self.consume_kind(&TokenKind::Comma) {
            assignments.push(self.parse_assignment()?);
        }

        let predicate = if self.consume_keyword(Keyword::Where) {
            Some(self.parse_predicate()?)
        } else {
            None
        };

        Ok(Statement::Update {
            table,
            assignments,
            predicate,
        })
    }

    fn parse_assignment(&mut self) -> Result<Assignment> {
        let column = self.expect_identifier()?;
        self.expect_kind(TokenKind::Eq, "'='")?;
        let expr = self.parse_update_expr()?;
        Ok(Assignment { column, expr })
    }

    /// A single literal/column, or a three-token `operand OP operand` form.
    /// Parsed until `COMMA|WHERE|SEMI|eof`, per spec.md §4.3.
    fn parse_update_expr(&mut self) -> Result<UpdateExpr> {
        let left = self.parse_operand()?;
        let op = match self.current().kind {
            TokenKind::Plus => Some(ArithOp::Add),
            TokenKind::Minus => Some(ArithOp::Sub),
            TokenKind::Asterisk => Some(ArithOp::Mul),
            TokenKind::Slash => Some(ArithOp::Div),
            _ => None,
        };
        match op {
            Some(op) => {
                self.advance();
                let right = self.parse_operand()?;
                Ok(UpdateExpr::BinOp { left, op, right })
            }
            None => Ok(UpdateExpr::Operand(left)),
        }
    }

    fn parse_operand(&mut self) -> Result<Operand> {
        let tok = self.current();
        match tok.kind {
            TokenKind::Integer(n) => {
                self.advance();
                Ok(Operand::Literal(Literal::Int(n)))
            }
            TokenKind::Float(f) => {
                self.advance();
                Ok(Operand::Literal(Literal::Float(f)))
            }
            TokenKind::String(ref s) => {
                let s = s.clone();
                self.advance();
                Ok(Operand::Literal(Literal::Str(s)))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(Operand::Literal(Literal::Null))
            }
            TokenKind::Identifier(_) => Ok(Operand::Column(self.parse_column_ref()?)),
            _ => Err(Error::unexpected_token(
                "a number, string, column reference, or NULL",
                tok.to_string(),
                tok.span,
            )),
        }
    }

    /// `DELETE FROM <ident> [WHERE <pred>]`.
    pub(super) fn parse_delete(&mut self) -> Result<Statement> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;
        let table = self.expect_identifier()?;
        let predicate = if self.consume_keyword(Keyword::Where) {
            Some(self.parse_predicate()?)
        } else {
            None
        };
        Ok(Statement::Delete { table, predicate })
    }
}
