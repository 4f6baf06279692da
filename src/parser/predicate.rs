//! `WHERE` predicate parsing: `or → and (OR and)* ; and → primary (AND
//! primary)* ; primary → ( or ) | compare`.

use super::Parser;
use crate::ast::{ColumnRef, Comparand, CompareOp, Literal, Predicate};
use crate::error::{Error, Result};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    pub(super) fn parse_predicate(&mut self) -> Result<Predicate> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Predicate> {
        let mut left = self.parse_and()?;
        while self.consume_keyword(Keyword::Or) {
            let right = self.parse_and()?;
            left = Predicate::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Predicate> {
        let mut left = self.parse_primary()?;
        while self.consume_keyword(Keyword::And) {
            let right = self.parse_primary()?;
            left = Predicate::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Predicate> {
        if self.consume_kind(&TokenKind::LParen) {
            let inner = self.parse_or()?;
            self.expect_kind(TokenKind::RParen, "')'")?;
            return Ok(inner);
        }
        self.parse_compare()
    }

    fn parse_compare(&mut self) -> Result<Predicate> {
        let left = self.parse_column_ref()?;
        let op = self.parse_compare_op()?;
        let right = self.parse_comparand()?;
        Ok(Predicate::Compare { left, op, right })
    }

    fn parse_compare_op(&mut self) -> Result<CompareOp> {
        let tok = self.current();
        let op = match tok.kind {
            TokenKind::Eq => CompareOp::Eq,
            TokenKind::Neq => CompareOp::Neq,
            TokenKind::Lt => CompareOp::Lt,
            TokenKind::Lte => CompareOp::Lte,
            TokenKind::Gt => CompareOp::Gt,
            TokenKind::Gte => CompareOp::Gte,
            TokenKind::Like => CompareOp::Like,
            _ => {
                return Err(Error::unexpected_token(
                    "a comparison operator",
                    tok.to_string(),
                    tok.span,
                ))
            }
        };
        self.advance();
        Ok(op)
    }

    fn parse_comparand(&mut self) -> Result<Comparand> {
        let tok = self.current();
        match tok.kind {
            TokenKind::Integer(n) => {
                self.advance();
                Ok(Comparand::Literal(Literal::Int(n)))
            }
            TokenKind::Float(f) => {
                self.advance();
                Ok(Comparand::Literal(Literal::Float(f)))
            }
            TokenKind::String(ref s) => {
                let s = s.clone();
                self.advance();
                Ok(Comparand::Literal(Literal::Str(s)))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(Comparand::Literal(Literal::Null))
            }
            TokenKind::Identifier(_) => Ok(Comparand::Column(self.parse_column_ref()?)),
            _ => Err(Error::unexpected_token(
                "a number, string, or column reference",
                tok.to_string(),
                tok.span,
            )),
        }
    }

    /// `<ident>` or `<ident> DOT <ident>`.
    pub(super) fn parse_column_ref(&mut self) -> Result<ColumnRef> {
        let first = self.expect_identifier()?;
        if self.consume_kind(&TokenKind::Dot) {
            let second = self.expect_identifier()?;
            Ok(ColumnRef::qualified(first, second))
        } else {
            Ok(ColumnRef::bare(first))
        }
    }
}
