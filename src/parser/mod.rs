//! SQL Parser.
//!
//! Recursive-descent over a token cursor, with a small Pratt-style
//! precedence climb for boolean `WHERE` expressions (see
//! [`predicate::parse_predicate`]). Each statement is followed by a
//! mandatory `;`, consumed by [`Parser::parse`].

mod predicate;
mod query;
mod stmt;

use crate::ast::Statement;
use crate::error::{Error, Result, Span};
use crate::lexer::{Keyword, Token, TokenKind};
use crate::reader::{Cursor, TokenCursor};

/// Parse a full token stream into an ordered list of statements.
pub fn parse(tokens: Vec<Token>) -> Result<Vec<Statement>> {
    Parser::new(tokens).parse()
}

pub struct Parser {
    cursor: TokenCursor<Token>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof_pos = tokens.last().map(|t| t.span.end).unwrap_or(0);
        Self {
            cursor: TokenCursor::new(tokens, Token::eof(eof_pos)),
        }
    }

    pub fn parse(&mut self) -> Result<Vec<Statement>> {
        let mut statements = Vec::new();
        while !self.at_eof() {
            let stmt = self.parse_statement()?;
            statements.push(stmt);
            self.expect_kind(TokenKind::Semi, "';'")?;
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        let tok = self.current();
        match &tok.kind {
            TokenKind::Keyword(Keyword::Create) => self.parse_create_table(),
            TokenKind::Keyword(Keyword::Drop) => self.parse_drop_table(),
            TokenKind::Keyword(Keyword::Insert) => self.parse_insert(),
            TokenKind::Keyword(Keyword::Update) => self.parse_update(),
            TokenKind::Keyword(Keyword::Delete) => self.parse_delete(),
            TokenKind::Keyword(Keyword::Select) => self.parse_select().map(Statement::Select),
            _ => Err(Error::unexpected_token(
                "a statement (CREATE, INSERT, SELECT, DELETE, UPDATE or DROP)",
                tok.to_string(),
                tok.span,
            )),
        }
    }

    // ---- token-cursor utilities -------------------------------------

    fn current(&self) -> Token {
        self.cursor.peek(0)
    }

    fn peek_at(&self, k: usize) -> Token {
        self.cursor.peek(k)
    }

    fn advance(&mut self) -> Token {
        self.cursor.next()
    }

    fn at_eof(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.current().kind == *kind
    }

    fn check_keyword(&self, kw: Keyword) -> bool {
        self.current().is_keyword(kw)
    }

    /// Consume the current token if it matches `kind`, otherwise error.
    fn expect_kind(&mut self, kind: TokenKind, expected_desc: &str) -> Result<Token> {
        let tok = self.current();
        if tok.kind == kind {
            Ok(self.advance())
        } else {
            Err(Error::unexpected_token(expected_desc, tok.to_string(), tok.span))
        }
    }

    fn expect_keyword(&mut self, kw: Keyword) -> Result<Token> {
        let tok = self.current();
        if tok.is_keyword(kw) {
            Ok(self.advance())
        } else {
            Err(Error::unexpected_token(
                format!("keyword {}", kw),
                tok.to_string(),
                tok.span,
            ))
        }
    }

    fn consume_keyword(&mut self, kw: Keyword) -> bool {
        if self.check_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume_kind(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_identifier(&mut self) -> Result<String> {
        let tok = self.current();
        match tok.kind {
            TokenKind::Identifier(ref s) => {
                let s = s.clone();
                self.advance();
                Ok(s)
            }
            _ => Err(Error::unexpected_token(
                "an identifier",
                tok.to_string(),
                tok.span,
            )),
        }
    }

    fn current_span(&self) -> Span {
        self.current().span
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;
    use crate::lexer::lex;

    fn parse_sql(sql: &str) -> Result<Vec<Statement>> {
        parse(lex(sql).unwrap())
    }

    #[test]
    fn parses_create_table() {
        let stmts = parse_sql(
            "CREATE TABLE t (id INT PRIMARY KEY, name VARCHAR(10) NOT NULL);",
        )
        .unwrap();
        match &stmts[0] {
            Statement::CreateTable { name, columns } => {
                assert_eq!(name, "t");
                assert_eq!(columns.len(), 2);
                assert_eq!(columns[0].constraints, vec![Constraint::PrimaryKey]);
            }
            _ => panic!("expected CreateTable"),
        }
    }

    #[test]
    fn requires_trailing_semicolon() {
        assert!(parse_sql("DROP TABLE t").is_err());
    }

    #[test]
    fn parses_multiple_statements() {
        let stmts = parse_sql("DROP TABLE a; DROP TABLE b;").unwrap();
        assert_eq!(stmts.len(), 2);
    }

    #[test]
    fn unknown_statement_keyword_is_error() {
        assert!(parse_sql("FOO BAR;").is_err());
    }
}
