//! Token definitions for the SQL lexer.

use crate::error::Span;
use std::fmt;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
        }
    }

    pub fn eof(pos: usize) -> Self {
        Self::new(TokenKind::Eof, Span::point(pos), "")
    }

    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(&self.kind, TokenKind::Keyword(k) if *k == kw)
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// The identifier text, if this token is an `IDENTIFIER`.
    pub fn identifier(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Identifier(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// The kind of token. A closed set, per the lexical grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Reserved words (those not classified as keyword-operators below)
    Keyword(Keyword),

    // Keyword-operators: lexed from identifier-shaped text but classified
    // as operators rather than keywords.
    Like,
    In,
    Between,

    // Value tokens
    Identifier(String),
    Integer(i64),
    Float(f64),
    String(String),

    // Comparison operators
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,

    // Arithmetic operators
    Plus,
    Minus,
    Asterisk,
    Slash,

    // Punctuation
    LParen,
    RParen,
    Comma,
    Semi,
    Dot,
    LBracket,
    RBracket,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(kw) => write!(f, "keyword {}", kw),
            TokenKind::Like => write!(f, "LIKE"),
            TokenKind::In => write!(f, "IN"),
            TokenKind::Between => write!(f, "BETWEEN"),
            TokenKind::Identifier(s) => write!(f, "identifier '{}'", s),
            TokenKind::Integer(n) => write!(f, "integer {}", n),
            TokenKind::Float(n) => write!(f, "float {}", n),
            TokenKind::String(s) => write!(f, "string '{}'", s),
            TokenKind::Eq => write!(f, "'='"),
            TokenKind::Neq => write!(f, "'<>'"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Lte => write!(f, "'<='"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::Gte => write!(f, "'>='"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Asterisk => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Semi => write!(f, "';'"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// SQL keywords recognized by the lexer (excluding `LIKE`/`IN`/`BETWEEN`,
/// which are classified as keyword-operators, see [`TokenKind`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Select,
    From,
    Where,
    Group,
    By,
    Order,
    Asc,
    Desc,
    Limit,
    Distinct,
    As,
    And,
    Or,
    Not,
    Null,
    Primary,
    Key,
    Unique,
    Into,
    Values,
    Set,
    Table,
    Create,
    Drop,
    Insert,
    Update,
    Delete,
    Int,
    Varchar,
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Select => "SELECT",
            Keyword::From => "FROM",
            Keyword::Where => "WHERE",
            Keyword::Group => "GROUP",
            Keyword::By => "BY",
            Keyword::Order => "ORDER",
            Keyword::Asc => "ASC",
            Keyword::Desc => "DESC",
            Keyword::Limit => "LIMIT",
            Keyword::Distinct => "DISTINCT",
            Keyword::As => "AS",
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::Not => "NOT",
            Keyword::Null => "NULL",
            Keyword::Primary => "PRIMARY",
            Keyword::Key => "KEY",
            Keyword::Unique => "UNIQUE",
            Keyword::Into => "INTO",
            Keyword::Values => "VALUES",
            Keyword::Set => "SET",
            Keyword::Table => "TABLE",
            Keyword::Create => "CREATE",
            Keyword::Drop => "DROP",
            Keyword::Insert => "INSERT",
            Keyword::Update => "UPDATE",
            Keyword::Delete => "DELETE",
            Keyword::Int => "INT",
            Keyword::Varchar => "VARCHAR",
            Keyword::Count => "COUNT",
            Keyword::Sum => "SUM",
            Keyword::Avg => "AVG",
            Keyword::Min => "MIN",
            Keyword::Max => "MAX",
        }
    }

    /// Classify an uppercased identifier lexeme as a reserved word, if it
    /// is one. `LIKE`/`IN`/`BETWEEN` are returned as keyword-operator token
    /// kinds directly rather than as a `Keyword` variant, per the lexer's
    /// scanning rules.
    pub fn lookup(upper: &str) -> Option<TokenKind> {
        let kw = match upper {
            "SELECT" => Keyword::Select,
            "FROM" => Keyword::From,
            "WHERE" => Keyword::Where,
            "GROUP" => Keyword::Group,
            "BY" => Keyword::By,
            "ORDER" => Keyword::Order,
            "ASC" => Keyword::Asc,
            "DESC" => Keyword::Desc,
            "LIMIT" => Keyword::Limit,
            "DISTINCT" => Keyword::Distinct,
            "AS" => Keyword::As,
            "AND" => Keyword::And,
            "OR" => Keyword::Or,
            "NOT" => Keyword::Not,
            "NULL" => Keyword::Null,
            "PRIMARY" => Keyword::Primary,
            "KEY" => Keyword::Key,
            "UNIQUE" => Keyword::Unique,
            "INTO" => Keyword::Into,
            "VALUES" => Keyword::Values,
            "SET" => Keyword::Set,
            "TABLE" => Keyword::Table,
            "CREATE" => Keyword::Create,
            "DROP" => Keyword::Drop,
            "INSERT" => Keyword::Insert,
            "UPDATE" => Keyword::Update,
            "DELETE" => Keyword::Delete,
            "INT" => Keyword::Int,
            "VARCHAR" => Keyword::Varchar,
            "COUNT" => Keyword::Count,
            "SUM" => Keyword::Sum,
            "AVG" => Keyword::Avg,
            "MIN" => Keyword::Min,
            "MAX" => Keyword::Max,
            "LIKE" => return Some(TokenKind::Like),
            "IN" => return Some(TokenKind::In),
            "BETWEEN" => return Some(TokenKind::Between),
            _ => return None,
        };
        Some(TokenKind::Keyword(kw))
    }
}
