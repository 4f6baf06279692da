//! Error handling for the lexer, parser and interpreter.
//!
//! This module provides a single error type and utilities for representing
//! and displaying lexical, syntactic, schema, type/constraint and execution
//! errors with source location information where one is available.

use std::fmt;

/// A span in the source code, represented as byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span from start and end offsets.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a span for a single position.
    pub fn point(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Merge two spans into one that covers both.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    // Lexical errors
    UnrecognizedCharacter(char),
    UnterminatedString,
    UnterminatedBlockComment,
    MalformedNumber(String),

    // Syntactic errors
    UnexpectedToken { expected: String, found: String },
    UnknownStatementKeyword(String),

    // Schema errors
    DuplicateTable(String),
    UnknownTable(String),
    DuplicatePrimaryKey(String),
    UnknownColumn(String),

    // Type / constraint errors
    TypeCoercion { value: String, target: String },
    NotNullViolation(String),
    PrimaryKeyViolation { column: String, value: String },
    UniqueViolation { column: String, value: String },

    // Execution errors
    UnresolvedColumn(String),
    AmbiguousColumn(String),
    DivideByZero,
    InvalidLikeOperand,
    EmptyUpdateTarget,
    EmptyDeleteTarget,
    ColumnCountMismatch { expected: usize, found: usize },

    // General
    Internal(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnrecognizedCharacter(c) => write!(f, "unrecognized character '{}'", c),
            ErrorKind::UnterminatedString => write!(f, "unterminated string literal"),
            ErrorKind::UnterminatedBlockComment => write!(f, "unterminated block comment"),
            ErrorKind::MalformedNumber(s) => write!(f, "malformed number '{}'", s),

            ErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "expected {}, got {}", expected, found)
            }
            ErrorKind::UnknownStatementKeyword(tok) => {
                write!(f, "expected a statement, got {}", tok)
            }

            ErrorKind::DuplicateTable(name) => write!(f, "table '{}' already exists", name),
            ErrorKind::UnknownTable(name) => write!(f, "unknown table '{}'", name),
            ErrorKind::DuplicatePrimaryKey(name) => {
                write!(f, "table '{}' declares more than one primary key", name)
            }
            ErrorKind::UnknownColumn(name) => write!(f, "unknown column '{}'", name),

            ErrorKind::TypeCoercion { value, target } => {
                write!(f, "value '{}' is not coercible to {}", value, target)
            }
            ErrorKind::NotNullViolation(col) => {
                write!(f, "null value in column '{}' violates NOT NULL constraint", col)
            }
            ErrorKind::PrimaryKeyViolation { column, value } => write!(
                f,
                "duplicate value '{}' for primary key column '{}'",
                value, column
            ),
            ErrorKind::UniqueViolation { column, value } => write!(
                f,
                "duplicate value '{}' for unique column '{}'",
                value, column
            ),

            ErrorKind::UnresolvedColumn(name) => write!(f, "cannot resolve column '{}'", name),
            ErrorKind::AmbiguousColumn(name) => write!(f, "ambiguous column reference '{}'", name),
            ErrorKind::DivideByZero => write!(f, "division by zero"),
            ErrorKind::InvalidLikeOperand => {
                write!(f, "LIKE pattern applied to a non-string-coercible operand")
            }
            ErrorKind::EmptyUpdateTarget => write!(f, "UPDATE matched zero rows"),
            ErrorKind::EmptyDeleteTarget => write!(f, "DELETE matched zero rows"),
            ErrorKind::ColumnCountMismatch { expected, found } => write!(
                f,
                "expected {} value(s), found {}",
                expected, found
            ),

            ErrorKind::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

/// An error with optional source location information.
#[derive(Debug, Clone)]
pub struct Error {
    pub kind: ErrorKind,
    span: Option<Span>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, span: None }
    }

    pub fn with_span(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span: Some(span),
        }
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn unrecognized_char(c: char, pos: usize) -> Self {
        Self::with_span(ErrorKind::UnrecognizedCharacter(c), Span::point(pos))
    }

    pub fn unexpected_token(
        expected: impl Into<String>,
        found: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::with_span(
            ErrorKind::UnexpectedToken {
                expected: expected.into(),
                found: found.into(),
            },
            span,
        )
    }

    pub fn unterminated_string(span: Span) -> Self {
        Self::with_span(ErrorKind::UnterminatedString, span)
    }

    pub fn unterminated_comment(span: Span) -> Self {
        Self::with_span(ErrorKind::UnterminatedBlockComment, span)
    }

    pub fn malformed_number(text: impl Into<String>, span: Span) -> Self {
        Self::with_span(ErrorKind::MalformedNumber(text.into()), span)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(span) = self.span {
            write!(f, " at position {}", span.start)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

/// A specialized Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_merge_covers_both() {
        let merged = Span::new(10, 20).merge(Span::new(15, 30));
        assert_eq!(merged.start, 10);
        assert_eq!(merged.end, 30);
    }

    #[test]
    fn error_display_includes_position() {
        let err = Error::unrecognized_char('$', 5);
        let msg = format!("{}", err);
        assert!(msg.contains("unrecognized character"));
        assert!(msg.contains("position 5"));
    }
}
