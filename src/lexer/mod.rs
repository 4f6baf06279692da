//! SQL Lexer.
//!
//! Converts source text into an ordered sequence of [`Token`]s, skipping
//! whitespace and comments. Scanning follows a fixed priority at each
//! position: whitespace/comments, identifier-or-keyword, number, string
//! literal, operator, otherwise an unrecognized-character error.

mod token;

pub use token::{Keyword, Token, TokenKind};

use crate::error::{Error, Result, Span};
use crate::reader::{CharCursor, Cursor};

/// Lex `input` into a flat token stream. The returned vector never includes
/// a trailing `Eof` token; callers that need the sentinel use
/// [`TokenKind::Eof`] past the end, exactly as the reader contract does.
pub fn lex(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).tokenize()
}

struct Lexer<'a> {
    input: &'a str,
    cursor: CharCursor,
    /// Byte offset of the cursor's current character; tracked separately
    /// from the cursor's char-index position so spans are reported in
    /// bytes (consistent with string slicing on `input`).
    byte_pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            cursor: CharCursor::new(input),
            byte_pos: 0,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.cursor.eof() {
                break;
            }
            tokens.push(self.scan_token()?);
        }
        Ok(tokens)
    }

    fn peek(&self) -> char {
        self.cursor.peek(0)
    }

    fn peek_at(&self, k: usize) -> char {
        self.cursor.peek(k)
    }

    fn advance(&mut self) -> char {
        let c = self.cursor.next();
        if c != '\0' {
            self.byte_pos += c.len_utf8();
        }
        c
    }

    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                '-' if self.peek_at(1) == '-' => {
                    while !self.cursor.eof() && self.peek() != '\n' {
                        self.advance();
                    }
                }
                '/' if self.peek_at(1) == '*' => {
                    let start = self.byte_pos;
                    self.advance();
                    self.advance();
                    let mut closed = false;
                    while !self.cursor.eof() {
                        if self.peek() == '*' && self.peek_at(1) == '/' {
                            self.advance();
                            self.advance();
                            closed = true;
                            break;
                        }
                        self.advance();
                    }
                    if !closed {
                        return Err(Error::unterminated_comment(Span::new(start, self.byte_pos)));
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn scan_token(&mut self) -> Result<Token> {
        let start = self.byte_pos;
        let c = self.peek();

        if c.is_ascii_alphabetic() || c == '_' {
            return Ok(self.scan_identifier_or_keyword(start));
        }
        if c.is_ascii_digit() {
            return self.scan_number(start);
        }
        if c == '\'' || c == '"' {
            return self.scan_string(start, c);
        }
        self.scan_operator(start)
    }

    fn scan_identifier_or_keyword(&mut self, start: usize) -> Token {
        let mut lexeme = String::new();
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            lexeme.push(self.advance());
        }
        let span = Span::new(start, self.byte_pos);
        let upper = lexeme.to_ascii_uppercase();
        match Keyword::lookup(&upper) {
            Some(kind) => Token::new(kind, span, lexeme),
            None => Token::new(TokenKind::Identifier(lexeme.clone()), span, lexeme),
        }
    }

    fn scan_number(&mut self, start: usize) -> Result<Token> {
        let mut lexeme = String::new();
        let mut dots = 0;
        while self.peek().is_ascii_digit() || self.peek() == '.' {
            if self.peek() == '.' {
                dots += 1;
            }
            lexeme.push(self.advance());
        }
        let span = Span::new(start, self.byte_pos);
        if dots > 1 {
            return Err(Error::malformed_number(lexeme, span));
        }
        if dots == 0 {
            let value: i64 = lexeme
                .parse()
                .map_err(|_| Error::malformed_number(lexeme.clone(), span))?;
            Ok(Token::new(TokenKind::Integer(value), span, lexeme))
        } else {
            let value: f64 = lexeme
                .parse()
                .map_err(|_| Error::malformed_number(lexeme.clone(), span))?;
            Ok(Token::new(TokenKind::Float(value), span, lexeme))
        }
    }

    fn scan_string(&mut self, start: usize, quote: char) -> Result<Token> {
        self.advance(); // opening quote
        let mut payload = String::new();
        loop {
            if self.cursor.eof() {
                return Err(Error::unterminated_string(Span::new(start, self.byte_pos)));
            }
            let c = self.peek();
            if c == quote {
                self.advance();
                break;
            }
            if c == '\\' {
                self.advance();
                if self.cursor.eof() {
                    return Err(Error::unterminated_string(Span::new(start, self.byte_pos)));
                }
                payload.push(self.advance());
                continue;
            }
            payload.push(self.advance());
        }
        let span = Span::new(start, self.byte_pos);
        let raw = format!("{}{}{}", quote, payload, quote);
        Ok(Token::new(TokenKind::String(payload), span, raw))
    }

    fn scan_operator(&mut self, start: usize) -> Result<Token> {
        let two: String = [self.peek(), self.peek_at(1)].iter().collect();
        let kind = match two.as_str() {
            "<>" | "!=" => {
                self.advance();
                self.advance();
                Some(TokenKind::Neq)
            }
            "<=" => {
                self.advance();
                self.advance();
                Some(TokenKind::Lte)
            }
            "=<" => {
                self.advance();
                self.advance();
                Some(TokenKind::Lte)
            }
            ">=" => {
                self.advance();
                self.advance();
                Some(TokenKind::Gte)
            }
            "=>" => {
                self.advance();
                self.advance();
                Some(TokenKind::Gte)
            }
            _ => None,
        };
        if let Some(kind) = kind {
            let span = Span::new(start, self.byte_pos);
            return Ok(Token::new(kind, span, &self.input[start..self.byte_pos]));
        }

        let c = self.peek();
        let kind = match c {
            '=' => Some(TokenKind::Eq),
            '<' => Some(TokenKind::Lt),
            '>' => Some(TokenKind::Gt),
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Asterisk),
            '/' => Some(TokenKind::Slash),
            ',' => Some(TokenKind::Comma),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            ';' => Some(TokenKind::Semi),
            '.' => Some(TokenKind::Dot),
            '[' => Some(TokenKind::LBracket),
            ']' => Some(TokenKind::RBracket),
            _ => None,
        };
        match kind {
            Some(kind) => {
                self.advance();
                let span = Span::new(start, self.byte_pos);
                Ok(Token::new(kind, span, &self.input[start..self.byte_pos]))
            }
            None => {
                self.advance();
                Err(Error::unrecognized_char(c, start))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        lex(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_keywords_case_insensitively() {
        assert_eq!(
            kinds("select * from t"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Asterisk,
                TokenKind::Keyword(Keyword::From),
                TokenKind::Identifier("t".into()),
            ]
        );
    }

    #[test]
    fn identifier_preserves_original_case() {
        let toks = lex("MyTable").unwrap();
        assert_eq!(toks[0].kind, TokenKind::Identifier("MyTable".into()));
    }

    #[test]
    fn like_in_between_are_operator_tokens() {
        assert_eq!(kinds("LIKE"), vec![TokenKind::Like]);
        assert_eq!(kinds("IN"), vec![TokenKind::In]);
        assert_eq!(kinds("BETWEEN"), vec![TokenKind::Between]);
    }

    #[test]
    fn numbers_integer_vs_float() {
        assert_eq!(kinds("42"), vec![TokenKind::Integer(42)]);
        assert_eq!(kinds("3.14"), vec![TokenKind::Float(3.14)]);
        assert!(lex("1.2.3").is_err());
    }

    #[test]
    fn string_literal_escapes_quote_terminator() {
        let toks = lex(r"'it\'s'").unwrap();
        assert_eq!(toks[0].kind, TokenKind::String("it's".into()));
    }

    #[test]
    fn unterminated_string_is_error() {
        assert!(lex("'abc").is_err());
    }

    #[test]
    fn unterminated_block_comment_is_error() {
        assert!(lex("/* abc").is_err());
    }

    #[test]
    fn line_comment_stops_at_newline() {
        assert_eq!(
            kinds("SELECT -- comment\n1"),
            vec![TokenKind::Keyword(Keyword::Select), TokenKind::Integer(1)]
        );
    }

    #[test]
    fn block_comment_is_skipped() {
        assert_eq!(
            kinds("SELECT /* comment */ 1"),
            vec![TokenKind::Keyword(Keyword::Select), TokenKind::Integer(1)]
        );
    }

    #[test]
    fn two_character_operators_take_priority() {
        assert_eq!(kinds("<>"), vec![TokenKind::Neq]);
        assert_eq!(kinds("!="), vec![TokenKind::Neq]);
        assert_eq!(kinds("<="), vec![TokenKind::Lte]);
        assert_eq!(kinds(">="), vec![TokenKind::Gte]);
        assert_eq!(kinds("=<"), vec![TokenKind::Lte]);
        assert_eq!(kinds("=>"), vec![TokenKind::Gte]);
    }

    #[test]
    fn unrecognized_character_is_error() {
        assert!(lex("@").is_err());
    }
}
