//! `SELECT` statement parsing.

use super::Parser;
use crate::ast::{
    AggregateArg, AggregateFunc, OrderDir, OrderItem, ProjectionItem, SelectStatement, TableRef,
};
use crate::error::{Error, Result};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// `SELECT [DISTINCT] <proj> (, <proj>)* FROM <tref> (, <tref>)*
    /// [WHERE <pred>] [GROUP BY <colref> (, <colref>)*]
    /// [ORDER BY <colref> [ASC|DESC] (, <colref> [ASC|DESC])*] [LIMIT <N>]`.
    pub(super) fn parse_select(&mut self) -> Result<SelectStatement> {
        self.expect_keyword(Keyword::Select)?;
        let distinct = self.consume_keyword(Keyword::Distinct);

        let mut projection = vec![self.parse_projection_item()?];
        while self.consume_kind(&TokenKind::Comma) {
            projection.push(self.parse_projection_item()?);
        }

        self.expect_keyword(Keyword::From)?;
        let mut from = vec![self.parse_table_ref()?];
        while self.consume_kind(&TokenKind::Comma) {
            from.push(self.parse_table_ref()?);
        }

        let predicate = if self.consume_keyword(Keyword::Where) {
            Some(self.parse_predicate()?)
        } else {
            None
        };

        let mut group_by = Vec::new();
        if self.consume_keyword(Keyword::Group) {
            self.expect_keyword(Keyword::By)?;
            group_by.push(self.parse_column_ref()?);
            while self.consume_kind(&TokenKind::Comma) {
                group_by.push(self.parse_column_ref()?);
            }
        }

        let mut order_by = Vec::new();
        if self.consume_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            order_by.push(self.parse_order_item()?);
            while self.consume_kind(&TokenKind::Comma) {
                order_by.push(self.parse_order_item()?);
            }
        }

        let limit = if self.consume_keyword(Keyword::Limit) {
            let tok = self.current();
            match tok.kind {
                TokenKind::Integer(n) => {
                    self.advance();
                    Some(n)
                }
                _ => {
                    return Err(Error::unexpected_token(
                        "an integer",
                        tok.to_string(),
                        tok.span,
                    ))
                }
            }
        } else {
            None
        };

        Ok(SelectStatement {
            distinct,
            projection,
            from,
            predicate,
            group_by,
            order_by,
            limit,
        })
    }

    /// `*` | aggregate call | `<colref> [AS <ident>]`.
    fn parse_projection_item(&mut self) -> Result<ProjectionItem> {
        if self.consume_kind(&TokenKind::Asterisk) {
            return Ok(ProjectionItem::Star);
        }

        if let Some(func) = self.peek_aggregate_func() {
            return self.parse_aggregate(func);
        }

        let column = self.parse_column_ref()?;
        let alias = self.parse_optional_column_alias()?;
        Ok(ProjectionItem::Column { column, alias })
    }

    fn peek_aggregate_func(&self) -> Option<AggregateFunc> {
        let func = match self.current().kind {
            TokenKind::Keyword(Keyword::Count) => AggregateFunc::Count,
            TokenKind::Keyword(Keyword::Sum) => AggregateFunc::Sum,
            TokenKind::Keyword(Keyword::Avg) => AggregateFunc::Avg,
            TokenKind::Keyword(Keyword::Min) => AggregateFunc::Min,
            TokenKind::Keyword(Keyword::Max) => AggregateFunc::Max,
            _ => return None,
        };
        // Only a genuine aggregate call if followed by '('.
        if self.peek_at(1).kind == TokenKind::LParen {
            Some(func)
        } else {
            None
        }
    }

    /// `<fn>( [DISTINCT] (* | <ident>) ) [AS <ident>]`.
    fn parse_aggregate(&mut self, func: AggregateFunc) -> Result<ProjectionItem> {
        self.advance(); // function keyword
        self.expect_kind(TokenKind::LParen, "'('")?;
        let distinct = self.consume_keyword(Keyword::Distinct);
        let arg = if self.consume_kind(&TokenKind::Asterisk) {
            AggregateArg::Star
        } else {
            AggregateArg::Column(self.parse_column_ref()?)
        };
        self.expect_kind(TokenKind::RParen, "')'")?;
        let alias = self.parse_optional_column_alias()?;
        Ok(ProjectionItem::Aggregate {
            func,
            arg,
            distinct,
            alias,
        })
    }

    /// `[AS <ident>]`, for column/aggregate projections — spec.md's `<proj>`
    /// grammar has no bare-trailing-identifier alias form, unlike `<tref>`.
    fn parse_optional_column_alias(&mut self) -> Result<Option<String>> {
        if self.consume_keyword(Keyword::As) {
            Ok(Some(self.expect_identifier()?))
        } else {
            Ok(None)
        }
    }

    /// `<ident> [AS <ident> | <ident>]`.
    fn parse_table_ref(&mut self) -> Result<TableRef> {
        let name = self.expect_identifier()?;
        let alias = if self.consume_keyword(Keyword::As) {
            self.expect_identifier()?
        } else if let TokenKind::Identifier(_) = self.current().kind {
            self.expect_identifier()?
        } else {
            name.clone()
        };
        Ok(TableRef { name, alias })
    }

    fn parse_order_item(&mut self) -> Result<OrderItem> {
        let column = self.parse_column_ref()?;
        let dir = if self.consume_keyword(Keyword::Desc) {
            OrderDir::Desc
        } else {
            self.consume_keyword(Keyword::Asc);
            OrderDir::Asc
        };
        Ok(OrderItem { column, dir })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Statement;
    use crate::lexer::lex;

    fn parse_select(sql: &str) -> SelectStatement {
        let tokens = lex(sql).unwrap();
        let mut stmts = crate::parser::parse(tokens).unwrap();
        match stmts.remove(0) {
            Statement::Select(s) => s,
            _ => panic!("expected SELECT"),
        }
    }

    #[test]
    fn parses_star_projection() {
        let sel = parse_select("SELECT * FROM t;");
        assert_eq!(sel.projection, vec![ProjectionItem::Star]);
    }

    #[test]
    fn parses_aggregate_with_distinct_and_alias() {
        let sel = parse_select("SELECT COUNT(DISTINCT id) AS n FROM t;");
        match &sel.projection[0] {
            ProjectionItem::Aggregate {
                func,
                distinct,
                alias,
                ..
            } => {
                assert_eq!(*func, AggregateFunc::Count);
                assert!(*distinct);
                assert_eq!(alias.as_deref(), Some("n"));
            }
            other => panic!("unexpected projection: {:?}", other),
        }
    }

    #[test]
    fn parses_multi_table_from_with_aliases() {
        let sel = parse_select("SELECT * FROM a AS x, b y;");
        assert_eq!(sel.from[0].alias, "x");
        assert_eq!(sel.from[1].alias, "y");
    }

    #[test]
    fn parses_group_order_limit() {
        let sel = parse_select("SELECT age FROM u GROUP BY age ORDER BY age DESC LIMIT 5;");
        assert_eq!(sel.group_by.len(), 1);
        assert_eq!(sel.order_by[0].dir, OrderDir::Desc);
        assert_eq!(sel.limit, Some(5));
    }

    #[test]
    fn parses_distinct_select() {
        let sel = parse_select("SELECT DISTINCT age FROM u;");
        assert!(sel.distinct);
    }

    #[test]
    fn column_projection_requires_as_for_alias() {
        let sel = parse_select("SELECT age AS a FROM u;");
        match &sel.projection[0] {
            ProjectionItem::Column { alias, .. } => assert_eq!(alias.as_deref(), Some("a")),
            other => panic!("unexpected projection: {:?}", other),
        }
    }

    #[test]
    fn bare_trailing_alias_is_rejected_for_column_projection() {
        let tokens = lex("SELECT age x FROM u;").unwrap();
        assert!(crate::parser::parse(tokens).is_err());
    }
}
