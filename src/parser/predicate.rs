//! WHERE predicates and literal values.

use super::{Parser, unexpected_token};
use crate::ast::{Literal, Number, Operator, Predicate};
use crate::errors::ParseError;
use crate::lexer::{Symbol, TokenKind};

impl Parser<'_, '_> {
    /// `literal | attribute '=' literal`
    pub(super) fn parse_predicate(&mut self) -> Result<Predicate, ParseError> {
        match self.peek().map(|token| token.kind) {
            Some(TokenKind::NumericLiteral | TokenKind::StringLiteral) => {
                return self.parse_literal().map(Predicate::Literal);
            }
            None => return Err(self.unexpected_eof("literal or attribute")),
            _ => {}
        }

        let left = self.parse_attribute(false)?;
        self.expect_symbol(Symbol::Equals)?;
        let right = self.parse_literal()?;

        Ok(Predicate::Comparison {
            left,
            operator: Operator::Equals,
            right,
        })
    }

    /// Parse a value literal.
    pub(super) fn parse_literal(&mut self) -> Result<Literal, ParseError> {
        const EXPECTED: &str = "literal (number or string)";

        let Some(token) = self.advance() else {
            return Err(self.unexpected_eof(EXPECTED));
        };
        match token.kind {
            TokenKind::StringLiteral => Ok(Literal::Text(token.text.clone().into_owned())),
            TokenKind::NumericLiteral => Number::from_lexeme(&token.text)
                .map(Literal::Number)
                .ok_or_else(|| unexpected_token(EXPECTED, token)),
            _ => Err(unexpected_token(EXPECTED, token)),
        }
    }
}
