//! `INSERT INTO <name> '(' column (',' column)* ')' VALUES '(' literal (',' literal)* ')'`

use alloc::string::{String, ToString};

use super::{Parser, unexpected_token};
use crate::ast::Insert;
use crate::errors::ParseError;
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_, '_> {
    pub(super) fn parse_insert(&mut self) -> Result<Insert, ParseError> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;

        let table_name = self.expect_identifier("table name")?;
        let (_, columns) = self.parse_parenthesized(Self::parse_column_name)?;

        self.expect_keyword(Keyword::Values)?;
        let (values_pos, values) = self.parse_parenthesized(Self::parse_literal)?;

        if columns.len() != values.len() {
            return Err(ParseError::ColumnValueArityMismatch {
                columns: columns.len(),
                values: values.len(),
                pos: values_pos,
            });
        }

        Ok(Insert {
            table_name,
            columns,
            values,
        })
    }

    /// A column name is an identifier, or a single-quoted string standing
    /// for the name itself.
    fn parse_column_name(&mut self) -> Result<String, ParseError> {
        const EXPECTED: &str = "column name";

        match self.advance() {
            Some(token)
                if matches!(
                    token.kind,
                    TokenKind::Identifier | TokenKind::QuotedIdentifier | TokenKind::StringLiteral
                ) =>
            {
                Ok(token.text.to_string())
            }
            Some(token) => Err(unexpected_token(EXPECTED, token)),
            None => Err(self.unexpected_eof(EXPECTED)),
        }
    }
}
