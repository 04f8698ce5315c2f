//! `CREATE TABLE <name> '(' column (',' column)* ')'`

use super::{Parser, unexpected_token};
use crate::ast::{ColumnDefinition, CreateTable, DataType};
use crate::errors::ParseError;
use crate::lexer::Keyword;

impl Parser<'_, '_> {
    pub(super) fn parse_create_table(&mut self) -> Result<CreateTable, ParseError> {
        self.expect_keyword(Keyword::Create)?;
        self.expect_keyword(Keyword::Table)?;

        let table_name = self.expect_identifier("table name")?;
        let (_, columns) = self.parse_parenthesized(Self::parse_column_definition)?;

        Ok(CreateTable {
            table_name,
            columns,
        })
    }

    /// `name type ('PRIMARY' 'KEY')?`
    fn parse_column_definition(&mut self) -> Result<ColumnDefinition, ParseError> {
        const EXPECTED: &str = "column type (INT, TEXT or DATE)";

        let name = self.expect_identifier("column name")?;

        let data_type = match self.advance() {
            Some(token) => match token.keyword() {
                Some(Keyword::Int) => DataType::Int,
                Some(Keyword::Text) => DataType::Text,
                Some(Keyword::Date) => DataType::Date,
                _ => return Err(unexpected_token(EXPECTED, token)),
            },
            None => return Err(self.unexpected_eof(EXPECTED)),
        };

        let primary_key = self.eat_keyword(Keyword::Primary);
        if primary_key {
            self.expect_keyword(Keyword::Key)?;
        }

        Ok(ColumnDefinition {
            name,
            data_type,
            primary_key,
        })
    }
}
