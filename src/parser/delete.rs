//! `DELETE FROM <name> (WHERE predicate)?`

use super::Parser;
use crate::ast::Delete;
use crate::errors::ParseError;
use crate::lexer::Keyword;

impl Parser<'_, '_> {
    pub(super) fn parse_delete(&mut self) -> Result<Delete, ParseError> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;

        let table_name = self.expect_identifier("table name")?;
        let predicate = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_predicate()?)
        } else {
            None
        };

        Ok(Delete {
            table_name,
            predicate,
        })
    }
}
