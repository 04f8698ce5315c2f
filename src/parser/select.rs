//! `SELECT projection (',' projection)* FROM <name> join* (WHERE predicate)?`

use alloc::vec::Vec;

use hashbrown::HashSet;

use super::Parser;
use crate::ast::{AttributeRef, JoinClause, Predicate, Select};
use crate::errors::ParseError;
use crate::lexer::{Keyword, Symbol};

impl Parser<'_, '_> {
    pub(super) fn parse_select(&mut self) -> Result<Select, ParseError> {
        self.expect_keyword(Keyword::Select)?;

        let mut attributes = Vec::new();
        loop {
            attributes.push(self.parse_attribute(true)?);
            if !self.eat_symbol(Symbol::Comma) {
                break;
            }
        }

        self.expect_keyword(Keyword::From)?;
        let table_name = self.expect_identifier("table name")?;

        let mut joins = Vec::new();
        while self.eat_keyword(Keyword::Join) {
            let table_pos = self.peek().map_or_else(|| self.end_pos(), |token| token.pos);
            joins.push((table_pos, self.parse_join()?));
        }

        let predicate = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_predicate()?)
        } else {
            None
        };

        check_joins_referenced(&attributes, &joins, predicate.as_ref())?;

        Ok(Select {
            table_name,
            attributes,
            joins: joins.into_iter().map(|(_, join)| join).collect(),
            predicate,
        })
    }

    /// `<name> ON attribute '=' attribute`, after the JOIN keyword.
    fn parse_join(&mut self) -> Result<JoinClause, ParseError> {
        let joined_table = self.expect_identifier("table name")?;
        self.expect_keyword(Keyword::On)?;
        let left_attr = self.parse_attribute(false)?;
        self.expect_symbol(Symbol::Equals)?;
        let right_attr = self.parse_attribute(false)?;

        Ok(JoinClause {
            joined_table,
            left_attr,
            right_attr,
        })
    }
}

/// Every joined table must be the qualifier of at least one attribute of the
/// statement: in the projection, in a join condition or in the predicate.
fn check_joins_referenced(
    attributes: &[AttributeRef],
    joins: &[(usize, JoinClause)],
    predicate: Option<&Predicate>,
) -> Result<(), ParseError> {
    if joins.is_empty() {
        return Ok(());
    }

    let predicate_attr = match predicate {
        Some(Predicate::Comparison { left, .. }) => Some(left),
        _ => None,
    };
    let qualifiers: HashSet<&str> = attributes
        .iter()
        .chain(
            joins
                .iter()
                .flat_map(|(_, join)| [&join.left_attr, &join.right_attr]),
        )
        .chain(predicate_attr)
        .filter_map(|attr| attr.table_qualifier.as_deref())
        .collect();

    match joins
        .iter()
        .find(|(_, join)| !qualifiers.contains(join.joined_table.as_str()))
    {
        Some((pos, join)) => Err(ParseError::UnreferencedJoinTable {
            table: join.joined_table.clone(),
            pos: *pos,
        }),
        None => Ok(()),
    }
}
