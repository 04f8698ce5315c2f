//! Recursive-descent parser turning tokens into [`Instruction`]s.
//!
//! The parser walks the token slice once with one token of lookahead.
//! Whitespace tokens are skipped by the cursor itself, so none of the
//! statement grammars ever see them. Each statement grammar lives in its own
//! submodule as an `impl` block on [`Parser`].
//!
//! Parsing is all-or-nothing: the first grammar violation aborts the whole
//! call and no instruction is returned.

mod create_table;
mod delete;
mod insert;
mod predicate;
mod select;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::ast::{AttributeRef, Instruction};
use crate::errors::ParseError;
use crate::lexer::{Keyword, Symbol, Token, TokenKind};

/// SQL parser over a lexed token slice.
pub struct Parser<'a, 'input> {
    tokens: &'a [Token<'input>],
    cursor: usize,
}

impl<'a, 'input> Parser<'a, 'input> {
    /// Create a new parser for the given tokens.
    #[must_use]
    pub fn new(tokens: &'a [Token<'input>]) -> Self {
        Self { tokens, cursor: 0 }
    }

    /// Parse all statements from the tokens.
    ///
    /// Statements are separated by `;`. Empty statements are skipped, but at
    /// least one statement must be present.
    ///
    /// # Errors
    ///
    /// Returns the first grammar violation, or [`ParseError::NoStatements`]
    /// if the tokens hold nothing but separators and whitespace.
    pub fn parse_all(&mut self) -> Result<Vec<Instruction>, ParseError> {
        let mut instructions = Vec::new();

        loop {
            while self.eat_symbol(Symbol::Semicolon) {}
            if self.peek().is_none() {
                break;
            }

            let instruction = self.parse_statement()?;
            tracing::trace!(
                kind = ?instruction.kind(),
                table = instruction.table_name(),
                "parsed statement"
            );
            instructions.push(instruction);

            match self.advance() {
                None => break,
                Some(token) => match token.symbol() {
                    Some(Symbol::Semicolon) => {}
                    Some(Symbol::RParen) => {
                        return Err(ParseError::UnbalancedDelimiter {
                            open_pos: None,
                            pos: token.pos,
                        });
                    }
                    _ => return Err(unexpected_token("';' or end of input", token)),
                },
            }
        }

        if instructions.is_empty() {
            return Err(ParseError::NoStatements {
                pos: self.end_pos(),
            });
        }
        Ok(instructions)
    }

    /// Parse a single statement, dispatching on its first keyword.
    fn parse_statement(&mut self) -> Result<Instruction, ParseError> {
        const EXPECTED: &str = "CREATE, SELECT, INSERT or DELETE";

        let Some(token) = self.peek() else {
            return Err(self.unexpected_eof(EXPECTED));
        };
        match token.kind {
            TokenKind::Keyword(Keyword::Create) => {
                self.parse_create_table().map(Instruction::CreateTable)
            }
            TokenKind::Keyword(Keyword::Select) => self.parse_select().map(Instruction::Select),
            TokenKind::Keyword(Keyword::Insert) => self.parse_insert().map(Instruction::Insert),
            TokenKind::Keyword(Keyword::Delete) => self.parse_delete().map(Instruction::Delete),
            TokenKind::Keyword(_) | TokenKind::Identifier => {
                Err(ParseError::UnknownStatementKeyword {
                    found: token.text.to_string(),
                    pos: token.pos,
                })
            }
            _ => Err(unexpected_token(EXPECTED, token)),
        }
    }

    /// Parse `name`, `table.name`, and, when `allow_wildcard` is set, `*`
    /// and `table.*`.
    fn parse_attribute(&mut self, allow_wildcard: bool) -> Result<AttributeRef, ParseError> {
        if allow_wildcard && self.eat_symbol(Symbol::Star) {
            return Ok(AttributeRef::wildcard(None));
        }

        let first = self.expect_identifier("attribute name")?;
        if !self.eat_symbol(Symbol::Dot) {
            return Ok(AttributeRef::new(first));
        }
        if allow_wildcard && self.eat_symbol(Symbol::Star) {
            return Ok(AttributeRef::wildcard(Some(first)));
        }
        let name = self.expect_identifier(if allow_wildcard {
            "attribute name or '*'"
        } else {
            "attribute name"
        })?;
        Ok(AttributeRef::qualified(first, name))
    }

    /// Parse `'(' item (',' item)* ')'`.
    ///
    /// Returns the position of the opening parenthesis along with the items.
    fn parse_parenthesized<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<(usize, Vec<T>), ParseError> {
        let open = self.expect_symbol(Symbol::LParen)?;

        let mut items = Vec::new();
        loop {
            let parsed = item(self).map_err(|err| self.unclosed_paren(open, err))?;
            items.push(parsed);
            if !self.eat_symbol(Symbol::Comma) {
                break;
            }
        }

        self.expect_closing_paren(open)?;
        Ok((open.pos, items))
    }

    /// An item error caused by running into `;` or the end of input means the
    /// list was never closed.
    fn unclosed_paren(&self, open: &Token<'_>, err: ParseError) -> ParseError {
        let hit_statement_end = match &err {
            ParseError::UnexpectedEof { .. } => true,
            ParseError::UnexpectedToken { pos, .. } => self
                .tokens
                .iter()
                .find(|token| token.pos == *pos)
                .and_then(Token::symbol)
                == Some(Symbol::Semicolon),
            _ => false,
        };
        if hit_statement_end {
            ParseError::UnbalancedDelimiter {
                open_pos: Some(open.pos),
                pos: err.position(),
            }
        } else {
            err
        }
    }

    fn expect_closing_paren(&mut self, open: &Token<'_>) -> Result<(), ParseError> {
        match self.advance() {
            Some(token) if token.symbol() == Some(Symbol::RParen) => Ok(()),
            Some(token) if token.symbol() != Some(Symbol::Semicolon) => {
                Err(unexpected_token("',' or ')'", token))
            }
            other => Err(ParseError::UnbalancedDelimiter {
                open_pos: Some(open.pos),
                pos: other.map_or_else(|| self.end_pos(), |token| token.pos),
            }),
        }
    }

    /// Peek at the next meaningful token without consuming it.
    fn peek(&mut self) -> Option<&'a Token<'input>> {
        while self.tokens.get(self.cursor).is_some_and(Token::is_whitespace) {
            self.cursor += 1;
        }
        self.tokens.get(self.cursor)
    }

    /// Consume and return the next meaningful token.
    fn advance(&mut self) -> Option<&'a Token<'input>> {
        let token = self.peek()?;
        self.cursor += 1;
        Some(token)
    }

    /// Consume the next token if it is `keyword`.
    fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.peek().and_then(Token::keyword) == Some(keyword) {
            self.cursor += 1;
            return true;
        }
        false
    }

    /// Consume the next token if it is `symbol`.
    fn eat_symbol(&mut self, symbol: Symbol) -> bool {
        if self.peek().and_then(Token::symbol) == Some(symbol) {
            self.cursor += 1;
            return true;
        }
        false
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<&'a Token<'input>, ParseError> {
        match self.advance() {
            Some(token) if token.keyword() == Some(keyword) => Ok(token),
            Some(token) => Err(unexpected_token(keyword.as_str(), token)),
            None => Err(self.unexpected_eof(keyword.as_str())),
        }
    }

    fn expect_symbol(&mut self, symbol: Symbol) -> Result<&'a Token<'input>, ParseError> {
        match self.advance() {
            Some(token) if token.symbol() == Some(symbol) => Ok(token),
            Some(token) => Err(unexpected_token(&symbol.to_string(), token)),
            None => Err(self.unexpected_eof(&symbol.to_string())),
        }
    }

    /// Expect a bare or double-quoted identifier and return its name.
    fn expect_identifier(&mut self, expected: &str) -> Result<String, ParseError> {
        match self.advance() {
            Some(token)
                if matches!(
                    token.kind,
                    TokenKind::Identifier | TokenKind::QuotedIdentifier
                ) =>
            {
                Ok(token.text.to_string())
            }
            Some(token) => Err(unexpected_token(expected, token)),
            None => Err(self.unexpected_eof(expected)),
        }
    }

    fn unexpected_eof(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedEof {
            expected: expected.into(),
            pos: self.end_pos(),
        }
    }

    /// Position just past the last token.
    fn end_pos(&self) -> usize {
        self.tokens.last().map_or(0, Token::end)
    }
}

fn unexpected_token(expected: &str, token: &Token<'_>) -> ParseError {
    ParseError::UnexpectedToken {
        expected: expected.into(),
        found: token.to_string(),
        pos: token.pos,
    }
}

/// Parse a token slice in one call.
///
/// # Errors
///
/// Returns the first grammar violation.
pub fn parse(tokens: &[Token<'_>]) -> Result<Vec<Instruction>, ParseError> {
    Parser::new(tokens).parse_all()
}
