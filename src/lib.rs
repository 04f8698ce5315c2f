#![doc = include_str!("../README.md")]
#![no_std]
#![deny(clippy::mod_module_files)]

extern crate alloc;

pub mod ast;
pub mod errors;
mod format;
pub mod lexer;
pub mod parser;

use alloc::vec::Vec;

// Re-export main types
pub use ast::{
    AttributeRef, ColumnDefinition, CreateTable, DataType, Delete, Insert, Instruction,
    InstructionKind, JoinClause, Literal, Number, Operator, Predicate, Select,
};
pub use format::FormatSql;
pub use lexer::{Keyword, Lexer, Symbol, Token, TokenKind, lex, lex_bytes};
pub use parser::{Parser, parse};

// Re-export errors
pub use errors::{Error, LexError, ParseError, Stage};

/// Lex and parse query text into instructions.
///
/// # Errors
///
/// Returns the first lexing or parsing error. No instruction is returned
/// unless every statement of the input is valid.
///
/// # Example
///
/// ```
/// use tinyql::{Instruction, parse_sql};
///
/// let instructions =
///     parse_sql("CREATE TABLE account (id INT, email TEXT);DELETE FROM account").unwrap();
/// assert_eq!(instructions.len(), 2);
/// assert!(matches!(instructions[1], Instruction::Delete(_)));
/// ```
pub fn parse_sql(input: &str) -> Result<Vec<Instruction>, Error> {
    run(lex(input))
}

/// Lex and parse raw bytes holding UTF-8 query text.
///
/// # Errors
///
/// Returns [`LexError::InvalidUtf8`] for non UTF-8 input, otherwise the same
/// errors as [`parse_sql`].
pub fn parse_bytes(input: &[u8]) -> Result<Vec<Instruction>, Error> {
    run(lex_bytes(input))
}

fn run(tokens: Result<Vec<Token<'_>>, LexError>) -> Result<Vec<Instruction>, Error> {
    let result = tokens
        .map_err(Error::from)
        .and_then(|tokens| {
            tracing::debug!(tokens = tokens.len(), "lexed query");
            parse(&tokens).map_err(Error::from)
        });

    match &result {
        Ok(instructions) => {
            tracing::debug!(instructions = instructions.len(), "parsed query");
        }
        Err(err) => {
            tracing::debug!(stage = ?err.stage(), pos = err.position(), error = %err, "query rejected");
        }
    }
    result
}
