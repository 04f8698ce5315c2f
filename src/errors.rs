//! Submodule defining the errors used across the crate.

use alloc::string::String;

/// Errors that can occur while lexing query text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// A quoted run reached the end of input before its closing quote.
    #[error("Unterminated {quote} quote starting at position {pos}")]
    UnterminatedQuote {
        /// The opening quote character.
        quote: char,
        /// Position of the opening quote.
        pos: usize,
    },
    /// A character that cannot start any token.
    #[error("Unexpected character '{char}' at position {pos}")]
    UnexpectedCharacter {
        /// The unexpected character.
        char: char,
        /// Position in input.
        pos: usize,
    },
    /// A numeric run glued to something that cannot follow a number.
    #[error("Malformed number '{lexeme}' at position {pos}")]
    MalformedNumber {
        /// The offending text, from the first digit to the offending character.
        lexeme: String,
        /// Position where the number started.
        pos: usize,
    },
    /// The byte input is not valid UTF-8.
    #[error("Invalid UTF-8 at position {pos}")]
    InvalidUtf8 {
        /// Position of the first invalid byte.
        pos: usize,
    },
}

impl LexError {
    /// Returns the byte position the error refers to.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            LexError::UnterminatedQuote { pos, .. }
            | LexError::UnexpectedCharacter { pos, .. }
            | LexError::MalformedNumber { pos, .. }
            | LexError::InvalidUtf8 { pos } => *pos,
        }
    }
}

/// Errors that can occur while parsing a token stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A token that does not fit the grammar at this point.
    #[error("Unexpected {found} at position {pos}, expected {expected}")]
    UnexpectedToken {
        /// What was expected.
        expected: String,
        /// Description of what was found.
        found: String,
        /// Position in input.
        pos: usize,
    },
    /// The token stream ended in the middle of a statement.
    #[error("Unexpected end of input at position {pos}, expected {expected}")]
    UnexpectedEof {
        /// What was expected.
        expected: String,
        /// Position of the end of input.
        pos: usize,
    },
    /// A statement starting with a word that is not a statement keyword.
    #[error("Unknown statement keyword '{found}' at position {pos}")]
    UnknownStatementKeyword {
        /// The word found in statement position.
        found: String,
        /// Position in input.
        pos: usize,
    },
    /// A parenthesis without its counterpart.
    #[error("Unbalanced parenthesis at position {pos} (opened at {open_pos:?})")]
    UnbalancedDelimiter {
        /// Position of the opening parenthesis, if one was open.
        open_pos: Option<usize>,
        /// Position where the imbalance was detected.
        pos: usize,
    },
    /// An INSERT whose column list and value list differ in length.
    #[error("INSERT lists {columns} columns but {values} values at position {pos}")]
    ColumnValueArityMismatch {
        /// Number of columns.
        columns: usize,
        /// Number of values.
        values: usize,
        /// Position of the value list.
        pos: usize,
    },
    /// A joined table that no attribute of the statement refers to.
    #[error("Joined table '{table}' at position {pos} is not referenced by any attribute")]
    UnreferencedJoinTable {
        /// The joined table name.
        table: String,
        /// Position of the table name.
        pos: usize,
    },
    /// The input holds no statement at all.
    #[error("No statement found before position {pos}")]
    NoStatements {
        /// Position of the end of input.
        pos: usize,
    },
}

impl ParseError {
    /// Returns the byte position the error refers to.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { pos, .. }
            | ParseError::UnexpectedEof { pos, .. }
            | ParseError::UnknownStatementKeyword { pos, .. }
            | ParseError::UnbalancedDelimiter { pos, .. }
            | ParseError::ColumnValueArityMismatch { pos, .. }
            | ParseError::UnreferencedJoinTable { pos, .. }
            | ParseError::NoStatements { pos } => *pos,
        }
    }
}

/// The pipeline stage an [`Error`] comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Turning text into tokens.
    Lex,
    /// Turning tokens into instructions.
    Parse,
}

/// Errors returned by the text-to-instructions pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Lexer error.
    #[error("Lexer error: {0}")]
    Lex(#[from] LexError),
    /// Parser error.
    #[error("Parser error: {0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Returns the stage that failed.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Error::Lex(_) => Stage::Lex,
            Error::Parse(_) => Stage::Parse,
        }
    }

    /// Returns the byte position the error refers to.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            Error::Lex(err) => err.position(),
            Error::Parse(err) => err.position(),
        }
    }
}
