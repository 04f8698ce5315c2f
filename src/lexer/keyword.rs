//! Reserved words and punctuation of the query language.

use core::fmt::{self, Display};

/// A reserved word, matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Keyword {
    /// CREATE keyword
    Create,
    /// TABLE keyword
    Table,
    /// PRIMARY keyword
    Primary,
    /// KEY keyword
    Key,
    /// SELECT keyword
    Select,
    /// FROM keyword
    From,
    /// WHERE keyword
    Where,
    /// JOIN keyword
    Join,
    /// ON keyword
    On,
    /// INSERT keyword
    Insert,
    /// INTO keyword
    Into,
    /// VALUES keyword
    Values,
    /// DELETE keyword
    Delete,
    /// INT keyword
    Int,
    /// TEXT keyword
    Text,
    /// DATE keyword
    Date,
}

impl Keyword {
    /// Every keyword, in declaration order.
    pub const ALL: [Keyword; 16] = [
        Keyword::Create,
        Keyword::Table,
        Keyword::Primary,
        Keyword::Key,
        Keyword::Select,
        Keyword::From,
        Keyword::Where,
        Keyword::Join,
        Keyword::On,
        Keyword::Insert,
        Keyword::Into,
        Keyword::Values,
        Keyword::Delete,
        Keyword::Int,
        Keyword::Text,
        Keyword::Date,
    ];

    /// Returns the canonical upper-case spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Create => "CREATE",
            Keyword::Table => "TABLE",
            Keyword::Primary => "PRIMARY",
            Keyword::Key => "KEY",
            Keyword::Select => "SELECT",
            Keyword::From => "FROM",
            Keyword::Where => "WHERE",
            Keyword::Join => "JOIN",
            Keyword::On => "ON",
            Keyword::Insert => "INSERT",
            Keyword::Into => "INTO",
            Keyword::Values => "VALUES",
            Keyword::Delete => "DELETE",
            Keyword::Int => "INT",
            Keyword::Text => "TEXT",
            Keyword::Date => "DATE",
        }
    }

    /// Looks up a word, ignoring ASCII case.
    #[must_use]
    pub fn lookup(word: &str) -> Option<Keyword> {
        Self::ALL
            .into_iter()
            .find(|keyword| keyword.as_str().eq_ignore_ascii_case(word))
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-character punctuation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Symbol {
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
    /// Comma
    Comma,
    /// Semicolon
    Semicolon,
    /// Equals sign
    Equals,
    /// Asterisk, the projection wildcard
    Star,
    /// Dot, the qualifier separator
    Dot,
}

impl Symbol {
    /// Maps a byte to the symbol it spells, if any.
    #[must_use]
    pub fn from_byte(b: u8) -> Option<Symbol> {
        Some(match b {
            b'(' => Symbol::LParen,
            b')' => Symbol::RParen,
            b',' => Symbol::Comma,
            b';' => Symbol::Semicolon,
            b'=' => Symbol::Equals,
            b'*' => Symbol::Star,
            b'.' => Symbol::Dot,
            _ => return None,
        })
    }

    /// Returns the character this symbol is spelled with.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Symbol::LParen => '(',
            Symbol::RParen => ')',
            Symbol::Comma => ',',
            Symbol::Semicolon => ';',
            Symbol::Equals => '=',
            Symbol::Star => '*',
            Symbol::Dot => '.',
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.as_char())
    }
}
