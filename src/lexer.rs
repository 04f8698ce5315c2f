//! SQL lexer for tokenizing input.
//!
//! The lexer makes a single pass over the input with one byte of lookahead.
//! Whitespace is kept as a token of its own so that the token stream covers
//! the whole input; the parser is the one place that treats it as
//! insignificant.

mod keyword;

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Display};

pub use keyword::{Keyword, Symbol};

use crate::errors::LexError;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token<'input> {
    /// The kind of token.
    pub kind: TokenKind,
    /// The token text, with its original casing.
    ///
    /// For quoted forms this is the content between the quotes, with
    /// doubled quotes collapsed.
    pub text: Cow<'input, str>,
    /// The position in the input where this token starts.
    pub pos: usize,
    /// The number of input bytes the token spans, quotes included.
    pub len: usize,
}

impl Token<'_> {
    /// Returns the position just past the end of this token.
    #[must_use]
    pub fn end(&self) -> usize {
        self.pos + self.len
    }

    /// Whether this token carries no meaning for the grammar.
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    /// Returns the keyword this token spells, if it is one.
    #[must_use]
    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }

    /// Returns the symbol this token spells, if it is one.
    #[must_use]
    pub fn symbol(&self) -> Option<Symbol> {
        match self.kind {
            TokenKind::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Keyword(_) => write!(f, "keyword {}", self.text),
            TokenKind::Identifier => write!(f, "identifier {}", self.text),
            TokenKind::QuotedIdentifier => write!(f, "quoted identifier \"{}\"", self.text),
            TokenKind::StringLiteral => write!(f, "string '{}'", self.text),
            TokenKind::NumericLiteral => write!(f, "number {}", self.text),
            TokenKind::Symbol(symbol) => write!(f, "symbol {symbol}"),
            TokenKind::Whitespace => write!(f, "whitespace"),
        }
    }
}

/// The different kinds of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// One of the reserved words.
    Keyword(Keyword),
    /// A bare name: a letter followed by letters, digits or underscores.
    Identifier,
    /// A name between double quotes.
    QuotedIdentifier,
    /// Text between single quotes.
    StringLiteral,
    /// Digits, optionally with a decimal part.
    NumericLiteral,
    /// Punctuation.
    Symbol(Symbol),
    /// A maximal run of spaces, tabs and line breaks.
    Whitespace,
}

/// SQL lexer that produces tokens from input.
///
/// The lexer is an iterator of tokens; it stops after the first error.
pub struct Lexer<'input> {
    input: &'input str,
    pos: usize,
}

impl<'input> Lexer<'input> {
    /// Create a new lexer for the given input.
    #[must_use]
    pub fn new(input: &'input str) -> Self {
        Self { input, pos: 0 }
    }

    /// Get the current position in the input.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Consume the whole input into a token vector.
    ///
    /// # Errors
    ///
    /// Returns the first lexing error encountered.
    pub fn tokenize(self) -> Result<Vec<Token<'input>>, LexError> {
        self.collect()
    }

    fn next_token(&mut self) -> Result<Token<'input>, LexError> {
        let start = self.pos;
        let b = self.input.as_bytes()[start];

        if let Some(symbol) = Symbol::from_byte(b) {
            self.pos += 1;
            return Ok(self.token(TokenKind::Symbol(symbol), start));
        }

        match b {
            b'\'' | b'"' => self.read_quoted(start),
            _ if is_whitespace(b) => {
                self.pos = skip_while(self.input.as_bytes(), start, is_whitespace);
                Ok(self.token(TokenKind::Whitespace, start))
            }
            _ if b.is_ascii_digit() => self.read_number(start),
            _ if b.is_ascii_alphabetic() => {
                self.pos = skip_while(self.input.as_bytes(), start, is_word_byte);
                let kind = Keyword::lookup(&self.input[start..self.pos])
                    .map_or(TokenKind::Identifier, TokenKind::Keyword);
                Ok(self.token(kind, start))
            }
            _ => Err(LexError::UnexpectedCharacter {
                char: self.input[start..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER),
                pos: start,
            }),
        }
    }

    /// Build a token whose text is the raw input from `start` to the cursor.
    fn token(&self, kind: TokenKind, start: usize) -> Token<'input> {
        Token {
            kind,
            text: Cow::Borrowed(&self.input[start..self.pos]),
            pos: start,
            len: self.pos - start,
        }
    }

    fn read_number(&mut self, start: usize) -> Result<Token<'input>, LexError> {
        let bytes = self.input.as_bytes();
        let mut cursor = skip_while(bytes, start, |b| b.is_ascii_digit());

        // A dot only belongs to the number when a digit follows it; otherwise
        // it is the qualifier separator.
        if starts_decimal_part(bytes, cursor) {
            cursor = skip_while(bytes, cursor + 1, |b| b.is_ascii_digit());
            if starts_decimal_part(bytes, cursor) {
                let end = skip_while(bytes, cursor + 1, |b| b.is_ascii_digit());
                return Err(self.malformed_number(start, end));
            }
        }

        if bytes.get(cursor).copied().is_some_and(is_word_byte) {
            let end = skip_while(bytes, cursor, is_word_byte);
            return Err(self.malformed_number(start, end));
        }

        // Too many digits to hold even as a float
        if !self.input[start..cursor]
            .parse::<f64>()
            .is_ok_and(f64::is_finite)
        {
            return Err(self.malformed_number(start, cursor));
        }

        self.pos = cursor;
        Ok(self.token(TokenKind::NumericLiteral, start))
    }

    fn malformed_number(&self, start: usize, end: usize) -> LexError {
        LexError::MalformedNumber {
            lexeme: self.input[start..end].into(),
            pos: start,
        }
    }

    fn read_quoted(&mut self, start: usize) -> Result<Token<'input>, LexError> {
        let bytes = self.input.as_bytes();
        let quote = bytes[start];
        let content_start = start + 1;

        // Only allocated once a doubled quote has to be collapsed.
        let mut unescaped: Option<String> = None;
        let mut segment_start = content_start;
        let mut cursor = content_start;

        while cursor < bytes.len() {
            if bytes[cursor] != quote {
                cursor += 1;
                continue;
            }
            if bytes.get(cursor + 1) == Some(&quote) {
                unescaped
                    .get_or_insert_with(String::new)
                    .push_str(&self.input[segment_start..=cursor]);
                cursor += 2;
                segment_start = cursor;
                continue;
            }

            let text = match unescaped {
                Some(mut value) => {
                    value.push_str(&self.input[segment_start..cursor]);
                    Cow::Owned(value)
                }
                None => Cow::Borrowed(&self.input[content_start..cursor]),
            };
            self.pos = cursor + 1;
            let kind = if quote == b'"' {
                TokenKind::QuotedIdentifier
            } else {
                TokenKind::StringLiteral
            };
            return Ok(Token {
                kind,
                text,
                pos: start,
                len: self.pos - start,
            });
        }

        Err(LexError::UnterminatedQuote {
            quote: char::from(quote),
            pos: start,
        })
    }
}

impl<'input> Iterator for Lexer<'input> {
    type Item = Result<Token<'input>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }
        let result = self.next_token();
        if result.is_err() {
            self.pos = self.input.len();
        }
        Some(result)
    }
}

/// Tokenize `input` in one call.
///
/// # Errors
///
/// Returns the first lexing error encountered.
pub fn lex(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(input).tokenize()
}

/// Tokenize raw bytes holding UTF-8 query text.
///
/// # Errors
///
/// Returns [`LexError::InvalidUtf8`] if the bytes are not UTF-8, or the first
/// lexing error encountered.
pub fn lex_bytes(input: &[u8]) -> Result<Vec<Token<'_>>, LexError> {
    let text = core::str::from_utf8(input).map_err(|err| LexError::InvalidUtf8 {
        pos: err.valid_up_to(),
    })?;
    lex(text)
}

fn skip_while(bytes: &[u8], mut pos: usize, predicate: impl Fn(u8) -> bool) -> usize {
    while pos < bytes.len() && predicate(bytes[pos]) {
        pos += 1;
    }
    pos
}

fn starts_decimal_part(bytes: &[u8], pos: usize) -> bool {
    bytes.get(pos) == Some(&b'.') && bytes.get(pos + 1).is_some_and(u8::is_ascii_digit)
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Check if a byte can continue an identifier.
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn kinds(input: &str) -> Vec<TokenKind> {
        lex(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_create_table_yields_five_tokens() {
        let tokens = lex("CREATE TABLE account").unwrap();
        assert_eq!(tokens.len(), 5);
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Keyword(Keyword::Create),
                TokenKind::Whitespace,
                TokenKind::Keyword(Keyword::Table),
                TokenKind::Whitespace,
                TokenKind::Identifier,
            ]
        );
        assert_eq!(tokens[4].text, "account");
        assert_eq!(tokens[4].pos, 13);
    }

    #[test]
    fn test_keywords_keep_their_casing() {
        let tokens = lex("delete From").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Delete));
        assert_eq!(tokens[0].text, "delete");
        assert_eq!(tokens[2].kind, TokenKind::Keyword(Keyword::From));
        assert_eq!(tokens[2].text, "From");
    }

    #[test]
    fn test_whitespace_run_is_one_token() {
        let tokens = lex("a \t\n\r\n b").unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(tokens[1].is_whitespace());
        assert_eq!(tokens[1].len, 6);
    }

    #[test]
    fn test_identifiers() {
        let tokens = lex("user_addresses id2").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "user_addresses");
        assert_eq!(tokens[2].text, "id2");
    }

    #[test]
    fn test_numbers() {
        let tokens = lex("42 3.14").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::NumericLiteral);
        assert_eq!(tokens[0].text, "42");
        assert_eq!(tokens[2].kind, TokenKind::NumericLiteral);
        assert_eq!(tokens[2].text, "3.14");
    }

    #[test]
    fn test_dot_after_digits_without_fraction_is_a_symbol() {
        assert_eq!(
            kinds("1.x"),
            vec![
                TokenKind::NumericLiteral,
                TokenKind::Symbol(Symbol::Dot),
                TokenKind::Identifier,
            ]
        );
        assert_eq!(
            kinds("1."),
            vec![TokenKind::NumericLiteral, TokenKind::Symbol(Symbol::Dot)]
        );
    }

    #[test]
    fn test_qualified_attribute() {
        assert_eq!(
            kinds("\"account\".id"),
            vec![
                TokenKind::QuotedIdentifier,
                TokenKind::Symbol(Symbol::Dot),
                TokenKind::Identifier,
            ]
        );
        assert_eq!(
            kinds("address.*"),
            vec![
                TokenKind::Identifier,
                TokenKind::Symbol(Symbol::Dot),
                TokenKind::Symbol(Symbol::Star),
            ]
        );
    }

    #[test]
    fn test_quoted_forms() {
        let tokens = lex("\"Posts\" 'foo@bar.com'").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::QuotedIdentifier);
        assert_eq!(tokens[0].text, "Posts");
        assert_eq!(tokens[0].len, 7);
        assert_eq!(tokens[2].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[2].text, "foo@bar.com");
    }

    #[test]
    fn test_doubled_quote_is_an_escape() {
        let tokens = lex("'it''s' \"a\"\"b\"").unwrap();
        assert_eq!(tokens[0].text, "it's");
        assert!(matches!(tokens[0].text, Cow::Owned(_)));
        assert_eq!(tokens[0].len, 7);
        assert_eq!(tokens[2].kind, TokenKind::QuotedIdentifier);
        assert_eq!(tokens[2].text, "a\"b");
    }

    #[test]
    fn test_quoted_keyword_is_not_a_keyword() {
        assert_eq!(kinds("\"select\""), vec![TokenKind::QuotedIdentifier]);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(
            kinds("(),;=*"),
            vec![
                TokenKind::Symbol(Symbol::LParen),
                TokenKind::Symbol(Symbol::RParen),
                TokenKind::Symbol(Symbol::Comma),
                TokenKind::Symbol(Symbol::Semicolon),
                TokenKind::Symbol(Symbol::Equals),
                TokenKind::Symbol(Symbol::Star),
            ]
        );
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(
            lex("SELECT 'abc").unwrap_err(),
            LexError::UnterminatedQuote {
                quote: '\'',
                pos: 7
            }
        );
        assert_eq!(
            lex("\"abc''").unwrap_err(),
            LexError::UnterminatedQuote { quote: '"', pos: 0 }
        );
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            lex("id > 1").unwrap_err(),
            LexError::UnexpectedCharacter { char: '>', pos: 3 }
        );
        assert_eq!(
            lex("_id").unwrap_err(),
            LexError::UnexpectedCharacter { char: '_', pos: 0 }
        );
        assert_eq!(
            lex("é").unwrap_err(),
            LexError::UnexpectedCharacter { char: 'é', pos: 0 }
        );
    }

    #[test]
    fn test_non_ascii_inside_quotes_is_kept() {
        let tokens = lex("'héllo'").unwrap();
        assert_eq!(tokens[0].text, "héllo");
    }

    #[test]
    fn test_malformed_numbers() {
        assert_eq!(
            lex("x = 12abc").unwrap_err(),
            LexError::MalformedNumber {
                lexeme: "12abc".into(),
                pos: 4
            }
        );
        assert_eq!(
            lex("1.2.3").unwrap_err(),
            LexError::MalformedNumber {
                lexeme: "1.2.3".into(),
                pos: 0
            }
        );
    }

    #[test]
    fn test_number_too_large_for_a_float() {
        let digits = "9".repeat(400);
        assert!(matches!(
            lex(&digits),
            Err(LexError::MalformedNumber { pos: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        assert_eq!(
            lex_bytes(b"ab\xffcd").unwrap_err(),
            LexError::InvalidUtf8 { pos: 2 }
        );
        assert_eq!(lex_bytes(b"id").unwrap().len(), 1);
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut lexer = Lexer::new("a ? b");
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().is_ok());
        assert_eq!(lexer.position(), 2);
        assert!(lexer.next().unwrap().is_err());
        assert_eq!(lexer.position(), 5);
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_empty_input() {
        assert!(lex("").unwrap().is_empty());
    }
}
