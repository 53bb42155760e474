//! # Lexer module for the Zinc programming language.
//!
//! This module converts source bytes into tokens. It uses the `logos` crate
//! for the token automaton and wraps it with the stream contract the parser
//! relies on:
//!
//! - Whitespace, newlines, and comments are returned as distinct tokens
//!   rather than skipped.
//! - Unrecognized byte sequences become `Invalid` tokens.
//! - After the end of input, every call returns `Eof` with the empty span
//!   `[len, len)`, indefinitely.
//! - Literal tokens carry their parsed value payload.

mod token;

use logos::{Lexer as LogosLexer, Logos};
pub use token::*;
use zinc_source::types::{FileID, Span};

/// Streaming lexer over a single source file.
#[derive(Debug)]
pub struct Lexer<'src> {
    /// The inner logos lexer
    inner: LogosLexer<'src, TokenKind>,
    /// Source code
    source: &'src str,
    /// File identifier
    file_id: FileID,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source
    #[must_use]
    pub fn new(source: &'src str, file_id: FileID) -> Self {
        Self { inner: TokenKind::lexer(source), source, file_id }
    }

    /// Returns the source code being lexed
    #[must_use]
    pub const fn source(&self) -> &'src str { self.source }

    /// Returns the file ID
    #[must_use]
    pub const fn file_id(&self) -> FileID { self.file_id }

    /// Returns the next token.
    ///
    /// Never runs out: once the underlying stream is exhausted this returns
    /// `Eof` tokens forever.
    pub fn next_token(&mut self) -> Token<'src> {
        match self.inner.next() {
            Some(result) => {
                let span = Span::from(self.inner.span());
                let lexeme = self.inner.slice();

                match result {
                    Ok(kind) => {
                        let value = literal_value(kind, lexeme);
                        Token::new(kind, lexeme, span, value)
                    }
                    Err(()) => Token::new(TokenKind::Invalid, lexeme, span, TokenValue::None),
                }
            }
            None => Token::with_empty_lexeme(TokenKind::Eof, Span::empty(self.source.len())),
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    /// Yields tokens up to and excluding `Eof`, for collecting in tests and
    /// tools. The parser calls [`Lexer::next_token`] directly instead.
    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof { None } else { Some(token) }
    }
}

/// Parses the payload of a literal lexeme.
///
/// A well-formed lexeme that overflows its value type falls back to the
/// default value; the parser treats literal payloads as best-effort data.
fn literal_value(kind: TokenKind, lexeme: &str) -> TokenValue {
    match kind {
        TokenKind::Integer => TokenValue::Int(parse_integer(lexeme)),
        TokenKind::Real => {
            let digits: String = lexeme.chars().filter(|&c| c != '_').collect();
            TokenValue::Real(digits.parse().unwrap_or_default())
        }
        TokenKind::String => {
            TokenValue::Str(unescape(&lexeme[1..lexeme.len().saturating_sub(1)]))
        }
        TokenKind::CharLiteral => {
            let content = unescape(&lexeme[1..lexeme.len().saturating_sub(1)]);
            TokenValue::Char(content.chars().next().unwrap_or_default())
        }
        _ => TokenValue::None,
    }
}

/// Parses an integer lexeme, honoring radix prefixes and `_` separators.
fn parse_integer(lexeme: &str) -> i64 {
    let digits: String = lexeme.chars().filter(|&c| c != '_').collect();

    let (radix, rest) = match digits.get(..2) {
        Some("0x" | "0X") => (16, &digits[2..]),
        Some("0o" | "0O") => (8, &digits[2..]),
        Some("0b" | "0B") => (2, &digits[2..]),
        _ => (10, digits.as_str()),
    };

    i64::from_str_radix(rest, radix).unwrap_or_default()
}

/// Resolves the standard escape sequences in a string or char literal body.
fn unescape(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }

        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }

    result
}
