//! # Zinc Parser
//!
//! Lexer and parser for the Zinc programming language, built for use inside
//! a language server: the lexer surfaces whitespace, newline, and comment
//! tokens instead of dropping them, and the parser recovers from syntax
//! errors with panic-mode synchronization so every input, however broken,
//! still yields a translation unit covering the whole source.
//!
//! ## Key properties
//!
//! - **Total parsing**: syntax errors are recorded as diagnostics, never
//!   surfaced as `Err` values; the resulting AST may contain `"<error>"`
//!   placeholder identifiers and `"<missing>"` names.
//! - **Borrowed lexemes**: tokens borrow slices of the source text, so
//!   lexing allocates only for literal payloads.
//! - **Bounded progress**: the declaration loop carries a livelock guard;
//!   parsing any input terminates.

pub mod diagnostics;
pub mod lexer;
pub mod parser;
