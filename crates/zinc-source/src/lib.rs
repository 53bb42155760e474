//! Source spans and position tracking for the Zinc language server.
//!
//! This crate provides the fundamental location types shared by the lexer,
//! parser, AST, and document layers: byte spans, file identifiers, and
//! line/column positions. Everything downstream (diagnostics, hover, edits)
//! is keyed by these types.

pub mod types;
