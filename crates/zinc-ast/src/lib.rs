//! Abstract Syntax Tree (AST) definitions for the Zinc language server.
//!
//! Nodes live in an arena ([`arena::Ast`]) and reference each other through
//! [`nodes::NodeID`] handles. Parent links are plain back-references set once
//! at attachment; ownership always flows root-to-leaf through the arena, so
//! the parent edge never forms an ownership cycle. A parsed file is wrapped
//! in a [`unit::TranslationUnit`], which adds the line map and the
//! position-based node lookups the server queries go through.

pub mod arena;
pub mod nodes;
pub mod unit;
