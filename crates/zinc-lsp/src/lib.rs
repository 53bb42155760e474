//! Zinc language server core.
//!
//! This crate holds the document and project model of the Zinc language
//! server, plus the JSON-RPC transport framing at its outer boundary:
//!
//! - [`document`]: one open source file: text, version, parsed AST, edit
//!   application, keyword completions, and hover lookup.
//! - [`project`]: the set of open files, indexed both by filesystem path
//!   and by client URI.
//! - [`transport`]: Content-Length framed JSON-RPC message reading and
//!   writing over arbitrary byte streams.
//!
//! The core is single-threaded and cooperative: one request is processed
//! to completion before the next is read, and no type here carries interior
//! mutability. AST handles returned by a query are valid only until the
//! next edit of the owning file.

pub mod document;
pub mod project;
pub mod transport;
