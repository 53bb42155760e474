//! Diagnostics for the Zinc parser.
//!
//! Syntax errors never escape the parser as `Err` values; they are recorded
//! here and recovery continues. Callers inspect the collected list after the
//! parse completes.

use std::fmt;

use thiserror::Error;
use zinc_source::types::SourceSpan;

/// Severity level of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// A syntax error
    Error,
    /// A warning about a suspicious construct
    Warning,
}

impl DiagnosticLevel {
    /// Returns a string representation of the diagnostic level
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str()) }
}

/// A diagnostic message keyed by the offending token.
///
/// Implements `std::error::Error` so diagnostics can flow through generic
/// error plumbing, but the parser itself only ever collects them.
#[derive(Debug, Clone, Error)]
#[error("{level}: {message} at {span}")]
pub struct Diagnostic {
    /// The severity level of this diagnostic
    pub level: DiagnosticLevel,
    /// The message describing the issue
    pub message: String,
    /// Source location of the offending token
    pub span: SourceSpan,
    /// The lexeme of the offending token (empty for `Eof`)
    pub lexeme: String,
}

impl Diagnostic {
    /// Create a new error diagnostic
    #[must_use]
    pub fn error(message: impl Into<String>, span: SourceSpan, lexeme: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            message: message.into(),
            span,
            lexeme: lexeme.into(),
        }
    }

    /// Create a new warning diagnostic
    #[must_use]
    pub fn warning(
        message: impl Into<String>,
        span: SourceSpan,
        lexeme: impl Into<String>,
    ) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            message: message.into(),
            span,
            lexeme: lexeme.into(),
        }
    }
}
