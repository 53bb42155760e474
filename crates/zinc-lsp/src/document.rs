//! Document management for the Zinc language server.
//!
//! A [`SourceFile`] owns the text of one open file together with its parsed
//! translation unit. Every successful edit replaces the content, adopts the
//! client's version number, and re-parses; the previous AST and every handle
//! into it become invalid at that moment.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use zinc_ast::nodes::AnyNode;
use zinc_ast::unit::TranslationUnit;
use zinc_parser::diagnostics::Diagnostic;
use zinc_parser::parser::Parser;
use zinc_source::types::{FileID, Position as SourcePosition};

/// The keyword set served by completions.
pub const KEYWORD_COMPLETIONS: &[&str] = &[
    "struct", "union", "enum", "fn", "macro", "const", "var", "if", "else", "while", "for",
    "foreach", "switch", "case", "default", "return", "break", "continue", "defer", "import",
    "module",
];

/// Errors surfaced by document edits and queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// An edit range had `end < start` or ran past the document
    #[error("invalid range")]
    InvalidRange,
    /// A line/column position lies outside the document
    #[error("invalid position")]
    InvalidPosition,
    /// A query arrived before the initial parse produced an AST
    #[error("no AST available for this document")]
    NoAst,
}

/// A position in a text document.
///
/// Lines and characters are 0-based; a character is a UTF-8 byte column
/// within its line, not a UTF-16 code unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-based)
    pub line: u32,
    /// Byte column within the line (0-based)
    pub character: u32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self { Self { line, character } }
}

/// A half-open range between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Range {
    /// Creates a new range.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self { Self { start, end } }
}

/// One change to a document, mirroring the LSP wire shape.
///
/// A change without a range replaces the whole document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextChange {
    /// The replaced range; `None` means a full-document replacement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,
    /// The replacement text
    pub text: String,
}

impl TextChange {
    /// Creates a full-document replacement.
    #[must_use]
    pub fn full(text: impl Into<String>) -> Self { Self { range: None, text: text.into() } }

    /// Creates a ranged replacement.
    #[must_use]
    pub fn ranged(range: Range, text: impl Into<String>) -> Self {
        Self { range: Some(range), text: text.into() }
    }
}

/// One open source file: text, version, and parsed AST.
#[derive(Debug)]
pub struct SourceFile {
    /// Filesystem path of the file
    path: String,
    /// Client URI of the file
    uri: Url,
    /// Current text content
    content: String,
    /// Parsed translation unit over `content`
    unit: Option<TranslationUnit>,
    /// Client-supplied document version; non-decreasing
    version: i32,
    /// True when the last parse recorded at least one error
    has_errors: bool,
    /// Error count of the last parse
    error_count: usize,
    /// Diagnostics of the last parse
    diagnostics: Vec<Diagnostic>,
    /// File identifier assigned by the owning project
    file_id: FileID,
}

impl SourceFile {
    /// Opens a file: stores the content and parses it immediately.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        uri: Url,
        content: impl Into<String>,
        version: i32,
        file_id: FileID,
    ) -> Self {
        let mut file = Self {
            path: path.into(),
            uri,
            content: content.into(),
            unit: None,
            version,
            has_errors: false,
            error_count: 0,
            diagnostics: Vec::new(),
            file_id,
        };
        file.reparse();

        file
    }

    /// Returns the filesystem path of the file.
    #[must_use]
    pub fn path(&self) -> &str { &self.path }

    /// Returns the client URI of the file.
    #[must_use]
    pub const fn uri(&self) -> &Url { &self.uri }

    /// Returns the current text content.
    #[must_use]
    pub fn content(&self) -> &str { &self.content }

    /// Returns the current document version.
    #[must_use]
    pub const fn version(&self) -> i32 { self.version }

    /// Returns the parsed translation unit, if the file has been parsed.
    #[must_use]
    pub const fn unit(&self) -> Option<&TranslationUnit> { self.unit.as_ref() }

    /// Returns true when the last parse recorded errors.
    #[must_use]
    pub const fn has_errors(&self) -> bool { self.has_errors }

    /// Returns the error count of the last parse.
    #[must_use]
    pub const fn error_count(&self) -> usize { self.error_count }

    /// Returns the diagnostics of the last parse.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] { &self.diagnostics }

    /// Returns the file identifier.
    #[must_use]
    pub const fn file_id(&self) -> FileID { self.file_id }

    /// Parses the current content, replacing the previous AST.
    fn reparse(&mut self) {
        let output = Parser::new(&self.content, self.file_id).parse(&self.path);

        self.has_errors = output.had_error;
        self.error_count = output.error_count;
        self.diagnostics = output.diagnostics;
        self.unit = Some(output.unit);

        debug!(
            "parsed {} v{} ({} bytes, {} errors)",
            self.path,
            self.version,
            self.content.len(),
            self.error_count
        );
    }

    /// Applies a batch of text changes and re-parses.
    ///
    /// If the batch contains a full-document change, the LAST such change
    /// wins and replaces the content outright. Otherwise every range is
    /// resolved against the pre-edit content, overlapping ranges are
    /// rejected with [`DocumentError::InvalidRange`], and the splices are
    /// applied back-to-front (sorted by start descending) so an earlier
    /// edit never shifts a later range. On any error neither the content
    /// nor the version is modified.
    pub fn apply_text_changes(
        &mut self,
        changes: &[TextChange],
        new_version: i32,
    ) -> Result<(), DocumentError> {
        if let Some(full) = changes.iter().rev().find(|change| change.range.is_none()) {
            self.content = full.text.clone();
            self.version = new_version;
            self.reparse();
            return Ok(());
        }

        // Resolve all ranges against the current content before touching it.
        let mut splices = Vec::with_capacity(changes.len());
        for change in changes {
            let Some(range) = change.range else { continue };

            let start = resolve_position(&self.content, range.start)?;
            let end = resolve_position(&self.content, range.end)?;
            if start > end || end > self.content.len() {
                return Err(DocumentError::InvalidRange);
            }

            splices.push((start, end, change.text.as_str()));
        }

        // Back-to-front: sort by start descending and refuse overlaps.
        splices.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
        for pair in splices.windows(2) {
            if pair[1].1 > pair[0].0 {
                return Err(DocumentError::InvalidRange);
            }
        }

        let mut content = self.content.clone();
        for (start, end, text) in splices {
            content.replace_range(start..end, text);
        }

        self.content = content;
        self.version = new_version;
        self.reparse();

        Ok(())
    }

    /// Returns the completion items for the given position.
    ///
    /// Currently position-independent: the fixed keyword set is returned
    /// wherever the cursor is. The position parameter is the seam for
    /// context-aware completion later.
    pub fn completions_at_position(
        &self,
        _position: Position,
    ) -> Result<Vec<String>, DocumentError> {
        if self.unit.is_none() {
            return Err(DocumentError::NoAst);
        }

        Ok(KEYWORD_COMPLETIONS.iter().map(|keyword| (*keyword).to_string()).collect())
    }

    /// Returns a short hover string for the node at the given position.
    pub fn hover_at_position(&self, position: Position) -> Result<String, DocumentError> {
        let unit = self.unit.as_ref().ok_or(DocumentError::NoAst)?;

        let node_id = unit
            .find_node_at_position(SourcePosition::new(position.line, position.character))
            .ok_or(DocumentError::InvalidPosition)?;
        let node = unit.ast().get(node_id).ok_or(DocumentError::InvalidPosition)?;

        Ok(match &node.data {
            AnyNode::IdentifierExpr(ident) => format!("Identifier: {}", ident.name),
            AnyNode::FunctionDecl(func) => format!("Function: {}", func.name),
            AnyNode::StructDecl(decl) => format!("Struct: {}", decl.name),
            _ => format!("AST Node: {}", node.kind),
        })
    }
}

/// Resolves a line/column position to a byte offset in `content`.
///
/// The character clamps to the end of its line (the first `'\n'` at or
/// after the line start, or the end of the content for the last line). A
/// line beyond the last line of the content is an error.
fn resolve_position(content: &str, position: Position) -> Result<usize, DocumentError> {
    let line = position.line as usize;

    let mut line_start = 0;
    if line > 0 {
        let mut seen = 0;
        for (i, byte) in content.bytes().enumerate() {
            if byte == b'\n' {
                seen += 1;
                if seen == line {
                    line_start = i + 1;
                    break;
                }
            }
        }
        if seen < line {
            return Err(DocumentError::InvalidPosition);
        }
    }

    let line_end =
        content[line_start..].find('\n').map_or(content.len(), |offset| line_start + offset);

    Ok((line_start + position.character as usize).min(line_end))
}
