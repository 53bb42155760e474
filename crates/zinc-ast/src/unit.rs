//! Translation units: one parsed file, its arena, and its line map.
//!
//! A [`TranslationUnit`] bundles the AST arena produced by a parse with the
//! precomputed line map of the source it was parsed from. It answers the
//! position queries the server needs: offset⇄position conversion and
//! most-specific-node-at-position lookup. A unit is immutable; edits to the
//! owning document replace it wholesale with a fresh parse.

use zinc_source::types::{FileID, Position};

use crate::arena::Ast;
use crate::nodes::{AnyNode, ImportDecl, NodeID};

/// The root of one parsed source file.
#[derive(Debug, Clone)]
pub struct TranslationUnit {
    /// The arena holding every node of this unit.
    ast: Ast,
    /// The root node (kind `TranslationUnit`).
    root: NodeID,
    /// The file this unit was parsed from.
    file_id: FileID,
    /// The file name recorded at parse time.
    filename: String,
    /// Byte offsets where each line begins; `line_map[0]` is always 0.
    line_map: Vec<usize>,
    /// Length of the source text in bytes.
    source_len: usize,
}

impl TranslationUnit {
    /// Creates a translation unit over a freshly parsed arena.
    ///
    /// The line map is built here, once, from the source text the parse ran
    /// over.
    #[must_use]
    pub fn new(ast: Ast, root: NodeID, file_id: FileID, filename: String, source: &str) -> Self {
        Self {
            ast,
            root,
            file_id,
            filename,
            line_map: build_line_map(source),
            source_len: source.len(),
        }
    }

    /// Returns the arena of this unit.
    #[must_use]
    pub const fn ast(&self) -> &Ast { &self.ast }

    /// Returns the root node of this unit.
    #[must_use]
    pub const fn root(&self) -> NodeID { self.root }

    /// Returns the file this unit was parsed from.
    #[must_use]
    pub const fn file_id(&self) -> FileID { self.file_id }

    /// Returns the file name recorded at parse time.
    #[must_use]
    pub fn filename(&self) -> &str { &self.filename }

    /// Returns the line map: the byte offset where each line begins.
    #[must_use]
    pub fn line_map(&self) -> &[usize] { &self.line_map }

    /// Returns the number of lines in the source.
    #[must_use]
    pub fn line_count(&self) -> usize { self.line_map.len() }

    /// Returns the top-level declarations of this unit, in source order.
    #[must_use]
    pub fn declarations(&self) -> &[NodeID] {
        match self.ast.get(self.root).map(|node| &node.data) {
            Some(AnyNode::TranslationUnit(unit)) => &unit.declarations,
            _ => &[],
        }
    }

    /// Converts a byte offset to a position.
    ///
    /// Finds the greatest line `L` with `line_map[L] <= offset` by binary
    /// search; the character is the byte distance from that line's start.
    /// Offsets past the end of the source land on the last line.
    #[must_use]
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let line = self.line_map.partition_point(|&start| start <= offset) - 1;

        Position::new(line as u32, (offset - self.line_map[line]) as u32)
    }

    /// Converts a position to a byte offset.
    ///
    /// A line past the end of the document clamps to the source length, and
    /// so does a character running past it. Positions past the end of their
    /// line deliberately spill into the following line's bytes; the lenient
    /// clamping keeps protocol positions past end-of-line usable.
    #[must_use]
    pub fn position_to_offset(&self, position: Position) -> usize {
        let line = position.line as usize;
        if line >= self.line_map.len() {
            return self.source_len;
        }

        (self.line_map[line] + position.character as usize).min(self.source_len)
    }

    /// Finds the most specific node whose span contains the given offset.
    ///
    /// The root iterates its declarations and returns the first hit; the
    /// unit node itself is never returned. Returns `None` when no
    /// declaration covers the offset.
    #[must_use]
    pub fn find_node_at_offset(&self, offset: usize) -> Option<NodeID> {
        for &decl in self.declarations() {
            if let Some(hit) = self.ast.deepest_at_offset(decl, offset) {
                return Some(hit);
            }
        }

        None
    }

    /// Finds the most specific node at the given position.
    #[must_use]
    pub fn find_node_at_position(&self, position: Position) -> Option<NodeID> {
        self.find_node_at_offset(self.position_to_offset(position))
    }

    /// Reconstructs the `::`-joined path string of an import declaration.
    #[must_use]
    pub fn import_path(&self, import: &ImportDecl) -> String {
        let mut segments = Vec::with_capacity(import.identifiers.len());
        for &id in &import.identifiers {
            if let Some(AnyNode::IdentifierExpr(ident)) = self.ast.get(id).map(|node| &node.data) {
                segments.push(ident.name.as_str());
            }
        }

        segments.join("::")
    }
}

/// Computes the byte offsets of all line starts in the content.
///
/// `line_map[0]` is always 0 and every `'\n'` at byte `i` contributes
/// `i + 1`, so the map has one more entry than the source has newlines.
#[must_use]
pub fn build_line_map(source: &str) -> Vec<usize> {
    let mut line_map = vec![0];

    for (i, byte) in source.bytes().enumerate() {
        if byte == b'\n' {
            line_map.push(i + 1);
        }
    }

    line_map
}
