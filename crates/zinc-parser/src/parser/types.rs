//! Type parsing for the Zinc programming language.
//!
//! Types begin with a single identifier token of any lexical class and may
//! carry postfix suffixes: `*` builds a pointer type and `[size?]` an array
//! type. Absence of a leading identifier means "no type here" and is left
//! to the caller to judge.

use zinc_ast::nodes::{AnyNode, ArrayType, NodeID, PointerType, TypeIdentifier};
use zinc_source::types::Span;

use super::Parser;
use crate::lexer::TokenKind;

impl Parser<'_> {
    /// Parse a type if one begins at the current token.
    ///
    /// Returns `None` without consuming anything when the current token
    /// cannot start a type; callers treat that as "missing type".
    pub(crate) fn parse_type(&mut self) -> Option<NodeID> {
        if !matches!(
            self.current.kind,
            TokenKind::Ident | TokenKind::TypeIdent | TokenKind::ConstIdent
        ) {
            return None;
        }

        let span = self.current.span;
        let name = self.current.lexeme;
        self.advance();

        Some(self.finish_type(name, span))
    }

    /// Builds a type from an already-consumed leading identifier, then
    /// folds the postfix suffixes.
    pub(crate) fn finish_type(&mut self, name: &str, span: Span) -> NodeID {
        let mut ty = self
            .ast
            .alloc(AnyNode::TypeIdentifier(TypeIdentifier { name: name.to_string() }), span);

        loop {
            if self.match_token(TokenKind::Star) {
                let ptr_span = Span::new(span.start, self.previous.span.end);
                let ptr =
                    self.ast.alloc(AnyNode::PointerType(PointerType { pointee: ty }), ptr_span);
                let _ = self.ast.set_parent(ty, ptr);
                ty = ptr;
            } else if self.match_token(TokenKind::LBracket) {
                let size = if self.check(TokenKind::RBracket) {
                    None
                } else {
                    Some(self.parse_expression())
                };
                if !self.match_token(TokenKind::RBracket) {
                    self.error_at_current("Expected ']' in array type");
                }

                let array_span = Span::new(span.start, self.previous.span.end);
                let array =
                    self.ast.alloc(AnyNode::ArrayType(ArrayType { element: ty, size }), array_span);
                let _ = self.ast.set_parent(ty, array);
                if let Some(size) = size {
                    let _ = self.ast.set_parent(size, array);
                }
                ty = array;
            } else {
                return ty;
            }
        }
    }
}
