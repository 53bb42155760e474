//! Parser module for the Zinc programming language.
//!
//! A panic-mode recursive-descent parser. On a syntax error the parser
//! records one diagnostic, enters panic mode (suppressing the cascade of
//! follow-on errors), and resynchronizes at the next declaration or
//! statement boundary. Parsing is total: every input produces a translation
//! unit covering the whole source, with `"<error>"` placeholder nodes where
//! expressions could not be salvaged.

mod declaration;
mod expression;
mod statement;
mod types;

use zinc_ast::arena::Ast;
use zinc_ast::nodes::{AnyNode, IdentifierExpr, NodeID, TranslationUnitDecl};
use zinc_ast::unit::TranslationUnit;
use zinc_source::types::{FileID, SourceSpan, Span};

use crate::diagnostics::Diagnostic;
use crate::lexer::{Lexer, Token, TokenKind};

/// Keywords that open a declaration or statement.
///
/// These are the synchronization targets of panic-mode recovery, and double
/// as implicit statement terminators when a `;` is missing.
pub const SYNC_KEYWORDS: &[&str] = &[
    "fn", "struct", "union", "enum", "const", "module", "import", "if", "while", "for", "switch",
    "return", "break", "continue", "defer",
];

/// The result of parsing one source file.
#[derive(Debug)]
pub struct ParseOutput {
    /// The translation unit, covering the whole source
    pub unit: TranslationUnit,
    /// True when at least one syntax error was recorded
    pub had_error: bool,
    /// Number of syntax errors encountered (including unrecorded ones past
    /// the reporting limit)
    pub error_count: usize,
    /// The recorded diagnostics
    pub diagnostics: Vec<Diagnostic>,
}

/// The recursive-descent parser.
///
/// Converts the token stream of one file into an AST. Whitespace and
/// comment tokens are skipped transparently inside [`Parser::advance`];
/// newline tokens are delivered and consumed explicitly at declaration,
/// member, statement, and import-segment boundaries so the parser can use
/// them as implicit statement terminators.
#[derive(Debug)]
pub struct Parser<'src> {
    /// Source code being parsed
    source: &'src str,
    /// File identifier
    file_id: FileID,
    /// Lexer providing tokens
    lexer: Lexer<'src>,
    /// Current (not yet consumed) token
    pub(crate) current: Token<'src>,
    /// Most recently consumed token
    pub(crate) previous: Token<'src>,
    /// AST arena under construction
    pub(crate) ast: Ast,
    /// Recorded diagnostics
    diagnostics: Vec<Diagnostic>,
    /// True when at least one error was recorded
    had_error: bool,
    /// True while suppressing cascade errors after a syntax error
    pub(crate) panic_mode: bool,
    /// Number of errors encountered
    error_count: usize,
    /// Errors past this limit are counted but not recorded
    max_errors: usize,
    /// Number of tokens consumed; drives the livelock guards
    tokens_consumed: usize,
}

impl<'src> Parser<'src> {
    /// Default cap on recorded diagnostics.
    pub const DEFAULT_MAX_ERRORS: usize = 100;

    /// Create a new parser for the given source code
    #[must_use]
    pub fn new(source: &'src str, file_id: FileID) -> Self {
        let lexer = Lexer::new(source, file_id);
        let placeholder = Token::with_empty_lexeme(TokenKind::Eof, Span::empty(0));

        let mut parser = Self {
            source,
            file_id,
            lexer,
            current: placeholder.clone(),
            previous: placeholder,
            ast: Ast::new(),
            diagnostics: Vec::new(),
            had_error: false,
            panic_mode: false,
            error_count: 0,
            max_errors: Self::DEFAULT_MAX_ERRORS,
            tokens_consumed: 0,
        };

        // Prime the current token.
        parser.advance();
        parser.tokens_consumed = 0;

        parser
    }

    /// Overrides the cap on recorded diagnostics.
    ///
    /// Errors past the cap are still counted, recovery still runs; only
    /// the diagnostic list stops growing.
    #[must_use]
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Parses the whole source into a translation unit.
    ///
    /// Never fails: errors are absorbed into the diagnostic list and the
    /// returned unit always covers the whole source.
    #[must_use]
    pub fn parse(mut self, filename: &str) -> ParseOutput {
        let mut declarations = Vec::new();

        loop {
            self.skip_newlines();
            if self.check(TokenKind::Eof) {
                break;
            }

            let before = self.tokens_consumed;

            if let Some(decl) = self.parse_declaration() {
                declarations.push(decl);
            }

            if self.panic_mode {
                self.synchronize();
            }

            // Livelock guard: a declaration that consumed nothing would
            // stall the loop forever.
            if self.tokens_consumed == before {
                self.error_at_current("Unexpected token, skipping");
                self.advance();
            }
        }

        let root = self.ast.alloc(
            AnyNode::TranslationUnit(TranslationUnitDecl { declarations: declarations.clone() }),
            Span::new(0, self.source.len()),
        );
        for decl in declarations {
            let _ = self.ast.set_parent(decl, root);
        }
        self.ast.set_root(root);

        let unit =
            TranslationUnit::new(self.ast, root, self.file_id, filename.to_string(), self.source);

        ParseOutput {
            unit,
            had_error: self.had_error,
            error_count: self.error_count,
            diagnostics: self.diagnostics,
        }
    }

    // ------------------------------------------------------------------
    // Token stream discipline
    // ------------------------------------------------------------------

    /// Advance to the next meaningful token.
    ///
    /// Moves `current` into `previous`, then pulls tokens until a
    /// non-trivia, non-invalid token appears. Each `Invalid` token is
    /// reported as "Invalid token"; whitespace and comments are skipped
    /// silently. Newlines are NOT skipped here.
    pub(crate) fn advance(&mut self) {
        self.tokens_consumed += 1;

        loop {
            let token = self.lexer.next_token();

            if token.kind.is_trivia() {
                continue;
            }

            if token.kind == TokenKind::Invalid {
                let span = self.token_span(&token);
                let lexeme = token.lexeme.to_string();
                self.report(Diagnostic::error("Invalid token", span, lexeme));
                continue;
            }

            self.previous = std::mem::replace(&mut self.current, token);
            break;
        }
    }

    /// Check if the current token is of the specified kind
    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool { self.current.kind == kind }

    /// Check if the current token is an `Ident` with the given lexeme
    #[inline]
    pub(crate) fn check_keyword(&self, keyword: &str) -> bool { self.current.is_keyword(keyword) }

    /// Consume the current token if it matches the expected kind
    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            return true;
        }

        false
    }

    /// Consume the current token if it matches, report otherwise.
    ///
    /// Returns true when the token was consumed.
    pub(crate) fn consume(&mut self, kind: TokenKind, message: &str) -> bool {
        if self.match_token(kind) {
            return true;
        }

        self.error_at_current(message);
        false
    }

    /// Skip any newline tokens at the current position.
    ///
    /// Called at every declaration, struct-member, statement, and import
    /// path boundary.
    pub(crate) fn skip_newlines(&mut self) {
        while self.check(TokenKind::Newline) {
            self.advance();
        }
    }

    /// Returns the number of tokens consumed so far.
    ///
    /// Compound parsers compare this across a step to detect stalls.
    pub(crate) const fn tokens_consumed(&self) -> usize { self.tokens_consumed }

    // ------------------------------------------------------------------
    // Error reporting and recovery
    // ------------------------------------------------------------------

    /// Reports an error at the given token.
    ///
    /// A no-op while in panic mode, which suppresses error cascades until
    /// the next synchronization point. Past `max_errors` the error is
    /// counted but no diagnostic is recorded.
    pub(crate) fn error_at(&mut self, token_span: Span, lexeme: &str, message: &str) {
        if self.panic_mode {
            return;
        }

        self.panic_mode = true;
        self.had_error = true;
        self.error_count += 1;

        if self.error_count <= self.max_errors {
            let span = SourceSpan::new(self.file_id, token_span.start, token_span.end);
            self.diagnostics.push(Diagnostic::error(message, span, lexeme));
        }
    }

    /// Reports an error at the current token.
    pub(crate) fn error_at_current(&mut self, message: &str) {
        let span = self.current.span;
        let lexeme = self.current.lexeme.to_string();
        self.error_at(span, &lexeme, message);
    }

    /// Reports an error at the previously consumed token.
    pub(crate) fn error_at_previous(&mut self, message: &str) {
        let span = self.previous.span;
        let lexeme = self.previous.lexeme.to_string();
        self.error_at(span, &lexeme, message);
    }

    /// Records a diagnostic without entering panic mode.
    fn report(&mut self, diagnostic: Diagnostic) {
        self.had_error = true;
        self.error_count += 1;

        if self.error_count <= self.max_errors {
            self.diagnostics.push(diagnostic);
        }
    }

    /// Skips tokens until a known-safe boundary after a syntax error.
    ///
    /// Clears panic mode, then advances until: the previous token was `;`
    /// or `}`, the current token is `{` or `}`, the current token is a
    /// declaration/statement keyword, or end of input.
    pub(crate) fn synchronize(&mut self) {
        self.panic_mode = false;

        while !self.check(TokenKind::Eof) {
            if matches!(self.previous.kind, TokenKind::Semicolon | TokenKind::RBrace) {
                return;
            }

            match self.current.kind {
                TokenKind::LBrace | TokenKind::RBrace => return,
                TokenKind::Ident if SYNC_KEYWORDS.contains(&self.current.lexeme) => return,
                _ => self.advance(),
            }
        }
    }

    /// Consumes a statement terminator, or recovers.
    ///
    /// A missing `;` is forgiven silently when the current token already
    /// marks a boundary: `{`, `}`, end of input, a newline, or a
    /// declaration/statement keyword. Anything else reports an error and
    /// synchronizes.
    pub(crate) fn expect_terminator(&mut self) {
        if self.match_token(TokenKind::Semicolon) {
            return;
        }

        match self.current.kind {
            TokenKind::LBrace | TokenKind::RBrace | TokenKind::Eof | TokenKind::Newline => {}
            TokenKind::Ident if SYNC_KEYWORDS.contains(&self.current.lexeme) => {}
            _ => {
                self.error_at_current("Expected ';'");
                self.synchronize();
            }
        }
    }

    // ------------------------------------------------------------------
    // Node construction helpers
    // ------------------------------------------------------------------

    /// Returns the span of an already-allocated node.
    pub(crate) fn node_span(&self, id: NodeID) -> Span {
        self.ast.get(id).map_or_else(Span::default, |node| node.span)
    }

    /// Allocates an identifier node with the given name and span.
    pub(crate) fn identifier_node(&mut self, name: &str, span: Span) -> NodeID {
        self.ast.alloc(AnyNode::IdentifierExpr(IdentifierExpr { name: name.to_string() }), span)
    }

    /// Synthesizes an `"<error>"` placeholder identifier.
    ///
    /// Placeholders are first-class nodes: parent-linked by their consumer
    /// and visible to traversals.
    pub(crate) fn error_node(&mut self, span: Span) -> NodeID {
        self.identifier_node("<error>", span)
    }

    /// Consumes the current token and allocates an identifier node from it.
    pub(crate) fn identifier_from_current(&mut self) -> NodeID {
        let span = self.current.span;
        let name = self.current.lexeme;
        self.advance();

        self.identifier_node(name, span)
    }

    /// Converts a token's span into a file-tagged span.
    fn token_span(&self, token: &Token<'src>) -> SourceSpan {
        SourceSpan::new(self.file_id, token.span.start, token.span.end)
    }
}
