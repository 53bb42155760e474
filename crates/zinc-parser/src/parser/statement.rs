//! Statement parsing for the Zinc programming language.
//!
//! Statement parsing is total: every call produces a node, worst case an
//! expression statement around an `"<error>"` placeholder. A missing `;`
//! is forgiven when the next token already marks a statement boundary (a
//! closing brace, a newline, end of input, or a statement keyword);
//! otherwise the parser reports and resynchronizes.

use zinc_ast::nodes::{
    AnyNode,
    AssertStmt,
    BreakStmt,
    CaseStmt,
    CompoundStmt,
    ContinueStmt,
    DeclarationStmt,
    DefaultStmt,
    DeferStmt,
    ExpressionStmt,
    ForStmt,
    ForeachStmt,
    IfStmt,
    NodeID,
    ReturnStmt,
    SwitchStmt,
    VariableDecl,
    WhileStmt,
};
use zinc_source::types::Span;

use super::expression::Precedence;
use super::{Parser, SYNC_KEYWORDS};
use crate::lexer::TokenKind;

impl Parser<'_> {
    /// Parse one statement.
    pub(crate) fn parse_statement(&mut self) -> NodeID {
        self.skip_newlines();

        if self.check(TokenKind::LBrace) {
            return self.parse_block();
        }

        if self.check(TokenKind::Ident) {
            match self.current.lexeme {
                "return" => {
                    self.advance();
                    return self.parse_return_statement();
                }
                "if" => {
                    self.advance();
                    return self.parse_if_statement();
                }
                "while" => {
                    self.advance();
                    return self.parse_while_statement();
                }
                "for" => {
                    self.advance();
                    return self.parse_for_statement();
                }
                "foreach" => {
                    self.advance();
                    return self.parse_foreach_statement();
                }
                "switch" => {
                    self.advance();
                    return self.parse_switch_statement();
                }
                "break" => {
                    self.advance();
                    return self.parse_break_statement();
                }
                "continue" => {
                    self.advance();
                    return self.parse_continue_statement();
                }
                "defer" => {
                    self.advance();
                    return self.parse_defer_statement();
                }
                "assert" => {
                    self.advance();
                    return self.parse_assert_statement();
                }
                "const" => {
                    self.advance();
                    let decl = self.parse_constant_declaration();
                    return self.declaration_statement(decl);
                }
                _ => {}
            }
        }

        self.parse_expression_or_declaration_statement()
    }

    /// Parse a compound statement; expects the current token to be `{`.
    ///
    /// Statements are parsed until `}` or end of input, synchronizing
    /// after each panicked one. A stalled iteration skips one token so
    /// the loop always makes progress.
    pub(crate) fn parse_block(&mut self) -> NodeID {
        let start = self.current.span.start;
        self.advance(); // consume '{'

        let mut statements = Vec::new();
        loop {
            self.skip_newlines();
            if self.check(TokenKind::RBrace) || self.check(TokenKind::Eof) {
                break;
            }

            let before = self.tokens_consumed();
            statements.push(self.parse_statement());

            if self.panic_mode {
                self.synchronize();
            }
            if self.tokens_consumed() == before {
                self.error_at_current("Unexpected token, skipping");
                self.advance();
            }
        }

        if !self.match_token(TokenKind::RBrace) {
            self.error_at_current("Expected '}' after block");
            while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
                self.advance();
            }
            let _ = self.match_token(TokenKind::RBrace);
            self.panic_mode = false;
        }

        let span = Span::new(start, self.previous.span.end);
        let block = self
            .ast
            .alloc(AnyNode::CompoundStmt(CompoundStmt { statements: statements.clone() }), span);
        for stmt in statements {
            let _ = self.ast.set_parent(stmt, block);
        }

        block
    }

    /// Parse a return statement; the keyword is consumed.
    fn parse_return_statement(&mut self) -> NodeID {
        let start = self.previous.span.start;

        let value = if self.at_statement_boundary() { None } else { Some(self.parse_expression()) };
        self.expect_terminator();

        let span = Span::new(start, self.previous.span.end);
        let stmt = self.ast.alloc(AnyNode::ReturnStmt(ReturnStmt { value }), span);
        if let Some(value) = value {
            let _ = self.ast.set_parent(value, stmt);
        }

        stmt
    }

    /// Parse an if statement; the keyword is consumed.
    fn parse_if_statement(&mut self) -> NodeID {
        let start = self.previous.span.start;

        let condition = self.parse_condition("Expected '(' after 'if'");
        let then_branch = self.parse_statement();

        self.skip_newlines();
        let else_branch = if self.check_keyword("else") {
            self.advance();
            Some(self.parse_statement())
        } else {
            None
        };

        let span = Span::new(start, self.previous.span.end);
        let stmt = self
            .ast
            .alloc(AnyNode::IfStmt(IfStmt { condition, then_branch, else_branch }), span);
        let _ = self.ast.set_parent(condition, stmt);
        let _ = self.ast.set_parent(then_branch, stmt);
        if let Some(else_branch) = else_branch {
            let _ = self.ast.set_parent(else_branch, stmt);
        }

        stmt
    }

    /// Parse a while statement; the keyword is consumed.
    fn parse_while_statement(&mut self) -> NodeID {
        let start = self.previous.span.start;

        let condition = self.parse_condition("Expected '(' after 'while'");
        let body = self.parse_statement();

        let span = Span::new(start, self.previous.span.end);
        let stmt = self.ast.alloc(AnyNode::WhileStmt(WhileStmt { condition, body }), span);
        let _ = self.ast.set_parent(condition, stmt);
        let _ = self.ast.set_parent(body, stmt);

        stmt
    }

    /// Parse a C-style for statement; the keyword is consumed.
    ///
    /// All three header slots are optional: `for (;;) stmt` is valid.
    fn parse_for_statement(&mut self) -> NodeID {
        let start = self.previous.span.start;
        let _ = self.consume(TokenKind::LParen, "Expected '(' after 'for'");

        let init = if self.match_token(TokenKind::Semicolon) {
            None
        } else {
            // The initializer consumes its own ';' as its terminator.
            Some(self.parse_expression_or_declaration_statement())
        };

        let condition = if self.match_token(TokenKind::Semicolon) {
            None
        } else {
            let condition = self.parse_expression();
            let _ = self.consume(TokenKind::Semicolon, "Expected ';' after loop condition");
            Some(condition)
        };

        let update =
            if self.check(TokenKind::RParen) { None } else { Some(self.parse_expression()) };
        let _ = self.consume(TokenKind::RParen, "Expected ')' after for clauses");

        let body = self.parse_statement();

        let span = Span::new(start, self.previous.span.end);
        let stmt =
            self.ast.alloc(AnyNode::ForStmt(ForStmt { init, condition, update, body }), span);
        for child in [init, condition, update, Some(body)].into_iter().flatten() {
            let _ = self.ast.set_parent(child, stmt);
        }

        stmt
    }

    /// Parse a foreach statement; the keyword is consumed.
    ///
    /// Syntax: `foreach '(' name ':' expression ')' statement`.
    fn parse_foreach_statement(&mut self) -> NodeID {
        let start = self.previous.span.start;
        let _ = self.consume(TokenKind::LParen, "Expected '(' after 'foreach'");

        let variable = if self.check(TokenKind::Ident) {
            self.identifier_from_current()
        } else {
            self.error_at_current("Expected loop variable");
            let span = Span::empty(self.current.span.start);
            self.error_node(span)
        };

        let _ = self.consume(TokenKind::Colon, "Expected ':' after loop variable");
        let collection = self.parse_expression();
        let _ = self.consume(TokenKind::RParen, "Expected ')' after foreach collection");

        let body = self.parse_statement();

        let span = Span::new(start, self.previous.span.end);
        let stmt = self
            .ast
            .alloc(AnyNode::ForeachStmt(ForeachStmt { variable, collection, body }), span);
        let _ = self.ast.set_parent(variable, stmt);
        let _ = self.ast.set_parent(collection, stmt);
        let _ = self.ast.set_parent(body, stmt);

        stmt
    }

    /// Parse a switch statement; the keyword is consumed.
    fn parse_switch_statement(&mut self) -> NodeID {
        let start = self.previous.span.start;

        let value = self.parse_condition("Expected '(' after 'switch'");

        let mut cases = Vec::new();
        self.skip_newlines();
        if self.match_token(TokenKind::LBrace) {
            loop {
                self.skip_newlines();
                if self.check(TokenKind::RBrace) || self.check(TokenKind::Eof) {
                    break;
                }

                let before = self.tokens_consumed();
                if self.check_keyword("case") {
                    self.advance();
                    cases.push(self.parse_case_arm(false));
                } else if self.check_keyword("default") {
                    self.advance();
                    cases.push(self.parse_case_arm(true));
                } else {
                    self.error_at_current("Expected 'case' or 'default' in switch body");
                    self.synchronize();
                }
                if self.tokens_consumed() == before {
                    self.error_at_current("Unexpected token, skipping");
                    self.advance();
                }
            }
            if !self.match_token(TokenKind::RBrace) {
                self.error_at_current("Expected '}' after switch body");
            }
        } else {
            self.error_at_current("Expected '{' after switch value");
        }

        let span = Span::new(start, self.previous.span.end);
        let stmt = self
            .ast
            .alloc(AnyNode::SwitchStmt(SwitchStmt { value, cases: cases.clone() }), span);
        let _ = self.ast.set_parent(value, stmt);
        for case in cases {
            let _ = self.ast.set_parent(case, stmt);
        }

        stmt
    }

    /// Parse one `case`/`default` arm; the introducing keyword is consumed.
    ///
    /// The arm's statements run until the next `case`/`default` label, the
    /// closing `}`, or end of input.
    fn parse_case_arm(&mut self, is_default: bool) -> NodeID {
        let start = self.previous.span.start;

        let value = if is_default { None } else { Some(self.parse_expression()) };
        let _ = self.consume(TokenKind::Colon, "Expected ':' after case label");

        let mut statements = Vec::new();
        loop {
            self.skip_newlines();
            if self.check(TokenKind::RBrace)
                || self.check(TokenKind::Eof)
                || self.check_keyword("case")
                || self.check_keyword("default")
            {
                break;
            }

            let before = self.tokens_consumed();
            statements.push(self.parse_statement());

            if self.panic_mode {
                self.synchronize();
            }
            if self.tokens_consumed() == before {
                self.error_at_current("Unexpected token, skipping");
                self.advance();
            }
        }

        let span = Span::new(start, self.previous.span.end);
        let arm = match value {
            Some(value) => {
                let arm = self.ast.alloc(
                    AnyNode::CaseStmt(CaseStmt { value, statements: statements.clone() }),
                    span,
                );
                let _ = self.ast.set_parent(value, arm);
                arm
            }
            None => self.ast.alloc(
                AnyNode::DefaultStmt(DefaultStmt { statements: statements.clone() }),
                span,
            ),
        };
        for stmt in statements {
            let _ = self.ast.set_parent(stmt, arm);
        }

        arm
    }

    /// Parse a break statement; the keyword is consumed.
    fn parse_break_statement(&mut self) -> NodeID {
        let start = self.previous.span.start;

        let label = self.parse_optional_label();
        self.expect_terminator();

        let span = Span::new(start, self.previous.span.end);
        self.ast.alloc(AnyNode::BreakStmt(BreakStmt { label }), span)
    }

    /// Parse a continue statement; the keyword is consumed.
    fn parse_continue_statement(&mut self) -> NodeID {
        let start = self.previous.span.start;

        let label = self.parse_optional_label();
        self.expect_terminator();

        let span = Span::new(start, self.previous.span.end);
        self.ast.alloc(AnyNode::ContinueStmt(ContinueStmt { label }), span)
    }

    /// Parse a defer statement; the keyword is consumed.
    fn parse_defer_statement(&mut self) -> NodeID {
        let start = self.previous.span.start;

        let statement = self.parse_statement();

        let span = Span::new(start, self.previous.span.end);
        let stmt = self.ast.alloc(AnyNode::DeferStmt(DeferStmt { statement }), span);
        let _ = self.ast.set_parent(statement, stmt);

        stmt
    }

    /// Parse an assert statement; the keyword is consumed.
    ///
    /// Syntax: `assert condition [',' message] ';'`.
    fn parse_assert_statement(&mut self) -> NodeID {
        let start = self.previous.span.start;

        let condition = self.parse_expression();
        let message =
            if self.match_token(TokenKind::Comma) { Some(self.parse_expression()) } else { None };
        self.expect_terminator();

        let span = Span::new(start, self.previous.span.end);
        let stmt = self.ast.alloc(AnyNode::AssertStmt(AssertStmt { condition, message }), span);
        let _ = self.ast.set_parent(condition, stmt);
        if let Some(message) = message {
            let _ = self.ast.set_parent(message, stmt);
        }

        stmt
    }

    /// Parse a statement that opens with an identifier or other expression
    /// token.
    ///
    /// Two adjacent identifiers (`int x`) mean a local variable
    /// declaration. A lone leading identifier continues as an expression;
    /// since the token is already consumed by then, the expression parser
    /// is entered at its infix loop. `a * b;` therefore parses as a
    /// multiplication, never as a declaration of pointer type `a*`.
    fn parse_expression_or_declaration_statement(&mut self) -> NodeID {
        let start = self.current.span.start;

        if matches!(
            self.current.kind,
            TokenKind::Ident | TokenKind::TypeIdent | TokenKind::ConstIdent
        ) && self.current.lexeme != "true"
            && self.current.lexeme != "false"
        {
            let first_span = self.current.span;
            let first_lexeme = self.current.lexeme;
            self.advance();

            if self.check(TokenKind::Ident) {
                // Local variable declaration.
                let ty = self.finish_type(first_lexeme, first_span);
                let name = self.current.lexeme.to_string();
                self.advance();

                let initializer = if self.match_token(TokenKind::Eq) {
                    Some(self.parse_expression())
                } else {
                    None
                };
                self.expect_terminator();

                let span = Span::new(start, self.previous.span.end);
                let decl = self.ast.alloc(
                    AnyNode::VariableDecl(VariableDecl { name, ty: Some(ty), initializer }),
                    span,
                );
                let _ = self.ast.set_parent(ty, decl);
                if let Some(initializer) = initializer {
                    let _ = self.ast.set_parent(initializer, decl);
                }

                return self.declaration_statement(decl);
            }

            let prefix = self.identifier_node(first_lexeme, first_span);
            let left = self.parse_infix(Precedence::Assignment, prefix);
            let expr = self.parse_ternary_suffix(left);
            return self.finish_expression_statement(start, expr);
        }

        let expr = self.parse_expression();
        self.finish_expression_statement(start, expr)
    }

    /// Wraps an expression into a statement and consumes its terminator.
    fn finish_expression_statement(&mut self, start: usize, expr: NodeID) -> NodeID {
        self.expect_terminator();

        let span = Span::new(start, self.previous.span.end);
        let stmt = self.ast.alloc(AnyNode::ExpressionStmt(ExpressionStmt { expr }), span);
        let _ = self.ast.set_parent(expr, stmt);

        stmt
    }

    /// Wraps a declaration node into statement position.
    fn declaration_statement(&mut self, declaration: NodeID) -> NodeID {
        let span = self.node_span(declaration);
        let stmt =
            self.ast.alloc(AnyNode::DeclarationStmt(DeclarationStmt { declaration }), span);
        let _ = self.ast.set_parent(declaration, stmt);

        stmt
    }

    /// Parse a parenthesized condition after a statement keyword.
    ///
    /// A missing `(` is reported but the condition expression is still
    /// parsed, which keeps `if x { ... }` recoverable.
    fn parse_condition(&mut self, message: &str) -> NodeID {
        if self.match_token(TokenKind::LParen) {
            let condition = self.parse_expression();
            if !self.match_token(TokenKind::RParen) {
                self.error_at_current("Expected ')' after condition");
            }
            condition
        } else {
            self.error_at_current(message);
            self.parse_expression()
        }
    }

    /// Parse the optional label of a break/continue statement.
    fn parse_optional_label(&mut self) -> Option<String> {
        let is_label = self.check(TokenKind::ConstIdent)
            || (self.check(TokenKind::Ident) && !SYNC_KEYWORDS.contains(&self.current.lexeme));

        if is_label {
            let label = self.current.lexeme.to_string();
            self.advance();
            return Some(label);
        }

        None
    }

    /// True when the current token already ends a statement.
    fn at_statement_boundary(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::Semicolon | TokenKind::Newline | TokenKind::RBrace | TokenKind::Eof
        )
    }
}
