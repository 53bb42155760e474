//! Declaration parsing for the Zinc programming language.
//!
//! Zinc does not reserve keywords, so dispatch matches the lexeme of an
//! `Ident` token and consumes it before handing off to the specific parser.
//! Anything that does not open with a known keyword falls through to a
//! variable declaration.

use zinc_ast::nodes::{
    AnyNode,
    ConstantDecl,
    EnumDecl,
    FunctionDecl,
    ImportDecl,
    ModuleDecl,
    NodeID,
    Poisoned,
    StructDecl,
    StructMember,
    VariableDecl,
};
use zinc_source::types::Span;

use super::Parser;
use crate::lexer::TokenKind;

impl Parser<'_> {
    /// Parse one top-level declaration.
    ///
    /// Returns `None` without consuming anything when no declaration can
    /// start at the current token; the caller's livelock guard then skips
    /// the offender.
    pub(crate) fn parse_declaration(&mut self) -> Option<NodeID> {
        self.skip_newlines();

        if self.check(TokenKind::Ident) {
            match self.current.lexeme {
                "import" => {
                    self.advance();
                    return Some(self.parse_import_declaration());
                }
                "module" => {
                    self.advance();
                    return Some(self.parse_module_declaration());
                }
                "fn" => {
                    self.advance();
                    return Some(self.parse_function_declaration());
                }
                "struct" => {
                    self.advance();
                    return Some(self.parse_struct_declaration(false));
                }
                "union" => {
                    self.advance();
                    return Some(self.parse_struct_declaration(true));
                }
                "enum" => {
                    self.advance();
                    return Some(self.parse_enum_declaration());
                }
                "const" => {
                    self.advance();
                    return Some(self.parse_constant_declaration());
                }
                _ => {}
            }
        }

        self.parse_variable_declaration()
    }

    /// Parse an import declaration; the `import` keyword is consumed.
    ///
    /// Syntax: `import path (',' path)* ';'` where each path is a
    /// `::`-separated identifier chain. All path identifiers are appended,
    /// in order, to one import node. A failure inside a path synchronizes
    /// and abandons the remaining paths.
    pub(crate) fn parse_import_declaration(&mut self) -> NodeID {
        let start = self.previous.span.start;
        let mut identifiers = Vec::new();
        let mut recovered = false;

        'paths: loop {
            self.skip_newlines();

            if !self.check(TokenKind::Ident) {
                self.error_at_current("Expected module path after 'import'");
                self.synchronize();
                recovered = true;
                break;
            }
            identifiers.push(self.identifier_from_current());

            while self.match_token(TokenKind::ColonColon) {
                self.skip_newlines();

                if self.check(TokenKind::Ident) {
                    identifiers.push(self.identifier_from_current());
                } else {
                    self.error_at_current("Expected identifier after '::'");
                    self.synchronize();
                    recovered = true;
                    break 'paths;
                }
            }

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        let mut end = self.previous.span.end;
        if !recovered {
            if self.match_token(TokenKind::Semicolon) {
                end = self.previous.span.end;
            } else {
                self.error_at_current("Expected ';' after import");
            }
        }

        let import = self.ast.alloc(
            AnyNode::ImportDecl(ImportDecl { identifiers: identifiers.clone() }),
            Span::new(start, end),
        );
        for id in identifiers {
            let _ = self.ast.set_parent(id, import);
        }

        import
    }

    /// Parse a module declaration; the `module` keyword is consumed.
    ///
    /// Syntax: `module a::b::c ';'`.
    pub(crate) fn parse_module_declaration(&mut self) -> NodeID {
        let start = self.previous.span.start;
        let mut identifiers = Vec::new();
        let mut recovered = false;

        self.skip_newlines();
        if self.check(TokenKind::Ident) {
            identifiers.push(self.identifier_from_current());

            while self.match_token(TokenKind::ColonColon) {
                self.skip_newlines();

                if self.check(TokenKind::Ident) {
                    identifiers.push(self.identifier_from_current());
                } else {
                    self.error_at_current("Expected identifier after '::'");
                    self.synchronize();
                    recovered = true;
                    break;
                }
            }
        } else {
            self.error_at_current("Expected module path after 'module'");
            self.synchronize();
            recovered = true;
        }

        let mut end = self.previous.span.end;
        if !recovered {
            if self.match_token(TokenKind::Semicolon) {
                end = self.previous.span.end;
            } else {
                self.error_at_current("Expected ';' after module declaration");
            }
        }

        let module = self.ast.alloc(
            AnyNode::ModuleDecl(ModuleDecl { identifiers: identifiers.clone() }),
            Span::new(start, end),
        );
        for id in identifiers {
            let _ = self.ast.set_parent(id, module);
        }

        module
    }

    /// Parse a struct or union declaration; the keyword is consumed.
    ///
    /// A missing name becomes `"<missing>"`; a missing `{` returns the
    /// partial declaration after synchronizing. Each failed member is
    /// discarded and the parser resynchronizes inside the body.
    pub(crate) fn parse_struct_declaration(&mut self, is_union: bool) -> NodeID {
        let start = self.previous.span.start;
        self.skip_newlines();

        let name = if matches!(
            self.current.kind,
            TokenKind::Ident | TokenKind::TypeIdent | TokenKind::ConstIdent
        ) {
            let name = self.current.lexeme.to_string();
            self.advance();
            name
        } else {
            self.error_at_current(if is_union {
                "Expected union name"
            } else {
                "Expected struct name"
            });
            self.synchronize();
            String::from("<missing>")
        };

        self.skip_newlines();
        if !self.match_token(TokenKind::LBrace) {
            self.error_at_current("Expected '{' after struct name");
            self.synchronize();

            let span = Span::new(start, self.previous.span.end);
            return self
                .ast
                .alloc(AnyNode::StructDecl(StructDecl { name, is_union, members: vec![] }), span);
        }

        let mut members = Vec::new();
        loop {
            self.skip_newlines();
            if self.check(TokenKind::RBrace) || self.check(TokenKind::Eof) {
                break;
            }

            let before = self.tokens_consumed();
            match self.parse_struct_member() {
                Some(member) => members.push(member),
                None => self.synchronize(),
            }
            if self.tokens_consumed() == before {
                self.error_at_current("Unexpected token, skipping");
                self.advance();
            }
        }

        if !self.match_token(TokenKind::RBrace) {
            self.error_at_current("Expected '}' after struct members");
            while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
                self.advance();
            }
            let _ = self.match_token(TokenKind::RBrace);
            self.panic_mode = false;
        }

        let span = Span::new(start, self.previous.span.end);
        let decl = self.ast.alloc(
            AnyNode::StructDecl(StructDecl { name, is_union, members: members.clone() }),
            span,
        );
        for member in members {
            let _ = self.ast.set_parent(member, decl);
        }

        decl
    }

    /// Parse one struct member: `[inline] Type name ';'`.
    ///
    /// Returns `None` when any element is missing; the member is discarded
    /// and the caller synchronizes.
    fn parse_struct_member(&mut self) -> Option<NodeID> {
        self.skip_newlines();
        let start = self.current.span.start;

        let is_inline = if self.check_keyword("inline") {
            self.advance();
            true
        } else {
            false
        };

        let Some(ty) = self.parse_type() else {
            self.error_at_current("Expected member type");
            return None;
        };

        if !self.check(TokenKind::Ident) {
            self.error_at_current("Expected member name");
            return None;
        }
        let name = self.current.lexeme.to_string();
        self.advance();

        if !self.match_token(TokenKind::Semicolon) {
            self.error_at_current("Expected ';' after struct member");
            return None;
        }

        let span = Span::new(start, self.previous.span.end);
        let member =
            self.ast.alloc(AnyNode::StructMember(StructMember { ty, name, is_inline }), span);
        let _ = self.ast.set_parent(ty, member);

        Some(member)
    }

    /// Parse an enum declaration; the `enum` keyword is consumed.
    ///
    /// Syntax: `enum Name '{' ENUMERATOR (',' ENUMERATOR)* '}'`.
    pub(crate) fn parse_enum_declaration(&mut self) -> NodeID {
        let start = self.previous.span.start;
        self.skip_newlines();

        let name = if matches!(
            self.current.kind,
            TokenKind::Ident | TokenKind::TypeIdent | TokenKind::ConstIdent
        ) {
            let name = self.current.lexeme.to_string();
            self.advance();
            name
        } else {
            self.error_at_current("Expected enum name");
            self.synchronize();
            String::from("<missing>")
        };

        self.skip_newlines();
        if !self.match_token(TokenKind::LBrace) {
            self.error_at_current("Expected '{' after enum name");
            self.synchronize();

            let span = Span::new(start, self.previous.span.end);
            return self.ast.alloc(AnyNode::EnumDecl(EnumDecl { name, values: vec![] }), span);
        }

        let mut values = Vec::new();
        loop {
            self.skip_newlines();
            if self.check(TokenKind::RBrace) || self.check(TokenKind::Eof) {
                break;
            }

            let before = self.tokens_consumed();
            if matches!(
                self.current.kind,
                TokenKind::Ident | TokenKind::TypeIdent | TokenKind::ConstIdent
            ) {
                values.push(self.identifier_from_current());
                self.skip_newlines();
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            } else {
                self.error_at_current("Expected enumerator name");
                self.synchronize();
            }
            if self.tokens_consumed() == before {
                self.error_at_current("Unexpected token, skipping");
                self.advance();
            }
        }

        if !self.match_token(TokenKind::RBrace) {
            self.error_at_current("Expected '}' after enumerators");
            while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
                self.advance();
            }
            let _ = self.match_token(TokenKind::RBrace);
            self.panic_mode = false;
        }

        let span = Span::new(start, self.previous.span.end);
        let decl =
            self.ast.alloc(AnyNode::EnumDecl(EnumDecl { name, values: values.clone() }), span);
        for value in values {
            let _ = self.ast.set_parent(value, decl);
        }

        decl
    }

    /// Parse a constant declaration; the `const` keyword is consumed.
    ///
    /// Syntax: `const [Type] NAME ['=' expression] ';'`. With only one
    /// token of lookahead the first identifier is the type exactly when
    /// another identifier (or a type suffix) follows it.
    pub(crate) fn parse_constant_declaration(&mut self) -> NodeID {
        let start = self.previous.span.start;
        self.skip_newlines();

        if !matches!(
            self.current.kind,
            TokenKind::Ident | TokenKind::TypeIdent | TokenKind::ConstIdent
        ) {
            self.error_at_current("Expected constant name");
            self.synchronize();

            let span = Span::new(start, self.previous.span.end);
            return self.ast.alloc(AnyNode::Poisoned(Poisoned), span);
        }

        let first_span = self.current.span;
        let first_lexeme = self.current.lexeme;
        self.advance();

        let (ty, name) = if matches!(
            self.current.kind,
            TokenKind::Ident
                | TokenKind::TypeIdent
                | TokenKind::ConstIdent
                | TokenKind::Star
                | TokenKind::LBracket
        ) {
            let ty = self.finish_type(first_lexeme, first_span);

            if matches!(
                self.current.kind,
                TokenKind::Ident | TokenKind::TypeIdent | TokenKind::ConstIdent
            ) {
                let name = self.current.lexeme.to_string();
                self.advance();
                (Some(ty), name)
            } else {
                self.error_at_current("Expected constant name");
                (Some(ty), String::from("<missing>"))
            }
        } else {
            (None, first_lexeme.to_string())
        };

        let value =
            if self.match_token(TokenKind::Eq) { Some(self.parse_expression()) } else { None };
        self.expect_terminator();

        let span = Span::new(start, self.previous.span.end);
        let decl = self.ast.alloc(AnyNode::ConstantDecl(ConstantDecl { name, ty, value }), span);
        if let Some(ty) = ty {
            let _ = self.ast.set_parent(ty, decl);
        }
        if let Some(value) = value {
            let _ = self.ast.set_parent(value, decl);
        }

        decl
    }

    /// Parse a function declaration; the `fn` keyword is consumed.
    ///
    /// Syntax: `fn ReturnType name '(' params ')' (block | ';')`. A body
    /// is optional so prototypes parse; a declaration that has neither a
    /// name nor a parameter list is poisoned.
    pub(crate) fn parse_function_declaration(&mut self) -> NodeID {
        let start = self.previous.span.start;
        self.skip_newlines();

        let return_type = self.parse_type();
        if return_type.is_none() {
            self.error_at_current("Expected return type after 'fn'");
        }

        let name = if self.check(TokenKind::Ident) {
            let name = self.current.lexeme.to_string();
            self.advance();
            name
        } else if self.check(TokenKind::LParen) {
            // Name missing but the parameter list is there; keep parsing.
            self.error_at_current("Expected function name");
            String::from("<missing>")
        } else {
            self.error_at_current("Expected function name");
            self.synchronize();

            let span = Span::new(start, self.previous.span.end);
            return self.ast.alloc(AnyNode::Poisoned(Poisoned), span);
        };

        let mut params = Vec::new();
        if self.match_token(TokenKind::LParen) {
            self.skip_newlines();
            if !self.check(TokenKind::RParen) {
                loop {
                    self.skip_newlines();

                    let Some(param) = self.parse_parameter() else { break };
                    params.push(param);

                    self.skip_newlines();
                    if !self.match_token(TokenKind::Comma) {
                        break;
                    }
                }
            }
            if !self.match_token(TokenKind::RParen) {
                self.error_at_current("Expected ')' after parameters");
            }
        } else {
            self.error_at_current("Expected '(' after function name");
        }

        let body = if self.match_token(TokenKind::Semicolon) {
            None
        } else {
            self.skip_newlines();
            if self.check(TokenKind::LBrace) {
                Some(self.parse_block())
            } else {
                self.error_at_current("Expected function body or ';'");
                None
            }
        };

        let span = Span::new(start, self.previous.span.end);
        let decl = self.ast.alloc(
            AnyNode::FunctionDecl(FunctionDecl {
                name,
                return_type,
                params: params.clone(),
                body,
            }),
            span,
        );
        if let Some(return_type) = return_type {
            let _ = self.ast.set_parent(return_type, decl);
        }
        for param in params {
            let _ = self.ast.set_parent(param, decl);
        }
        if let Some(body) = body {
            let _ = self.ast.set_parent(body, decl);
        }

        decl
    }

    /// Parse one function parameter: `Type [name] ['=' default]`.
    fn parse_parameter(&mut self) -> Option<NodeID> {
        let start = self.current.span.start;

        let Some(ty) = self.parse_type() else {
            self.error_at_current("Expected parameter type");
            return None;
        };

        let name = if self.check(TokenKind::Ident) {
            let name = self.current.lexeme.to_string();
            self.advance();
            name
        } else {
            // Unnamed parameters are allowed in prototypes.
            String::new()
        };

        let initializer =
            if self.match_token(TokenKind::Eq) { Some(self.parse_expression()) } else { None };

        let span = Span::new(start, self.previous.span.end);
        let param = self.ast.alloc(
            AnyNode::VariableDecl(VariableDecl { name, ty: Some(ty), initializer }),
            span,
        );
        let _ = self.ast.set_parent(ty, param);
        if let Some(initializer) = initializer {
            let _ = self.ast.set_parent(initializer, param);
        }

        Some(param)
    }

    /// Parse a top-level variable declaration: `Type name ['=' expr] ';'`.
    ///
    /// Returns `None` without consuming anything when no type begins at the
    /// current token.
    pub(crate) fn parse_variable_declaration(&mut self) -> Option<NodeID> {
        let start = self.current.span.start;

        let ty = self.parse_type()?;

        let name = if self.check(TokenKind::Ident) {
            let name = self.current.lexeme.to_string();
            self.advance();
            name
        } else {
            self.error_at_current("Expected variable name");
            String::from("<missing>")
        };

        let initializer =
            if self.match_token(TokenKind::Eq) { Some(self.parse_expression()) } else { None };
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

        Some(decl)
    }
}
