//! Expression parsing for the Zinc programming language.
//!
//! A Pratt parser over the fixed precedence ladder. The prefix token is
//! consumed first and dispatched by kind; the infix loop then folds binary
//! operators left-associatively and handles the postfix forms (member
//! access, calls, subscripts) at `Call` strength. Expression parsing is
//! total: an unusable prefix token yields an `"<error>"` placeholder node.

use zinc_ast::nodes::{
    AccessExpr,
    AnyNode,
    BinaryExpr,
    BinaryOperator,
    CallExpr,
    InitializerListExpr,
    LiteralExpr,
    LiteralValue,
    NodeID,
    SubscriptExpr,
    TernaryExpr,
    UnaryExpr,
    UnaryOperator,
};
use zinc_source::types::Span;

use super::Parser;
use crate::lexer::{TokenKind, TokenValue};

/// Binding strength ladder, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    /// Not an infix operator
    None,
    /// `=` and the compound-assignment forms
    Assignment,
    /// `||`
    Or,
    /// `&&`
    And,
    /// `==` `!=`
    Equality,
    /// `<` `>` `<=` `>=`
    Comparison,
    /// `+` `-` `|` `^` `<<` `>>`
    Term,
    /// `*` `/` `%` `&`
    Factor,
    /// Prefix operators
    Unary,
    /// `.` `()` `[]`
    Call,
    /// Literals and grouping
    Primary,
}

impl Precedence {
    /// The next-stronger level; folding the right-hand side one level up
    /// makes the binary operators left-associative.
    const fn one_stronger(self) -> Self {
        match self {
            Self::None => Self::Assignment,
            Self::Assignment => Self::Or,
            Self::Or => Self::And,
            Self::And => Self::Equality,
            Self::Equality => Self::Comparison,
            Self::Comparison => Self::Term,
            Self::Term => Self::Factor,
            Self::Factor => Self::Unary,
            Self::Unary => Self::Call,
            Self::Call | Self::Primary => Self::Primary,
        }
    }
}

/// Infix binding strength of a token kind.
const fn infix_precedence(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Eq
        | TokenKind::PlusEq
        | TokenKind::MinusEq
        | TokenKind::StarEq
        | TokenKind::SlashEq
        | TokenKind::PercentEq
        | TokenKind::AmpEq
        | TokenKind::PipeEq
        | TokenKind::CaretEq
        | TokenKind::ShlEq
        | TokenKind::ShrEq => Precedence::Assignment,
        TokenKind::PipePipe => Precedence::Or,
        TokenKind::AmpAmp => Precedence::And,
        TokenKind::EqEq | TokenKind::BangEq => Precedence::Equality,
        TokenKind::Less | TokenKind::Greater | TokenKind::LessEq | TokenKind::GreaterEq => {
            Precedence::Comparison
        }
        TokenKind::Plus
        | TokenKind::Minus
        | TokenKind::Pipe
        | TokenKind::Caret
        | TokenKind::Shl
        | TokenKind::Shr => Precedence::Term,
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent | TokenKind::Amp => {
            Precedence::Factor
        }
        TokenKind::Dot | TokenKind::LParen | TokenKind::LBracket => Precedence::Call,
        _ => Precedence::None,
    }
}

/// Maps an infix operator token to its AST operator.
const fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    Some(match kind {
        TokenKind::Eq => BinaryOperator::Assign,
        TokenKind::PlusEq => BinaryOperator::AddAssign,
        TokenKind::MinusEq => BinaryOperator::SubAssign,
        TokenKind::StarEq => BinaryOperator::MulAssign,
        TokenKind::SlashEq => BinaryOperator::DivAssign,
        TokenKind::PercentEq => BinaryOperator::ModAssign,
        TokenKind::AmpEq => BinaryOperator::BitAndAssign,
        TokenKind::PipeEq => BinaryOperator::BitOrAssign,
        TokenKind::CaretEq => BinaryOperator::BitXorAssign,
        TokenKind::ShlEq => BinaryOperator::ShlAssign,
        TokenKind::ShrEq => BinaryOperator::ShrAssign,
        TokenKind::PipePipe => BinaryOperator::Or,
        TokenKind::AmpAmp => BinaryOperator::And,
        TokenKind::EqEq => BinaryOperator::Eq,
        TokenKind::BangEq => BinaryOperator::NotEq,
        TokenKind::Less => BinaryOperator::Less,
        TokenKind::Greater => BinaryOperator::Greater,
        TokenKind::LessEq => BinaryOperator::LessEq,
        TokenKind::GreaterEq => BinaryOperator::GreaterEq,
        TokenKind::Plus => BinaryOperator::Add,
        TokenKind::Minus => BinaryOperator::Sub,
        TokenKind::Pipe => BinaryOperator::BitOr,
        TokenKind::Caret => BinaryOperator::BitXor,
        TokenKind::Shl => BinaryOperator::Shl,
        TokenKind::Shr => BinaryOperator::Shr,
        TokenKind::Star => BinaryOperator::Mul,
        TokenKind::Slash => BinaryOperator::Div,
        TokenKind::Percent => BinaryOperator::Mod,
        TokenKind::Amp => BinaryOperator::BitAnd,
        _ => return None,
    })
}

/// Maps a prefix operator token to its AST operator.
const fn unary_operator(kind: TokenKind) -> Option<UnaryOperator> {
    Some(match kind {
        TokenKind::Bang => UnaryOperator::Not,
        TokenKind::Minus => UnaryOperator::Neg,
        TokenKind::Plus => UnaryOperator::Plus,
        TokenKind::Tilde => UnaryOperator::BitNot,
        TokenKind::Star => UnaryOperator::Deref,
        TokenKind::Amp => UnaryOperator::AddrOf,
        TokenKind::PlusPlus => UnaryOperator::Increment,
        TokenKind::MinusMinus => UnaryOperator::Decrement,
        _ => return None,
    })
}

impl Parser<'_> {
    /// Parse a full expression.
    pub(crate) fn parse_expression(&mut self) -> NodeID {
        let expr = self.parse_precedence(Precedence::Assignment);
        self.parse_ternary_suffix(expr)
    }

    /// Folds a trailing `? then : else` onto an already-parsed condition.
    pub(crate) fn parse_ternary_suffix(&mut self, condition: NodeID) -> NodeID {
        if !self.match_token(TokenKind::Question) {
            return condition;
        }

        let then_expr = self.parse_expression();
        if !self.match_token(TokenKind::Colon) {
            self.error_at_current("Expected ':' in conditional expression");
        }
        let else_expr = self.parse_expression();

        let span =
            Span::new(self.node_span(condition).start, self.node_span(else_expr).end);
        let node = self
            .ast
            .alloc(AnyNode::TernaryExpr(TernaryExpr { condition, then_expr, else_expr }), span);
        let _ = self.ast.set_parent(condition, node);
        let _ = self.ast.set_parent(then_expr, node);
        let _ = self.ast.set_parent(else_expr, node);

        node
    }

    /// Parse an expression of at least the given binding strength.
    fn parse_precedence(&mut self, min_precedence: Precedence) -> NodeID {
        self.advance();
        let left = self.parse_prefix();
        self.parse_infix(min_precedence, left)
    }

    /// The infix loop, starting from an already-parsed left operand.
    ///
    /// The statement parser also enters here directly when it has consumed
    /// a leading identifier while deciding between a declaration and an
    /// expression statement.
    pub(crate) fn parse_infix(&mut self, min_precedence: Precedence, mut left: NodeID) -> NodeID {
        while min_precedence <= infix_precedence(self.current.kind) {
            self.advance();
            let op_kind = self.previous.kind;

            left = match op_kind {
                TokenKind::Dot => self.parse_access(left),
                TokenKind::LParen => self.parse_call(left),
                TokenKind::LBracket => self.parse_subscript(left),
                _ => {
                    let Some(op) = binary_operator(op_kind) else { break };
                    let right = self.parse_precedence(infix_precedence(op_kind).one_stronger());

                    let span =
                        Span::new(self.node_span(left).start, self.node_span(right).end);
                    let node =
                        self.ast.alloc(AnyNode::BinaryExpr(BinaryExpr { op, left, right }), span);
                    let _ = self.ast.set_parent(left, node);
                    let _ = self.ast.set_parent(right, node);

                    node
                }
            };
        }

        left
    }

    /// Dispatch on the just-consumed prefix token.
    fn parse_prefix(&mut self) -> NodeID {
        let span = self.previous.span;

        match self.previous.kind {
            TokenKind::Integer => {
                let value = match self.previous.value {
                    TokenValue::Int(value) => value,
                    _ => 0,
                };
                self.ast
                    .alloc(AnyNode::LiteralExpr(LiteralExpr { value: LiteralValue::Int(value) }), span)
            }
            TokenKind::Real => {
                let value = match self.previous.value {
                    TokenValue::Real(value) => value,
                    _ => 0.0,
                };
                self.ast.alloc(
                    AnyNode::LiteralExpr(LiteralExpr { value: LiteralValue::Real(value) }),
                    span,
                )
            }
            TokenKind::String => {
                let value = match &self.previous.value {
                    TokenValue::Str(value) => value.clone(),
                    _ => String::new(),
                };
                self.ast.alloc(
                    AnyNode::LiteralExpr(LiteralExpr { value: LiteralValue::Str(value) }),
                    span,
                )
            }
            TokenKind::CharLiteral => {
                let value = match self.previous.value {
                    TokenValue::Char(value) => value,
                    _ => '\0',
                };
                self.ast.alloc(
                    AnyNode::LiteralExpr(LiteralExpr { value: LiteralValue::Char(value) }),
                    span,
                )
            }
            TokenKind::Ident if self.previous.lexeme == "true" => self.ast.alloc(
                AnyNode::LiteralExpr(LiteralExpr { value: LiteralValue::Bool(true) }),
                span,
            ),
            TokenKind::Ident if self.previous.lexeme == "false" => self.ast.alloc(
                AnyNode::LiteralExpr(LiteralExpr { value: LiteralValue::Bool(false) }),
                span,
            ),
            TokenKind::Ident
            | TokenKind::TypeIdent
            | TokenKind::ConstIdent
            | TokenKind::AtIdent
            | TokenKind::HashIdent
            | TokenKind::DollarIdent => {
                let name = self.previous.lexeme;
                self.identifier_node(name, span)
            }
            TokenKind::LParen => {
                let expr = self.parse_expression();
                if self.match_token(TokenKind::RParen) {
                    expr
                } else {
                    self.error_at_current("Expected ')' after expression");
                    let span = self.previous.span;
                    self.error_node(span)
                }
            }
            TokenKind::LBrace => self.parse_initializer_list(span),
            kind => {
                if let Some(op) = unary_operator(kind) {
                    let operand = self.parse_precedence(Precedence::Unary);

                    let span = Span::new(span.start, self.node_span(operand).end);
                    let node =
                        self.ast.alloc(AnyNode::UnaryExpr(UnaryExpr { op, operand }), span);
                    let _ = self.ast.set_parent(operand, node);

                    node
                } else {
                    self.error_at_previous("Expected expression");
                    self.error_node(span)
                }
            }
        }
    }

    /// Parse an initializer list; the opening `{` is consumed.
    fn parse_initializer_list(&mut self, open_span: Span) -> NodeID {
        let mut values = Vec::new();

        self.skip_newlines();
        if !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            loop {
                values.push(self.parse_expression());

                self.skip_newlines();
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
                self.skip_newlines();
                if self.check(TokenKind::RBrace) {
                    break; // trailing comma
                }
            }
        }
        if !self.match_token(TokenKind::RBrace) {
            self.error_at_current("Expected '}' after initializer list");
        }

        let span = Span::new(open_span.start, self.previous.span.end);
        let node = self.ast.alloc(
            AnyNode::InitializerListExpr(InitializerListExpr { values: values.clone() }),
            span,
        );
        for value in values {
            let _ = self.ast.set_parent(value, node);
        }

        node
    }

    /// Parse `.member`; the `.` is consumed.
    fn parse_access(&mut self, object: NodeID) -> NodeID {
        let member = if matches!(
            self.current.kind,
            TokenKind::Ident | TokenKind::TypeIdent | TokenKind::ConstIdent
        ) {
            self.identifier_from_current()
        } else {
            self.error_at_current("Expected member name after '.'");
            let span = Span::empty(self.current.span.start);
            self.error_node(span)
        };

        let span = Span::new(self.node_span(object).start, self.node_span(member).end);
        let node = self.ast.alloc(AnyNode::AccessExpr(AccessExpr { object, member }), span);
        let _ = self.ast.set_parent(object, node);
        let _ = self.ast.set_parent(member, node);

        node
    }

    /// Parse a call argument list; the `(` is consumed.
    fn parse_call(&mut self, callee: NodeID) -> NodeID {
        let mut args = Vec::new();

        if !self.check(TokenKind::RParen) && !self.check(TokenKind::Eof) {
            loop {
                args.push(self.parse_expression());
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        if !self.match_token(TokenKind::RParen) {
            self.error_at_current("Expected ')' after arguments");
        }

        let span = Span::new(self.node_span(callee).start, self.previous.span.end);
        let node =
            self.ast.alloc(AnyNode::CallExpr(CallExpr { callee, args: args.clone() }), span);
        let _ = self.ast.set_parent(callee, node);
        for arg in args {
            let _ = self.ast.set_parent(arg, node);
        }

        node
    }

    /// Parse a subscript; the `[` is consumed.
    fn parse_subscript(&mut self, object: NodeID) -> NodeID {
        let index = self.parse_expression();
        if !self.match_token(TokenKind::RBracket) {
            self.error_at_current("Expected ']' after subscript");
        }

        let span = Span::new(self.node_span(object).start, self.previous.span.end);
        let node = self.ast.alloc(AnyNode::SubscriptExpr(SubscriptExpr { object, index }), span);
        let _ = self.ast.set_parent(object, node);
        let _ = self.ast.set_parent(index, node);

        node
    }
}
