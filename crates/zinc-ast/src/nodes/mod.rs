//! AST node type definitions
//!
//! This module provides the node payload types organized in a flat structure,
//! the closed [`NodeKind`] tag enumeration, and the [`AnyNode`] discriminated
//! union the arena stores.

mod declarations;
mod expressions;
mod statements;
mod types;

use std::fmt;

pub use declarations::*;
pub use expressions::*;
pub use statements::*;
pub use types::*;

/// A handle for nodes in the AST arena.
///
/// `NodeID` is an index into the arena that allocated the node. Handles are
/// only meaningful together with their arena and become stale when the owning
/// translation unit is re-parsed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeID(u32);

impl NodeID {
    /// Creates a new `NodeID` with the given index.
    #[must_use]
    pub const fn new(index: u32) -> Self { Self(index) }

    /// Returns the arena index of this node.
    #[must_use]
    pub const fn index(&self) -> u32 { self.0 }
}

impl fmt::Display for NodeID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "NodeID({})", self.0) }
}

/// The closed set of node kind tags.
///
/// Every [`AnyNode`] variant maps to exactly one tag, so the tag determines
/// which payload fields are accessible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Expressions
    /// Literal value (`42`, `3.5`, `"s"`, `'c'`, `true`)
    LiteralExpr,
    /// Identifier reference
    IdentifierExpr,
    /// Binary operation (`a + b`)
    BinaryExpr,
    /// Unary operation (`-a`, `!b`)
    UnaryExpr,
    /// Function call (`f(a, b)`)
    CallExpr,
    /// Member access (`obj.field`)
    AccessExpr,
    /// Subscript (`arr[i]`)
    SubscriptExpr,
    /// Type cast (`(Type)expr`)
    CastExpr,
    /// Ternary conditional (`c ? a : b`)
    TernaryExpr,
    /// Initializer list (`{ a, b, c }`)
    InitializerListExpr,

    // Statements
    /// Brace-delimited statement sequence
    CompoundStmt,
    /// Expression statement
    ExpressionStmt,
    /// `return` statement
    ReturnStmt,
    /// `if` statement
    IfStmt,
    /// `while` loop
    WhileStmt,
    /// C-style `for` loop
    ForStmt,
    /// `foreach` loop
    ForeachStmt,
    /// `switch` statement
    SwitchStmt,
    /// `case` arm of a switch
    CaseStmt,
    /// `default` arm of a switch
    DefaultStmt,
    /// `break` statement
    BreakStmt,
    /// `continue` statement
    ContinueStmt,
    /// `defer` statement
    DeferStmt,
    /// `assert` statement
    AssertStmt,
    /// Local declaration in statement position
    DeclarationStmt,

    // Declarations
    /// Function declaration
    FunctionDecl,
    /// Variable declaration
    VariableDecl,
    /// Constant declaration
    ConstantDecl,
    /// Struct or union declaration
    StructDecl,
    /// Member of a struct or union
    StructMember,
    /// Enum declaration
    EnumDecl,
    /// Type alias declaration
    TypedefDecl,
    /// `import` declaration
    ImportDecl,
    /// `module` declaration
    ModuleDecl,

    // Types
    /// Named type reference
    TypeIdentifier,
    /// Pointer type
    PointerType,
    /// Array type
    ArrayType,
    /// Function type
    FunctionType,

    /// Root node of a parsed file
    TranslationUnit,
    /// Placeholder for a construct the parser could not salvage
    Poisoned,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{self:?}") }
}

/// Main AST node type - discriminated union with all node variants
#[derive(Debug, Clone)]
pub enum AnyNode {
    /// Literal value (e.g. `42`, `"hello"`, `true`)
    LiteralExpr(LiteralExpr),
    /// Identifier reference (e.g. `count`)
    IdentifierExpr(IdentifierExpr),
    /// Binary operation (e.g. `a + b`)
    BinaryExpr(BinaryExpr),
    /// Unary operation (e.g. `-a`, `!done`)
    UnaryExpr(UnaryExpr),
    /// Function call (e.g. `func(a, b)`)
    CallExpr(CallExpr),
    /// Member access (e.g. `point.x`)
    AccessExpr(AccessExpr),
    /// Subscript operation (e.g. `arr[i]`)
    SubscriptExpr(SubscriptExpr),
    /// Type cast (e.g. `(Foo)value`)
    CastExpr(CastExpr),
    /// Ternary conditional (e.g. `cond ? a : b`)
    TernaryExpr(TernaryExpr),
    /// Initializer list (e.g. `{ 1, 2, 3 }`)
    InitializerListExpr(InitializerListExpr),
    /// Brace-delimited statement sequence
    CompoundStmt(CompoundStmt),
    /// Expression in statement position
    ExpressionStmt(ExpressionStmt),
    /// Return statement
    ReturnStmt(ReturnStmt),
    /// If statement
    IfStmt(IfStmt),
    /// While loop
    WhileStmt(WhileStmt),
    /// C-style for loop
    ForStmt(ForStmt),
    /// Foreach loop (e.g. `foreach (x : xs)`)
    ForeachStmt(ForeachStmt),
    /// Switch statement
    SwitchStmt(SwitchStmt),
    /// Case arm of a switch
    CaseStmt(CaseStmt),
    /// Default arm of a switch
    DefaultStmt(DefaultStmt),
    /// Break statement
    BreakStmt(BreakStmt),
    /// Continue statement
    ContinueStmt(ContinueStmt),
    /// Defer statement
    DeferStmt(DeferStmt),
    /// Assert statement
    AssertStmt(AssertStmt),
    /// Local declaration in statement position
    DeclarationStmt(DeclarationStmt),
    /// Function declaration
    FunctionDecl(FunctionDecl),
    /// Variable declaration
    VariableDecl(VariableDecl),
    /// Constant declaration
    ConstantDecl(ConstantDecl),
    /// Struct or union declaration
    StructDecl(StructDecl),
    /// Member of a struct or union
    StructMember(StructMember),
    /// Enum declaration
    EnumDecl(EnumDecl),
    /// Type alias declaration
    TypedefDecl(TypedefDecl),
    /// Import declaration (e.g. `import std::io;`)
    ImportDecl(ImportDecl),
    /// Module declaration (e.g. `module net::http;`)
    ModuleDecl(ModuleDecl),
    /// Named type reference
    TypeIdentifier(TypeIdentifier),
    /// Pointer type
    PointerType(PointerType),
    /// Array type
    ArrayType(ArrayType),
    /// Function type
    FunctionType(FunctionType),
    /// Root node of a parsed file
    TranslationUnit(TranslationUnitDecl),
    /// Placeholder for a construct the parser could not salvage
    Poisoned(Poisoned),
}

impl AnyNode {
    /// Returns the kind tag for this payload.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::LiteralExpr(_) => NodeKind::LiteralExpr,
            Self::IdentifierExpr(_) => NodeKind::IdentifierExpr,
            Self::BinaryExpr(_) => NodeKind::BinaryExpr,
            Self::UnaryExpr(_) => NodeKind::UnaryExpr,
            Self::CallExpr(_) => NodeKind::CallExpr,
            Self::AccessExpr(_) => NodeKind::AccessExpr,
            Self::SubscriptExpr(_) => NodeKind::SubscriptExpr,
            Self::CastExpr(_) => NodeKind::CastExpr,
            Self::TernaryExpr(_) => NodeKind::TernaryExpr,
            Self::InitializerListExpr(_) => NodeKind::InitializerListExpr,
            Self::CompoundStmt(_) => NodeKind::CompoundStmt,
            Self::ExpressionStmt(_) => NodeKind::ExpressionStmt,
            Self::ReturnStmt(_) => NodeKind::ReturnStmt,
            Self::IfStmt(_) => NodeKind::IfStmt,
            Self::WhileStmt(_) => NodeKind::WhileStmt,
            Self::ForStmt(_) => NodeKind::ForStmt,
            Self::ForeachStmt(_) => NodeKind::ForeachStmt,
            Self::SwitchStmt(_) => NodeKind::SwitchStmt,
            Self::CaseStmt(_) => NodeKind::CaseStmt,
            Self::DefaultStmt(_) => NodeKind::DefaultStmt,
            Self::BreakStmt(_) => NodeKind::BreakStmt,
            Self::ContinueStmt(_) => NodeKind::ContinueStmt,
            Self::DeferStmt(_) => NodeKind::DeferStmt,
            Self::AssertStmt(_) => NodeKind::AssertStmt,
            Self::DeclarationStmt(_) => NodeKind::DeclarationStmt,
            Self::FunctionDecl(_) => NodeKind::FunctionDecl,
            Self::VariableDecl(_) => NodeKind::VariableDecl,
            Self::ConstantDecl(_) => NodeKind::ConstantDecl,
            Self::StructDecl(_) => NodeKind::StructDecl,
            Self::StructMember(_) => NodeKind::StructMember,
            Self::EnumDecl(_) => NodeKind::EnumDecl,
            Self::TypedefDecl(_) => NodeKind::TypedefDecl,
            Self::ImportDecl(_) => NodeKind::ImportDecl,
            Self::ModuleDecl(_) => NodeKind::ModuleDecl,
            Self::TypeIdentifier(_) => NodeKind::TypeIdentifier,
            Self::PointerType(_) => NodeKind::PointerType,
            Self::ArrayType(_) => NodeKind::ArrayType,
            Self::FunctionType(_) => NodeKind::FunctionType,
            Self::TranslationUnit(_) => NodeKind::TranslationUnit,
            Self::Poisoned(_) => NodeKind::Poisoned,
        }
    }

    /// Returns the structural children of this payload, in source order.
    ///
    /// The position-based lookups and the traversal helpers are generic over
    /// this list; adding a child edge to a variant automatically exposes it
    /// to all of them.
    #[must_use]
    pub fn children(&self) -> Vec<NodeID> {
        match self {
            Self::LiteralExpr(_)
            | Self::IdentifierExpr(_)
            | Self::TypeIdentifier(_)
            | Self::Poisoned(_) => vec![],
            Self::BinaryExpr(expr) => vec![expr.left, expr.right],
            Self::UnaryExpr(expr) => vec![expr.operand],
            Self::CallExpr(expr) => {
                let mut children = vec![expr.callee];
                children.extend(&expr.args);
                children
            }
            Self::AccessExpr(expr) => vec![expr.object, expr.member],
            Self::SubscriptExpr(expr) => vec![expr.object, expr.index],
            Self::CastExpr(expr) => vec![expr.ty, expr.expr],
            Self::TernaryExpr(expr) => vec![expr.condition, expr.then_expr, expr.else_expr],
            Self::InitializerListExpr(expr) => expr.values.clone(),
            Self::CompoundStmt(stmt) => stmt.statements.clone(),
            Self::ExpressionStmt(stmt) => vec![stmt.expr],
            Self::ReturnStmt(stmt) => stmt.value.into_iter().collect(),
            Self::IfStmt(stmt) => {
                let mut children = vec![stmt.condition, stmt.then_branch];
                children.extend(stmt.else_branch);
                children
            }
            Self::WhileStmt(stmt) => vec![stmt.condition, stmt.body],
            Self::ForStmt(stmt) => {
                let mut children = Vec::new();
                children.extend(stmt.init);
                children.extend(stmt.condition);
                children.extend(stmt.update);
                children.push(stmt.body);
                children
            }
            Self::ForeachStmt(stmt) => vec![stmt.variable, stmt.collection, stmt.body],
            Self::SwitchStmt(stmt) => {
                let mut children = vec![stmt.value];
                children.extend(&stmt.cases);
                children
            }
            Self::CaseStmt(stmt) => {
                let mut children = vec![stmt.value];
                children.extend(&stmt.statements);
                children
            }
            Self::DefaultStmt(stmt) => stmt.statements.clone(),
            Self::BreakStmt(_) | Self::ContinueStmt(_) => vec![],
            Self::DeferStmt(stmt) => vec![stmt.statement],
            Self::AssertStmt(stmt) => {
                let mut children = vec![stmt.condition];
                children.extend(stmt.message);
                children
            }
            Self::DeclarationStmt(stmt) => vec![stmt.declaration],
            Self::FunctionDecl(decl) => {
                let mut children = Vec::new();
                children.extend(decl.return_type);
                children.extend(&decl.params);
                children.extend(decl.body);
                children
            }
            Self::VariableDecl(decl) => {
                let mut children = Vec::new();
                children.extend(decl.ty);
                children.extend(decl.initializer);
                children
            }
            Self::ConstantDecl(decl) => {
                let mut children = Vec::new();
                children.extend(decl.ty);
                children.extend(decl.value);
                children
            }
            Self::StructDecl(decl) => decl.members.clone(),
            Self::StructMember(member) => vec![member.ty],
            Self::EnumDecl(decl) => decl.values.clone(),
            Self::TypedefDecl(decl) => vec![decl.ty],
            Self::ImportDecl(decl) => decl.identifiers.clone(),
            Self::ModuleDecl(decl) => decl.identifiers.clone(),
            Self::PointerType(ty) => vec![ty.pointee],
            Self::ArrayType(ty) => {
                let mut children = vec![ty.element];
                children.extend(ty.size);
                children
            }
            Self::FunctionType(ty) => {
                let mut children = ty.params.clone();
                children.extend(ty.return_type);
                children
            }
            Self::TranslationUnit(unit) => unit.declarations.clone(),
        }
    }
}
