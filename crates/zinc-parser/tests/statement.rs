//! Tests for statement parsing inside function bodies.

use zinc_ast::nodes::{AnyNode, BinaryOperator, NodeID};
use zinc_parser::parser::{ParseOutput, Parser};
use zinc_source::types::FileID;

fn parse(source: &str) -> ParseOutput {
    Parser::new(source, FileID::new(1)).parse("test.zn")
}

fn data(output: &ParseOutput, id: NodeID) -> &AnyNode {
    &output.unit.ast().get(id).expect("node exists").data
}

/// Parses `source`, which must declare one function with a body, and
/// returns the body's statements.
fn parse_body(source: &str) -> (ParseOutput, Vec<NodeID>) {
    let output = parse(source);

    let decl = output.unit.declarations()[0];
    let AnyNode::FunctionDecl(func) = data(&output, decl) else {
        panic!("expected a function declaration");
    };
    let AnyNode::CompoundStmt(block) = data(&output, func.body.expect("body")) else {
        panic!("expected a compound statement");
    };
    let statements = block.statements.clone();

    (output, statements)
}

#[test]
fn expression_statement() {
    let (output, statements) = parse_body("fn void f() { g(); }");
    assert!(!output.had_error);
    assert_eq!(statements.len(), 1);

    let AnyNode::ExpressionStmt(stmt) = data(&output, statements[0]) else {
        panic!("expected an expression statement");
    };
    assert!(matches!(data(&output, stmt.expr), AnyNode::CallExpr(_)));
}

#[test]
fn return_with_and_without_value() {
    let (output, statements) = parse_body("fn int f() { return 42; }");
    let AnyNode::ReturnStmt(with_value) = data(&output, statements[0]) else {
        panic!("expected a return");
    };
    assert!(with_value.value.is_some());

    let (output, statements) = parse_body("fn void f() { return; }");
    let AnyNode::ReturnStmt(bare) = data(&output, statements[0]) else {
        panic!("expected a return");
    };
    assert!(bare.value.is_none());
}

#[test]
fn if_with_else_branch() {
    let (output, statements) = parse_body("fn void f() { if (x) { g(); } else { h(); } }");
    assert!(!output.had_error);

    let AnyNode::IfStmt(stmt) = data(&output, statements[0]) else { panic!("expected an if") };
    assert!(matches!(data(&output, stmt.condition), AnyNode::IdentifierExpr(_)));
    assert!(matches!(data(&output, stmt.then_branch), AnyNode::CompoundStmt(_)));
    assert!(stmt.else_branch.is_some());
}

#[test]
fn while_loop() {
    let (output, statements) = parse_body("fn void f() { while (x < 10) { x = x + 1; } }");
    assert!(!output.had_error);

    let AnyNode::WhileStmt(stmt) = data(&output, statements[0]) else {
        panic!("expected a while");
    };
    assert!(matches!(data(&output, stmt.condition), AnyNode::BinaryExpr(_)));
}

#[test]
fn for_loop_with_all_clauses() {
    let (output, statements) =
        parse_body("fn void f() { for (int i = 0; i < 10; i = i + 1) { g(i); } }");
    assert!(!output.had_error);

    let AnyNode::ForStmt(stmt) = data(&output, statements[0]) else { panic!("expected a for") };
    assert!(matches!(
        data(&output, stmt.init.expect("init")),
        AnyNode::DeclarationStmt(_)
    ));
    assert!(matches!(
        data(&output, stmt.condition.expect("condition")),
        AnyNode::BinaryExpr(_)
    ));
    assert!(stmt.update.is_some());
}

#[test]
fn for_loop_with_empty_clauses() {
    let (output, statements) = parse_body("fn void f() { for (;;) { break; } }");
    assert!(!output.had_error);

    let AnyNode::ForStmt(stmt) = data(&output, statements[0]) else { panic!("expected a for") };
    assert!(stmt.init.is_none());
    assert!(stmt.condition.is_none());
    assert!(stmt.update.is_none());
}

#[test]
fn foreach_loop() {
    let (output, statements) = parse_body("fn void f() { foreach (item : list) { use(item); } }");
    assert!(!output.had_error);

    let AnyNode::ForeachStmt(stmt) = data(&output, statements[0]) else {
        panic!("expected a foreach");
    };
    let AnyNode::IdentifierExpr(variable) = data(&output, stmt.variable) else {
        panic!("expected the loop variable");
    };
    assert_eq!(variable.name, "item");
}

#[test]
fn switch_with_case_and_default() {
    let (output, statements) =
        parse_body("fn void f() { switch (x) { case 1: g(); break; default: h(); } }");
    assert!(!output.had_error);

    let AnyNode::SwitchStmt(stmt) = data(&output, statements[0]) else {
        panic!("expected a switch");
    };
    assert_eq!(stmt.cases.len(), 2);

    let AnyNode::CaseStmt(case) = data(&output, stmt.cases[0]) else { panic!("expected a case") };
    assert!(matches!(data(&output, case.value), AnyNode::LiteralExpr(_)));
    assert_eq!(case.statements.len(), 2);
    assert!(matches!(data(&output, case.statements[1]), AnyNode::BreakStmt(_)));

    let AnyNode::DefaultStmt(default) = data(&output, stmt.cases[1]) else {
        panic!("expected a default arm");
    };
    assert_eq!(default.statements.len(), 1);
}

#[test]
fn break_and_continue_labels() {
    let (output, statements) = parse_body("fn void f() { while (x) { break OUTER; continue; } }");
    assert!(!output.had_error);

    let AnyNode::WhileStmt(stmt) = data(&output, statements[0]) else {
        panic!("expected a while");
    };
    let AnyNode::CompoundStmt(body) = data(&output, stmt.body) else { panic!("expected a block") };

    let AnyNode::BreakStmt(brk) = data(&output, body.statements[0]) else {
        panic!("expected a break");
    };
    assert_eq!(brk.label.as_deref(), Some("OUTER"));

    let AnyNode::ContinueStmt(cont) = data(&output, body.statements[1]) else {
        panic!("expected a continue");
    };
    assert!(cont.label.is_none());
}

#[test]
fn defer_wraps_a_statement() {
    let (output, statements) = parse_body("fn void f() { defer close(); }");
    assert!(!output.had_error);

    let AnyNode::DeferStmt(stmt) = data(&output, statements[0]) else {
        panic!("expected a defer");
    };
    assert!(matches!(data(&output, stmt.statement), AnyNode::ExpressionStmt(_)));
}

#[test]
fn assert_with_message() {
    let (output, statements) = parse_body(r#"fn void f() { assert x > 0, "positive"; }"#);
    assert!(!output.had_error);

    let AnyNode::AssertStmt(stmt) = data(&output, statements[0]) else {
        panic!("expected an assert");
    };
    assert!(matches!(data(&output, stmt.condition), AnyNode::BinaryExpr(_)));
    assert!(stmt.message.is_some());
}

#[test]
fn local_declarations_and_assignments() {
    let (output, statements) = parse_body("fn void f() { int x = 1; x = 2; }");
    assert!(!output.had_error);
    assert_eq!(statements.len(), 2);

    let AnyNode::DeclarationStmt(decl_stmt) = data(&output, statements[0]) else {
        panic!("expected a declaration statement");
    };
    let AnyNode::VariableDecl(var) = data(&output, decl_stmt.declaration) else {
        panic!("expected a variable");
    };
    assert_eq!(var.name, "x");

    let AnyNode::ExpressionStmt(assign_stmt) = data(&output, statements[1]) else {
        panic!("expected an expression statement");
    };
    let AnyNode::BinaryExpr(assign) = data(&output, assign_stmt.expr) else {
        panic!("expected an assignment");
    };
    assert_eq!(assign.op, BinaryOperator::Assign);
}

#[test]
fn compound_assignment_operators() {
    let (output, statements) = parse_body("fn void f() { x += 2; }");
    assert!(!output.had_error);

    let AnyNode::ExpressionStmt(stmt) = data(&output, statements[0]) else {
        panic!("expected an expression statement");
    };
    let AnyNode::BinaryExpr(expr) = data(&output, stmt.expr) else {
        panic!("expected a binary op");
    };
    assert_eq!(expr.op, BinaryOperator::AddAssign);
}

#[test]
fn newline_acts_as_implicit_terminator() {
    let (output, statements) = parse_body("fn void f() { g()\nh(); }");
    assert!(!output.had_error);
    assert_eq!(statements.len(), 2);
}

#[test]
fn missing_semicolon_recovers_inside_a_block() {
    let (output, statements) = parse_body("fn void f() { g() h(); }");
    assert!(output.had_error);
    assert_eq!(statements.len(), 1);
}

#[test]
fn nested_blocks() {
    let (output, statements) = parse_body("fn void f() { { g(); } }");
    assert!(!output.had_error);
    assert!(matches!(data(&output, statements[0]), AnyNode::CompoundStmt(_)));
}
