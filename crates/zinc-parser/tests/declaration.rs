//! Tests for declaration parsing.

use zinc_ast::nodes::{AnyNode, LiteralValue, NodeID, NodeKind};
use zinc_parser::parser::{ParseOutput, Parser};
use zinc_source::types::{FileID, Position, Span};

fn parse(source: &str) -> ParseOutput {
    Parser::new(source, FileID::new(1)).parse("test.zn")
}

fn data(output: &ParseOutput, id: NodeID) -> &AnyNode {
    &output.unit.ast().get(id).expect("node exists").data
}

// ============================================================================
// Import Declaration Tests
// ============================================================================

#[test]
fn import_chain() {
    let output = parse("import std::io;");
    assert!(!output.had_error);

    let unit = &output.unit;
    assert_eq!(unit.declarations().len(), 1);

    let import_id = unit.declarations()[0];
    let node = unit.ast().get(import_id).expect("import node");
    assert_eq!(node.kind, NodeKind::ImportDecl);
    assert_eq!(node.span, Span::new(0, 15));

    let AnyNode::ImportDecl(import) = &node.data else { panic!("expected an import") };
    assert_eq!(import.identifiers.len(), 2);
    assert_eq!(unit.import_path(import), "std::io");

    let std_node = unit.ast().get(import.identifiers[0]).expect("std node");
    assert_eq!(std_node.span, Span::new(7, 10));
    let io_node = unit.ast().get(import.identifiers[1]).expect("io node");
    assert_eq!(io_node.span, Span::new(12, 14));

    // Position (0, 7) is the "s" of "std": the identifier wins, not the
    // import.
    let hit = unit.find_node_at_position(Position::new(0, 7)).expect("node at position");
    assert_eq!(unit.ast().get(hit).expect("hit").kind, NodeKind::IdentifierExpr);
}

#[test]
fn import_with_multiple_paths() {
    let output = parse("import std::io, libc;");
    assert!(!output.had_error);

    let AnyNode::ImportDecl(import) = data(&output, output.unit.declarations()[0]) else {
        panic!("expected an import");
    };
    let names: Vec<_> = import
        .identifiers
        .iter()
        .map(|&id| match data(&output, id) {
            AnyNode::IdentifierExpr(ident) => ident.name.clone(),
            _ => panic!("expected identifiers"),
        })
        .collect();
    assert_eq!(names, vec!["std", "io", "libc"]);
}

#[test]
fn import_missing_semicolon_is_recorded() {
    let output = parse("import std::io");
    assert!(output.had_error);

    let AnyNode::ImportDecl(import) = data(&output, output.unit.declarations()[0]) else {
        panic!("expected an import");
    };
    assert_eq!(import.identifiers.len(), 2);
}

#[test]
fn import_without_a_path_recovers() {
    let output = parse("import ;");
    assert!(output.had_error);

    let AnyNode::ImportDecl(import) = data(&output, output.unit.declarations()[0]) else {
        panic!("expected an import");
    };
    assert!(import.identifiers.is_empty());
}

// ============================================================================
// Struct/Union Declaration Tests
// ============================================================================

#[test]
fn struct_with_inline_member() {
    let output = parse("struct Base { int x; inline Point pos; }");
    assert!(!output.had_error);

    let AnyNode::StructDecl(decl) = data(&output, output.unit.declarations()[0]) else {
        panic!("expected a struct");
    };
    assert_eq!(decl.name, "Base");
    assert!(!decl.is_union);
    assert_eq!(decl.members.len(), 2);

    let AnyNode::StructMember(first) = data(&output, decl.members[0]) else {
        panic!("expected a member");
    };
    assert_eq!(first.name, "x");
    assert!(!first.is_inline);

    let AnyNode::StructMember(second) = data(&output, decl.members[1]) else {
        panic!("expected a member");
    };
    assert_eq!(second.name, "pos");
    assert!(second.is_inline);
}

#[test]
fn union_sets_the_flag() {
    let output = parse("union Value { int i; real f; }");
    assert!(!output.had_error);

    let AnyNode::StructDecl(decl) = data(&output, output.unit.declarations()[0]) else {
        panic!("expected a union");
    };
    assert_eq!(decl.name, "Value");
    assert!(decl.is_union);
    assert_eq!(decl.members.len(), 2);
}

#[test]
fn recovery_across_declarations() {
    let output = parse("struct Bad { invalid } struct Good { int x; }");
    assert!(output.had_error);

    let unit = &output.unit;
    assert_eq!(unit.declarations().len(), 2);

    let AnyNode::StructDecl(bad) = data(&output, unit.declarations()[0]) else {
        panic!("expected a struct");
    };
    assert_eq!(bad.name, "Bad");
    assert!(bad.members.is_empty());

    let AnyNode::StructDecl(good) = data(&output, unit.declarations()[1]) else {
        panic!("expected a struct");
    };
    assert_eq!(good.name, "Good");
    assert_eq!(good.members.len(), 1);
}

#[test]
fn struct_without_a_name_gets_a_placeholder() {
    let output = parse("struct { int x; }");
    assert!(output.had_error);

    let AnyNode::StructDecl(decl) = data(&output, output.unit.declarations()[0]) else {
        panic!("expected a struct");
    };
    assert_eq!(decl.name, "<missing>");
    assert_eq!(decl.members.len(), 1);
}

// ============================================================================
// Variable/Constant Declaration Tests
// ============================================================================

#[test]
fn missing_semicolon_between_declarations() {
    let output = parse("int x = 42\nint y = 24;");
    assert!(!output.had_error);

    let unit = &output.unit;
    assert_eq!(unit.declarations().len(), 2);

    let AnyNode::VariableDecl(x) = data(&output, unit.declarations()[0]) else {
        panic!("expected a variable");
    };
    assert_eq!(x.name, "x");
    let AnyNode::LiteralExpr(value) = data(&output, x.initializer.expect("initializer")) else {
        panic!("expected a literal");
    };
    assert_eq!(value.value, LiteralValue::Int(42));

    let AnyNode::VariableDecl(y) = data(&output, unit.declarations()[1]) else {
        panic!("expected a variable");
    };
    assert_eq!(y.name, "y");
}

#[test]
fn pointer_and_array_types() {
    let output = parse("int* p;\nint[4] buf;");
    assert!(!output.had_error);

    let AnyNode::VariableDecl(pointer) = data(&output, output.unit.declarations()[0]) else {
        panic!("expected a variable");
    };
    assert!(matches!(data(&output, pointer.ty.expect("type")), AnyNode::PointerType(_)));

    let AnyNode::VariableDecl(buffer) = data(&output, output.unit.declarations()[1]) else {
        panic!("expected a variable");
    };
    let AnyNode::ArrayType(array) = data(&output, buffer.ty.expect("type")) else {
        panic!("expected an array type");
    };
    let AnyNode::LiteralExpr(size) = data(&output, array.size.expect("size")) else {
        panic!("expected a size literal");
    };
    assert_eq!(size.value, LiteralValue::Int(4));
}

#[test]
fn constant_with_explicit_type() {
    let output = parse("const int MAX = 100;");
    assert!(!output.had_error);

    let AnyNode::ConstantDecl(decl) = data(&output, output.unit.declarations()[0]) else {
        panic!("expected a constant");
    };
    assert_eq!(decl.name, "MAX");
    assert!(decl.ty.is_some());
    assert!(decl.value.is_some());
}

#[test]
fn constant_with_inferred_type() {
    let output = parse("const VERSION = 3;");
    assert!(!output.had_error);

    let AnyNode::ConstantDecl(decl) = data(&output, output.unit.declarations()[0]) else {
        panic!("expected a constant");
    };
    assert_eq!(decl.name, "VERSION");
    assert!(decl.ty.is_none());
}

// ============================================================================
// Enum/Function/Module Declaration Tests
// ============================================================================

#[test]
fn enum_with_values() {
    let output = parse("enum Color { RED, GREEN, BLUE }");
    assert!(!output.had_error);

    let AnyNode::EnumDecl(decl) = data(&output, output.unit.declarations()[0]) else {
        panic!("expected an enum");
    };
    assert_eq!(decl.name, "Color");

    let names: Vec<_> = decl
        .values
        .iter()
        .map(|&id| match data(&output, id) {
            AnyNode::IdentifierExpr(ident) => ident.name.clone(),
            _ => panic!("expected identifiers"),
        })
        .collect();
    assert_eq!(names, vec!["RED", "GREEN", "BLUE"]);
}

#[test]
fn function_with_parameters_and_body() {
    let output = parse("fn int add(int a, int b) { return a + b; }");
    assert!(!output.had_error);

    let AnyNode::FunctionDecl(decl) = data(&output, output.unit.declarations()[0]) else {
        panic!("expected a function");
    };
    assert_eq!(decl.name, "add");
    assert_eq!(decl.params.len(), 2);
    assert!(decl.body.is_some());

    let AnyNode::TypeIdentifier(ret) = data(&output, decl.return_type.expect("return type"))
    else {
        panic!("expected a type identifier");
    };
    assert_eq!(ret.name, "int");
}

#[test]
fn function_prototype_has_no_body() {
    let output = parse("fn void log(String msg);");
    assert!(!output.had_error);

    let AnyNode::FunctionDecl(decl) = data(&output, output.unit.declarations()[0]) else {
        panic!("expected a function");
    };
    assert_eq!(decl.name, "log");
    assert!(decl.body.is_none());
}

#[test]
fn module_declaration() {
    let output = parse("module net::http;");
    assert!(!output.had_error);

    let AnyNode::ModuleDecl(decl) = data(&output, output.unit.declarations()[0]) else {
        panic!("expected a module");
    };
    assert_eq!(decl.identifiers.len(), 2);
}

#[test]
fn unsalvageable_function_is_poisoned() {
    let output = parse("fn ;");
    assert!(output.had_error);

    let unit = &output.unit;
    assert_eq!(unit.declarations().len(), 1);
    assert_eq!(
        unit.ast().get(unit.declarations()[0]).expect("node").kind,
        NodeKind::Poisoned
    );
}
