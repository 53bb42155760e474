//! Whole-parse tests: structural invariants, the line map, recovery
//! bounds, and the diagnostic limit.

use zinc_ast::nodes::{AnyNode, NodeID};
use zinc_parser::parser::{ParseOutput, Parser};
use zinc_source::types::{FileID, Position};

fn parse(source: &str) -> ParseOutput {
    Parser::new(source, FileID::new(1)).parse("test.zn")
}

const RICH_SOURCE: &str = "import std::io;\n\
    struct Point { int x; int y; }\n\
    fn int len2(Point* p) { return p.x * p.x + p.y * p.y; }\n";

#[test]
fn line_map_matches_newlines() {
    let output = parse("import std::io;\nstruct Point {\n  int x;\n  int y;\n}");

    assert_eq!(output.unit.line_map(), &[0, 16, 31, 40, 49]);
    assert_eq!(output.unit.offset_to_position(23), Position::new(1, 7));
}

#[test]
fn parent_links_are_reciprocal() {
    let output = parse(RICH_SOURCE);
    assert!(!output.had_error);

    let unit = &output.unit;
    let ast = unit.ast();

    assert!(ast.get(unit.root()).expect("root").parent.is_none());

    let mut visited = 0;
    let completed = ast.traverse_pre_order(unit.root(), &mut |id: NodeID| {
        visited += 1;
        let node = ast.get(id).expect("node exists");
        for child in node.data.children() {
            assert_eq!(ast.parent_of(child), Some(id), "child of {:?} not linked back", node.kind);
        }
        true
    });

    assert!(completed);
    assert!(visited > 10, "traversal should reach the whole tree");
}

#[test]
fn child_spans_nest_inside_parent_spans() {
    let output = parse(RICH_SOURCE);
    let unit = &output.unit;
    let ast = unit.ast();
    let source_len = RICH_SOURCE.len();

    let _ = ast.traverse_pre_order(unit.root(), &mut |id: NodeID| {
        let node = ast.get(id).expect("node exists");
        assert!(node.span.start <= node.span.end);
        assert!(node.span.end <= source_len);

        for child in node.data.children() {
            let child_span = ast.get(child).expect("child exists").span;
            assert!(child_span.start >= node.span.start, "{:?} child starts early", node.kind);
            assert!(child_span.end <= node.span.end, "{:?} child ends late", node.kind);
        }
        true
    });
}

#[test]
fn identifier_first_byte_resolves_to_the_identifier() {
    let output = parse(RICH_SOURCE);
    let unit = &output.unit;

    let std_offset = RICH_SOURCE.find("std").expect("source contains std");
    let hit = unit.find_node_at_offset(std_offset).expect("node at offset");
    let AnyNode::IdentifierExpr(ident) = &unit.ast().get(hit).expect("node").data else {
        panic!("expected an identifier");
    };
    assert_eq!(ident.name, "std");

    // The member identifier of `p.y` resolves too.
    let y_offset = RICH_SOURCE.rfind("p.y").expect("source contains p.y") + 2;
    let hit = unit.find_node_at_offset(y_offset).expect("node at offset");
    let AnyNode::IdentifierExpr(member) = &unit.ast().get(hit).expect("node").data else {
        panic!("expected an identifier");
    };
    assert_eq!(member.name, "y");
}

#[test]
fn error_placeholders_are_parented() {
    let output = parse("int r = (1 + 2;");
    assert!(output.had_error);

    let unit = &output.unit;
    let ast = unit.ast();
    let placeholder = ast
        .find_node(unit.root(), |id| {
            matches!(
                ast.get(id).map(|node| &node.data),
                Some(AnyNode::IdentifierExpr(ident)) if ident.name == "<error>"
            )
        })
        .expect("placeholder reachable from the root");

    assert!(ast.parent_of(placeholder).is_some());
}

#[test]
fn parsing_garbage_terminates() {
    for source in [
        "@@@ ))) ;;;",
        "struct S { { }",
        "((((((((",
        "import import import",
        "}{}{}{",
        "fn fn fn fn",
        "= = = = =",
    ] {
        let output = parse(source);
        assert!(output.had_error, "{source:?} should report errors");
    }
}

#[test]
fn clean_sources_report_no_errors() {
    for source in [
        "",
        "\n\n\n",
        "import std::io;\n",
        RICH_SOURCE,
        "enum State { IDLE, BUSY }\nconst int LIMIT = 8;\n",
    ] {
        let output = parse(source);
        assert!(!output.had_error, "{source:?} should parse cleanly");
        assert_eq!(output.error_count, 0);
    }
}

#[test]
fn errors_past_the_limit_are_counted_but_not_recorded() {
    let source = "int = ;\nint = ;\nint = ;";
    let output = Parser::new(source, FileID::new(1)).with_max_errors(1).parse("test.zn");

    assert!(output.had_error);
    assert_eq!(output.error_count, 3);
    assert_eq!(output.diagnostics.len(), 1);
}

#[test]
fn diagnostics_carry_span_and_lexeme() {
    let output = parse("struct Bad { invalid }");

    assert!(output.had_error);
    let diagnostic = output.diagnostics.first().expect("one diagnostic");
    assert_eq!(diagnostic.lexeme, "}");
    assert!(diagnostic.span.start < "struct Bad { invalid }".len());
}
