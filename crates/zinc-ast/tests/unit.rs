//! Tests for translation units: line maps, position conversion, and
//! node-at-position lookup over hand-built arenas.

use zinc_ast::arena::Ast;
use zinc_ast::nodes::{
    AnyNode,
    IdentifierExpr,
    ImportDecl,
    NodeID,
    NodeKind,
    TranslationUnitDecl,
};
use zinc_ast::unit::{TranslationUnit, build_line_map};
use zinc_source::types::{FileID, Position, Span};

/// Builds a unit for `import std::io;` with the real spans of that source.
fn import_unit() -> (TranslationUnit, NodeID, NodeID, NodeID) {
    let source = "import std::io;";
    let mut ast = Ast::new();

    let std_id =
        ast.alloc(AnyNode::IdentifierExpr(IdentifierExpr { name: "std".into() }), Span::new(7, 10));
    let io_id =
        ast.alloc(AnyNode::IdentifierExpr(IdentifierExpr { name: "io".into() }), Span::new(12, 14));
    let import_id = ast.alloc(
        AnyNode::ImportDecl(ImportDecl { identifiers: vec![std_id, io_id] }),
        Span::new(0, 15),
    );
    let _ = ast.set_parent(std_id, import_id);
    let _ = ast.set_parent(io_id, import_id);

    let root = ast.alloc(
        AnyNode::TranslationUnit(TranslationUnitDecl { declarations: vec![import_id] }),
        Span::new(0, source.len()),
    );
    let _ = ast.set_parent(import_id, root);
    ast.set_root(root);

    let unit = TranslationUnit::new(ast, root, FileID::new(1), "test.zn".into(), source);

    (unit, import_id, std_id, io_id)
}

// ============================================================================
// Line Map Tests
// ============================================================================

#[test]
fn line_map_counts_newlines() {
    let source = "import std::io;\nstruct Point {\n  int x;\n  int y;\n}";
    assert_eq!(build_line_map(source), vec![0, 16, 31, 40, 49]);
}

#[test]
fn line_map_of_empty_source() {
    assert_eq!(build_line_map(""), vec![0]);
}

#[test]
fn line_map_with_trailing_newline() {
    assert_eq!(build_line_map("a\nb\n"), vec![0, 2, 4]);
}

// ============================================================================
// Position Conversion Tests
// ============================================================================

#[test]
fn offset_to_position_mid_line() {
    let source = "import std::io;\nstruct Point {\n  int x;\n  int y;\n}";
    let unit = TranslationUnit::new(
        Ast::new(),
        NodeID::new(0),
        FileID::new(1),
        "test.zn".into(),
        source,
    );

    assert_eq!(unit.offset_to_position(23), Position::new(1, 7));
    assert_eq!(unit.offset_to_position(0), Position::new(0, 0));
    assert_eq!(unit.offset_to_position(16), Position::new(1, 0));
}

#[test]
fn position_to_offset_clamps_past_document() {
    let source = "ab\ncd";
    let unit = TranslationUnit::new(
        Ast::new(),
        NodeID::new(0),
        FileID::new(1),
        "test.zn".into(),
        source,
    );

    // Line past the end of the document clamps to the source length.
    assert_eq!(unit.position_to_offset(Position::new(9, 0)), 5);
    // Character past the end of the source clamps too.
    assert_eq!(unit.position_to_offset(Position::new(1, 40)), 5);
    assert_eq!(unit.position_to_offset(Position::new(1, 1)), 4);
}

#[test]
fn offset_round_trips_through_position() {
    let source = "fn int main() {\n  return 0;\n}\n";
    let unit = TranslationUnit::new(
        Ast::new(),
        NodeID::new(0),
        FileID::new(1),
        "test.zn".into(),
        source,
    );

    for offset in 0..=source.len() {
        let position = unit.offset_to_position(offset);
        assert_eq!(unit.position_to_offset(position), offset, "offset {offset}");
    }
}

#[test]
fn position_round_trips_through_offset() {
    let source = "ab\n\ncdef";
    let unit = TranslationUnit::new(
        Ast::new(),
        NodeID::new(0),
        FileID::new(1),
        "test.zn".into(),
        source,
    );
    let line_lengths = [2, 0, 4];

    for (line, &len) in line_lengths.iter().enumerate() {
        for character in 0..=len {
            let position = Position::new(line as u32, character as u32);
            let offset = unit.position_to_offset(position);
            assert_eq!(unit.offset_to_position(offset), position, "position {position}");
        }
    }
}

// ============================================================================
// Node-at-Position Tests
// ============================================================================

#[test]
fn finds_identifier_not_import() {
    let (unit, _, std_id, io_id) = import_unit();

    // Offset 7 is the "s" of "std"; the identifier wins over the import.
    assert_eq!(unit.find_node_at_offset(7), Some(std_id));
    assert_eq!(unit.find_node_at_position(Position::new(0, 7)), Some(std_id));
    assert_eq!(unit.find_node_at_offset(12), Some(io_id));
}

#[test]
fn falls_back_to_enclosing_node_between_children() {
    let (unit, import_id, _, _) = import_unit();

    // Offset 10 is the first ":" of "::", inside the import but outside
    // both identifiers.
    assert_eq!(unit.find_node_at_offset(10), Some(import_id));
    assert_eq!(unit.find_node_at_offset(0), Some(import_id));
}

#[test]
fn never_returns_the_unit_itself() {
    let (unit, _, _, _) = import_unit();

    // Offset 15 is past the import's half-open span; nothing matches.
    assert_eq!(unit.find_node_at_offset(15), None);
}

#[test]
fn import_path_joins_segments() {
    let (unit, import_id, _, _) = import_unit();

    let Some(AnyNode::ImportDecl(import)) = unit.ast().get(import_id).map(|node| &node.data)
    else {
        panic!("expected an import declaration");
    };
    assert_eq!(unit.import_path(import), "std::io");
}

// ============================================================================
// Parent Invariant Tests
// ============================================================================

#[test]
fn parents_are_wired_and_reciprocal() {
    let (unit, _, _, _) = import_unit();
    let ast = unit.ast();

    for (id, node) in ast.iter() {
        match node.parent {
            None => assert_eq!(id, unit.root(), "only the root may be parentless"),
            Some(parent_id) => {
                let parent = ast.get(parent_id).expect("parent exists");
                assert!(
                    parent.data.children().contains(&id),
                    "{:?} not among its parent's children",
                    node.kind
                );
            }
        }
    }
}

#[test]
fn kind_tag_matches_payload() {
    let (unit, import_id, std_id, _) = import_unit();
    let ast = unit.ast();

    assert_eq!(ast.get(import_id).unwrap().kind, NodeKind::ImportDecl);
    assert_eq!(ast.get(std_id).unwrap().kind, NodeKind::IdentifierExpr);
    assert_eq!(ast.get(unit.root()).unwrap().kind, NodeKind::TranslationUnit);
}
