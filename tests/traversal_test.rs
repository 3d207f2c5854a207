//! Integration tests for document traversal.

use pdf_structure::hierarchy::{document_depth, traverse_in_order, traverse_level_order};
use pdf_structure::{Section, Style, StructuredDocument, TextElement, TextSize};

fn node(text: &str, level: usize, children: Vec<Section>) -> Section {
    let style = Style::from_font("Times-Bold", TextSize::Large, 12.0, 12.0);
    let mut section = if children.is_empty() {
        Section::content(TextElement::new(text, style), level)
    } else {
        Section::heading(TextElement::new(text, style), level)
    };
    section.children = children;
    section
}

/// ```text
///         5     10
///       /   \
///      1     2
///      |
///      a
/// ```
fn tree() -> StructuredDocument {
    StructuredDocument::new(vec![
        node(
            "5",
            0,
            vec![node("1", 1, vec![node("a", 2, vec![])]), node("2", 1, vec![])],
        ),
        node("10", 0, vec![]),
    ])
}

fn texts<'a>(sections: impl Iterator<Item = &'a Section>) -> Vec<&'a str> {
    sections.map(|s| s.heading_text()).collect()
}

#[test]
fn test_in_order_is_depth_first() {
    let doc = tree();
    assert_eq!(texts(traverse_in_order(&doc)), vec!["5", "1", "a", "2", "10"]);
    assert_eq!(texts(doc.in_order()), vec!["5", "1", "a", "2", "10"]);
}

#[test]
fn test_level_order_is_breadth_first() {
    let doc = tree();
    assert_eq!(
        texts(traverse_level_order(&doc, None)),
        vec!["5", "10", "1", "2", "a"]
    );
    assert_eq!(
        texts(doc.level_order(Some(2))),
        vec!["5", "10", "1", "2"]
    );
}

#[test]
fn test_depth_of_single_root() {
    let doc = StructuredDocument::new(vec![node("only", 0, vec![])]);
    assert_eq!(document_depth(&doc), 1);
    assert_eq!(document_depth(&tree()), 3);
}

#[test]
fn test_every_section_visited_once() {
    let doc = tree();
    assert_eq!(traverse_in_order(&doc).count(), 5);
    assert_eq!(traverse_level_order(&doc, None).count(), 5);
    assert_eq!(doc.section_count(), 5);
}
