//! Walks over a [`StructuredDocument`].
//!
//! ```text
//!         5     10
//!       /   \
//!      1     2
//!      |
//!      a
//! ```
//!
//! In-order (depth-first): `5, 1, a, 2, 10`.
//! Level-order (breadth-first): `5, 10, 1, 2, a`.

use std::collections::VecDeque;
use std::slice;

use crate::model::{Section, StructuredDocument};

/// Depth-first, pre-order iterator over all sections.
pub struct InOrder<'a> {
    stack: Vec<slice::Iter<'a, Section>>,
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a Section;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let siblings = self.stack.last_mut()?;
            match siblings.next() {
                Some(section) => {
                    self.stack.push(section.children.iter());
                    return Some(section);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Breadth-first iterator, optionally bounded by depth.
pub struct LevelOrder<'a> {
    queue: VecDeque<&'a Section>,
    max_depth: Option<usize>,
}

impl<'a> Iterator for LevelOrder<'a> {
    type Item = &'a Section;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(section) = self.queue.pop_front() {
            if self.max_depth.map_or(true, |max| section.level < max) {
                self.queue.extend(section.children.iter());
                return Some(section);
            }
        }
        None
    }
}

/// Iterate sections depth-first in reading order.
pub fn traverse_in_order(document: &StructuredDocument) -> InOrder<'_> {
    InOrder {
        stack: vec![document.elements.iter()],
    }
}

/// Iterate sections level by level. With `max_depth`, only sections with
/// `level < max_depth` are yielded.
pub fn traverse_level_order(
    document: &StructuredDocument,
    max_depth: Option<usize>,
) -> LevelOrder<'_> {
    LevelOrder {
        queue: document.elements.iter().collect(),
        max_depth,
    }
}

/// Number of levels in the document tree (0 for an empty document).
pub fn document_depth(document: &StructuredDocument) -> usize {
    traverse_in_order(document)
        .map(|section| section.level)
        .max()
        .map_or(0, |level| level + 1)
}

/// A section together with the text of its direct leaf children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionContent<'a> {
    /// Section level
    pub level: usize,
    /// Heading text (empty for dangling sections)
    pub heading: &'a str,
    /// Leaf children texts joined by newlines
    pub content: String,
}

/// Sections with children in reading order, each with its leaf content.
pub fn sections_with_content(
    document: &StructuredDocument,
) -> impl Iterator<Item = SectionContent<'_>> + '_ {
    traverse_in_order(document)
        .filter(|section| !section.children.is_empty())
        .map(|section| SectionContent {
            level: section.level,
            heading: section.heading_text(),
            content: section
                .children
                .iter()
                .filter(|child| child.children.is_empty())
                .map(|child| child.heading_text())
                .collect::<Vec<_>>()
                .join("\n"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Style, TextElement, TextSize};

    fn section(text: &str, level: usize, children: Vec<Section>) -> Section {
        let style = Style::from_font("Arial", TextSize::Large, 12.0, 12.0);
        let mut section = Section::heading(TextElement::new(text, style), level);
        section.children = children;
        section
    }

    fn sample() -> StructuredDocument {
        StructuredDocument::new(vec![
            section(
                "5",
                0,
                vec![section("1", 1, vec![section("a", 2, vec![])]), section("2", 1, vec![])],
            ),
            section("10", 0, vec![]),
        ])
    }

    fn texts<'a>(sections: impl Iterator<Item = &'a Section>) -> Vec<&'a str> {
        sections.map(|s| s.heading_text()).collect()
    }

    #[test]
    fn test_in_order() {
        let doc = sample();
        assert_eq!(texts(traverse_in_order(&doc)), vec!["5", "1", "a", "2", "10"]);
    }

    #[test]
    fn test_level_order() {
        let doc = sample();
        assert_eq!(texts(traverse_level_order(&doc, None)), vec!["5", "10", "1", "2", "a"]);
        assert_eq!(texts(traverse_level_order(&doc, Some(1))), vec!["5", "10"]);
        assert_eq!(texts(traverse_level_order(&doc, Some(0))), Vec::<&str>::new());
    }

    #[test]
    fn test_depth() {
        assert_eq!(document_depth(&sample()), 3);
        assert_eq!(document_depth(&StructuredDocument::default()), 0);

        let single = StructuredDocument::new(vec![section("only", 0, vec![])]);
        assert_eq!(document_depth(&single), 1);
    }

    #[test]
    fn test_sections_with_content() {
        let doc = sample();
        let grouped: Vec<_> = sections_with_content(&doc).collect();

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].heading, "5");
        assert_eq!(grouped[0].content, "2");
        assert_eq!(grouped[1].level, 1);
        assert_eq!(grouped[1].heading, "1");
        assert_eq!(grouped[1].content, "a");
    }

    #[test]
    fn test_empty_document() {
        let doc = StructuredDocument::default();
        assert_eq!(traverse_in_order(&doc).count(), 0);
        assert_eq!(traverse_level_order(&doc, None).count(), 0);
    }
}
