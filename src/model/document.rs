//! Document-level types: annotated paragraphs, sections and the section tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Style;
use crate::analysis::StyleDistribution;
use crate::hierarchy::traversal::{self, InOrder, LevelOrder};
use crate::source::{Orientation, TextContainer};

/// One annotated paragraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextElement {
    text: String,

    /// Paragraph style
    pub style: Style,

    /// Page index (0-based)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,

    /// Writing direction of the source box
    #[serde(default, skip_serializing_if = "is_horizontal")]
    pub orientation: Orientation,

    #[serde(skip)]
    container: Option<TextContainer>,
}

fn is_horizontal(orientation: &Orientation) -> bool {
    *orientation == Orientation::Horizontal
}

impl TextElement {
    /// Create an element from plain text.
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into().trim().to_string(),
            style,
            page: None,
            orientation: Orientation::Horizontal,
            container: None,
        }
    }

    /// Create an element wrapping a source box.
    pub fn from_container(container: TextContainer, style: Style) -> Self {
        Self {
            text: container.text().trim().to_string(),
            style,
            page: Some(container.page),
            orientation: container.orientation,
            container: Some(container),
        }
    }

    /// Set the page index.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    /// Stripped text of the paragraph.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// First whitespace-delimited token, or an empty string.
    pub fn first_token(&self) -> &str {
        self.text.split_whitespace().next().unwrap_or("")
    }

    /// The source box, if the element was built from one.
    pub fn container(&self) -> Option<&TextContainer> {
        self.container.as_ref()
    }

    /// Check if the paragraph is vertical text.
    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }
}

/// Role of a section node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Node opened by a detected heading
    Heading,
    /// Leaf holding one body paragraph
    #[default]
    Content,
    /// Placeholder without heading for content before the first heading
    Dangling,
}

/// A node of the document tree.
///
/// Headings and body paragraphs are both sections: a content paragraph is a
/// leaf whose `heading` slot holds the paragraph itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Heading (or content) element; `None` for dangling sections
    pub heading: Option<TextElement>,

    /// Node role
    #[serde(default)]
    pub kind: SectionKind,

    /// Depth in the tree (number of ancestors)
    pub level: usize,

    /// Child sections in reading order
    #[serde(default)]
    pub children: Vec<Section>,
}

impl Section {
    /// Create a heading section.
    pub fn heading(element: TextElement, level: usize) -> Self {
        Self {
            heading: Some(element),
            kind: SectionKind::Heading,
            level,
            children: Vec::new(),
        }
    }

    /// Create a content leaf.
    pub fn content(element: TextElement, level: usize) -> Self {
        Self {
            heading: Some(element),
            kind: SectionKind::Content,
            level,
            children: Vec::new(),
        }
    }

    /// Create a dangling section.
    pub fn dangling(level: usize) -> Self {
        Self {
            heading: None,
            kind: SectionKind::Dangling,
            level,
            children: Vec::new(),
        }
    }

    /// Append a child section.
    pub fn append_child(&mut self, child: Section) {
        self.children.push(child);
    }

    /// Heading text, empty for dangling sections.
    pub fn heading_text(&self) -> &str {
        self.heading.as_ref().map(|h| h.text()).unwrap_or("")
    }

    /// Check if this node was opened by a heading.
    pub fn is_heading(&self) -> bool {
        self.kind == SectionKind::Heading
    }

    /// Check if this is a content leaf.
    pub fn is_content(&self) -> bool {
        self.kind == SectionKind::Content
    }

    /// Check if this is a dangling section.
    pub fn is_dangling(&self) -> bool {
        self.kind == SectionKind::Dangling
    }

    /// Re-derive node kinds after decoding input that did not carry them.
    pub(crate) fn infer_kinds(&mut self) {
        if self.heading.is_none() {
            self.kind = SectionKind::Dangling;
        } else if self.kind == SectionKind::Content && !self.children.is_empty() {
            self.kind = SectionKind::Heading;
        }
        for child in &mut self.children {
            child.infer_kinds();
        }
    }
}

/// Document metadata collected during parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// File name of the source
    #[serde(default)]
    pub filename: Option<String>,

    /// Detected document title
    #[serde(default)]
    pub title: Option<String>,

    /// Font size statistics the structure was inferred from
    #[serde(default)]
    pub style_distribution: Option<StyleDistribution>,

    /// Number of pages that contributed text
    #[serde(default)]
    pub page_count: usize,

    /// Time the structure was inferred
    #[serde(default)]
    pub parsed_at: Option<DateTime<Utc>>,
}

/// A document with its inferred section hierarchy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Top-level sections in reading order
    pub elements: Vec<Section>,

    /// Document metadata
    #[serde(default)]
    pub metadata: Metadata,
}

impl StructuredDocument {
    /// Create a document from its top-level sections.
    pub fn new(elements: Vec<Section>) -> Self {
        Self {
            elements,
            metadata: Metadata::default(),
        }
    }

    /// Set the metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Detected title, if any.
    pub fn title(&self) -> Option<&str> {
        self.metadata.title.as_deref()
    }

    /// Style distribution the document was parsed with.
    pub fn style_distribution(&self) -> Option<&StyleDistribution> {
        self.metadata.style_distribution.as_ref()
    }

    /// Check if the document has no sections.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Depth-first walk in reading order.
    pub fn in_order(&self) -> InOrder<'_> {
        traversal::traverse_in_order(self)
    }

    /// Breadth-first walk, optionally limited to levels below `max_depth`.
    pub fn level_order(&self, max_depth: Option<usize>) -> LevelOrder<'_> {
        traversal::traverse_level_order(self, max_depth)
    }

    /// Number of levels in the tree.
    pub fn depth(&self) -> usize {
        traversal::document_depth(self)
    }

    /// All heading sections in reading order.
    pub fn headings(&self) -> impl Iterator<Item = &Section> + '_ {
        self.in_order().filter(|s| s.is_heading())
    }

    /// Total number of sections, content leaves included.
    pub fn section_count(&self) -> usize {
        self.in_order().count()
    }
}
