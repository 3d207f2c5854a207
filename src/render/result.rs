//! Summary statistics of a structured document.

use serde::{Deserialize, Serialize};

use crate::model::{SectionKind, StructuredDocument};

/// Counts collected over the section tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureStats {
    /// Number of pages that contributed text
    pub page_count: usize,

    /// Number of heading sections
    pub heading_count: usize,

    /// Number of content paragraphs
    pub paragraph_count: usize,

    /// Number of dangling sections
    pub dangling_count: usize,

    /// Number of levels in the tree
    pub depth: usize,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: usize,

    /// Character count (excluding whitespace)
    pub char_count: usize,
}

impl StructureStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics for a document.
    pub fn from_document(doc: &StructuredDocument) -> Self {
        let mut stats = Self {
            page_count: doc.metadata.page_count,
            depth: doc.depth(),
            ..Self::default()
        };

        for section in doc.in_order() {
            match section.kind {
                SectionKind::Heading => stats.heading_count += 1,
                SectionKind::Content => stats.paragraph_count += 1,
                SectionKind::Dangling => stats.dangling_count += 1,
            }
            stats.count_text(section.heading_text());
        }

        stats
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count();
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count();
    }

    /// Merge another stats instance into this one. Depth keeps the maximum.
    pub fn merge(&mut self, other: &StructureStats) {
        self.page_count += other.page_count;
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.dangling_count += other.dangling_count;
        self.depth = self.depth.max(other.depth);
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
