//! Document title detection.
//!
//! A title is assembled from the first few prominent paragraphs. Which
//! paragraphs count as prominent depends on the shape of the size
//! distribution, see [`TitleMode`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::analysis::StyleDistribution;
use crate::hierarchy::DEFAULT_TITLE_HEADINGS;
use crate::model::{Section, StructuredDocument, TextSize};

/// Default maximum length of a title slug.
pub const DEFAULT_SLUG_LENGTH: usize = 100;

/// Separator between the paragraphs that make up a title.
const TITLE_SEPARATOR: &str = " - ";

static SLUG_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s/]+").expect("valid regex"));
static REPEATED_UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_{2,}").expect("valid regex"));

/// How title candidates are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleMode {
    /// One font size only: the leading paragraphs
    OnlyOneSize,
    /// Body text is the largest size: paragraphs of at least `Middle` size
    BodyTextBiggest,
    /// Paragraphs of at least `Large` size
    TitleFromSize,
}

impl TitleMode {
    /// Pick the mode for a size distribution.
    pub fn for_distribution(distribution: &StyleDistribution) -> Self {
        if distribution.is_single_size() {
            TitleMode::OnlyOneSize
        } else if distribution.body_size() == distribution.max_found_size() {
            TitleMode::BodyTextBiggest
        } else {
            TitleMode::TitleFromSize
        }
    }

    fn threshold(self) -> Option<TextSize> {
        match self {
            TitleMode::OnlyOneSize => None,
            TitleMode::BodyTextBiggest => Some(TextSize::Middle),
            TitleMode::TitleFromSize => Some(TextSize::Large),
        }
    }
}

/// Picks a title from a parsed document.
#[derive(Debug, Clone)]
pub struct TitleFinder {
    max_headings: usize,
}

impl TitleFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of paragraphs joined into the title.
    pub fn with_max_headings(mut self, count: usize) -> Self {
        self.max_headings = count;
        self
    }

    /// Find a title using the document's own style distribution.
    ///
    /// Returns `None` when the document carries no distribution or no
    /// paragraph qualifies.
    pub fn find(&self, document: &StructuredDocument) -> Option<String> {
        let distribution = document.style_distribution()?;
        self.find_with_mode(document, TitleMode::for_distribution(distribution))
    }

    /// Find a title with an explicit selection mode.
    pub fn find_with_mode(&self, document: &StructuredDocument, mode: TitleMode) -> Option<String> {
        let threshold = mode.threshold();
        let parts: Vec<String> = document
            .in_order()
            .filter(|section| qualifies(section, threshold))
            .take(self.max_headings)
            .map(|section| collapse_whitespace(section.heading_text()))
            .collect();

        log::debug!("Title mode {:?}: {} candidates", mode, parts.len());

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(TITLE_SEPARATOR))
        }
    }
}

impl Default for TitleFinder {
    fn default() -> Self {
        Self {
            max_headings: DEFAULT_TITLE_HEADINGS,
        }
    }
}

fn qualifies(section: &Section, threshold: Option<TextSize>) -> bool {
    let Some(heading) = &section.heading else {
        return false;
    };
    if heading.text().chars().count() <= 2 {
        return false;
    }
    threshold.map_or(true, |min| heading.style.mapped_font_size >= min)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// File-name friendly form of a title.
///
/// Applies NFKC normalization, turns whitespace and `/` runs into a single
/// `_` and keeps at most `max_len` characters.
pub fn title_slug(text: &str, max_len: usize) -> String {
    let normalized: String = text.trim().nfkc().collect();
    let slug = SLUG_SEPARATORS.replace_all(&normalized, "_");
    let slug = REPEATED_UNDERSCORES.replace_all(&slug, "_");
    slug.chars().take(max_len).collect()
}
