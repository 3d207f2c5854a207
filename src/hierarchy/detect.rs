//! Heading classification of annotated paragraphs.

use crate::analysis::StyleDistribution;
use crate::model::{TextElement, TextSize};

/// Paragraphs with at most this many characters are never headings.
const MIN_HEADING_CHARS: usize = 2;

/// Points above the body size that make a paragraph a heading candidate
/// regardless of its bucket.
const BODY_SIZE_MARGIN: f64 = 2.0;

/// Check if an annotated paragraph is a heading.
pub fn is_heading(element: &TextElement, distribution: &StyleDistribution) -> bool {
    if element.is_vertical() {
        return false;
    }
    if element.text().chars().count() <= MIN_HEADING_CHARS {
        return false;
    }

    let style = &element.style;
    let candidate = ((style.bold || style.italic) && style.mapped_font_size >= TextSize::Middle)
        || style.mapped_font_size > TextSize::Middle
        || style.max_size > distribution.body_size() + BODY_SIZE_MARGIN;

    candidate && check_valid_header_tokens(element.text())
}

/// A heading needs at least two alphabetic characters.
pub fn check_valid_header_tokens(text: &str) -> bool {
    text.split_whitespace()
        .flat_map(str::chars)
        .filter(|c| c.is_alphabetic())
        .take(2)
        .count()
        >= 2
}
