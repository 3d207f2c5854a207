//! Disambiguation of headings that share a size bucket.
//!
//! Two headings in the same bucket are not necessarily siblings: a bold
//! numbered heading followed by a plain one usually opens a subsection.
//! [`SubHeaderPredicate`] combines named pairwise rules that decide whether
//! the second heading nests under the first.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::TextElement;

/// A token with at least one digit and at least one `.` or `:`.
static NUMBERING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:.*\d.*[.:]|.*[.:].*\d).*$").expect("valid numbering regex"));

/// Difference in mean size (points) above which the first heading counts as
/// bigger.
const SLIGHTLY_BIGGER_MARGIN: f64 = 1.0;

/// Check if a token looks like section numbering (`1.2`, `3:`, `A.1`).
pub fn is_numbered(token: &str) -> bool {
    NUMBERING.is_match(token)
}

/// A named test `(h1, h2) -> h2 is a sub-heading of h1`.
#[derive(Clone, Copy)]
pub struct SubHeaderRule {
    /// Rule name, used in logs
    pub name: &'static str,
    /// Rule test
    pub test: fn(&TextElement, &TextElement) -> bool,
}

impl SubHeaderRule {
    /// Create a rule.
    pub const fn new(name: &'static str, test: fn(&TextElement, &TextElement) -> bool) -> Self {
        Self { name, test }
    }

    /// h1 bold and h2 not, unless only h2 is numbered.
    pub const BOLDNESS: SubHeaderRule = SubHeaderRule::new("boldness", boldness);

    /// h1 numbered and h2 not, unless only h2 is bold.
    pub const H1_ENUMERATED_H2_NOT: SubHeaderRule =
        SubHeaderRule::new("h1_enumerated_h2_not", h1_enumerated_h2_not);

    /// h2's first token extends h1's (`1.1` then `1.1.2`).
    pub const H2_EXTENDS_H1: SubHeaderRule = SubHeaderRule::new("h2_extends_h1", h2_extends_h1);

    /// Same bucket but h1 is more than a point bigger on average.
    pub const H1_SLIGHTLY_BIGGER: SubHeaderRule =
        SubHeaderRule::new("h1_slightly_bigger", h1_slightly_bigger);
}

impl std::fmt::Debug for SubHeaderRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SubHeaderRule").field(&self.name).finish()
    }
}

/// OR-combination of [`SubHeaderRule`]s.
#[derive(Debug, Clone)]
pub struct SubHeaderPredicate {
    rules: Vec<SubHeaderRule>,
}

impl SubHeaderPredicate {
    /// Create a predicate without rules (never matches).
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule.
    pub fn with_rule(mut self, rule: SubHeaderRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Configured rules in evaluation order.
    pub fn rules(&self) -> &[SubHeaderRule] {
        &self.rules
    }

    /// Name of the first rule that makes `h2` a sub-heading of `h1`.
    pub fn matching_rule(&self, h1: &TextElement, h2: &TextElement) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| (rule.test)(h1, h2))
            .map(|rule| rule.name)
    }

    /// Check if `h2` is a sub-heading of `h1`.
    pub fn test(&self, h1: &TextElement, h2: &TextElement) -> bool {
        self.matching_rule(h1, h2).is_some()
    }
}

impl Default for SubHeaderPredicate {
    fn default() -> Self {
        Self::empty()
            .with_rule(SubHeaderRule::BOLDNESS)
            .with_rule(SubHeaderRule::H1_ENUMERATED_H2_NOT)
            .with_rule(SubHeaderRule::H2_EXTENDS_H1)
            .with_rule(SubHeaderRule::H1_SLIGHTLY_BIGGER)
    }
}

fn boldness(h1: &TextElement, h2: &TextElement) -> bool {
    if is_numbered(h2.first_token()) && !is_numbered(h1.first_token()) {
        return false;
    }
    h1.style.bold && !h2.style.bold
}

fn h1_enumerated_h2_not(h1: &TextElement, h2: &TextElement) -> bool {
    if h2.style.bold && !h1.style.bold {
        return false;
    }
    is_numbered(h1.first_token()) && !is_numbered(h2.first_token())
}

fn h2_extends_h1(h1: &TextElement, h2: &TextElement) -> bool {
    let h1_start = h1.first_token();
    let h2_start = h2.first_token();
    !h1_start.is_empty() && h2_start.len() > h1_start.len() && h2_start.contains(h1_start)
}

fn h1_slightly_bigger(h1: &TextElement, h2: &TextElement) -> bool {
    h1.style.mapped_font_size == h2.style.mapped_font_size
        && h1.style.mean_size - h2.style.mean_size > SLIGHTLY_BIGGER_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Style, TextSize};

    fn heading(text: &str, font: &str, mean_size: f64) -> TextElement {
        TextElement::new(text, Style::from_font(font, TextSize::Large, mean_size, mean_size))
    }

    #[test]
    fn test_is_numbered() {
        assert!(is_numbered("1.2"));
        assert!(is_numbered("3."));
        assert!(is_numbered("Step:4"));
        assert!(is_numbered(".5"));
        assert!(!is_numbered("12"));
        assert!(!is_numbered("Intro."));
        assert!(!is_numbered(""));
    }

    #[test]
    fn test_boldness() {
        let bold = heading("Chapter One", "Arial-Bold", 14.0);
        let plain = heading("Background", "Arial", 14.0);
        let numbered_plain = heading("2.1 Background", "Arial", 14.0);

        assert!(boldness(&bold, &plain));
        assert!(!boldness(&plain, &bold));
        assert!(!boldness(&bold, &numbered_plain));
    }

    #[test]
    fn test_h1_enumerated_h2_not() {
        let numbered = heading("1.1 Scope", "Arial", 14.0);
        let plain = heading("Terms", "Arial", 14.0);
        let bold_plain = heading("Terms", "Arial-Bold", 14.0);

        assert!(h1_enumerated_h2_not(&numbered, &plain));
        assert!(!h1_enumerated_h2_not(&plain, &numbered));
        assert!(!h1_enumerated_h2_not(&numbered, &bold_plain));
    }

    #[test]
    fn test_h2_extends_h1() {
        let h1 = heading("1.1 Scope", "Arial", 14.0);
        let h2 = heading("1.1.2 Details", "Arial", 14.0);

        assert!(h2_extends_h1(&h1, &h2));
        assert!(!h2_extends_h1(&h2, &h1));
        assert!(!h2_extends_h1(&h1, &h1));
    }

    #[test]
    fn test_h1_slightly_bigger() {
        let big = heading("Methods", "Arial", 15.5);
        let small = heading("Setup", "Arial", 14.0);
        let close = heading("Setup", "Arial", 15.0);

        assert!(h1_slightly_bigger(&big, &small));
        assert!(!h1_slightly_bigger(&big, &close));
        assert!(!h1_slightly_bigger(&small, &big));
    }

    #[test]
    fn test_default_predicate() {
        let predicate = SubHeaderPredicate::default();
        assert_eq!(predicate.rules().len(), 4);

        let h1 = heading("Introduction", "Arial", 14.0);
        let h2 = heading("Methods", "Arial", 14.0);
        assert!(!predicate.test(&h1, &h2));

        let h1 = heading("1.1 Scope", "Arial", 14.0);
        let h2 = heading("1.1.2 Details", "Arial", 14.0);
        assert_eq!(predicate.matching_rule(&h1, &h2), Some("h2_extends_h1"));
    }

    #[test]
    fn test_empty_predicate_never_matches() {
        let predicate = SubHeaderPredicate::empty();
        let h1 = heading("Chapter", "Arial-Bold", 16.0);
        let h2 = heading("Section", "Arial", 14.0);
        assert!(!predicate.test(&h1, &h2));

        let predicate = predicate.with_rule(SubHeaderRule::BOLDNESS);
        assert!(predicate.test(&h1, &h2));
    }
}
