//! Visitor pattern for customizing section rendering.
//!
//! The visitor pattern allows users to customize how sections are rendered
//! without modifying the core rendering logic.
//!
//! # Example
//!
//! ```
//! use pdf_structure::render::visitor::{SectionVisitor, VisitorAction};
//! use pdf_structure::model::Section;
//!
//! struct ShoutingHeadings;
//!
//! impl SectionVisitor for ShoutingHeadings {
//!     fn visit_heading(&mut self, section: &Section) -> VisitorAction {
//!         VisitorAction::Replace(format!("[{}]", section.heading_text().to_uppercase()))
//!     }
//! }
//! ```

use crate::model::Section;

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the section's own line with custom output (children are
    /// still rendered).
    Replace(String),

    /// Skip this section and its whole subtree.
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the section should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement content.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting sections during rendering.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait SectionVisitor: Send + Sync {
    /// Called before rendering a heading section.
    fn visit_heading(&mut self, section: &Section) -> VisitorAction {
        let _ = section;
        VisitorAction::Continue
    }

    /// Called before rendering a content leaf.
    fn visit_content(&mut self, section: &Section) -> VisitorAction {
        let _ = section;
        VisitorAction::Continue
    }

    /// Called before rendering a dangling section.
    fn visit_dangling(&mut self, section: &Section) -> VisitorAction {
        let _ = section;
        VisitorAction::Continue
    }
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl SectionVisitor for DefaultVisitor {}

/// Visitor that skips every section at or below a depth.
#[derive(Debug, Clone)]
pub struct MaxDepthVisitor {
    max_depth: usize,
}

impl MaxDepthVisitor {
    /// Render only sections with `level < max_depth`.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    fn check(&self, section: &Section) -> VisitorAction {
        if section.level >= self.max_depth {
            VisitorAction::Skip
        } else {
            VisitorAction::Continue
        }
    }
}

impl SectionVisitor for MaxDepthVisitor {
    fn visit_heading(&mut self, section: &Section) -> VisitorAction {
        self.check(section)
    }

    fn visit_content(&mut self, section: &Section) -> VisitorAction {
        self.check(section)
    }

    fn visit_dangling(&mut self, section: &Section) -> VisitorAction {
        self.check(section)
    }
}

/// Visitor that renders the outline only.
#[derive(Debug, Clone, Default)]
pub struct HeadingsOnlyVisitor;

impl SectionVisitor for HeadingsOnlyVisitor {
    fn visit_content(&mut self, _section: &Section) -> VisitorAction {
        VisitorAction::Skip
    }

    fn visit_dangling(&mut self, _section: &Section) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn SectionVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: SectionVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    fn first_action<F>(&mut self, mut visit: F) -> VisitorAction
    where
        F: FnMut(&mut Box<dyn SectionVisitor>) -> VisitorAction,
    {
        for visitor in &mut self.visitors {
            let action = visit(visitor);
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionVisitor for CompositeVisitor {
    fn visit_heading(&mut self, section: &Section) -> VisitorAction {
        self.first_action(|v| v.visit_heading(section))
    }

    fn visit_content(&mut self, section: &Section) -> VisitorAction {
        self.first_action(|v| v.visit_content(section))
    }

    fn visit_dangling(&mut self, section: &Section) -> VisitorAction {
        self.first_action(|v| v.visit_dangling(section))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Style, TextElement, TextSize};

    fn heading(level: usize) -> Section {
        let style = Style::from_font("Arial-Bold", TextSize::Large, 14.0, 14.0);
        Section::heading(TextElement::new("Heading", style), level)
    }

    fn content(level: usize) -> Section {
        let style = Style::from_font("Arial", TextSize::Middle, 10.0, 10.0);
        Section::content(TextElement::new("text", style), level)
    }

    #[test]
    fn test_visitor_action_default() {
        let action = VisitorAction::default();
        assert!(matches!(action, VisitorAction::Continue));
    }

    #[test]
    fn test_visitor_action_should_skip() {
        assert!(!VisitorAction::Continue.should_skip());
        assert!(!VisitorAction::Replace("test".into()).should_skip());
        assert!(VisitorAction::Skip.should_skip());
    }

    #[test]
    fn test_visitor_action_replacement() {
        assert!(VisitorAction::Continue.replacement().is_none());
        assert!(VisitorAction::Skip.replacement().is_none());
        assert_eq!(
            VisitorAction::Replace("hello".into()).replacement(),
            Some("hello")
        );
    }

    #[test]
    fn test_default_visitor() {
        let mut visitor = DefaultVisitor::new();
        assert!(matches!(visitor.visit_heading(&heading(0)), VisitorAction::Continue));
        assert!(matches!(visitor.visit_content(&content(1)), VisitorAction::Continue));
    }

    #[test]
    fn test_max_depth_visitor() {
        let mut visitor = MaxDepthVisitor::new(2);
        assert!(!visitor.visit_heading(&heading(1)).should_skip());
        assert!(visitor.visit_heading(&heading(2)).should_skip());
        assert!(visitor.visit_content(&content(3)).should_skip());
        assert!(!visitor.visit_dangling(&Section::dangling(0)).should_skip());
    }

    #[test]
    fn test_headings_only_visitor() {
        let mut visitor = HeadingsOnlyVisitor;
        assert!(!visitor.visit_heading(&heading(0)).should_skip());
        assert!(visitor.visit_content(&content(1)).should_skip());
        assert!(visitor.visit_dangling(&Section::dangling(0)).should_skip());
    }

    #[test]
    fn test_composite_visitor() {
        let mut composite = CompositeVisitor::new()
            .with_visitor(HeadingsOnlyVisitor)
            .with_visitor(MaxDepthVisitor::new(1));

        assert!(composite.visit_content(&content(0)).should_skip());
        assert!(composite.visit_heading(&heading(1)).should_skip());
        assert!(matches!(composite.visit_heading(&heading(0)), VisitorAction::Continue));
    }
}
