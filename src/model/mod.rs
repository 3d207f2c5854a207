//! Document model types for inferred PDF structure.
//!
//! This module defines the tree produced by the hierarchy parser and
//! consumed by the renderers. The model is independent of how the text was
//! extracted and can be decoded back from its JSON form.

mod document;
mod style;

pub use document::{Metadata, Section, SectionKind, StructuredDocument, TextElement};
pub use style::{Style, TextSize};
