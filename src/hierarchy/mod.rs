//! Heading detection and section hierarchy inference.
//!
//! Annotated paragraphs are classified as headings or body text
//! ([`is_heading`]) and folded into a tree by the [`HierarchyParser`].
//! Headings in the same size bucket are disambiguated with a
//! [`SubHeaderPredicate`]. The [`traversal`] module walks the result.

mod compare;
mod detect;
mod options;
mod parser;
pub mod traversal;

pub use compare::{is_numbered, SubHeaderPredicate, SubHeaderRule};
pub use detect::{check_valid_header_tokens, is_heading};
pub use options::{ParserOptions, DEFAULT_TITLE_HEADINGS};
pub use parser::HierarchyParser;
pub use traversal::{
    document_depth, sections_with_content, traverse_in_order, traverse_level_order, InOrder,
    LevelOrder, SectionContent,
};
