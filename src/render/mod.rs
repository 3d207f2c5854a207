//! Rendering module for converting structured documents to output formats.

mod json;
mod options;
mod result;
mod text;
pub mod visitor;

pub use json::{from_json, to_json, JsonFormat};
pub use options::RenderOptions;
pub use result::StructureStats;
pub use text::{to_text, to_text_with_visitor, TextRenderer};
pub use visitor::{
    CompositeVisitor, DefaultVisitor, HeadingsOnlyVisitor, MaxDepthVisitor, SectionVisitor,
    VisitorAction,
};
