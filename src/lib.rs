//! # pdf-structure
//!
//! Heading and section hierarchy inference for positioned PDF text.
//!
//! PDF content streams carry no structural markup: a heading is just text
//! drawn in a bigger or bolder font. This library recovers the logical
//! outline of a document from the font statistics of its text lines and
//! produces a tree of nested sections.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_structure::{parse_layout_file, render};
//!
//! fn main() -> pdf_structure::Result<()> {
//!     // Parse a layout dump written by an extractor
//!     let doc = parse_layout_file("document.layout.json")?;
//!
//!     // Print the indented outline
//!     let options = render::RenderOptions::default();
//!     println!("{}", render::to_text(&doc, &options)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. [`StyleDistribution`] finds the body text size and the size range.
//! 2. A [`SizeMapper`](analysis::SizeMapper) maps every size onto one of
//!    five [`TextSize`] buckets around the body size.
//! 3. [`StyleAnnotator`](analysis::StyleAnnotator) attaches a [`Style`] to
//!    every paragraph.
//! 4. [`HierarchyParser`] classifies headings and folds the paragraph
//!    stream into [`Section`]s.

pub mod analysis;
pub mod error;
pub mod hierarchy;
pub mod model;
pub mod render;
pub mod source;
pub mod title;

// Re-export commonly used types
pub use analysis::{MapperKind, StyleDistribution};
pub use error::{Error, Result};
pub use hierarchy::{HierarchyParser, ParserOptions, SubHeaderPredicate};
pub use model::{
    Metadata, Section, SectionKind, Style, StructuredDocument, TextElement, TextSize,
};
pub use render::{JsonFormat, RenderOptions};
pub use source::{JsonSource, LayoutParams, MemorySource, Source, TextContainer};
pub use title::{title_slug, TitleFinder};

use std::path::Path;

/// Infer the structure of a source with default options.
///
/// # Example
///
/// ```
/// use pdf_structure::{parse_source, MemorySource, TextContainer};
///
/// let source = MemorySource::new(vec![
///     TextContainer::single_line("Introduction", 16.0, "Arial-Bold", 0),
///     TextContainer::single_line("Some body text.", 10.0, "Arial", 0),
/// ]);
/// let doc = parse_source(&source).unwrap();
/// assert_eq!(doc.elements[0].heading_text(), "Introduction");
/// ```
pub fn parse_source(source: &dyn Source) -> Result<StructuredDocument> {
    HierarchyParser::new().parse(source)
}

/// Infer the structure of a source with custom options.
pub fn parse_source_with_options(
    source: &dyn Source,
    options: ParserOptions,
) -> Result<StructuredDocument> {
    HierarchyParser::new().with_options(options).parse(source)
}

/// Parse a JSON layout dump file.
///
/// # Example
///
/// ```no_run
/// use pdf_structure::parse_layout_file;
///
/// let doc = parse_layout_file("report.layout.json").unwrap();
/// println!("Depth: {}", doc.depth());
/// ```
pub fn parse_layout_file<P: AsRef<Path>>(path: P) -> Result<StructuredDocument> {
    let source = JsonSource::open(path)?;
    parse_source(&source)
}

/// Parse a JSON layout dump held in memory.
pub fn parse_layout_json(data: &str) -> Result<StructuredDocument> {
    let source = JsonSource::from_json(data)?;
    parse_source(&source)
}

/// Convert a layout dump file to indented text.
///
/// # Example
///
/// ```no_run
/// use pdf_structure::{to_text, RenderOptions};
///
/// let text = to_text("report.layout.json", &RenderOptions::default()).unwrap();
/// println!("{}", text);
/// ```
pub fn to_text<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = parse_layout_file(path)?;
    render::to_text(&doc, options)
}

/// Convert a layout dump file to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_layout_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for parsing and rendering documents.
///
/// # Example
///
/// ```no_run
/// use pdf_structure::{MapperKind, PdfStructure};
///
/// let text = PdfStructure::new()
///     .with_mapper(MapperKind::LogLegacy)
///     .with_max_depth(3)
///     .parse("report.layout.json")?
///     .to_text()?;
/// # Ok::<(), pdf_structure::Error>(())
/// ```
pub struct PdfStructure {
    parser_options: ParserOptions,
    render_options: RenderOptions,
    sub_header: SubHeaderPredicate,
}

impl PdfStructure {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parser_options: ParserOptions::default(),
            render_options: RenderOptions::default(),
            sub_header: SubHeaderPredicate::default(),
        }
    }

    /// Set the size mapping strategy.
    pub fn with_mapper(mut self, mapper: MapperKind) -> Self {
        self.parser_options = self.parser_options.with_mapper(mapper);
        self
    }

    /// Set the layout parameters of the analysis read.
    pub fn with_layout(mut self, layout: LayoutParams) -> Self {
        self.parser_options = self.parser_options.with_layout(layout);
        self
    }

    /// Keep the analysis layout for the second read.
    pub fn fixed_layout(mut self) -> Self {
        self.parser_options = self.parser_options.fixed_layout();
        self
    }

    /// Disable title detection.
    pub fn without_title(mut self) -> Self {
        self.parser_options = self.parser_options.with_title_detection(false);
        self.render_options = self.render_options.with_title(false);
        self
    }

    /// Limit the depth of rendered text.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.render_options = self.render_options.with_max_depth(depth);
        self
    }

    /// Replace the sub-header rules.
    pub fn with_sub_header_predicate(mut self, predicate: SubHeaderPredicate) -> Self {
        self.sub_header = predicate;
        self
    }

    fn parser(&self) -> HierarchyParser {
        HierarchyParser::new()
            .with_options(self.parser_options.clone())
            .with_sub_header_predicate(self.sub_header.clone())
    }

    /// Parse a layout dump file.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<StructureResult> {
        let source = JsonSource::open(path)?;
        self.parse_source(&source)
    }

    /// Parse any source.
    pub fn parse_source(self, source: &dyn Source) -> Result<StructureResult> {
        let document = self.parser().parse(source)?;
        Ok(StructureResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for PdfStructure {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a document.
pub struct StructureResult {
    /// The parsed document
    pub document: StructuredDocument,
    /// Render options to use
    render_options: RenderOptions,
}

impl StructureResult {
    /// Convert to indented text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Collect summary statistics.
    pub fn stats(&self) -> render::StructureStats {
        render::StructureStats::from_document(&self.document)
    }

    /// Get the document.
    pub fn document(&self) -> &StructuredDocument {
        &self.document
    }

    /// Take ownership of the document.
    pub fn into_document(self) -> StructuredDocument {
        self.document
    }
}
