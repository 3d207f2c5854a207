//! Indented plain text rendering of the section tree.
//!
//! ```text
//! [[Document Title]]
//!
//! [Chapter]
//!
//! 	[Section]
//! 		paragraph text
//! ```

use crate::error::Result;
use crate::model::{Section, SectionKind, StructuredDocument};

use super::visitor::{DefaultVisitor, SectionVisitor, VisitorAction};
use super::RenderOptions;

/// Convert a document to indented text.
pub fn to_text(doc: &StructuredDocument, options: &RenderOptions) -> Result<String> {
    TextRenderer::new(options.clone()).render(doc)
}

/// Convert a document to indented text, letting `visitor` adjust sections.
pub fn to_text_with_visitor(
    doc: &StructuredDocument,
    options: &RenderOptions,
    visitor: &mut dyn SectionVisitor,
) -> Result<String> {
    TextRenderer::new(options.clone()).render_with_visitor(doc, visitor)
}

/// Pretty text renderer.
pub struct TextRenderer {
    options: RenderOptions,
}

impl TextRenderer {
    /// Create a new text renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document.
    pub fn render(&self, doc: &StructuredDocument) -> Result<String> {
        self.render_with_visitor(doc, &mut DefaultVisitor)
    }

    /// Render a document with a visitor.
    pub fn render_with_visitor(
        &self,
        doc: &StructuredDocument,
        visitor: &mut dyn SectionVisitor,
    ) -> Result<String> {
        let mut output = String::new();

        if self.options.include_title {
            if let Some(title) = doc.title() {
                output.push_str(&format!("[[{}]]\n\n", title));
            }
        }

        for section in &doc.elements {
            self.render_section(&mut output, section, visitor);
        }

        Ok(output)
    }

    fn render_section(&self, output: &mut String, section: &Section, visitor: &mut dyn SectionVisitor) {
        if self
            .options
            .max_depth
            .is_some_and(|max| section.level >= max)
        {
            return;
        }

        let action = match section.kind {
            SectionKind::Heading => visitor.visit_heading(section),
            SectionKind::Content => visitor.visit_content(section),
            SectionKind::Dangling => visitor.visit_dangling(section),
        };

        match action {
            VisitorAction::Skip => return,
            VisitorAction::Replace(custom) => {
                output.push_str(&custom);
                if !custom.is_empty() && !custom.ends_with('\n') {
                    output.push('\n');
                }
            }
            VisitorAction::Continue => self.render_own_line(output, section),
        }

        for child in &section.children {
            self.render_section(output, child, visitor);
        }
    }

    fn render_own_line(&self, output: &mut String, section: &Section) {
        let prefix = self.options.prefix(section.level);
        match section.kind {
            SectionKind::Heading => {
                if !output.is_empty() && !output.ends_with("\n\n") {
                    output.push('\n');
                }
                output.push_str(&format!("{}[{}]\n", prefix, section.heading_text()));
            }
            SectionKind::Content => {
                let continuation = format!("\n{}", prefix);
                let text = section.heading_text().replace('\n', &continuation);
                output.push_str(&format!("{}{}\n", prefix, text));
            }
            SectionKind::Dangling => {}
        }
    }
}
