//! Folding of a flat paragraph stream into nested sections.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::Utc;

use super::compare::SubHeaderPredicate;
use super::detect::is_heading;
use super::options::ParserOptions;
use crate::analysis::{StyleAnnotator, StyleDistribution};
use crate::error::{Error, Result};
use crate::model::{Metadata, Section, StructuredDocument, TextElement, TextSize};
use crate::source::Source;
use crate::title::TitleFinder;

/// Infers the section hierarchy of a document.
///
/// ```text
/// 1.  Chapter
///     content
///     1.1  Section
///          content
///     1.2  Section
///          1.2.1  Subsection
/// 2.  Chapter
/// ```
///
/// Headings are kept on a stack. A heading in a smaller bucket than the top
/// nests under it; otherwise the stack is unwound to the first bigger
/// heading, except when the [`SubHeaderPredicate`] says the candidate nests
/// under an equally sized heading. Body paragraphs attach to the current top.
#[derive(Debug, Clone, Default)]
pub struct HierarchyParser {
    options: ParserOptions,
    sub_header: SubHeaderPredicate,
}

impl HierarchyParser {
    /// Create a parser with default options and sub-header rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parser options.
    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the sub-header rules.
    pub fn with_sub_header_predicate(mut self, predicate: SubHeaderPredicate) -> Self {
        self.sub_header = predicate;
        self
    }

    /// Current options.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Run the full pipeline on a source.
    ///
    /// The source is read twice: once to analyse font sizes, once more
    /// (with the line margin found in the first pass) to build the tree.
    pub fn parse(&self, source: &dyn Source) -> Result<StructuredDocument> {
        let distribution = StyleDistribution::analyze(source.read(&self.options.layout)?)?;
        let mapper = self.options.mapper.build(&distribution);
        log::debug!("Mapping sizes with {} mapper", self.options.mapper);

        let layout = if self.options.retune_line_margin {
            self.options
                .layout
                .with_line_margin(distribution.line_margin())
        } else {
            self.options.layout
        };

        let annotator = StyleAnnotator::new(mapper.as_ref());
        let mut pages = BTreeSet::new();
        let elements = annotator.annotate(source.read(&layout)?).inspect(|element| {
            if let Some(page) = element.page {
                pages.insert(page);
            }
        });
        let sections = self.create_hierarchy(elements, &distribution)?;

        let metadata = Metadata {
            filename: source.uri().and_then(file_name),
            title: None,
            style_distribution: Some(distribution),
            page_count: pages.len(),
            parsed_at: Some(Utc::now()),
        };
        let mut document = StructuredDocument::new(sections).with_metadata(metadata);

        if self.options.detect_title {
            document.metadata.title = TitleFinder::new()
                .with_max_headings(self.options.title_headings)
                .find(&document);
        }

        log::debug!(
            "Parsed {} root sections, depth {}",
            document.elements.len(),
            document.depth()
        );

        Ok(document)
    }

    /// Build the section tree from annotated paragraphs in reading order.
    ///
    /// Returns [`Error::EmptyInput`] when the stream yields nothing.
    pub fn create_hierarchy<I>(
        &self,
        elements: I,
        distribution: &StyleDistribution,
    ) -> Result<Vec<Section>>
    where
        I: IntoIterator<Item = TextElement>,
    {
        let mut builder = TreeBuilder::new(&self.sub_header);
        for element in elements {
            if is_heading(&element, distribution) {
                builder.push_heading(element);
            } else {
                builder.push_content(element);
            }
        }

        if builder.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(builder.finish())
    }
}

fn file_name(uri: &str) -> Option<String> {
    Path::new(uri)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

struct Node {
    section: Section,
    children: Vec<usize>,
}

/// Arena of sections plus the stack of open headings (arena indices).
struct TreeBuilder<'p> {
    nodes: Vec<Node>,
    roots: Vec<usize>,
    stack: Vec<usize>,
    sub_header: &'p SubHeaderPredicate,
}

impl<'p> TreeBuilder<'p> {
    fn new(sub_header: &'p SubHeaderPredicate) -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            stack: Vec::new(),
            sub_header,
        }
    }

    fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bucket of a stack entry, `None` if it has no usable heading.
    fn heading_size(&self, index: usize) -> Option<TextSize> {
        self.nodes[index]
            .section
            .heading
            .as_ref()
            .filter(|h| !h.text().is_empty())
            .map(|h| h.style.mapped_font_size)
    }

    fn push_heading(&mut self, element: TextElement) {
        let size = element.style.mapped_font_size;

        if let Some(&top) = self.stack.last() {
            let nests = self.heading_size(top).is_some_and(|top_size| top_size > size);
            if !nests {
                self.unwind(&element);
            }
        }

        log::trace!(
            "Heading at level {}: {:?} ({})",
            self.stack.len(),
            element.text(),
            size
        );

        let index = self.insert(Section::heading(element, self.stack.len()));
        self.stack.push(index);
    }

    /// Pop headings until the top is bigger than `candidate` or the
    /// candidate turns out to be a sub-heading of a popped heading.
    fn unwind(&mut self, candidate: &TextElement) {
        let size = candidate.style.mapped_font_size;

        while let Some(&top) = self.stack.last() {
            let top_size = match self.heading_size(top) {
                Some(top_size) if top_size > size => break,
                Some(top_size) => top_size,
                None => {
                    log::warn!("Dropping stack entry without heading");
                    self.stack.pop();
                    continue;
                }
            };

            self.stack.pop();

            if top_size == size {
                let popped = self.nodes[top].section.heading.as_ref();
                let rule = popped.and_then(|h1| self.sub_header.matching_rule(h1, candidate));
                if let Some(rule) = rule {
                    log::trace!("{:?} nests under same-size heading ({})", candidate.text(), rule);
                    self.stack.push(top);
                    return;
                }
            }
        }
    }

    fn push_content(&mut self, element: TextElement) {
        if !self.stack.is_empty() {
            self.insert(Section::content(element, self.stack.len()));
            return;
        }

        let trailing_dangling = self
            .roots
            .last()
            .copied()
            .filter(|&root| self.nodes[root].section.is_dangling());

        let parent = match trailing_dangling {
            Some(root) => root,
            None => {
                let index = self.alloc(Section::dangling(0));
                self.roots.push(index);
                index
            }
        };

        let index = self.alloc(Section::content(element, 1));
        self.nodes[parent].children.push(index);
    }

    /// Attach a section under the stack top, or as a new root.
    fn insert(&mut self, section: Section) -> usize {
        let index = self.alloc(section);
        match self.stack.last() {
            Some(&top) => self.nodes[top].children.push(index),
            None => self.roots.push(index),
        }
        index
    }

    fn alloc(&mut self, section: Section) -> usize {
        self.nodes.push(Node {
            section,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    /// Fold the arena into owned sections.
    ///
    /// Children are always allocated after their parent, so building from
    /// the back sees every child before its parent.
    fn finish(self) -> Vec<Section> {
        let mut built: Vec<Option<Section>> = Vec::with_capacity(self.nodes.len());
        built.resize_with(self.nodes.len(), || None);

        for (index, node) in self.nodes.into_iter().enumerate().rev() {
            let mut section = node.section;
            section.children = node
                .children
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            built[index] = Some(section);
        }

        self.roots
            .iter()
            .filter_map(|&root| built[root].take())
            .collect()
    }
}
