//! Input side of the pipeline: text fragments and the sources that yield them.
//!
//! The actual PDF content-stream parsing lives outside this crate. A
//! [`Source`] hands out paragraph boxes ([`TextContainer`]) in reading order
//! and may be read several times with different [`LayoutParams`]; the
//! hierarchy parser reads once to analyse font sizes and a second time with a
//! line margin tuned to the document.

mod fragment;
mod layout;

pub use fragment::{
    BBox, Char, Glyph, Line, Orientation, SyntheticLine, TextContainer, TextFragment,
};
pub use layout::{group_lines, LayoutParams, PageLines, DEFAULT_LINE_MARGIN};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Single-use stream of paragraph boxes.
pub type ContainerStream<'a> = Box<dyn Iterator<Item = TextContainer> + 'a>;

/// Something that can be read as a stream of paragraph boxes.
pub trait Source {
    /// Read all paragraph boxes in reading order using the given layout
    /// parameters.
    fn read(&self, layout: &LayoutParams) -> Result<ContainerStream<'_>>;

    /// Location the content was loaded from, if any.
    fn uri(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone)]
enum MemoryContent {
    Containers(Vec<TextContainer>),
    Pages(Vec<PageLines>),
}

/// In-memory source.
///
/// Built from ready-made boxes (layout parameters are ignored) or from
/// page lines, which are regrouped on every read.
#[derive(Debug, Clone)]
pub struct MemorySource {
    content: MemoryContent,
    uri: Option<String>,
}

impl MemorySource {
    /// Create a source from finished paragraph boxes.
    pub fn new(containers: Vec<TextContainer>) -> Self {
        Self {
            content: MemoryContent::Containers(containers),
            uri: None,
        }
    }

    /// Create a source from page lines.
    pub fn from_pages(pages: Vec<PageLines>) -> Self {
        Self {
            content: MemoryContent::Pages(pages),
            uri: None,
        }
    }

    /// Attach a URI (used for the document's filename metadata).
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }
}

impl Source for MemorySource {
    fn read(&self, layout: &LayoutParams) -> Result<ContainerStream<'_>> {
        match &self.content {
            MemoryContent::Containers(containers) => Ok(Box::new(containers.iter().cloned())),
            MemoryContent::Pages(pages) => Ok(Box::new(group_lines(pages, layout).into_iter())),
        }
    }

    fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }
}

/// Serialized page lines, as written by an external extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutDump {
    /// Original document location
    #[serde(default)]
    pub uri: Option<String>,
    /// Pages with their lines
    pub pages: Vec<PageLines>,
}

/// Source backed by a JSON layout dump.
#[derive(Debug, Clone)]
pub struct JsonSource {
    inner: MemorySource,
}

impl JsonSource {
    /// Load a layout dump from a file.
    ///
    /// The dump's own `uri` wins over the file path for metadata.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let mut source = Self::from_json(&data)?;
        if source.inner.uri.is_none() {
            source.inner.uri = Some(path.display().to_string());
        }
        Ok(source)
    }

    /// Decode a layout dump from a JSON string.
    pub fn from_json(data: &str) -> Result<Self> {
        let dump: LayoutDump =
            serde_json::from_str(data).map_err(|e| Error::InvalidLayout(e.to_string()))?;
        log::debug!("Loaded layout dump with {} pages", dump.pages.len());

        let mut inner = MemorySource::from_pages(dump.pages);
        inner.uri = dump.uri;
        Ok(Self { inner })
    }
}

impl Source for JsonSource {
    fn read(&self, layout: &LayoutParams) -> Result<ContainerStream<'_>> {
        self.inner.read(layout)
    }

    fn uri(&self) -> Option<&str> {
        self.inner.uri()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_dump() -> LayoutDump {
        LayoutDump {
            uri: None,
            pages: vec![PageLines::new(
                0,
                vec![
                    Line::from_text("Heading", 14.0, "Arial-Bold", 0.0, 700.0).into(),
                    Line::from_text("body text", 10.0, "Arial", 0.0, 680.0).into(),
                ],
            )],
        }
    }

    #[test]
    fn test_memory_source_containers_ignore_layout() {
        let source = MemorySource::new(vec![
            TextContainer::single_line("a", 10.0, "Times", 0),
            TextContainer::single_line("b", 10.0, "Times", 0),
        ]);

        let tight = LayoutParams::default().with_line_margin(0.0);
        assert_eq!(source.read(&tight).unwrap().count(), 2);
        assert!(source.uri().is_none());
    }

    #[test]
    fn test_memory_source_pages_regroup() {
        let source = MemorySource::from_pages(sample_dump().pages).with_uri("/tmp/doc.pdf");

        // 680..690 below 700..714: a 10pt gap
        let boxes: Vec<_> = source.read(&LayoutParams::default()).unwrap().collect();
        assert_eq!(boxes.len(), 2);

        let wide = LayoutParams::default().with_line_margin(2.0);
        assert_eq!(source.read(&wide).unwrap().count(), 1);
        assert_eq!(source.uri(), Some("/tmp/doc.pdf"));
    }

    #[test]
    fn test_json_source_open() {
        let json = serde_json::to_string(&sample_dump()).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let source = JsonSource::open(file.path()).unwrap();
        assert_eq!(source.uri(), Some(file.path().display().to_string().as_str()));

        let boxes: Vec<_> = source.read(&LayoutParams::default()).unwrap().collect();
        assert_eq!(boxes[0].text(), "Heading");
    }

    #[test]
    fn test_json_source_invalid() {
        let result = JsonSource::from_json("{\"pages\": 3}");
        assert!(matches!(result, Err(Error::InvalidLayout(_))));
    }
}
