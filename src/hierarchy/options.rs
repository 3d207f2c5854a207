//! Hierarchy parser options and configuration.

use crate::analysis::MapperKind;
use crate::source::LayoutParams;

/// Default number of headings joined into a detected title.
pub const DEFAULT_TITLE_HEADINGS: usize = 4;

/// Options for [`HierarchyParser`](super::HierarchyParser).
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Size mapping strategy
    pub mapper: MapperKind,

    /// Layout parameters for the first (analysis) read
    pub layout: LayoutParams,

    /// Re-read the source with the line margin found during analysis
    pub retune_line_margin: bool,

    /// Detect a document title from the parsed headings
    pub detect_title: bool,

    /// Maximum number of headings joined into the title
    pub title_headings: usize,
}

impl ParserOptions {
    /// Create new parser options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size mapping strategy.
    pub fn with_mapper(mut self, mapper: MapperKind) -> Self {
        self.mapper = mapper;
        self
    }

    /// Set the layout parameters of the analysis read.
    pub fn with_layout(mut self, layout: LayoutParams) -> Self {
        self.layout = layout;
        self
    }

    /// Enable or disable the retuned second read.
    pub fn with_retune_line_margin(mut self, retune: bool) -> Self {
        self.retune_line_margin = retune;
        self
    }

    /// Keep the analysis layout for the second read.
    pub fn fixed_layout(mut self) -> Self {
        self.retune_line_margin = false;
        self
    }

    /// Enable or disable title detection.
    pub fn with_title_detection(mut self, detect: bool) -> Self {
        self.detect_title = detect;
        self
    }

    /// Set the maximum number of headings joined into the title.
    pub fn with_title_headings(mut self, count: usize) -> Self {
        self.title_headings = count;
        self
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            mapper: MapperKind::default(),
            layout: LayoutParams::default(),
            retune_line_margin: true,
            detect_title: true,
            title_headings: DEFAULT_TITLE_HEADINGS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ParserOptions::default();
        assert_eq!(options.mapper, MapperKind::Log);
        assert!(options.retune_line_margin);
        assert!(options.detect_title);
        assert_eq!(options.title_headings, DEFAULT_TITLE_HEADINGS);
    }

    #[test]
    fn test_builder_chain() {
        let options = ParserOptions::new()
            .with_mapper(MapperKind::PivotLinear)
            .with_layout(LayoutParams::new().with_detect_vertical(true))
            .fixed_layout()
            .with_title_detection(false)
            .with_title_headings(2);

        assert_eq!(options.mapper, MapperKind::PivotLinear);
        assert!(options.layout.detect_vertical);
        assert!(!options.retune_line_margin);
        assert!(!options.detect_title);
        assert_eq!(options.title_headings, 2);
    }
}
