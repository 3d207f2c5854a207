//! Rendering options and configuration.

/// Options for the pretty text renderer.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Indentation unit, repeated once per level
    pub indent: String,

    /// Print the document title as a `[[title]]` banner
    pub include_title: bool,

    /// Only render sections with `level < max_depth`
    pub max_depth: Option<usize>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation unit.
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Enable or disable the title banner.
    pub fn with_title(mut self, include: bool) -> Self {
        self.include_title = include;
        self
    }

    /// Limit the rendered depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Prefix for a section level.
    pub fn prefix(&self, level: usize) -> String {
        self.indent.repeat(level)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            include_title: true,
            max_depth: None,
        }
    }
}
