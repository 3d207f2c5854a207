//! Positioned text fragments as delivered by a PDF layout extractor.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in PDF user space (y grows upwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f64,
    /// Bottom edge
    pub y0: f64,
    /// Right edge
    pub x1: f64,
    /// Top edge
    pub y1: f64,
}

impl BBox {
    /// Create a bounding box from its edges.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Check if both boxes share some horizontal extent.
    pub fn overlaps_horizontally(&self, other: &BBox) -> bool {
        self.x0 <= other.x1 && other.x0 <= self.x1
    }
}

/// A single character with its font information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Char {
    /// Decoded text (usually one character, ligatures may yield more)
    pub text: String,
    /// Font size in points
    pub size: f64,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Glyph bounding box
    pub bbox: BBox,
}

/// Borrowed view on one character, shared by all fragment kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph<'a> {
    /// Character text
    pub text: &'a str,
    /// Font size in points
    pub size: f64,
    /// Font name
    pub font_name: &'a str,
}

impl Glyph<'_> {
    /// Check if the glyph only carries whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A line of characters as found by the layout analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    /// Characters in reading order
    pub chars: Vec<Char>,
    /// Line bounding box
    pub bbox: BBox,
    /// Whether the line runs top to bottom
    #[serde(default)]
    pub vertical: bool,
}

impl Line {
    /// Create a line from characters, deriving its bounding box.
    pub fn new(chars: Vec<Char>) -> Self {
        let bbox = chars
            .iter()
            .map(|c| c.bbox)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();
        Self {
            chars,
            bbox,
            vertical: false,
        }
    }

    /// Lay out `text` horizontally with a single font, starting at the
    /// baseline origin `(x, y)`. Every character advances by half the size.
    pub fn from_text(text: &str, size: f64, font_name: &str, x: f64, y: f64) -> Self {
        let advance = size * 0.5;
        let chars = text
            .chars()
            .enumerate()
            .map(|(i, c)| {
                let x0 = x + advance * i as f64;
                Char {
                    text: c.to_string(),
                    size,
                    font_name: font_name.to_string(),
                    bbox: BBox::new(x0, y, x0 + advance, y + size),
                }
            })
            .collect();
        Self::new(chars)
    }
}

/// A line synthesised by the extractor without per-character geometry,
/// e.g. text recovered from a figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticLine {
    /// Text content
    pub text: String,
    /// Font size applied to every character
    pub size: f64,
    /// Font name applied to every character
    pub font_name: String,
    /// Bounding box of the whole run
    pub bbox: BBox,
}

/// One visual line inside a paragraph box.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextFragment {
    /// Line with per-character styling
    Line(Line),
    /// Synthesised single-style run
    Synthetic(SyntheticLine),
}

impl TextFragment {
    /// Characters of the fragment with size and font.
    pub fn glyphs(&self) -> Vec<Glyph<'_>> {
        match self {
            TextFragment::Line(line) => line
                .chars
                .iter()
                .map(|c| Glyph {
                    text: &c.text,
                    size: c.size,
                    font_name: &c.font_name,
                })
                .collect(),
            TextFragment::Synthetic(synthetic) => synthetic
                .text
                .char_indices()
                .map(|(i, c)| Glyph {
                    text: &synthetic.text[i..i + c.len_utf8()],
                    size: synthetic.size,
                    font_name: &synthetic.font_name,
                })
                .collect(),
        }
    }

    /// Bounding box of the fragment.
    pub fn bbox(&self) -> BBox {
        match self {
            TextFragment::Line(line) => line.bbox,
            TextFragment::Synthetic(synthetic) => synthetic.bbox,
        }
    }

    /// Height of the fragment's bounding box.
    pub fn height(&self) -> f64 {
        self.bbox().height()
    }

    /// Text content of the fragment.
    pub fn text(&self) -> String {
        match self {
            TextFragment::Line(line) => line.chars.iter().map(|c| c.text.as_str()).collect(),
            TextFragment::Synthetic(synthetic) => synthetic.text.clone(),
        }
    }

    /// Check if the fragment carries no visible character.
    pub fn is_empty(&self) -> bool {
        self.glyphs().iter().all(|g| g.is_whitespace())
    }

    /// Check if the fragment runs top to bottom.
    pub fn is_vertical(&self) -> bool {
        match self {
            TextFragment::Line(line) => line.vertical,
            TextFragment::Synthetic(_) => false,
        }
    }
}

impl From<Line> for TextFragment {
    fn from(line: Line) -> Self {
        TextFragment::Line(line)
    }
}

impl From<SyntheticLine> for TextFragment {
    fn from(line: SyntheticLine) -> Self {
        TextFragment::Synthetic(line)
    }
}

/// Writing direction of a paragraph box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Left to right lines (default)
    #[default]
    Horizontal,
    /// Top to bottom lines
    Vertical,
}

/// A paragraph box: consecutive lines grouped by the layout analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContainer {
    /// Lines of the box in reading order
    pub fragments: Vec<TextFragment>,
    /// Page index (0-based)
    pub page: usize,
    /// Writing direction
    #[serde(default)]
    pub orientation: Orientation,
}

impl TextContainer {
    /// Create a horizontal container.
    pub fn new(fragments: Vec<TextFragment>, page: usize) -> Self {
        Self {
            fragments,
            page,
            orientation: Orientation::Horizontal,
        }
    }

    /// Create a container holding a single line of uniformly styled text.
    pub fn single_line(text: &str, size: f64, font_name: &str, page: usize) -> Self {
        Self::new(
            vec![Line::from_text(text, size, font_name, 0.0, 0.0).into()],
            page,
        )
    }

    /// Set the orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Text of all lines joined by newlines.
    pub fn text(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// All characters of the container in reading order.
    pub fn glyphs(&self) -> impl Iterator<Item = Glyph<'_>> + '_ {
        self.fragments.iter().flat_map(|f| f.glyphs())
    }

    /// Bounding box of all lines.
    pub fn bbox(&self) -> BBox {
        self.fragments
            .iter()
            .map(|f| f.bbox())
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default()
    }

    /// Check if this is a vertical text box.
    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }
}
