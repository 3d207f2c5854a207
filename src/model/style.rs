//! Paragraph style annotations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal font size bucket relative to the document's body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    /// Well below body text (footnotes, captions)
    XSmall,
    /// Slightly below body text
    Small,
    /// Body text range
    Middle,
    /// Above body text
    Large,
    /// Far above body text (titles)
    XLarge,
}

impl TextSize {
    /// All buckets in ascending order.
    pub const ALL: [TextSize; 5] = [
        TextSize::XSmall,
        TextSize::Small,
        TextSize::Middle,
        TextSize::Large,
        TextSize::XLarge,
    ];

    /// 1-based position of the bucket (`XSmall` = 1, `XLarge` = 5).
    pub fn ordinal(self) -> u8 {
        self as u8 + 1
    }

    /// Bucket for a 1-based position, saturating at both ends.
    pub fn from_ordinal(ordinal: u8) -> Self {
        match ordinal {
            0 | 1 => TextSize::XSmall,
            2 => TextSize::Small,
            3 => TextSize::Middle,
            4 => TextSize::Large,
            _ => TextSize::XLarge,
        }
    }

    /// Lowercase name as used in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            TextSize::XSmall => "xsmall",
            TextSize::Small => "small",
            TextSize::Middle => "middle",
            TextSize::Large => "large",
            TextSize::XLarge => "xlarge",
        }
    }
}

impl fmt::Display for TextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Style information of one paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Font name suggests a bold face
    pub bold: bool,

    /// Font name suggests an italic face
    pub italic: bool,

    /// Most frequent font name in the paragraph
    pub font_name: String,

    /// Bucket of the largest character size
    pub mapped_font_size: TextSize,

    /// Mean character size, truncated to one decimal
    pub mean_size: f64,

    /// Largest character size
    pub max_size: f64,
}

impl Style {
    /// Derive bold/italic flags from a font name.
    pub fn from_font(
        font_name: impl Into<String>,
        mapped_font_size: TextSize,
        mean_size: f64,
        max_size: f64,
    ) -> Self {
        let font_name = font_name.into();
        let lower = font_name.to_lowercase();
        Self {
            bold: lower.contains("bold"),
            italic: lower.contains("italic"),
            font_name,
            mapped_font_size,
            mean_size,
            max_size,
        }
    }
}
