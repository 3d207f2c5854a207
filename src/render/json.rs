//! JSON encoding and decoding of structured documents.

use crate::error::{Error, Result};
use crate::model::StructuredDocument;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &StructuredDocument, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Decode a document from JSON.
///
/// Section kinds missing from the input are inferred: no heading means
/// dangling, children mean heading.
pub fn from_json(data: &str) -> Result<StructuredDocument> {
    let mut doc: StructuredDocument = serde_json::from_str(data)
        .map_err(|e| Error::InvalidDocument(e.to_string()))?;

    for section in &mut doc.elements {
        section.infer_kinds();
    }
    Ok(doc)
}
