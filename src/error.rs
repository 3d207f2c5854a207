//! Error types for pdf-structure.

use std::io;
use thiserror::Error;

/// Result type alias for pdf-structure operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while inferring document structure.
///
/// Degenerate font size distributions and stack entries without a usable
/// heading are recovered where they occur and only show up in the log.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No line of the document qualified for style analysis.
    #[error("document contains no text")]
    EmptyDocument,

    /// The hierarchy builder received no paragraphs.
    #[error("no paragraphs to build a hierarchy from")]
    EmptyInput,

    /// A serialized layout could not be decoded.
    #[error("Invalid layout data: {0}")]
    InvalidLayout(String),

    /// A serialized structured document could not be decoded.
    #[error("Invalid document data: {0}")]
    InvalidDocument(String),

    /// Error while rendering a structured document.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
