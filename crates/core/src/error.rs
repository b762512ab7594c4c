//! Error types for deck assembly and serialization.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or writing a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read a content file or write the output file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The deck content file is not valid JSON for the content schema.
    #[error("Failed to parse deck content: {0}")]
    ContentParseError(String),

    /// The deck content parsed but cannot produce a well-formed deck.
    #[error("Invalid deck content: {0}")]
    InvalidContent(String),

    /// Failed to assemble the presentation package.
    #[error("Package error: {0}")]
    PackageError(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),

    /// A package read back from disk is missing parts or malformed.
    #[error("Invalid or corrupted file: {0}")]
    CorruptedFile(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ContentParseError(err.to_string())
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::XmlError(err.to_string())
    }
}
