//! Error types for document parsing

use thiserror::Error;

/// Errors produced while parsing a wire document
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document could not be deserialized into the expected shape
    #[error("XML deserialization failed: {0}")]
    XmlDeserializationFailed(String),
}

/// Result type alias for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
