//! Error types for SDF editing and obstacle bookkeeping

use thiserror::Error;

/// SDF document errors
#[derive(Debug, Error)]
pub enum SdfError {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("Malformed SDF document: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Non UTF-8 document: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for SDF operations
pub type SdfResult<T> = Result<T, SdfError>;

/// Obstacle registry errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObstacleError {
    #[error("Obstacle '{0}' not found")]
    NotFound(String),
}

/// Result type for obstacle registry operations
pub type ObstacleResult<T> = Result<T, ObstacleError>;
