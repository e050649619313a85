/// Error types for OOXML chart and sheet-metadata operations.
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML operations.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// XML tokenizer error or truncated document
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error from the output sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Chart-type element that maps to no known chart kind
    #[error("Unknown chart type: {0}")]
    UnknownChartType(String),

    /// Invalid format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}
