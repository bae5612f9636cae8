//! Crate-wide error type.

/// Errors produced while searching the arXiv or persisting results
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success response from the arXiv API
    #[error("API error: {0}")]
    Api(String),

    /// Parsing error (Atom XML or JSON)
    #[error("Parse error: {0}")]
    Parse(String),

    /// IO error (file system)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid search configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(format!("JSON: {}", err))
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::Parse(format!("XML: {}", err))
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
