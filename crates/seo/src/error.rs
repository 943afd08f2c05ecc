//! SEO document error types.

use thiserror::Error;

/// Errors that can occur while rendering documents.
#[derive(Debug, Error)]
pub enum SeoError {
    /// Writing XML failed.
    #[error("XML write error: {0}")]
    Xml(#[from] std::io::Error),

    /// The rendered document was not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Result type for SEO operations.
pub type Result<T> = std::result::Result<T, SeoError>;
