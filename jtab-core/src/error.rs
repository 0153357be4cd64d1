//! Error types for jtab

use thiserror::Error;

/// jtab error types
///
/// Every variant is recoverable by the user; no core entry point panics or
/// raises past its own boundary.
#[derive(Debug, Error)]
pub enum JtabError {
    /// A dotted path hit a null or absent value before its final segment.
    #[error("Path \"{0}\" not found in JSON data")]
    PathNotFound(String),
    /// The value at the resolved path is not an array.
    #[error("Data at the specified path is not an array")]
    NotAnArray,
    /// The resolved array has no elements. Informational rather than a
    /// pipeline failure: the shape is right, there is just nothing to show.
    #[error("Array is empty")]
    EmptyArray,
    /// Input text failed to parse as JSON. Carries the parser message
    /// verbatim for diagnosability.
    #[error("Invalid JSON format: {0}")]
    MalformedDocument(String),
    /// The remote fetch failed at the transport or HTTP-status level,
    /// distinguished from [`JtabError::MalformedDocument`] so the user
    /// knows whether the problem is the URL or the payload.
    #[error("Failed to fetch URL: {0}")]
    RemoteFetchFailed(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, JtabError>;
