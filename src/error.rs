//! Error handling types and utilities.

/// A specialized Result type for docgen-index plumbing (config, server startup).
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when a documentation source cannot be turned into a [`Doc`](crate::Doc).
///
/// This is the only hard failure in the crate: every lookup and search returns
/// `Option` instead. The type is `Clone` so that a single in-flight load can be
/// shared between concurrent callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The payload could not be retrieved (transport failure or non-success status).
    #[error("invalid source name or URL '{url}': {reason}")]
    Unreachable { url: String, reason: String },
    /// The payload was retrieved but does not have the expected shape.
    #[error("malformed documentation payload from '{url}': {reason}")]
    Malformed { url: String, reason: String },
    /// The origin URL does not follow the `<project>/<repo>/<ref>/<branch>.json` layout.
    #[error("unrecognized documentation origin '{url}': {reason}")]
    InvalidOrigin { url: String, reason: String },
}

impl SourceError {
    /// The origin URL the error refers to.
    pub fn url(&self) -> &str {
        match self {
            Self::Unreachable { url, .. }
            | Self::Malformed { url, .. }
            | Self::InvalidOrigin { url, .. } => url,
        }
    }
}
