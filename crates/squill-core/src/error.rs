//! Error types for statement rendering.

/// Errors raised when a statement cannot be rendered to valid SQL.
///
/// These are configuration errors in the builder itself: they surface
/// immediately to the caller and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// An index was rendered without any columns.
    #[error("index '{0}' has no columns")]
    IndexWithoutColumns(String),
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, BuildError>;
