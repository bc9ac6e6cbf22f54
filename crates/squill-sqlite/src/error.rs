//! Error types for the SQLite driver layer.

use squill_core::BuildError;

/// Errors that can occur while executing statements or reconciling schemas.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A builder was used without a required precondition. Surfaced
    /// immediately; never retried.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A statement could not be rendered.
    #[error("build error: {0}")]
    Build(#[from] BuildError),

    /// A failure reported by the database while executing rendered SQL.
    /// Propagated unchanged.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for driver operations.
pub type Result<T> = std::result::Result<T, DbError>;
