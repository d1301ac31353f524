//! User store error types.

use thiserror::Error;

/// Errors that can occur during user store operations.
#[derive(Debug, Error)]
pub enum UserStoreError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store could not be opened or prepared.
    #[error("Failed to open user store: {0}")]
    Open(String),
}

/// Result type for user store operations.
pub type UserStoreResult<T> = Result<T, UserStoreError>;
