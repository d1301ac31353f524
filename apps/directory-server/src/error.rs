//! Server error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use entities::{EmptyNoteError, UserId};
use notes_client::{ListError, SubmitError};
use user_store::UserStoreError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid request parameters.
    #[error("{0}")]
    InvalidRequest(String),

    /// The requested user does not exist.
    #[error("No such user.")]
    NotFound,

    /// A keyed lookup returned more than one user.
    #[error("Query returned more than one user for id {0}.")]
    StoreIntegrity(UserId),

    /// User store error.
    #[error("Failed to query db: {0}")]
    Database(#[from] UserStoreError),

    /// Note submission failed.
    #[error("Failed to submit note: {0}")]
    Submit(#[from] SubmitError),

    /// Note listing failed before anything was rendered.
    #[error("Failed to query notes for user {user_id}: {source}")]
    List {
        user_id: UserId,
        #[source]
        source: ListError,
    },
}

impl From<EmptyNoteError> for ServerError {
    fn from(e: EmptyNoteError) -> Self {
        ServerError::InvalidRequest(e.to_string())
    }
}

impl ServerError {
    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) | ServerError::NotFound => StatusCode::BAD_REQUEST,
            ServerError::StoreIntegrity(_)
            | ServerError::Database(_)
            | ServerError::Submit(_)
            | ServerError::List { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ServerError::StoreIntegrity(id) => {
                tracing::error!(user_id = id, "User store returned duplicate rows");
            }
            ServerError::Database(e) => tracing::error!(error = %e, "User store query failed"),
            ServerError::Submit(_) | ServerError::List { .. } => {
                tracing::warn!(error = %self, "Notes service call failed");
            }
            ServerError::InvalidRequest(_) | ServerError::NotFound => {}
        }

        (status, self.to_string()).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
