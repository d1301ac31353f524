//! Client for communication with the notes service

use std::time::Duration;

use async_trait::async_trait;
use entities::{Note, NoteSubmission, UserId};
use futures_util::stream::BoxStream;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::{decode_notes, ListError, SubmitError};

/// Lazy, forward-only sequence of notes for one user.
///
/// The sequence ends after the first error it yields; notes yielded before the
/// error are valid.
pub type NoteStream = BoxStream<'static, Result<Note, ListError>>;

/// Operations offered by the notes service
#[async_trait]
pub trait NotesClient: Send + Sync {
    /// Creates one note for the submission's user.
    async fn submit_note(&self, submission: &NoteSubmission) -> Result<(), SubmitError>;

    /// Opens the note history of `user_id`.
    ///
    /// Every call issues a fresh request.
    async fn list_notes(&self, user_id: UserId) -> Result<NoteStream, ListError>;
}

/// HTTP client for the notes service
#[derive(Clone)]
pub struct HttpNotesClient {
    /// Service base URL, without trailing slash
    base_url: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpNotesClient {
    /// Create a client whose requests time out after `timeout`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Returns the service base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl NotesClient for HttpNotesClient {
    async fn submit_note(&self, submission: &NoteSubmission) -> Result<(), SubmitError> {
        let user_id = submission.user_id().to_string();

        debug!(user_id = %user_id, "Submitting note");

        let response = self
            .http_client
            .post(format!("{}/new", self.base_url))
            .form(&[("userid", user_id.as_str()), ("content", submission.content())])
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }

        warn!(user_id = %user_id, status = %status, "Notes service rejected note");

        match response.text().await {
            Ok(body) => Err(SubmitError::Rejected {
                status: status.as_u16(),
                body,
            }),
            Err(e) => Err(SubmitError::UnreadableRejection {
                status: status.as_u16(),
                cause: e.to_string(),
            }),
        }
    }

    async fn list_notes(&self, user_id: UserId) -> Result<NoteStream, ListError> {
        debug!(user_id, "Listing notes");

        let response = self
            .http_client
            .get(format!("{}/notes", self.base_url))
            .query(&[("userid", user_id.to_string())])
            .send()
            .await
            .map_err(|e| ListError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(user_id, status = %status, "Notes service refused listing");
            return Err(match response.text().await {
                Ok(body) => ListError::Rejected {
                    status: status.as_u16(),
                    body,
                },
                Err(e) => {
                    warn!(user_id, error = %e, "Failed to read listing rejection body");
                    ListError::UnreadableRejection {
                        status: status.as_u16(),
                        cause: e.to_string(),
                    }
                }
            });
        }

        Ok(decode_notes(response.bytes_stream()))
    }
}
