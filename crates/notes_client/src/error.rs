//! Notes client error types.

use thiserror::Error;

/// Errors from submitting a note.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The request could not be sent or timed out.
    #[error("{0}")]
    Transport(String),

    /// The notes service answered with a status other than 200.
    ///
    /// `body` is the full response body, surfaced to the end user verbatim.
    #[error("{body}")]
    Rejected { status: u16, body: String },

    /// The notes service rejected the note and its response body was unreadable.
    #[error("Failed to read error response from note submission (status {status}): {cause}")]
    UnreadableRejection { status: u16, cause: String },
}

/// Errors from listing notes.
#[derive(Debug, Error)]
pub enum ListError {
    /// The request failed, timed out, or the body stopped mid-read.
    #[error("{0}")]
    Transport(String),

    /// The notes service answered with a non-success status.
    #[error("notes service returned status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The notes service refused the listing and its response body was unreadable.
    #[error("notes service returned status {status} with an unreadable body: {cause}")]
    UnreadableRejection { status: u16, cause: String },

    /// A record in the body could not be decoded.
    #[error("{0}")]
    Decode(String),
}
