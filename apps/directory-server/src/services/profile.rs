//! Per-user lookup and note submission.
//!
//! Every request that targets a single user goes through [`lookup_user`]
//! first. The notes service is only contacted once the lookup has produced
//! exactly one user.

use entities::{NoteSubmission, User, UserId};
use notes_client::NotesClient;
use user_store::UserStore;

use crate::error::{ServerError, ServerResult};

/// Parses the user id taken from the request path.
pub fn parse_user_id(raw: &str) -> ServerResult<UserId> {
    raw.trim()
        .parse()
        .map_err(|_| ServerError::InvalidRequest(format!("Invalid user id: {:?}", raw)))
}

/// Looks up a user by id.
///
/// Returns `Ok(None)` when no row matches and [`ServerError::StoreIntegrity`]
/// when more than one does.
pub async fn lookup_user(store: &dyn UserStore, id: UserId) -> ServerResult<Option<User>> {
    let mut rows = store.find_by_id(id).await?;
    if rows.len() > 1 {
        return Err(ServerError::StoreIntegrity(id));
    }
    Ok(rows.pop())
}

/// Validates and submits a note for user `id`.
///
/// The user must exist and `content` must be non-empty after trimming;
/// neither failure reaches the notes service.
pub async fn submit_note(
    store: &dyn UserStore,
    notes: &dyn NotesClient,
    id: UserId,
    content: &str,
) -> ServerResult<NoteSubmission> {
    if lookup_user(store, id).await?.is_none() {
        return Err(ServerError::NotFound);
    }

    let submission = NoteSubmission::new(id, content)?;
    notes.submit_note(&submission).await?;

    tracing::info!(user_id = id, "Note submitted");
    Ok(submission)
}
