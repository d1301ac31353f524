//! Per-user profile and note submission endpoints.

use axum::{
    Form,
    body::Body,
    extract::{Path, State, rejection::FormRejection},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::error::{ServerError, ServerResult};
use crate::render;
use crate::services::profile;
use crate::state::SharedState;

/// Form posted by the profile page.
#[derive(Debug, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub note: String,
}

/// Shows a user's profile followed by their notes.
pub async fn show_user(
    State(state): State<SharedState>,
    Path(raw_id): Path<String>,
) -> ServerResult<Response> {
    let user_id = profile::parse_user_id(&raw_id)?;

    let Some(user) = profile::lookup_user(state.store.as_ref(), user_id).await? else {
        return Ok(Html(render::no_such_user_page()).into_response());
    };

    let notes = state
        .notes
        .list_notes(user_id)
        .await
        .map_err(|source| ServerError::List { user_id, source })?;

    let body = Body::from_stream(render::profile_page(user, notes));
    Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], body).into_response())
}

/// Submits a note for a user, then redirects to the user's profile.
pub async fn submit_note(
    State(state): State<SharedState>,
    Path(raw_id): Path<String>,
    form: Result<Form<NoteForm>, FormRejection>,
) -> ServerResult<Redirect> {
    let user_id = profile::parse_user_id(&raw_id)?;

    // A missing or unparsable form counts as an empty note.
    let note = match form {
        Ok(Form(form)) => form.note,
        Err(rejection) => {
            tracing::debug!(user_id, %rejection, "No note form in request");
            String::new()
        }
    };

    profile::submit_note(state.store.as_ref(), state.notes.as_ref(), user_id, &note).await?;

    Ok(Redirect::to(&format!("/user/{}", user_id)))
}
