//! User directory endpoint.

use axum::{extract::State, response::Html};

use crate::error::ServerResult;
use crate::render;
use crate::state::SharedState;

/// Lists every user with a link to their profile.
pub async fn list_users(State(state): State<SharedState>) -> ServerResult<Html<String>> {
    let users = state.store.list_users().await?;

    tracing::debug!(count = users.len(), "Listed users");

    Ok(Html(render::directory_page(&users)))
}
