//! User Directory Server
//!
//! Lists users, shows a single user's profile, and lets callers attach notes
//! to a user. Notes live in a separate notes service; this server submits them
//! over HTTP and streams them back into the profile page.

pub mod api;
pub mod config;
pub mod error;
pub mod render;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::Router;
use notes_client::NotesClient;
use tower_http::trace::TraceLayer;
use user_store::UserStore;

use crate::config::Config;
use crate::state::{SharedState, create_shared_state};

/// Creates the application router with all routes configured.
pub fn create_app(state: SharedState) -> Router {
    api::create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state with the given configuration, store and notes client.
pub fn create_state<S, N>(config: Config, store: S, notes: N) -> SharedState
where
    S: UserStore + 'static,
    N: NotesClient + 'static,
{
    create_shared_state(config, Arc::new(store), Arc::new(notes))
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
