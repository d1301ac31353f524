//! Application state.

use std::sync::Arc;

use notes_client::NotesClient;
use user_store::UserStore;

use crate::config::Config;

/// Shared application state.
///
/// Handlers reach the user store and the notes service only through this
/// state, so either can be replaced in tests.
pub struct AppState {
    /// Server configuration.
    pub config: Config,
    /// User store.
    pub store: Arc<dyn UserStore>,
    /// Notes service client.
    pub notes: Arc<dyn NotesClient>,
}

impl AppState {
    /// Creates new application state.
    pub fn new(config: Config, store: Arc<dyn UserStore>, notes: Arc<dyn NotesClient>) -> Self {
        Self {
            config,
            store,
            notes,
        }
    }
}

/// Type alias for shared state.
pub type SharedState = Arc<AppState>;

/// Creates shared state from config, store and notes client.
pub fn create_shared_state(
    config: Config,
    store: Arc<dyn UserStore>,
    notes: Arc<dyn NotesClient>,
) -> SharedState {
    Arc::new(AppState::new(config, store, notes))
}
