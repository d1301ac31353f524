//! In-memory user store implementation for testing.

use std::sync::Arc;

use async_trait::async_trait;
use entities::{NewUser, User, UserId, UserSummary};
use tokio::sync::RwLock;

use crate::{UserStore, UserStoreResult};

/// In-memory user store for testing purposes.
///
/// Rows are kept in insertion order. Unlike the SQLite store nothing enforces
/// id uniqueness, so [`MemoryUserStore::with_rows`] can reproduce a store whose
/// keyed lookup returns more than one row.
#[derive(Debug, Default, Clone)]
pub struct MemoryUserStore {
    rows: Arc<RwLock<Vec<User>>>,
}

impl MemoryUserStore {
    /// Creates an empty in-memory user store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding exactly `rows`, duplicates included.
    pub fn with_rows(rows: Vec<User>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: UserId) -> UserStoreResult<Vec<User>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|u| u.id == id).cloned().collect())
    }

    async fn list_users(&self) -> UserStoreResult<Vec<UserSummary>> {
        let rows = self.rows.read().await;
        let mut users: Vec<_> = rows.iter().map(UserSummary::from).collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn upsert_by_email(&self, user: &NewUser) -> UserStoreResult<UserId> {
        let mut rows = self.rows.write().await;
        if let Some(existing) = rows.iter_mut().find(|u| u.email == user.email) {
            existing.first_name = user.first_name.clone();
            existing.last_name = user.last_name.clone();
            return Ok(existing.id);
        }

        let id = rows.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        rows.push(user.clone().with_id(id));
        Ok(id)
    }
}
