//! User store trait and seed data

use async_trait::async_trait;
use entities::{NewUser, User, UserId, UserSummary};

use crate::UserStoreResult;

/// Trait for user storage operations
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Returns every row stored under `id`.
    ///
    /// A well-formed store returns zero or one row. Callers treat more than one
    /// row as an integrity violation rather than picking one.
    async fn find_by_id(&self, id: UserId) -> UserStoreResult<Vec<User>>;

    /// Lists all users ordered by id
    async fn list_users(&self) -> UserStoreResult<Vec<UserSummary>>;

    /// Inserts a user, or updates the names of the user with the same email.
    ///
    /// Returns the id of the inserted or updated user.
    async fn upsert_by_email(&self, user: &NewUser) -> UserStoreResult<UserId>;
}

/// Users created on every startup.
pub fn default_users() -> Vec<NewUser> {
    vec![
        NewUser::new("fake.email@somecompany.com", "John", "Smith"),
        NewUser::new("alice@othercompany.com", "Alice", "Rivest"),
        NewUser::new("bob@thirdcompany.com", "Bob", "Shamir"),
    ]
}

/// Upserts the default users into `store`.
pub async fn seed_default_users(store: &dyn UserStore) -> UserStoreResult<()> {
    for user in default_users() {
        let id = store.upsert_by_email(&user).await?;
        tracing::debug!(user_id = id, email = %user.email, "Seeded user");
    }
    Ok(())
}
