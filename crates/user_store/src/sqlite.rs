//! SQLite-backed user store.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use entities::{NewUser, User, UserId, UserSummary};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};

use crate::{UserStore, UserStoreError, UserStoreResult};

/// Schema for the users table.
///
/// `id` is the primary key and `email` is unique, so a keyed lookup can only
/// return more than one row if the file was produced by something else.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    fname TEXT NOT NULL,
    lname TEXT NOT NULL
)
"#;

/// SQLite user store
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: Pool<Sqlite>,
}

impl SqliteUserStore {
    /// Opens (creating if missing) the database file at `db_path`
    pub async fn open(db_path: &Path) -> UserStoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                UserStoreError::Open(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init().await?;

        tracing::info!(path = %db_path.display(), "Opened user store");
        Ok(store)
    }

    /// Opens a private in-memory database
    pub async fn in_memory() -> UserStoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        // A single connection that never expires keeps the database alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init().await?;
        Ok(store)
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Creates the users table if it does not exist
    async fn init(&self) -> UserStoreResult<()> {
        sqlx::query(SCHEMA_SQL)
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::Open(format!("failed to create users table: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn find_by_id(&self, id: UserId) -> UserStoreResult<Vec<User>> {
        let rows: Vec<(i64, String, String, String)> =
            sqlx::query_as("SELECT id, email, fname, lname FROM users WHERE id = ?")
                .bind(id)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, email, first_name, last_name)| User {
                id,
                email,
                first_name,
                last_name,
            })
            .collect())
    }

    async fn list_users(&self) -> UserStoreResult<Vec<UserSummary>> {
        let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, email FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, email)| UserSummary { id, email })
            .collect())
    }

    async fn upsert_by_email(&self, user: &NewUser) -> UserStoreResult<UserId> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (email, fname, lname)
            VALUES (?, ?, ?)
            ON CONFLICT (email) DO UPDATE SET
                fname = excluded.fname,
                lname = excluded.lname
            RETURNING id
            "#,
        )
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}
