use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

use crate::errors::StorageError;

/// A locally registered user
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    /// Optional stored GitHub token used for reads on the user's behalf.
    /// Write credentials are never stored; they arrive with each form.
    pub github_token: Option<String>,
    pub created_at: String,
}

/// SQLite-backed credential store
pub struct UserStorage {
    conn: Connection,
}

impl UserStorage {
    /// Open (or create) the user database at the given path
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;
        Self::with_connection(conn)
    }

    /// In-memory store for tests
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                username TEXT PRIMARY KEY,
                password_hash TEXT NOT NULL,
                github_token TEXT,
                created_at TEXT NOT NULL
            )",
            params![],
        )?;

        Ok(UserStorage { conn })
    }

    /// Insert a new user. Fails with a constraint violation when the
    /// username is already taken.
    pub fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        github_token: Option<&str>,
    ) -> Result<(), StorageError> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO users (username, password_hash, github_token, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![username, password_hash, github_token, now],
        )?;
        Ok(())
    }

    /// Look up a user by username
    pub fn find_user(&self, username: &str) -> Result<Option<User>, StorageError> {
        let user = self
            .conn
            .query_row(
                "SELECT username, password_hash, github_token, created_at
                 FROM users
                 WHERE username = ?1",
                params![username],
                |row| {
                    Ok(User {
                        username: row.get(0)?,
                        password_hash: row.get(1)?,
                        github_token: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                },
            )
            .optional()?;

        Ok(user)
    }

    /// Replace the stored read token of a user
    pub fn set_github_token(
        &self,
        username: &str,
        github_token: Option<&str>,
    ) -> Result<(), StorageError> {
        self.conn.execute(
            "UPDATE users SET github_token = ?1 WHERE username = ?2",
            params![github_token, username],
        )?;
        Ok(())
    }
}
