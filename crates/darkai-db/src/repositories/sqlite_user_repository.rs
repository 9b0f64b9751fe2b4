//! `SQLite` implementation of the `UserRepository` trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use darkai_core::{NewUser, RepositoryError, User, UserRepository};

use super::row_mappers::{USER_SELECT_COLUMNS, format_timestamp, insert_err, row_to_user, storage_err};

/// `SQLite` implementation of the `UserRepository` trait.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new `SQLite` user repository.
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_by(&self, column: &str, value: &str) -> Result<Option<User>, RepositoryError> {
        let sql = format!("SELECT {USER_SELECT_COLUMNS} FROM users WHERE {column} = ?");
        sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?
            .map(|row| row_to_user(&row))
            .transpose()
    }

    fn expect_one(affected: u64, id: i64) -> Result<(), RepositoryError> {
        if affected == 0 {
            return Err(RepositoryError::NotFound(format!("user id={id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let sql = format!("SELECT {USER_SELECT_COLUMNS} FROM users WHERE id = ?");
        sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?
            .map(|row| row_to_user(&row))
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.find_by("email", email).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        self.find_by("username", username).await
    }

    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO users (username, email, password_hash, is_verified, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.password_hash.as_deref())
        .bind(user.is_verified)
        .bind(format_timestamp(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| insert_err(e, &format!("user {}", user.email)))?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("user id={id}")))
    }

    async fn update_credentials(
        &self,
        id: i64,
        username: &str,
        password_hash: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET username = ?, password_hash = ? WHERE id = ?")
            .bind(username)
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| insert_err(e, &format!("username {username}")))?;
        Self::expect_one(result.rows_affected(), id)
    }

    async fn mark_verified(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET is_verified = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        Self::expect_one(result.rows_affected(), id)
    }
}
