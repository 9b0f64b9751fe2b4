//! `SQLite` implementation of the `SessionRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use darkai_core::{RepositoryError, Session, SessionRepository};

use super::row_mappers::{format_timestamp, insert_err, row_to_session, storage_err};

/// `SQLite` implementation of the `SessionRepository` trait.
pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    /// Create a new `SQLite` session repository.
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn insert(&self, session: &Session) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES (?, ?, ?)")
            .bind(&session.token)
            .bind(session.user_id)
            .bind(format_timestamp(session.expires_at))
            .execute(&self.pool)
            .await
            .map_err(|e| insert_err(e, "session"))?;
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, RepositoryError> {
        sqlx::query("SELECT token, user_id, expires_at FROM sessions WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?
            .map(|row| row_to_session(&row))
            .transpose()
    }

    async fn delete(&self, token: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(format_timestamp(now))
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::SqliteUserRepository;
    use crate::setup::setup_test_database;
    use chrono::Duration;
    use darkai_core::{NewUser, UserRepository};

    async fn repo_with_user() -> (SqliteSessionRepository, i64) {
        let pool = setup_test_database().await.unwrap();
        let user = SqliteUserRepository::new(pool.clone())
            .insert(&NewUser {
                username: "neo".into(),
                email: "neo@dark.ai".into(),
                password_hash: None,
                is_verified: true,
            })
            .await
            .unwrap();
        (SqliteSessionRepository::new(pool), user.id)
    }

    #[tokio::test]
    async fn insert_get_delete() {
        let (repo, user_id) = repo_with_user().await;
        let session = Session::issue(user_id, Utc::now());

        repo.insert(&session).await.unwrap();
        let loaded = repo.get(&session.token).await.unwrap().unwrap();
        assert_eq!(loaded.user_id, user_id);
        assert_eq!(loaded.token, session.token);

        repo.delete(&session.token).await.unwrap();
        repo.delete(&session.token).await.unwrap();
        assert!(repo.get(&session.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn session_requires_existing_user() {
        let (repo, _) = repo_with_user().await;
        let orphan = Session::issue(404, Utc::now());
        assert!(matches!(
            repo.insert(&orphan).await,
            Err(RepositoryError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn expired_sessions_are_purged() {
        let (repo, user_id) = repo_with_user().await;
        let now = Utc::now();
        let live = Session::issue(user_id, now);
        let stale = Session {
            token: "stale".into(),
            user_id,
            expires_at: now - Duration::minutes(1),
        };
        repo.insert(&live).await.unwrap();
        repo.insert(&stale).await.unwrap();

        assert_eq!(repo.delete_expired(now).await.unwrap(), 1);
        assert!(repo.get("stale").await.unwrap().is_none());
        assert!(repo.get(&live.token).await.unwrap().is_some());
    }
}
