//! Session repository trait definition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::RepositoryError;
use crate::domain::Session;

/// Repository for issued bearer sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn insert(&self, session: &Session) -> Result<(), RepositoryError>;

    async fn get(&self, token: &str) -> Result<Option<Session>, RepositoryError>;

    /// Remove a session. Missing tokens are not an error.
    async fn delete(&self, token: &str) -> Result<(), RepositoryError>;

    /// Remove every session expired at `now`, returning how many were removed.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError>;
}
