//! User repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{NewUser, User};

/// Repository for registered accounts.
///
/// Emails are stored normalized; callers pass normalized addresses.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// Insert a new account.
    ///
    /// Returns `Err(RepositoryError::AlreadyExists)` when the email or
    /// username is taken.
    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError>;

    /// Replace the username and password hash of an unverified account.
    async fn update_credentials(
        &self,
        id: i64,
        username: &str,
        password_hash: Option<&str>,
    ) -> Result<(), RepositoryError>;

    async fn mark_verified(&self, id: i64) -> Result<(), RepositoryError>;
}
