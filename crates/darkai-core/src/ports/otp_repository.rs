//! Pending OTP repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::OtpRecord;

/// Repository for pending verification codes, keyed by email.
///
/// At most one code exists per email.
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Store `record`, replacing any previous code for the same email.
    async fn upsert(&self, record: &OtpRecord) -> Result<(), RepositoryError>;

    async fn get(&self, email: &str) -> Result<Option<OtpRecord>, RepositoryError>;

    /// Increment the failed-attempt counter, returning the new count.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if no code is pending.
    async fn record_failed_attempt(&self, email: &str) -> Result<u32, RepositoryError>;

    /// Remove the code for `email`. Missing codes are not an error.
    async fn delete(&self, email: &str) -> Result<(), RepositoryError>;
}
