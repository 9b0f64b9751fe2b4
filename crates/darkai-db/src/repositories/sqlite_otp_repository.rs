//! `SQLite` implementation of the `OtpRepository` trait.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use darkai_core::{OtpRecord, OtpRepository, RepositoryError};

use super::row_mappers::{format_timestamp, row_to_otp, storage_err};

/// `SQLite` implementation of the `OtpRepository` trait.
pub struct SqliteOtpRepository {
    pool: SqlitePool,
}

impl SqliteOtpRepository {
    /// Create a new `SQLite` OTP repository.
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OtpRepository for SqliteOtpRepository {
    async fn upsert(&self, record: &OtpRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO otp_codes (email, code_hash, expires_at, attempts)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(email) DO UPDATE SET
                code_hash = excluded.code_hash,
                expires_at = excluded.expires_at,
                attempts = excluded.attempts
            "#,
        )
        .bind(&record.email)
        .bind(&record.code_hash)
        .bind(format_timestamp(record.expires_at))
        .bind(i64::from(record.attempts))
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<OtpRecord>, RepositoryError> {
        sqlx::query("SELECT email, code_hash, expires_at, attempts FROM otp_codes WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?
            .map(|row| row_to_otp(&row))
            .transpose()
    }

    async fn record_failed_attempt(&self, email: &str) -> Result<u32, RepositoryError> {
        let row = sqlx::query(
            "UPDATE otp_codes SET attempts = attempts + 1 WHERE email = ? RETURNING attempts",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?
        .ok_or_else(|| RepositoryError::NotFound(format!("otp for {email}")))?;

        let attempts: i64 = row.try_get("attempts").map_err(storage_err)?;
        Ok(u32::try_from(attempts).unwrap_or(u32::MAX))
    }

    async fn delete(&self, email: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM otp_codes WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        Ok(())
    }
}
