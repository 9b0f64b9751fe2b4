//! Row mapping helpers for `SQLite` queries.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings, so string
//! comparison in SQL matches chronological order.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use darkai_core::{GeneratedImage, OtpRecord, RepositoryError, Session, User};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

pub const IMAGE_SELECT_COLUMNS: &str = "id, prompt, file_name, created_at";
pub const USER_SELECT_COLUMNS: &str =
    "id, username, email, password_hash, is_verified, created_at";

pub fn storage_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}

/// Map insert failures, turning unique-constraint violations into `AlreadyExists`.
pub fn insert_err(e: sqlx::Error, what: &str) -> RepositoryError {
    let msg = e.to_string();
    if msg.contains("UNIQUE constraint failed") {
        return RepositoryError::AlreadyExists(what.to_string());
    }
    if msg.contains("FOREIGN KEY constraint failed") {
        return RepositoryError::Constraint(msg);
    }
    RepositoryError::Storage(msg)
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp, accepting `SQLite`'s `datetime('now')` layout too.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw.trim_end_matches(" UTC"), "%Y-%m-%d %H:%M:%S%.f")
                .map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc))
        })
        .map_err(|e| RepositoryError::Serialization(format!("bad timestamp '{raw}': {e}")))
}

fn get<'r, T>(row: &'r SqliteRow, column: &str) -> Result<T, RepositoryError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column).map_err(storage_err)
}

pub fn row_to_image(row: &SqliteRow) -> Result<GeneratedImage, RepositoryError> {
    Ok(GeneratedImage {
        id: get(row, "id")?,
        prompt: get(row, "prompt")?,
        file_name: get(row, "file_name")?,
        created_at: parse_timestamp(&get::<String>(row, "created_at")?)?,
    })
}

pub fn row_to_user(row: &SqliteRow) -> Result<User, RepositoryError> {
    Ok(User {
        id: get(row, "id")?,
        username: get(row, "username")?,
        email: get(row, "email")?,
        password_hash: get(row, "password_hash")?,
        is_verified: get(row, "is_verified")?,
        created_at: parse_timestamp(&get::<String>(row, "created_at")?)?,
    })
}

pub fn row_to_otp(row: &SqliteRow) -> Result<OtpRecord, RepositoryError> {
    let attempts: i64 = get(row, "attempts")?;
    Ok(OtpRecord {
        email: get(row, "email")?,
        code_hash: get(row, "code_hash")?,
        expires_at: parse_timestamp(&get::<String>(row, "expires_at")?)?,
        attempts: u32::try_from(attempts).unwrap_or(u32::MAX),
    })
}

pub fn row_to_session(row: &SqliteRow) -> Result<Session, RepositoryError> {
    Ok(Session {
        token: get(row, "token")?,
        user_id: get(row, "user_id")?,
        expires_at: parse_timestamp(&get::<String>(row, "expires_at")?)?,
    })
}
