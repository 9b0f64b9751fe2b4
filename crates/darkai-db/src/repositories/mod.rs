//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL queries and database access.
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod row_mappers;
mod sqlite_image_repository;
mod sqlite_otp_repository;
mod sqlite_session_repository;
mod sqlite_user_repository;

pub use sqlite_image_repository::SqliteImageRepository;
pub use sqlite_otp_repository::SqliteOtpRepository;
pub use sqlite_session_repository::SqliteSessionRepository;
pub use sqlite_user_repository::SqliteUserRepository;
