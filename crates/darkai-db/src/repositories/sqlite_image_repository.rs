//! `SQLite` implementation of the `ImageRepository` trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use darkai_core::{GeneratedImage, ImageRepository, NewGeneratedImage, RepositoryError};

use super::row_mappers::{IMAGE_SELECT_COLUMNS, format_timestamp, insert_err, row_to_image, storage_err};

/// `SQLite` implementation of the `ImageRepository` trait.
pub struct SqliteImageRepository {
    pool: SqlitePool,
}

impl SqliteImageRepository {
    /// Create a new `SQLite` image repository.
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageRepository for SqliteImageRepository {
    async fn insert(&self, image: &NewGeneratedImage) -> Result<GeneratedImage, RepositoryError> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO generated_images (prompt, file_name, created_at) VALUES (?, ?, ?)",
        )
        .bind(&image.prompt)
        .bind(&image.file_name)
        .bind(format_timestamp(created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| insert_err(e, "generated image"))?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    async fn get_by_id(&self, id: i64) -> Result<GeneratedImage, RepositoryError> {
        let sql = format!("SELECT {IMAGE_SELECT_COLUMNS} FROM generated_images WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?
            .ok_or_else(|| RepositoryError::NotFound(format!("image id={id}")))?;
        row_to_image(&row)
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<GeneratedImage>, RepositoryError> {
        let sql = format!(
            "SELECT {IMAGE_SELECT_COLUMNS} FROM generated_images ORDER BY created_at DESC, id DESC LIMIT ?"
        );
        let rows = sqlx::query(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err)?;
        rows.iter().map(row_to_image).collect()
    }
}
