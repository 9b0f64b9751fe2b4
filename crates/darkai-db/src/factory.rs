//! Composition utilities for building `AppCore` with `SQLite` backends.
//!
//! Construction only; no domain logic lives here.

use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;

use darkai_core::services::AppCore;
use darkai_core::{Gateways, Repos};

use crate::repositories::{
    SqliteImageRepository, SqliteOtpRepository, SqliteSessionRepository, SqliteUserRepository,
};

/// Factory for creating repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Build all `SQLite` repositories from a pool.
    ///
    /// This is the recommended way for adapters to obtain repositories.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqliteImageRepository::new(pool.clone())),
            Arc::new(SqliteUserRepository::new(pool.clone())),
            Arc::new(SqliteOtpRepository::new(pool.clone())),
            Arc::new(SqliteSessionRepository::new(pool)),
        )
    }

    /// Build a complete `AppCore` from a pool, vendor gateways and the media root.
    ///
    /// ```ignore
    /// let pool = setup_database(&db_path).await?;
    /// let core = CoreFactory::build_app_core(pool, gateways, media_root);
    /// ```
    pub fn build_app_core(pool: SqlitePool, gateways: Gateways, media_root: PathBuf) -> AppCore {
        AppCore::new(Self::build_repos(pool), gateways, media_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;
    use darkai_core::testing::Fakes;

    #[tokio::test]
    async fn app_core_runs_signup_flow_against_sqlite() {
        let pool = setup_test_database().await.unwrap();
        let fakes = Fakes::default();
        let dir = tempfile::tempdir().unwrap();
        let core = CoreFactory::build_app_core(pool, fakes.gateways(), dir.path().to_path_buf());

        core.auth()
            .signup("neo", "neo@dark.ai", "matrix1")
            .await
            .unwrap();
        let code = fakes.mailer.last_code_for("neo@dark.ai").unwrap();
        let outcome = core.auth().verify("neo@dark.ai", &code).await.unwrap();

        let user = core
            .auth()
            .authenticate(&outcome.token.unwrap())
            .await
            .unwrap();
        assert_eq!(user.username, "neo");
        assert!(user.is_verified);
    }

    #[tokio::test]
    async fn app_core_records_generated_images() {
        let pool = setup_test_database().await.unwrap();
        let fakes = Fakes::default();
        let dir = tempfile::tempdir().unwrap();
        let core = CoreFactory::build_app_core(pool, fakes.gateways(), dir.path().to_path_buf());

        let image = core.images().generate("a lighthouse").await.unwrap();
        assert_eq!(core.images().get(image.id).await.unwrap(), image);
        assert_eq!(core.images().list(Some(10)).await.unwrap().len(), 1);
    }
}
