//! All resolved paths in one struct, for `darkai paths` and diagnostics.

use std::path::PathBuf;

use super::{PathError, data_root, database_path, media_root};

/// Every path the backend uses, resolved against the current environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Root directory for application data
    pub data_root: PathBuf,
    /// Path to the `SQLite` database file
    pub database_path: PathBuf,
    /// Directory served under `/media`
    pub media_root: PathBuf,
}

impl ResolvedPaths {
    /// Resolve all paths using the current environment.
    pub fn resolve() -> Result<Self, PathError> {
        Ok(Self {
            data_root: data_root()?,
            database_path: database_path()?,
            media_root: media_root()?,
        })
    }
}

impl std::fmt::Display for ResolvedPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "data_root = {}", self.data_root.display())?;
        writeln!(f, "database_path = {}", self.database_path.display())?;
        write!(f, "media_root = {}", self.media_root.display())
    }
}
