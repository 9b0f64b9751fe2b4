//! Platform data directory resolution.

use std::env;
use std::fs;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable overriding the data root.
pub(super) const DATA_DIR_ENV: &str = "DARKAI_DATA_DIR";

/// Get the root directory for application data (database, media).
///
/// Resolution order:
/// 1. `DARKAI_DATA_DIR` environment variable
/// 2. System data directory (e.g., `~/.local/share/darkai`)
///
/// The directory is created if missing.
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = match env::var(DATA_DIR_ENV) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => dirs::data_local_dir()
            .ok_or(PathError::NoDataDir)?
            .join("darkai"),
    };

    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}
