//! Database path resolution.

use std::fs;
use std::path::PathBuf;

use super::error::PathError;
use super::platform::data_root;

/// Get the path to the `SQLite` database file.
///
/// Returns `{data_root}/data/darkai.db`, creating `data/` if needed.
pub fn database_path() -> Result<PathBuf, PathError> {
    let data_dir = data_root()?.join("data");

    fs::create_dir_all(&data_dir).map_err(|e| PathError::CreateFailed {
        path: data_dir.clone(),
        reason: e.to_string(),
    })?;

    Ok(data_dir.join("darkai.db"))
}
