//! Media root resolution and directory checks.

use std::env;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::PathError;
use super::platform::data_root;

/// Environment variable overriding the media root.
pub(super) const MEDIA_DIR_ENV: &str = "DARKAI_MEDIA_DIR";

/// Directory holding generated media, served under `/media`.
///
/// Resolution order:
/// 1. `DARKAI_MEDIA_DIR` environment variable
/// 2. `{data_root}/media`
///
/// The directory is created and checked for writability.
pub fn media_root() -> Result<PathBuf, PathError> {
    let root = match env::var(MEDIA_DIR_ENV) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => data_root()?.join("media"),
    };
    ensure_directory(&root)?;
    Ok(root)
}

/// Create `path` (and parents) if needed and verify it is a writable directory.
pub fn ensure_directory(path: &Path) -> Result<(), PathError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }
    } else {
        fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    }

    verify_writable(path)
}

/// Verify a directory is writable by creating and removing a probe file.
pub fn verify_writable(path: &Path) -> Result<(), PathError> {
    let probe = path.join(".darkai_write_test");
    let not_writable = |e: std::io::Error| PathError::NotWritable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&probe)
        .map_err(not_writable)?;
    file.write_all(b"test").map_err(not_writable)?;
    drop(file);
    let _ = fs::remove_file(&probe);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::platform::DATA_DIR_ENV;
    use crate::paths::test_utils::{ENV_LOCK, EnvVarGuard};

    #[test]
    fn media_root_defaults_under_data_root() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let _data = EnvVarGuard::set(DATA_DIR_ENV, dir.path().to_str().unwrap());
        let _media = EnvVarGuard::unset(MEDIA_DIR_ENV);

        assert_eq!(media_root().unwrap(), dir.path().join("media"));
    }

    #[test]
    fn media_root_env_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("public");
        let _media = EnvVarGuard::set(MEDIA_DIR_ENV, target.to_str().unwrap());

        assert_eq!(media_root().unwrap(), target);
        assert!(target.is_dir());
    }

    #[test]
    fn ensure_directory_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        fs::write(&file, b"x").unwrap();

        assert!(matches!(
            ensure_directory(&file),
            Err(PathError::NotADirectory(_))
        ));
    }

    #[test]
    fn write_probe_is_cleaned_up() {
        let dir = tempfile::tempdir().unwrap();
        verify_writable(dir.path()).unwrap();
        assert!(!dir.path().join(".darkai_write_test").exists());
    }
}
