//! Paths command handler.
//!
//! Prints every resolved path in `key = value` form, the same values the
//! server uses for the given settings.

use anyhow::Result;
use darkai_core::paths::{ResolvedPaths, data_root, database_path, media_root};

use crate::config::Settings;
use crate::error::CliError;

/// Paths from `--data-dir`/`--media-dir`, falling back to the environment.
pub fn resolve(settings: &Settings) -> Result<ResolvedPaths, CliError> {
    let data_root = match &settings.data_dir {
        Some(dir) => dir.clone(),
        None => data_root()?,
    };
    let database_path = match settings.database_path() {
        Some(path) => path,
        None => database_path()?,
    };
    let media_root = match settings.media_root() {
        Some(path) => path,
        None => media_root()?,
    };
    Ok(ResolvedPaths {
        data_root,
        database_path,
        media_root,
    })
}

pub fn execute(settings: &Settings) -> Result<()> {
    let paths = resolve(settings)?;
    println!("{paths}");
    Ok(())
}
