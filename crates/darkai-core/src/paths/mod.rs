//! Path utilities for Dark AI data directories.
//!
//! - Application data root
//! - Database location
//! - Media root (generated images, synthesized speech)
//!
//! No interactive I/O here; adapters decide how to report failures.

mod database;
mod error;
mod media;
mod platform;
mod resolver;

#[cfg(test)]
mod test_utils;

pub use database::database_path;
pub use error::PathError;
pub use media::{ensure_directory, media_root, verify_writable};
pub use platform::data_root;
pub use resolver::ResolvedPaths;
