//! HTTP request handlers.
//!
//! Each submodule covers one API area. Handlers are thin wrappers that
//! delegate to the `AppCore` services.

pub mod auth;
pub mod chat;
pub mod images;
pub mod speech;
pub mod system;
