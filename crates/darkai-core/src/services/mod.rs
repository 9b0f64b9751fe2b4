//! Core services - the application's business logic layer.
//!
//! Services orchestrate between ports (trait interfaces) and domain logic.
//! They don't know about concrete implementations.

mod app_core;
mod auth_service;
mod chat_service;
mod image_service;
mod speech_service;

pub use app_core::AppCore;
pub use auth_service::AuthService;
pub use chat_service::ChatService;
pub use image_service::ImageService;
pub use speech_service::SpeechService;
