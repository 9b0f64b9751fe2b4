#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;

pub use client::{DefaultGoogleClient, GoogleClient};
pub use config::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, DEFAULT_TTS_URL,
    DEFAULT_USERINFO_URL, GoogleConfig,
};
pub use error::{GoogleApiError, GoogleResult};
pub use http::{HttpBackend, ReqwestBackend};
