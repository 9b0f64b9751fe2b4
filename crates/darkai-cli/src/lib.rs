#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

pub mod bootstrap;
pub mod commands;
pub mod config;
pub mod error;
pub mod handlers;
pub mod parser;

pub use bootstrap::{CliContext, bootstrap};
pub use commands::Commands;
pub use config::Settings;
pub use error::CliError;
pub use parser::Cli;
