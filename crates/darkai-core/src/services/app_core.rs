//! `AppCore` - the primary application facade.
//!
//! This is the composition root for core services. Adapters (CLI, Web)
//! receive an `AppCore` instance and use it to access all functionality.

use std::path::{Path, PathBuf};

use crate::ports::{Gateways, Repos};

use super::{AuthService, ChatService, ImageService, SpeechService};

/// The core application facade.
///
/// Constructed at the adapter's composition root (`bootstrap.rs` or a CLI
/// handler) with concrete repositories and vendor clients.
///
/// # Example
///
/// ```ignore
/// let repos = CoreFactory::build_repos(pool);
/// let core = AppCore::new(repos, gateways, paths::media_root()?);
///
/// let reply = core.chat().reply(&request).await?;
/// ```
pub struct AppCore {
    chat: ChatService,
    images: ImageService,
    speech: SpeechService,
    auth: AuthService,
    media_root: PathBuf,
}

impl AppCore {
    /// Wire every service from the given repositories and gateways.
    pub fn new(repos: Repos, gateways: Gateways, media_root: PathBuf) -> Self {
        Self {
            chat: ChatService::new(gateways.text),
            images: ImageService::new(gateways.images, gateways.media, repos.images),
            speech: SpeechService::new(gateways.speech, media_root.clone()),
            auth: AuthService::new(
                repos.users,
                repos.otps,
                repos.sessions,
                gateways.mailer,
                gateways.identity,
            ),
            media_root,
        }
    }

    /// Access the chat service.
    pub const fn chat(&self) -> &ChatService {
        &self.chat
    }

    /// Access the image service.
    pub const fn images(&self) -> &ImageService {
        &self.images
    }

    /// Access the speech service.
    pub const fn speech(&self) -> &SpeechService {
        &self.speech
    }

    /// Access the auth service.
    pub const fn auth(&self) -> &AuthService {
        &self.auth
    }

    /// Directory served under `/media`.
    pub fn media_root(&self) -> &Path {
        &self.media_root
    }
}
