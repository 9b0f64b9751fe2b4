//! In-memory repositories and fake vendor ports for tests.
//!
//! Enabled inside this crate's unit tests and, for other crates, through the
//! `test-utils` feature.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    GeneratedImage, InlineImage, NewGeneratedImage, NewUser, OtpRecord, Session, SocialIdentity,
    User,
};
use crate::ports::{
    GenerationError, Gateways, IdentityError, IdentityPort, ImageGenerationPort, ImageRepository,
    MailerError, MailerPort, MediaStoreError, MediaStorePort, OtpRepository, OutgoingEmail,
    RepositoryError, Repos, SessionRepository, SpeechSynthesisPort, SynthesisError,
    TextGenerationPort, UserRepository,
};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// A PNG signature padded with zeros to `len` bytes.
pub fn fake_png(len: usize) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.resize(len.max(bytes.len()), 0);
    bytes
}

// ─────────────────────────────────────────────────────────────────────────────
// Vendor fakes
// ─────────────────────────────────────────────────────────────────────────────

/// Text model returning a fixed reply and recording prompts.
pub struct FakeTextModel {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeTextModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }
}

#[async_trait]
impl TextGenerationPort for FakeTextModel {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        lock(&self.prompts).push(prompt.to_string());
        self.reply.clone().ok_or_else(|| GenerationError::Api {
            status: 500,
            message: "fake text model failure".to_string(),
        })
    }
}

/// Image model returning a fixed image (or none).
pub struct FakeImageModel {
    image: Option<InlineImage>,
}

impl FakeImageModel {
    pub fn returning(image: InlineImage) -> Self {
        Self { image: Some(image) }
    }

    /// Answers without any inline image.
    pub fn empty() -> Self {
        Self { image: None }
    }
}

#[async_trait]
impl ImageGenerationPort for FakeImageModel {
    async fn generate_image(&self, _prompt: &str) -> Result<Option<InlineImage>, GenerationError> {
        Ok(self.image.clone())
    }
}

/// Speech backend that "encodes" each chunk as `[lang:text]`.
#[derive(Default)]
pub struct FakeSpeech {
    fail: bool,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeSpeech {
    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Mutex::default(),
        }
    }

    /// `(chunk, lang)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl SpeechSynthesisPort for FakeSpeech {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, SynthesisError> {
        if self.fail {
            return Err(SynthesisError::Network("fake speech failure".to_string()));
        }
        lock(&self.calls).push((text.to_string(), lang.to_string()));
        Ok(format!("[{lang}:{text}]").into_bytes())
    }
}

/// Media store recording uploads and answering `https://media.test/{folder}/{id}.png`.
#[derive(Default)]
pub struct FakeMediaStore {
    fail: bool,
    uploads: Mutex<Vec<(String, String, usize)>>,
}

impl FakeMediaStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            uploads: Mutex::default(),
        }
    }

    /// `(public_id, folder, byte_len)` per upload.
    pub fn uploads(&self) -> Vec<(String, String, usize)> {
        lock(&self.uploads).clone()
    }
}

#[async_trait]
impl MediaStorePort for FakeMediaStore {
    async fn upload_image(
        &self,
        bytes: Vec<u8>,
        public_id: &str,
        folder: &str,
    ) -> Result<String, MediaStoreError> {
        if self.fail {
            return Err(MediaStoreError::Rejected {
                status: 401,
                message: "invalid signature".to_string(),
            });
        }
        lock(&self.uploads).push((public_id.to_string(), folder.to_string(), bytes.len()));
        Ok(format!("https://media.test/{folder}/{public_id}.png"))
    }

    fn backend_name(&self) -> &'static str {
        "fake"
    }
}

/// Mailer keeping every message in memory.
#[derive(Default)]
pub struct FakeMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl FakeMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        lock(&self.sent).clone()
    }

    /// The code in the most recent OTP email to `to`.
    pub fn last_code_for(&self, to: &str) -> Option<String> {
        lock(&self.sent)
            .iter()
            .rev()
            .find(|m| m.to == to)
            .and_then(|m| m.body.strip_prefix("Your OTP is "))
            .map(str::to_string)
    }
}

#[async_trait]
impl MailerPort for FakeMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailerError> {
        lock(&self.sent).push(email);
        Ok(())
    }
}

/// Identity provider backed by a token → identity map.
#[derive(Default)]
pub struct FakeIdentity {
    known: Mutex<HashMap<String, SocialIdentity>>,
}

impl FakeIdentity {
    pub fn with_token(self, token: &str, identity: SocialIdentity) -> Self {
        lock(&self.known).insert(token.to_string(), identity);
        self
    }
}

#[async_trait]
impl IdentityPort for FakeIdentity {
    async fn fetch_google_identity(
        &self,
        access_token: &str,
    ) -> Result<SocialIdentity, IdentityError> {
        lock(&self.known)
            .get(access_token)
            .cloned()
            .ok_or(IdentityError::InvalidToken)
    }
}

/// One of each fake, kept around so tests can inspect them after wiring.
pub struct Fakes {
    pub text: Arc<FakeTextModel>,
    pub images: Arc<FakeImageModel>,
    pub speech: Arc<FakeSpeech>,
    pub media: Arc<FakeMediaStore>,
    pub mailer: Arc<FakeMailer>,
    pub identity: Arc<FakeIdentity>,
}

impl Default for Fakes {
    fn default() -> Self {
        Self {
            text: Arc::new(FakeTextModel::replying("Hello from the fake model.")),
            images: Arc::new(FakeImageModel::returning(InlineImage {
                mime_type: "image/png".to_string(),
                data: fake_png(2048),
            })),
            speech: Arc::new(FakeSpeech::default()),
            media: Arc::new(FakeMediaStore::default()),
            mailer: Arc::new(FakeMailer::default()),
            identity: Arc::new(FakeIdentity::default()),
        }
    }
}

impl Fakes {
    pub fn gateways(&self) -> Gateways {
        Gateways {
            text: self.text.clone(),
            images: self.images.clone(),
            speech: self.speech.clone(),
            media: self.media.clone(),
            mailer: self.mailer.clone(),
            identity: self.identity.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory repositories
// ─────────────────────────────────────────────────────────────────────────────

/// Fresh in-memory repositories.
pub fn in_memory_repos() -> Repos {
    Repos::new(
        Arc::new(InMemoryImageRepository::default()),
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(InMemoryOtpRepository::default()),
        Arc::new(InMemorySessionRepository::default()),
    )
}

#[derive(Default)]
pub struct InMemoryImageRepository {
    rows: Mutex<Vec<GeneratedImage>>,
}

#[async_trait]
impl ImageRepository for InMemoryImageRepository {
    async fn insert(&self, image: &NewGeneratedImage) -> Result<GeneratedImage, RepositoryError> {
        let mut rows = lock(&self.rows);
        let record = GeneratedImage {
            id: i64::try_from(rows.len()).unwrap_or(i64::MAX - 1) + 1,
            prompt: image.prompt.clone(),
            file_name: image.file_name.clone(),
            created_at: Utc::now(),
        };
        rows.push(record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: i64) -> Result<GeneratedImage, RepositoryError> {
        lock(&self.rows)
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("image id={id}")))
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<GeneratedImage>, RepositoryError> {
        Ok(lock(&self.rows)
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    fn update<F: FnOnce(&mut User)>(&self, id: i64, f: F) -> Result<(), RepositoryError> {
        let mut rows = lock(&self.rows);
        let user = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("user id={id}")))?;
        f(user);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        Ok(lock(&self.rows).iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(lock(&self.rows).iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(lock(&self.rows)
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let mut rows = lock(&self.rows);
        if rows
            .iter()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            return Err(RepositoryError::AlreadyExists(user.email.clone()));
        }
        let record = User {
            id: i64::try_from(rows.len()).unwrap_or(i64::MAX - 1) + 1,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            is_verified: user.is_verified,
            created_at: Utc::now(),
        };
        rows.push(record.clone());
        Ok(record)
    }

    async fn update_credentials(
        &self,
        id: i64,
        username: &str,
        password_hash: Option<&str>,
    ) -> Result<(), RepositoryError> {
        self.update(id, |u| {
            u.username = username.to_string();
            u.password_hash = password_hash.map(str::to_string);
        })
    }

    async fn mark_verified(&self, id: i64) -> Result<(), RepositoryError> {
        self.update(id, |u| u.is_verified = true)
    }
}

#[derive(Default)]
pub struct InMemoryOtpRepository {
    rows: Mutex<HashMap<String, OtpRecord>>,
}

#[async_trait]
impl OtpRepository for InMemoryOtpRepository {
    async fn upsert(&self, record: &OtpRecord) -> Result<(), RepositoryError> {
        lock(&self.rows).insert(record.email.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<OtpRecord>, RepositoryError> {
        Ok(lock(&self.rows).get(email).cloned())
    }

    async fn record_failed_attempt(&self, email: &str) -> Result<u32, RepositoryError> {
        let mut rows = lock(&self.rows);
        let record = rows
            .get_mut(email)
            .ok_or_else(|| RepositoryError::NotFound(format!("otp for {email}")))?;
        record.attempts += 1;
        Ok(record.attempts)
    }

    async fn delete(&self, email: &str) -> Result<(), RepositoryError> {
        lock(&self.rows).remove(email);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySessionRepository {
    rows: Mutex<HashMap<String, Session>>,
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn insert(&self, session: &Session) -> Result<(), RepositoryError> {
        lock(&self.rows).insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, RepositoryError> {
        Ok(lock(&self.rows).get(token).cloned())
    }

    async fn delete(&self, token: &str) -> Result<(), RepositoryError> {
        lock(&self.rows).remove(token);
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|_, s| !s.is_expired(now));
        Ok((before - rows.len()) as u64)
    }
}
