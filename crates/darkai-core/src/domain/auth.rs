//! Account, one-time-password and session domain types.
//!
//! Secrets never leave this module in clear form: OTPs are stored as SHA-256
//! digests and passwords as bcrypt hashes.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// How long an emailed code stays valid.
pub const OTP_TTL_MINUTES: i64 = 10;

/// Wrong guesses tolerated; one more miss discards the code.
pub const OTP_MAX_ATTEMPTS: u32 = 5;

/// Session lifetime.
pub const SESSION_TTL_DAYS: i64 = 14;

/// Minimum password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Maximum username length.
pub const MAX_USERNAME_LEN: usize = 150;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"));

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// `None` for accounts created through social login.
    pub password_hash: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Public view of an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// Data for creating a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub is_verified: bool,
}

/// A pending email verification code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpRecord {
    pub email: String,
    pub code_hash: String,
    pub expires_at: DateTime<Utc>,
    pub attempts: u32,
}

impl OtpRecord {
    /// Fresh record for `code`, valid for [`OTP_TTL_MINUTES`] from `now`.
    #[must_use]
    pub fn issue(email: &str, code: &str, now: DateTime<Utc>) -> Self {
        Self {
            email: email.to_string(),
            code_hash: hash_otp(code),
            expires_at: now + Duration::minutes(OTP_TTL_MINUTES),
            attempts: 0,
        }
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Constant-time comparison against the stored digest.
    #[must_use]
    pub fn matches(&self, code: &str) -> bool {
        let candidate = hash_otp(code.trim());
        candidate.len() == self.code_hash.len()
            && candidate
                .bytes()
                .zip(self.code_hash.bytes())
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// New session for `user_id`, valid for [`SESSION_TTL_DAYS`] from `now`.
    #[must_use]
    pub fn issue(user_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            token: generate_session_token(),
            user_id,
            expires_at: now + Duration::days(SESSION_TTL_DAYS),
        }
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Identity returned by a social login provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialIdentity {
    pub email: String,
    pub email_verified: bool,
    pub name: Option<String>,
}

/// Body of `POST /api/auth/`, discriminated by its `action` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum AuthAction {
    Signup {
        #[serde(default)]
        username: String,
        #[serde(default)]
        email: String,
        #[serde(default)]
        password: String,
    },
    Verify {
        #[serde(default)]
        email: String,
        #[serde(default)]
        otp: String,
    },
    Signin {
        #[serde(default)]
        email: String,
        #[serde(default)]
        password: String,
    },
    Resend {
        #[serde(default)]
        email: String,
    },
}

/// Result of an auth action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthOutcome {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl AuthOutcome {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            username: None,
            token: None,
        }
    }

    #[must_use]
    pub fn signed_in(message: impl Into<String>, username: &str, session: &Session) -> Self {
        Self {
            message: message.into(),
            username: Some(username.to_string()),
            token: Some(session.token.clone()),
        }
    }
}

/// Lower-case and trim an email address for storage and lookup.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Whether `email` has the `local@domain.tld` shape.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Whether `username` is 1..=150 characters of letters, digits and `@.+-_`.
#[must_use]
pub fn is_valid_username(username: &str) -> bool {
    let len = username.chars().count();
    (1..=MAX_USERNAME_LEN).contains(&len)
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}

/// Validate signup input, returning the first problem found.
pub fn validate_signup(username: &str, email: &str, password: &str) -> Result<(), String> {
    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err("Username, email and password are required.".to_string());
    }
    if !is_valid_username(username.trim()) {
        return Err(
            "Username may only contain letters, digits and @/./+/-/_ (max 150 characters)."
                .to_string(),
        );
    }
    if !is_valid_email(email.trim()) {
        return Err("Please enter a valid email.".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters."
        ));
    }
    Ok(())
}

/// Six random decimal digits.
#[must_use]
pub fn generate_otp() -> String {
    let code: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{code:06}")
}

/// Hex SHA-256 digest of an OTP.
#[must_use]
pub fn hash_otp(code: &str) -> String {
    to_hex(&Sha256::digest(code.as_bytes()))
}

/// 32 random bytes, hex encoded.
#[must_use]
pub fn generate_session_token() -> String {
    let bytes: [u8; 32] = rand::random();
    to_hex(&bytes)
}

/// bcrypt work factor. Test builds use the minimum.
#[cfg(not(any(test, feature = "test-utils")))]
const PASSWORD_COST: u32 = bcrypt::DEFAULT_COST;
#[cfg(any(test, feature = "test-utils"))]
const PASSWORD_COST: u32 = 4;

/// Hash a password with bcrypt.
pub fn hash_password(password: &str) -> Result<String, String> {
    bcrypt::hash(password, PASSWORD_COST).map_err(|e| e.to_string())
}

/// Check a password against a stored hash. Malformed hashes never verify.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Username seed for a social login account: the email local part,
/// reduced to allowed characters.
#[must_use]
pub fn username_seed(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let seed: String = local
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '+' | '-' | '_'))
        .take(30)
        .collect();
    if seed.is_empty() {
        "user".to_string()
    } else {
        seed
    }
}

fn to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}
