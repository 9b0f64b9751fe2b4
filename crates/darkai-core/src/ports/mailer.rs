//! Outgoing email port.

use async_trait::async_trait;
use thiserror::Error;

/// A plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingEmail {
    /// The verification-code email sent on signup and resend.
    #[must_use]
    pub fn otp(to: &str, code: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: "Your OTP Code".to_string(),
            body: format!("Your OTP is {code}"),
        }
    }
}

/// Errors from email delivery.
#[derive(Debug, Error)]
pub enum MailerError {
    /// A sender or recipient address could not be parsed.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// The relay refused or the connection failed.
    #[error("Failed to send email: {0}")]
    Transport(String),
}

/// Port for delivering email.
#[async_trait]
pub trait MailerPort: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailerError>;
}
