#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

mod log;
mod smtp;

use std::sync::Arc;

use darkai_core::{MailerError, MailerPort};

pub use log::LogMailer;
pub use smtp::{DEFAULT_SMTP_PORT, SmtpConfig, SmtpMailer};

/// SMTP when a relay is configured, otherwise [`LogMailer`].
pub fn select_mailer(smtp: Option<&SmtpConfig>) -> Result<Arc<dyn MailerPort>, MailerError> {
    match smtp {
        Some(config) => {
            tracing::info!(target: "darkai.mail", host = %config.host, port = config.port, "using SMTP mailer");
            Ok(Arc::new(SmtpMailer::new(config)?))
        }
        None => {
            tracing::warn!(target: "darkai.mail", "SMTP_HOST not set; OTP emails will only be logged");
            Ok(Arc::new(LogMailer))
        }
    }
}
