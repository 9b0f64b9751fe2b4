//! Log-only mailer for development.

use async_trait::async_trait;
use darkai_core::{MailerError, MailerPort, OutgoingEmail};

/// Writes outgoing mail to the log instead of delivering it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl MailerPort for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailerError> {
        tracing::warn!(
            target: "darkai.mail",
            to = %email.to,
            subject = %email.subject,
            body = %email.body,
            "SMTP not configured; email logged instead of sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_mailer_always_succeeds() {
        LogMailer
            .send(OutgoingEmail::otp("ana@example.com", "000000"))
            .await
            .unwrap();
    }
}
