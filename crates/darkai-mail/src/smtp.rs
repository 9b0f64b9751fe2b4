//! SMTP delivery through lettre.

use async_trait::async_trait;
use darkai_core::{MailerError, MailerPort, OutgoingEmail};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Default submission port.
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// SMTP relay settings.
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender address, e.g. `Dark AI <no-reply@example.com>`.
    pub from: String,
    /// Upgrade with STARTTLS. Off only for local test relays.
    pub starttls: bool,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("from", &self.from)
            .field("starttls", &self.starttls)
            .finish()
    }
}

impl SmtpConfig {
    /// Relay on the default port with STARTTLS and no credentials.
    pub fn new(host: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_SMTP_PORT,
            username: None,
            password: None,
            from: from.into(),
            starttls: true,
        }
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub const fn with_starttls(mut self, enabled: bool) -> Self {
        self.starttls = enabled;
        self
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailerError> {
    address
        .trim()
        .parse()
        .map_err(|_| MailerError::InvalidAddress(address.to_string()))
}

/// Mailer sending through an SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the transport. No connection is made until the first send.
    pub fn new(config: &SmtpConfig) -> Result<Self, MailerError> {
        let from = parse_mailbox(&config.from)?;

        let mut builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| MailerError::Transport(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };
        builder = builder.port(config.port);

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, MailerError> {
        Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(&email.to)?)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| MailerError::Transport(e.to_string()))
    }
}

#[async_trait]
impl MailerPort for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailerError> {
        let message = self.build_message(&email)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| MailerError::Transport(e.to_string()))?;
        tracing::info!(target: "darkai.mail", to = %email.to, subject = %email.subject, "email sent");
        Ok(())
    }
}
