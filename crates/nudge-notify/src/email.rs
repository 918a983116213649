use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Deserialize;

use crate::error::{NotifyError, Result};
use crate::MessageTransport;

fn default_smtp_port() -> u16 {
    587
}

fn default_timeout_secs() -> u64 {
    30
}

/// SMTP submission settings, deserialized straight from the job's TOML
/// `[smtp]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender mailbox, e.g. `"Nudge CRM <crm@example.com>"`.
    pub from: String,
    /// Connect/send timeout. Finite so a hung relay degrades into a
    /// per-recipient failure instead of stalling the run.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Digest delivery over authenticated SMTP with STARTTLS.
pub struct EmailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl EmailTransport {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        if config.host.trim().is_empty() {
            return Err(NotifyError::InvalidConfig("smtp host is empty".to_string()));
        }
        let from: Mailbox = config.from.parse()?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl MessageTransport for EmailTransport {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(recipient.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        self.transport.send(email).await?;
        tracing::debug!(recipient = %recipient, "SMTP submission accepted");
        Ok(())
    }

    fn transport_name(&self) -> &str {
        "smtp"
    }
}
