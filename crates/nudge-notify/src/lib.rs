//! Outbound delivery for reminder digests.
//!
//! The job talks to [`MessageTransport`] only; the production
//! implementation is [`email::EmailTransport`] (authenticated SMTP with
//! STARTTLS over lettre). Tests substitute an in-memory transport.

pub mod email;
pub mod error;


use async_trait::async_trait;

pub use error::{NotifyError, Result};

/// A transport that can deliver one plain-text message to one recipient.
///
/// A single send is attempted per call: there is no in-call retry, the next
/// scheduled job run is the retry mechanism. Failures are per-recipient and
/// must never poison the transport for subsequent sends.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Delivers the message, returning once the transport has accepted it.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipient address is invalid or submission
    /// fails (including transport timeout).
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()>;

    /// Returns the transport type name (e.g., `"smtp"`).
    fn transport_name(&self) -> &str;
}
