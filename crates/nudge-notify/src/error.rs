/// Errors that can occur while delivering a digest.
///
/// # Examples
///
/// ```rust
/// use nudge_notify::error::NotifyError;
///
/// let err = NotifyError::InvalidConfig("missing smtp host".to_string());
/// assert!(err.to_string().contains("smtp host"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Transport configuration is missing a required field or contains an
    /// invalid value.
    #[error("Notify: invalid transport configuration: {0}")]
    InvalidConfig(String),

    /// A sender or recipient address failed to parse.
    #[error("Notify: invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// Building the MIME message failed.
    #[error("Notify: message build error: {0}")]
    Message(#[from] lettre::error::Error),

    /// SMTP submission failed (connect, auth, or send).
    #[error("Notify: SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Convenience `Result` alias for delivery operations.
pub type Result<T> = std::result::Result<T, NotifyError>;
