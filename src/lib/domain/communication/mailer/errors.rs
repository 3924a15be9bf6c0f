//! Mailer errors

use thiserror::Error;

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// The transport refused the message (authentication, recipient rejected, ...)
    #[error("the transport rejected the message: {0}")]
    Rejected(String),

    /// An address could not be used by the transport
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    /// The transport is misconfigured
    #[error("mailer configuration error: {0}")]
    Configuration(String),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}
