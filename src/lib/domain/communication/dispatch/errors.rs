//! Dispatch errors

use thiserror::Error;

use crate::domain::communication::{mailer::MailerError, suppression::SuppressionError};

/// Failures that end a dispatch attempt
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A suppression list could not be read
    #[error(transparent)]
    Suppression(#[from] SuppressionError),

    /// The delivery backend did not accept the message
    #[error("delivery failed: {0}")]
    Delivery(#[from] MailerError),
}
