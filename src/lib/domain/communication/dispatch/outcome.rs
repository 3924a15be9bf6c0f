//! Dispatch outcome

use crate::domain::communication::{mailer::MessageId, validation::ShapeViolation};

use super::DispatchError;

/// Why nothing was sent even though nothing went wrong
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// No usable address survived normalization
    NoRecipients,

    /// Every remaining recipient is on a suppression list
    AllSuppressed,

    /// The message does not have the required shape
    InvalidShape(ShapeViolation),
}

/// The result of one dispatch attempt
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The transport accepted the message
    Sent(MessageId),

    /// Nothing to do
    Skipped(SkipReason),

    /// Something went wrong; the error has already been reported
    Failed(DispatchError),
}

impl DispatchOutcome {
    /// The message identifier, if the message was sent
    pub fn message_id(&self) -> Option<&MessageId> {
        match self {
            Self::Sent(id) => Some(id),
            _ => None,
        }
    }

    /// Collapses the outcome to "identifier or nothing"
    pub fn into_message_id(self) -> Option<MessageId> {
        match self {
            Self::Sent(id) => Some(id),
            _ => None,
        }
    }

    /// Whether the message was sent
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }

    /// Whether the attempt was skipped on purpose
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    /// Whether the attempt failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
