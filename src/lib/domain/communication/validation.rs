//! Structural validation of outgoing messages

#[cfg(test)]
use mockall::mock;
use thiserror::Error;

use crate::domain::communication::{email_addresses::EmailAddress, mailer::Message};

/// Why a message does not have the required shape
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ShapeViolation {
    /// The subject is empty
    #[error("subject is required")]
    MissingSubject,

    /// The HTML body is empty
    #[error("html body is required")]
    MissingHtml,

    /// There are no recipients
    #[error("at least one recipient is required")]
    MissingRecipients,

    /// A recipient does not look like an email address
    #[error("recipient is not an email address: {0}")]
    MalformedRecipient(String),
}

/// Pass/fail oracle over a message's shape.
///
/// Only structure is checked. Whether an address can actually receive mail is the
/// transport's concern.
pub trait MessageValidator: Clone + Send + Sync + 'static {
    /// Checks `message`, returning the first violation found
    fn validate(&self, message: &Message) -> Result<(), ShapeViolation>;

    /// Whether `message` has the required shape
    fn is_valid(&self, message: &Message) -> bool {
        self.validate(message).is_ok()
    }
}

#[cfg(test)]
mock! {
    pub MessageValidator {}

    impl Clone for MessageValidator {
        fn clone(&self) -> Self;
    }

    impl MessageValidator for MessageValidator {
        fn validate(&self, message: &Message) -> Result<(), ShapeViolation>;
    }
}

/// The shape an outgoing message must have
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageSchema {
    /// Whether `to` must be non-empty
    pub recipients_required: bool,

    /// Whether `html` must be non-empty
    pub html_required: bool,
}

impl Default for MessageSchema {
    fn default() -> Self {
        Self {
            recipients_required: true,
            html_required: true,
        }
    }
}

/// [`MessageValidator`] driven by a [`MessageSchema`]
#[derive(Clone, Copy, Debug, Default)]
pub struct SchemaValidator {
    schema: MessageSchema,
}

impl SchemaValidator {
    /// Creates a validator for `schema`
    pub fn new(schema: MessageSchema) -> Self {
        Self { schema }
    }
}

impl MessageValidator for SchemaValidator {
    fn validate(&self, message: &Message) -> Result<(), ShapeViolation> {
        if message.subject.is_empty() {
            return Err(ShapeViolation::MissingSubject);
        }

        if self.schema.html_required && message.html.is_empty() {
            return Err(ShapeViolation::MissingHtml);
        }

        if self.schema.recipients_required && message.to.is_empty() {
            return Err(ShapeViolation::MissingRecipients);
        }

        if let Some(recipient) = message.to.iter().find(|to| !EmailAddress::is_valid(to)) {
            return Err(ShapeViolation::MalformedRecipient(recipient.clone()));
        }

        Ok(())
    }
}
