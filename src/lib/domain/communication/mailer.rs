//! Mailer port

mod errors;
mod message;

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

pub use errors::MailerError;
pub use message::{Envelope, Message, MessageId, Sender};

/// A delivery backend.
///
/// Implementations hand a finished [`Envelope`] to a transport and return the
/// identifier the transport assigned. They do not retry.
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Send an email
    ///
    /// # Arguments
    /// * `envelope` - The sender, recipients, subject and HTML body.
    ///
    /// # Returns
    /// - [`Ok`] with the provider's [`MessageId`] if the transport accepted the message.
    /// - [`Err`] containing a [`MailerError`] if the transport rejected it or could not be reached.
    async fn send_email(&self, envelope: &Envelope) -> Result<MessageId, MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Mailer for Mailer {
        async fn send_email(&self, envelope: &Envelope) -> Result<MessageId, MailerError>;
    }
}

#[cfg(test)]
pub mod tests {
    pub use super::MockMailer;
}
