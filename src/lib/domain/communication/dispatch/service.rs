//! Dispatch service

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::{
    email_addresses::Recipients,
    mailer::{Envelope, Mailer, Message, MessageId, Sender},
    suppression::{SuppressionFilter, SuppressionRepository},
    validation::{MessageValidator, SchemaValidator},
};

use super::{DispatchError, DispatchOutcome, FailureReporter, SkipReason, TracingReporter};

/// Turns an application's intent to email someone into a send attempt or a no-op.
#[async_trait]
pub trait DispatchService: Clone + Send + Sync + 'static {
    /// Runs one message through the pipeline.
    ///
    /// # Arguments
    /// * `message` - The candidate message. Its recipients are untrusted input.
    ///
    /// # Returns
    /// A [`DispatchOutcome`]. This never fails: errors end up in
    /// [`DispatchOutcome::Failed`] after being reported.
    async fn dispatch(&self, message: &Message) -> DispatchOutcome;

    /// Sends `message`, returning the provider's identifier or [`None`].
    ///
    /// [`None`] covers skipped and failed attempts alike; use
    /// [`DispatchService::dispatch`] to tell them apart.
    async fn send_email(&self, message: &Message) -> Option<MessageId> {
        self.dispatch(message).await.into_message_id()
    }
}

#[cfg(test)]
mock! {
    pub DispatchService {}

    impl Clone for DispatchService {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl DispatchService for DispatchService {
        async fn dispatch(&self, message: &Message) -> DispatchOutcome;
    }
}

/// Dispatch service implementation.
///
/// Holds no per-call state, so one instance serves any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct DispatchServiceImpl<R, M, V = SchemaValidator, F = TracingReporter>
where
    R: SuppressionRepository,
    M: Mailer,
    V: MessageValidator,
    F: FailureReporter,
{
    suppressions: SuppressionFilter<R>,
    mailer: Arc<M>,
    validator: V,
    reporter: F,
    sender: Sender,
}

impl<R, M> DispatchServiceImpl<R, M>
where
    R: SuppressionRepository,
    M: Mailer,
{
    /// Creates a new dispatch service using the default schema and `tracing` for failures.
    pub fn new(suppressions: Arc<R>, mailer: Arc<M>, sender: Sender) -> Self {
        Self {
            suppressions: SuppressionFilter::new(suppressions),
            mailer,
            validator: SchemaValidator::default(),
            reporter: TracingReporter,
            sender,
        }
    }
}

impl<R, M, V, F> DispatchServiceImpl<R, M, V, F>
where
    R: SuppressionRepository,
    M: Mailer,
    V: MessageValidator,
    F: FailureReporter,
{
    /// Replaces the message validator
    pub fn with_validator<W: MessageValidator>(
        self,
        validator: W,
    ) -> DispatchServiceImpl<R, M, W, F> {
        DispatchServiceImpl {
            suppressions: self.suppressions,
            mailer: self.mailer,
            validator,
            reporter: self.reporter,
            sender: self.sender,
        }
    }

    /// Replaces the failure reporter
    pub fn with_reporter<G: FailureReporter>(
        self,
        reporter: G,
    ) -> DispatchServiceImpl<R, M, V, G> {
        DispatchServiceImpl {
            suppressions: self.suppressions,
            mailer: self.mailer,
            validator: self.validator,
            reporter,
            sender: self.sender,
        }
    }

    /// The identity mail is sent from
    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    async fn run(&self, message: &Message) -> Result<DispatchOutcome, DispatchError> {
        let recipients = Recipients::normalize(&message.to);

        if recipients.is_empty() {
            debug!("no usable recipients, skipping");
            return Ok(DispatchOutcome::Skipped(SkipReason::NoRecipients));
        }

        let recipients = self.suppressions.filter_all(&recipients).await?;

        if recipients.is_empty() {
            debug!("every recipient is suppressed, skipping");
            return Ok(DispatchOutcome::Skipped(SkipReason::AllSuppressed));
        }

        if let Err(violation) = self.validator.validate(&message.addressed_to(&recipients)) {
            debug!("message rejected: {}", violation);
            return Ok(DispatchOutcome::Skipped(SkipReason::InvalidShape(violation)));
        }

        let envelope = Envelope {
            from: self.sender.clone(),
            to: recipients,
            subject: message.subject.clone(),
            html: message.html.clone(),
        };

        let message_id = self.mailer.send_email(&envelope).await?;

        info!(
            message_id = %message_id,
            recipients = envelope.to.len(),
            "email sent"
        );

        Ok(DispatchOutcome::Sent(message_id))
    }
}

#[async_trait]
impl<R, M, V, F> DispatchService for DispatchServiceImpl<R, M, V, F>
where
    R: SuppressionRepository,
    M: Mailer,
    V: MessageValidator,
    F: FailureReporter,
{
    async fn dispatch(&self, message: &Message) -> DispatchOutcome {
        match self.run(message).await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.reporter.report(&err);
                DispatchOutcome::Failed(err)
            }
        }
    }
}
