//! Outbound email communication.
//!
//! A candidate [`mailer::Message`] travels through [`dispatch::DispatchServiceImpl`]:
//! recipients are normalized, checked against the suppression lists, the shape is
//! validated and the finished [`mailer::Envelope`] is handed to a [`mailer::Mailer`].

pub mod dispatch;
pub mod email_addresses;
pub mod mailer;
pub mod suppression;
pub mod validation;
