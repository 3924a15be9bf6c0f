//! SMTP mailer implementation

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use lettre::{
    address::AddressError,
    message::{header::ContentType, Mailbox, Mailboxes},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::communication::mailer::{Envelope, Mailer, MailerError, MessageId};

/// SMTP configuration
#[derive(Clone, Debug, Parser)]
pub struct SMTPConfig {
    /// The SMTP host
    #[clap(long = "smtp-host", env = "SMTP_HOST", default_value = "localhost")]
    pub host: String,

    /// The SMTP port
    #[clap(long = "smtp-port", env = "SMTP_PORT", default_value = "587")]
    pub port: u16,

    /// Connect over TLS from the start instead of upgrading with STARTTLS
    #[clap(long = "smtp-secure", env = "SMTP_SECURE", default_value = "false")]
    pub secure: bool,

    /// The SMTP username
    #[clap(long = "smtp-user", env = "SMTP_USER")]
    pub username: Option<String>,

    /// The SMTP password
    #[clap(long = "smtp-password", env = "SMTP_PASSWORD")]
    pub password: Option<String>,
}

impl Default for SMTPConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 587,
            secure: false,
            username: None,
            password: None,
        }
    }
}

/// SMTP mailer
#[derive(Clone)]
pub struct SMTPMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl std::fmt::Debug for SMTPMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SMTPMailer").finish_non_exhaustive()
    }
}

impl SMTPMailer {
    /// Create a new SMTP mailer. No connection is made until the first send.
    pub fn new(config: &SMTPConfig) -> Result<Self> {
        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host).tls(
                Tls::Opportunistic(TlsParameters::new(config.host.clone())?),
            )
        };

        let builder = match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                builder.credentials(Credentials::new(username.clone(), password.clone()))
            }
            _ => builder,
        };

        debug!(
            "SMTP transport for {}:{} (implicit TLS: {})",
            config.host, config.port, config.secure
        );

        Ok(Self {
            transport: builder.port(config.port).build(),
        })
    }
}

/// Builds the MIME message for `envelope`, tagged with `message_id`.
pub(crate) fn build_message(
    envelope: &Envelope,
    message_id: &str,
) -> Result<Message, MailerError> {
    let from = Mailbox::new(
        Some(envelope.from.name.clone()),
        envelope.from.address.as_str().parse()?,
    );

    let to: Mailboxes = envelope.to.joined().parse()?;

    let builder = to.into_iter().fold(
        Message::builder()
            .from(from)
            .subject(envelope.subject.clone())
            .message_id(Some(message_id.to_string()))
            .header(ContentType::TEXT_HTML),
        |builder, mailbox| builder.to(mailbox),
    );

    builder
        .body(envelope.html.clone())
        .map_err(|err| MailerError::UnknownError(err.into()))
}

/// A fresh `Message-ID` in the sender's domain
fn generate_message_id(envelope: &Envelope) -> String {
    format!("<{}@{}>", Uuid::now_v7(), envelope.from.address.domain())
}

impl From<AddressError> for MailerError {
    fn from(err: AddressError) -> Self {
        MailerError::InvalidAddress(err.to_string())
    }
}

#[async_trait]
impl Mailer for SMTPMailer {
    #[mutants::skip]
    async fn send_email(&self, envelope: &Envelope) -> Result<MessageId, MailerError> {
        let message_id = generate_message_id(envelope);
        let email = build_message(envelope, &message_id)?;

        debug!("sending {} via SMTP to {}", message_id, envelope.to.joined());

        match self.transport.send(email).await {
            Ok(response) if response.is_positive() => Ok(MessageId::new(message_id)),
            Ok(response) => Err(MailerError::Rejected(format!(
                "{} {}",
                response.code(),
                response.message().collect::<Vec<_>>().join(" ")
            ))),
            Err(err) if err.is_permanent() || err.is_transient() => {
                Err(MailerError::Rejected(err.to_string()))
            }
            Err(err) => Err(MailerError::UnknownError(err.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::communication::{
        email_addresses::Recipients,
        mailer::{Envelope, Sender},
    };

    use super::*;

    fn envelope(to: &[&str]) -> Envelope {
        Envelope {
            from: Sender::default(),
            to: Recipients::normalize(to),
            subject: "Hi".to_string(),
            html: "<p>hi</p>".to_string(),
        }
    }

    #[test]
    fn test_build_message_headers() -> TestResult {
        let message = build_message(&envelope(&["a@x.com", "b@x.com"]), "<id@worklenz.com>")?;
        let formatted = String::from_utf8(message.formatted())?;

        assert!(formatted.contains("From: Worklenz <noreply@worklenz.com>"));
        assert!(formatted.contains("To: a@x.com, b@x.com"));
        assert!(formatted.contains("Subject: Hi"));
        assert!(formatted.contains("Message-ID: <id@worklenz.com>"));
        assert!(formatted.contains("Content-Type: text/html"));
        assert!(formatted.contains("<p>hi</p>"));

        Ok(())
    }

    #[test]
    fn test_build_message_envelope_recipients() -> TestResult {
        let message = build_message(&envelope(&["a@x.com", "b@x.com"]), "<id@worklenz.com>")?;
        let recipients: Vec<String> = message
            .envelope()
            .to()
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(recipients, vec!["a@x.com", "b@x.com"]);

        Ok(())
    }

    #[test]
    fn test_generated_message_id_uses_sender_domain() {
        let id = generate_message_id(&envelope(&["a@x.com"]));

        assert!(id.starts_with('<'));
        assert!(id.ends_with("@worklenz.com>"));
    }

    #[test]
    fn test_default_config() {
        let config = SMTPConfig::default();

        assert_eq!(config.port, 587);
        assert!(!config.secure);
        assert!(config.username.is_none());
    }

    #[tokio::test]
    async fn test_mailer_builds_without_connecting() -> TestResult {
        let mailer = SMTPMailer::new(&SMTPConfig {
            host: "smtp.example.com".to_string(),
            username: Some("user".to_string()),
            password: Some("secret".to_string()),
            ..SMTPConfig::default()
        })?;

        assert!(format!("{:?}", mailer).starts_with("SMTPMailer"));

        Ok(())
    }
}
