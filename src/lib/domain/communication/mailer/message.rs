//! Email message

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::communication::email_addresses::{EmailAddress, EmailAddressError, Recipients};

/// Display name used when none is configured
pub const DEFAULT_FROM_NAME: &str = "Worklenz";

/// Sender address used when none is configured
pub const DEFAULT_FROM_ADDRESS: &str = "noreply@worklenz.com";

/// A candidate message, as the application asks for it to be sent.
///
/// Nothing about it has been checked yet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The raw recipient list
    #[serde(default, deserialize_with = "lenient_recipients")]
    pub to: Vec<String>,

    /// The subject of the email
    #[serde(default)]
    pub subject: String,

    /// The HTML body of the email
    #[serde(default)]
    pub html: String,
}

impl Message {
    /// Creates a new message
    pub fn new<S: Into<String>>(to: Vec<S>, subject: &str, html: &str) -> Self {
        Self {
            to: to.into_iter().map(Into::into).collect(),
            subject: subject.to_string(),
            html: html.to_string(),
        }
    }

    /// The same subject and body addressed to `recipients`
    pub fn addressed_to(&self, recipients: &Recipients) -> Self {
        Self {
            to: recipients.to_strings(),
            subject: self.subject.clone(),
            html: self.html.clone(),
        }
    }
}

/// Accepts anything for `to`: a non-array becomes empty, non-string entries are dropped.
fn lenient_recipients<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(address) => Some(address),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// The `From:` identity of outgoing mail
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sender {
    /// The display name
    pub name: String,

    /// The sender address
    pub address: EmailAddress,
}

impl Sender {
    /// Creates a sender
    pub fn new(name: &str, address: EmailAddress) -> Self {
        Self {
            name: name.to_string(),
            address,
        }
    }

    /// Resolves the sender from optional configuration, falling back to the defaults
    /// for anything unset or blank.
    ///
    /// A configured address that is not a valid address is an error.
    pub fn try_from_config(
        name: Option<&str>,
        address: Option<&str>,
    ) -> Result<Self, EmailAddressError> {
        let address = match address.map(str::trim).filter(|address| !address.is_empty()) {
            Some(address) => EmailAddress::new(address)?,
            None => EmailAddress::new_unchecked(DEFAULT_FROM_ADDRESS),
        };

        Ok(Self::new(display_name(name), address))
    }

    /// Like [`Sender::try_from_config`], but an unusable address is replaced by the
    /// default with a warning.
    pub fn from_config(name: Option<&str>, address: Option<&str>) -> Self {
        Self::try_from_config(name, address).unwrap_or_else(|err| {
            warn!(
                "ignoring EMAIL_FROM_ADDRESS ({}), sending from {}",
                err, DEFAULT_FROM_ADDRESS
            );
            Self::new(display_name(name), EmailAddress::new_unchecked(DEFAULT_FROM_ADDRESS))
        })
    }
}

fn display_name(name: Option<&str>) -> &str {
    name.map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_FROM_NAME)
}

impl Default for Sender {
    fn default() -> Self {
        Self::from_config(None, None)
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.address)
    }
}

/// A message that passed every check and is ready for a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    /// The sender
    pub from: Sender,

    /// The recipients, normalized and filtered
    pub to: Recipients,

    /// The subject of the email
    pub subject: String,

    /// The HTML body of the email
    pub html: String,
}

/// Opaque identifier a transport assigns to an accepted message
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    /// Wraps a provider identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MessageId> for String {
    fn from(id: MessageId) -> Self {
        id.0
    }
}
