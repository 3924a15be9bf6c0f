//! Normalized recipient set

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use super::EmailAddress;

/// An ordered, duplicate-free list of valid recipient addresses.
///
/// Equality of addresses is case-sensitive. The order is that of first appearance
/// in the raw input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Recipients(Vec<EmailAddress>);

impl Recipients {
    /// Builds a recipient set from raw input.
    ///
    /// Entries are trimmed first, then empty or malformed entries are dropped and
    /// duplicates are collapsed onto their first occurrence.
    pub fn normalize<S: AsRef<str>>(raw: &[S]) -> Self {
        let mut seen = HashSet::with_capacity(raw.len());
        let mut addresses = Vec::with_capacity(raw.len());

        for entry in raw {
            match EmailAddress::new(entry.as_ref()) {
                Ok(address) => {
                    if seen.insert(address.clone()) {
                        addresses.push(address);
                    }
                }
                Err(err) => debug!("dropping recipient: {}", err),
            }
        }

        Self(addresses)
    }

    /// Returns the recipients not present in `suppressed`.
    pub fn without(&self, suppressed: &BTreeSet<String>) -> Self {
        Self(
            self.0
                .iter()
                .filter(|address| !suppressed.contains(address.as_str()))
                .cloned()
                .collect(),
        )
    }

    /// Number of recipients
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there is nobody left to send to
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the recipients in order
    pub fn iter(&self) -> impl Iterator<Item = &EmailAddress> {
        self.0.iter()
    }

    /// Whether `address` is one of the recipients
    pub fn contains(&self, address: &str) -> bool {
        self.0.iter().any(|a| a.as_str() == address)
    }

    /// The recipients as plain strings
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// The comma separated form used in a `To:` header, e.g. `a@x.com, b@x.com`.
    pub fn joined(&self) -> String {
        self.to_strings().join(", ")
    }
}

impl<'a> IntoIterator for &'a Recipients {
    type Item = &'a EmailAddress;
    type IntoIter = std::slice::Iter<'a, EmailAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
