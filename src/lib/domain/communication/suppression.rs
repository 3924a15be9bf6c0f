//! Suppression lists: addresses that must never receive mail.

mod errors;
mod filter;
mod repository;

use std::fmt;

pub use errors::SuppressionError;
pub use filter::SuppressionFilter;
pub use repository::SuppressionRepository;

/// The suppression lists a message is checked against
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SuppressionList {
    /// Addresses that previously hard-bounced
    Bounced,

    /// Addresses that filed spam complaints
    Spam,
}

impl SuppressionList {
    /// Every list, in the order a dispatch applies them
    pub const ALL: [SuppressionList; 2] = [SuppressionList::Bounced, SuppressionList::Spam];

    /// The table backing the list
    pub fn table(&self) -> &'static str {
        match self {
            Self::Bounced => "bounced_emails",
            Self::Spam => "spam_emails",
        }
    }
}

impl fmt::Display for SuppressionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounced => write!(f, "bounced"),
            Self::Spam => write!(f, "spam"),
        }
    }
}

#[cfg(test)]
pub mod tests {
    pub use super::repository::MockSuppressionRepository;

    use super::SuppressionList;

    #[test]
    fn test_suppression_list_order_and_names() {
        assert_eq!(
            SuppressionList::ALL,
            [SuppressionList::Bounced, SuppressionList::Spam]
        );
        assert_eq!(SuppressionList::Bounced.table(), "bounced_emails");
        assert_eq!(SuppressionList::Spam.table(), "spam_emails");
        assert_eq!(SuppressionList::Spam.to_string(), "spam");
    }
}
