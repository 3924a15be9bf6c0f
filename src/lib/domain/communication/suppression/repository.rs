//! Suppression repository module

use std::collections::BTreeSet;

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use super::{SuppressionError, SuppressionList};

/// Read access to the suppression lists.
///
/// Every call must return the membership as it is at the time of the call.
/// Implementations must not cache: a bounce recorded a second ago has to stop the
/// next send.
#[async_trait]
pub trait SuppressionRepository: Clone + Send + Sync + 'static {
    /// Every address that previously bounced
    async fn list_bounced_addresses(&self) -> Result<BTreeSet<String>, SuppressionError>;

    /// Every address that filed a spam complaint
    async fn list_spam_addresses(&self) -> Result<BTreeSet<String>, SuppressionError>;

    /// Every address on `list`
    async fn list_addresses(
        &self,
        list: SuppressionList,
    ) -> Result<BTreeSet<String>, SuppressionError> {
        match list {
            SuppressionList::Bounced => self.list_bounced_addresses().await,
            SuppressionList::Spam => self.list_spam_addresses().await,
        }
    }
}

#[cfg(test)]
mock! {
    pub SuppressionRepository {}

    impl Clone for SuppressionRepository {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl SuppressionRepository for SuppressionRepository {
        async fn list_bounced_addresses(&self) -> Result<BTreeSet<String>, SuppressionError>;
        async fn list_spam_addresses(&self) -> Result<BTreeSet<String>, SuppressionError>;
    }
}
