//! Suppression filter

use std::sync::Arc;

use tracing::debug;

use crate::domain::communication::email_addresses::Recipients;

use super::{SuppressionError, SuppressionList, SuppressionRepository};

/// Removes suppressed addresses from a recipient set
#[derive(Debug, Clone)]
pub struct SuppressionFilter<R>
where
    R: SuppressionRepository,
{
    repo: Arc<R>,
}

impl<R> SuppressionFilter<R>
where
    R: SuppressionRepository,
{
    /// Creates a new suppression filter
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns the recipients that are not on `list`.
    ///
    /// The list is read in full on every call. If it cannot be read the error is
    /// returned; a failed lookup never counts as "nothing suppressed".
    pub async fn filter(
        &self,
        recipients: &Recipients,
        list: SuppressionList,
    ) -> Result<Recipients, SuppressionError> {
        let suppressed = self.repo.list_addresses(list).await?;
        let remaining = recipients.without(&suppressed);

        debug!(
            "{} suppression list removed {} of {} recipients",
            list,
            recipients.len().saturating_sub(remaining.len()),
            recipients.len()
        );

        Ok(remaining)
    }

    /// Applies every list in [`SuppressionList::ALL`] order. Each list is consulted
    /// even if an earlier one already removed everybody.
    pub async fn filter_all(
        &self,
        recipients: &Recipients,
    ) -> Result<Recipients, SuppressionError> {
        let mut remaining = recipients.clone();

        for list in SuppressionList::ALL {
            remaining = self.filter(&remaining, list).await?;
        }

        Ok(remaining)
    }
}
