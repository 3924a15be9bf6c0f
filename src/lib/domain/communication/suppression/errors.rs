//! Suppression errors

use thiserror::Error;

use super::SuppressionList;

/// Errors raised while reading a suppression list
#[derive(Debug, Error)]
pub enum SuppressionError {
    /// The list could not be read; nothing can be assumed about its contents
    #[error("could not read the {list} suppression list")]
    LookupFailed {
        /// The list that was being read
        list: SuppressionList,

        /// The underlying failure
        #[source]
        source: anyhow::Error,
    },
}

impl SuppressionError {
    /// Wraps a storage failure for `list`
    pub fn lookup_failed(list: SuppressionList, source: impl Into<anyhow::Error>) -> Self {
        Self::LookupFailed {
            list,
            source: source.into(),
        }
    }
}
