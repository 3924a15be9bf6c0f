//! Failure reporting

use std::error::Error as _;

#[cfg(test)]
use mockall::mock;
use tracing::error;

use super::DispatchError;

/// Where absorbed dispatch failures go.
///
/// The dispatch pipeline never returns an error to its caller, so this is the only
/// place a failure becomes visible.
pub trait FailureReporter: Clone + Send + Sync + 'static {
    /// Records one failed dispatch
    fn report(&self, error: &DispatchError);
}

#[cfg(test)]
mock! {
    pub FailureReporter {}

    impl Clone for FailureReporter {
        fn clone(&self) -> Self;
    }

    impl FailureReporter for FailureReporter {
        fn report(&self, error: &DispatchError);
    }
}

/// Reports failures through `tracing`
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl FailureReporter for TracingReporter {
    fn report(&self, err: &DispatchError) {
        let mut causes = Vec::new();
        let mut source = err.source();

        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        error!(causes = ?causes, "email dispatch failed: {}", err);
    }
}
