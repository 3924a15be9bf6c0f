//! The dispatch pipeline: normalize, suppress, validate, deliver.

mod errors;
mod outcome;
mod reporter;
mod service;

pub use errors::DispatchError;
pub use outcome::{DispatchOutcome, SkipReason};
pub use reporter::{FailureReporter, TracingReporter};
pub use service::{DispatchService, DispatchServiceImpl};

#[cfg(test)]
pub mod tests {
    pub use super::reporter::MockFailureReporter;
    pub use super::service::MockDispatchService;
}
