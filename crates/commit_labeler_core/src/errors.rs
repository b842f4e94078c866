//! Error types for the labeling run.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised while validating the triggering event at the boundary.
#[derive(Error, Debug)]
pub enum EventError {
    /// The event payload is not valid JSON or is missing a required field.
    #[error("Invalid '{event}' event payload: {source}")]
    InvalidPayload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that abort a labeling run.
///
/// Failures to label an individual issue or pull request are not errors at
/// this level; they are collected in
/// [`ApplyLabelResult`](crate::label_manager::ApplyLabelResult).
#[derive(Error, Debug)]
pub enum CoreError {
    /// The triggering event could not be understood.
    #[error(transparent)]
    Event(#[from] EventError),

    /// A call to the repository service failed before labeling started.
    #[error("Failed to {operation}: {source}")]
    Upstream {
        operation: String,
        #[source]
        source: github_client::Error,
    },
}

impl CoreError {
    pub(crate) fn upstream(operation: impl Into<String>, source: github_client::Error) -> Self {
        Self::Upstream {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type used across the crate.
pub type CoreResult<T> = Result<T, CoreError>;
