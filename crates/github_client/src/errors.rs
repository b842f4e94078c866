//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when interacting with the GitHub API
//! through the github_client crate.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// None of these errors are retried by the client. Callers decide whether a
/// failure aborts their work or is only reported.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::{Error, RepositoryClient};
///
/// match client.add_label_to_issue("owner", "repo", 12, "released").await {
///     Ok(()) => println!("Labeled #12"),
///     Err(Error::NotFound) => eprintln!("#12 does not exist"),
///     Err(Error::RateLimitExceeded) => eprintln!("Rate limit exceeded, retry later"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Authentication or GitHub client initialization failure.
    ///
    /// The contained string provides specific details about the failure.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// GitHub rejected the request with an error status.
    ///
    /// Carries the HTTP status code and the message from the GitHub error body.
    #[error("GitHub returned status {status}: {message}")]
    GitHub { status: u16, message: String },

    /// The GitHub API returned a response in an unexpected format, or the
    /// request could not be sent at all.
    #[error("Invalid response format")]
    InvalidResponse,

    /// The requested resource was not found.
    ///
    /// GitHub also answers 404 when the token cannot see the resource.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}
