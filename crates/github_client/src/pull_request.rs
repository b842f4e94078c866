//! Pull request domain types.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "pull_request_tests.rs"]
mod tests;

/// A pull request associated with a commit.
///
/// Only the fields needed to address the pull request are kept. Labels are
/// always applied through the public `number`; the internal `id` is carried
/// for diagnostics only and must never be used as an issue number.
///
/// # Examples
///
/// ```rust
/// use github_client::PullRequestRef;
///
/// let pr: PullRequestRef = serde_json::from_str(r#"{"id": 1296269, "number": 1347}"#).unwrap();
/// assert_eq!(pr.number, 1347);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRef {
    /// The internal GitHub ID of the pull request
    pub id: u64,
    /// The public number of the pull request within its repository
    pub number: u64,
}
