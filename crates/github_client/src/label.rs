//! Label domain types.
//!
//! This module contains types representing GitHub issue and pull request labels.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "label_tests.rs"]
mod tests;

/// The number of labels requested per page when listing repository labels.
pub const LABEL_PAGE_SIZE: u32 = 100;

/// Represents a label on a pull request or issue.
///
/// # Examples
///
/// ```
/// use github_client::Label;
///
/// let label = Label {
///     name: "bug".to_string(),
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// The name of the label
    pub name: String,
}

/// Payload for `POST /repos/{owner}/{repo}/labels`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct LabelCreatePayload<'a> {
    pub name: &'a str,
    /// Hex colour without the leading `#`
    pub color: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

/// Payload for `POST /repos/{owner}/{repo}/issues/{number}/labels`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct AddLabelsPayload<'a> {
    pub labels: Vec<&'a str>,
}

/// Query parameters for paginated list endpoints.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PageParams {
    pub per_page: u32,
    pub page: u32,
}
