//! Label management operations for repositories.
//!
//! This module provides the [`LabelManager`] component, which makes sure the
//! configured label exists and applies it to each resolved issue or pull
//! request, isolating failures per target.

use github_client::RepositoryClient;
use std::fmt;
use tracing::{error, info};

use crate::errors::{CoreError, CoreResult};
use crate::settings::{LabelDefinition, RepositoryId};

#[cfg(test)]
#[path = "label_manager_tests.rs"]
mod tests;

/// Whether the label had to be created before it could be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStatus {
    /// The label was already defined in the repository.
    Existing,
    /// The label was created by this run.
    Created,
}

/// Manages label operations for a repository.
///
/// # Examples
///
/// ```rust,no_run
/// use commit_labeler_core::{LabelDefinition, LabelManager, RepositoryId};
/// use github_client::GitHubClient;
///
/// # async fn example(client: GitHubClient) -> Result<(), Box<dyn std::error::Error>> {
/// let repository = RepositoryId::new("my-org", "my-repo");
/// let manager = LabelManager::new(&client, &repository);
///
/// let label = LabelDefinition::new("released");
/// manager.ensure_label(&label).await?;
///
/// let result = manager.apply_label(&label.name, [12, 15]).await;
/// println!("Labeled: {:?}, failed: {}", result.labeled, result.failures.len());
/// # Ok(())
/// # }
/// ```
pub struct LabelManager<'a, C: RepositoryClient + ?Sized> {
    /// GitHub client for API operations
    client: &'a C,
    repository: &'a RepositoryId,
}

impl<'a, C: RepositoryClient + ?Sized> LabelManager<'a, C> {
    /// Creates a new LabelManager for a repository.
    pub fn new(client: &'a C, repository: &'a RepositoryId) -> Self {
        Self { client, repository }
    }

    /// Makes sure the label is defined in the repository, creating it if needed.
    ///
    /// GitHub compares label names case-insensitively, so an existing label
    /// that differs only in case counts as present.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Upstream` if the labels cannot be listed or the
    /// label cannot be created.
    pub async fn ensure_label(&self, label: &LabelDefinition) -> CoreResult<LabelStatus> {
        let existing = self.list_labels().await?;

        if existing
            .iter()
            .any(|name| name.eq_ignore_ascii_case(&label.name))
        {
            info!(label = label.name, "Label already exists");
            return Ok(LabelStatus::Existing);
        }

        info!(
            label = label.name,
            color = label.color,
            repository = %self.repository,
            "Creating label"
        );
        self.client
            .create_label(
                &self.repository.owner,
                &self.repository.name,
                &label.name,
                &label.color,
                label.description.as_deref(),
            )
            .await
            .map_err(|e| {
                CoreError::upstream(
                    format!("create label '{}' in {}", label.name, self.repository),
                    e,
                )
            })?;

        Ok(LabelStatus::Created)
    }

    /// Applies the label to each target.
    ///
    /// Every target is attempted exactly once, in the order given, even when
    /// earlier attempts failed. Labels that were applied successfully are kept
    /// regardless of later failures.
    pub async fn apply_label(
        &self,
        label: &str,
        targets: impl IntoIterator<Item = u64>,
    ) -> ApplyLabelResult {
        let mut result = ApplyLabelResult::new();

        for number in targets {
            info!("Applying label \"{}\" on #{}", label, number);

            match self
                .client
                .add_label_to_issue(&self.repository.owner, &self.repository.name, number, label)
                .await
            {
                Ok(()) => result.labeled.push(number),
                Err(e) => {
                    let failure = LabelFailure {
                        number,
                        label: label.to_string(),
                        reason: e.to_string(),
                    };
                    error!(number = number, label = label, error = ?e, "{}", failure);
                    result.failures.push(failure);
                }
            }
        }

        info!(
            labeled = result.labeled.len(),
            failed = result.failures.len(),
            "Label application complete"
        );

        result
    }

    /// Lists all labels currently defined in the repository.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Upstream` if the API call fails.
    pub async fn list_labels(&self) -> CoreResult<Vec<String>> {
        self.client
            .list_repository_labels(&self.repository.owner, &self.repository.name)
            .await
            .map_err(|e| CoreError::upstream(format!("list labels for {}", self.repository), e))
    }
}

/// A failure to apply the label to one issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFailure {
    /// The issue or pull request number
    pub number: u64,
    /// The label that could not be applied
    pub label: String,
    /// Why the request failed
    pub reason: String,
}

impl fmt::Display for LabelFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Could not set the label \"{}\" on #{}: {}",
            self.label, self.number, self.reason
        )
    }
}

/// Result of applying a label to a set of issues and pull requests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplyLabelResult {
    /// Numbers that were labeled, in the order they were attempted
    pub labeled: Vec<u64>,

    /// Targets that could not be labeled
    pub failures: Vec<LabelFailure>,
}

impl ApplyLabelResult {
    /// Creates a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if every target was labeled.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}
