//! The labeling run as a whole.
//!
//! A run either skips the event, resolves nothing, or resolves a set of
//! issues and pull requests and labels each of them.

use github_client::RepositoryClient;
use tracing::{debug, info, warn};

use crate::errors::CoreResult;
use crate::event::TriggerEvent;
use crate::label_manager::{ApplyLabelResult, LabelManager};
use crate::resolver::CommitResolver;
use crate::settings::RunSettings;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// How a labeling run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The event was not a push. Carries the event name.
    SkippedUnsupportedEvent(String),

    /// The push was not to the configured branch.
    SkippedBranchMismatch {
        /// The configured branch
        expected: String,
        /// The pushed branch, or the full ref if a tag was pushed
        actual: String,
    },

    /// No issue or pull request was referenced by the pushed commits.
    NothingToLabel,

    /// The label was applied; some targets may have failed.
    Labeled(ApplyLabelResult),
}

impl RunOutcome {
    /// Returns `true` if the run should be reported as failed.
    ///
    /// Only label application failures fail an otherwise completed run.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Labeled(result) if !result.is_success())
    }
}

/// Runs the labeling pipeline for one triggering event.
///
/// # Behavior
///
/// 1. Anything but a push is skipped with a warning.
/// 2. A push to any ref other than the configured branch is skipped.
/// 3. The pushed commits are resolved into a set of issue and pull request numbers.
/// 4. If the set is empty the run ends without further calls.
/// 5. Otherwise the label is created if missing and applied to every number.
///
/// # Errors
///
/// Returns `CoreError::Upstream` if resolving the commits, listing the labels
/// or creating the label fails. Failures to label individual targets are
/// reported through [`RunOutcome::Labeled`] instead.
pub async fn run<C: RepositoryClient + ?Sized>(
    client: &C,
    settings: &RunSettings,
    event: &TriggerEvent,
) -> CoreResult<RunOutcome> {
    let push = match event {
        TriggerEvent::Push(push) => push,
        TriggerEvent::Unsupported(name) => {
            warn!(event = name, "Unsupported event: {}", name);
            return Ok(RunOutcome::SkippedUnsupportedEvent(name.clone()));
        }
    };

    match push.branch() {
        Some(branch) if branch == settings.branch => {}
        other => {
            let actual = other.unwrap_or(push.git_ref.as_str()).to_string();
            debug!(
                expected = settings.branch,
                actual = actual,
                "Skipping branch {}",
                actual
            );
            return Ok(RunOutcome::SkippedBranchMismatch {
                expected: settings.branch.clone(),
                actual,
            });
        }
    }

    debug!(
        "Applying label \"{}\" to issues and PRs committed in {} ...",
        settings.label.name, settings.branch
    );

    let resolved = CommitResolver::new(client, &settings.repository)
        .resolve(push, settings.exclude_bots)
        .await?;

    if resolved.is_empty() {
        info!(
            repository = %settings.repository,
            "No issues or pull requests referenced by the pushed commits"
        );
        return Ok(RunOutcome::NothingToLabel);
    }

    let manager = LabelManager::new(client, &settings.repository);
    manager.ensure_label(&settings.label).await?;

    let result = manager
        .apply_label(&settings.label.name, resolved.iter())
        .await;

    Ok(RunOutcome::Labeled(result))
}
