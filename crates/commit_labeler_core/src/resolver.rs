//! Resolution of the issues and pull requests touched by a push.
//!
//! The [`CommitResolver`] walks every commit between the push's `before` and
//! `after` revisions, page by page, and collects:
//!
//! - the pull requests GitHub associates with each commit, and
//! - the issues each commit message closes via a close keyword.
//!
//! The union of both, without duplicates, is the [`ResolutionSet`].

use std::collections::BTreeSet;

use github_client::{Commit, RepositoryClient};
use tracing::{debug, warn};

use crate::errors::{CoreError, CoreResult};
use crate::event::PushEvent;
use crate::references::extract_closed_references;
use crate::settings::RepositoryId;

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;

/// The deduplicated issue and pull request numbers resolved from a push.
///
/// Iteration is in ascending numeric order. Two sets are equal when they hold
/// the same numbers, regardless of the order in which they were discovered.
#[derive(Debug, Clone, Default)]
pub struct ResolutionSet {
    targets: BTreeSet<u64>,
    pull_requests: Vec<u64>,
    issue_references: Vec<u64>,
}

impl PartialEq for ResolutionSet {
    fn eq(&self, other: &Self) -> bool {
        self.targets == other.targets
    }
}

impl Eq for ResolutionSet {}

impl ResolutionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the pull requests associated with a commit.
    pub fn add_pull_requests(&mut self, numbers: impl IntoIterator<Item = u64>) {
        for number in numbers {
            self.pull_requests.push(number);
            self.targets.insert(number);
        }
    }

    /// Records the issues referenced by a commit message.
    pub fn add_issue_references(&mut self, numbers: impl IntoIterator<Item = u64>) {
        for number in numbers {
            self.issue_references.push(number);
            self.targets.insert(number);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn contains(&self, number: u64) -> bool {
        self.targets.contains(&number)
    }

    /// Iterates over the unique numbers in the set.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.targets.iter().copied()
    }

    /// Every pull request number seen, in discovery order, duplicates included.
    pub fn pull_requests(&self) -> &[u64] {
        &self.pull_requests
    }

    /// Every issue reference seen, in discovery order, duplicates included.
    pub fn issue_references(&self) -> &[u64] {
        &self.issue_references
    }
}

/// Resolves the issue and pull request numbers touched by a push.
pub struct CommitResolver<'a, C: RepositoryClient + ?Sized> {
    client: &'a C,
    repository: &'a RepositoryId,
}

impl<'a, C: RepositoryClient + ?Sized> CommitResolver<'a, C> {
    pub fn new(client: &'a C, repository: &'a RepositoryId) -> Self {
        Self { client, repository }
    }

    /// Resolves the push into a [`ResolutionSet`].
    ///
    /// Commits are processed one at a time in the order GitHub returns them.
    /// Comparison pages are fetched lazily, so the next page is only requested
    /// once every commit on the current page has been processed.
    ///
    /// When the push created the branch there is no base revision to compare
    /// against and the commit list from the payload is used instead. A push
    /// that deleted the branch resolves to an empty set.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Upstream` if fetching a comparison page or the pull
    /// requests of a commit fails. Nothing is retried.
    pub async fn resolve(&self, push: &PushEvent, exclude_bots: bool) -> CoreResult<ResolutionSet> {
        let mut resolved = ResolutionSet::new();

        if push.is_branch_deletion() {
            debug!(git_ref = push.git_ref, "Push deleted the ref, nothing to resolve");
            return Ok(resolved);
        }

        if push.is_branch_creation() {
            warn!(
                git_ref = push.git_ref,
                commit_count = push.commits.len(),
                "Push created the ref; using the commits listed in the event, which may be truncated"
            );
            for inline in &push.commits {
                self.resolve_commit(&Commit::from(inline), exclude_bots, &mut resolved)
                    .await?;
            }
        } else {
            let mut next_page = Some(1);
            while let Some(page) = next_page {
                let comparison = self
                    .client
                    .compare_commits(
                        &self.repository.owner,
                        &self.repository.name,
                        &push.before,
                        &push.after,
                        page,
                    )
                    .await
                    .map_err(|e| {
                        CoreError::upstream(
                            format!(
                                "compare {}...{} in {}",
                                push.before, push.after, self.repository
                            ),
                            e,
                        )
                    })?;

                for commit in &comparison.commits {
                    self.resolve_commit(commit, exclude_bots, &mut resolved)
                        .await?;
                }
                next_page = comparison.next_page;
            }
        }

        debug!("PRs: {:?}", resolved.pull_requests());
        debug!("Closed issues: {:?}", resolved.issue_references());

        Ok(resolved)
    }

    async fn resolve_commit(
        &self,
        commit: &Commit,
        exclude_bots: bool,
        resolved: &mut ResolutionSet,
    ) -> CoreResult<()> {
        if exclude_bots && commit.author.kind.is_bot() {
            debug!(
                sha = commit.sha,
                author = ?commit.author.login,
                "Skipping commit authored by a bot"
            );
            return Ok(());
        }

        let pull_requests = self
            .client
            .list_pull_requests_for_commit(
                &self.repository.owner,
                &self.repository.name,
                &commit.sha,
            )
            .await
            .map_err(|e| {
                CoreError::upstream(
                    format!(
                        "list pull requests for commit {} in {}",
                        commit.sha, self.repository
                    ),
                    e,
                )
            })?;
        resolved.add_pull_requests(pull_requests.into_iter().map(|pr| pr.number));

        resolved.add_issue_references(extract_closed_references(&commit.message));

        Ok(())
    }
}
