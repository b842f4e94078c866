//! Commit domain types.
//!
//! This module contains types representing commits returned by the GitHub
//! compare API, together with the author classification used to tell
//! automated accounts apart from humans.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "commit_tests.rs"]
mod tests;

/// The number of commits requested per page of a comparison.
pub const COMPARE_PAGE_SIZE: u32 = 100;

/// Classification of a commit author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthorKind {
    /// A human account, or an author GitHub could not link to an account.
    #[default]
    User,
    /// An automated account such as `dependabot[bot]`.
    Bot,
}

impl AuthorKind {
    /// Classifies an author from the login and the account type reported by GitHub.
    ///
    /// An account type of `Bot` always wins. When GitHub does not report a type
    /// (for instance in push payloads) a login with the `[bot]` suffix is treated
    /// as a bot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use github_client::AuthorKind;
    ///
    /// assert_eq!(AuthorKind::classify(Some("octocat"), Some("User")), AuthorKind::User);
    /// assert_eq!(AuthorKind::classify(Some("renovate[bot]"), None), AuthorKind::Bot);
    /// assert_eq!(AuthorKind::classify(None, None), AuthorKind::User);
    /// ```
    pub fn classify(login: Option<&str>, account_type: Option<&str>) -> Self {
        if account_type.is_some_and(|t| t.eq_ignore_ascii_case("bot")) {
            return Self::Bot;
        }

        if login.is_some_and(|l| l.ends_with("[bot]")) {
            return Self::Bot;
        }

        Self::User
    }

    /// Returns `true` if the author is an automated account.
    pub fn is_bot(&self) -> bool {
        matches!(self, Self::Bot)
    }
}

/// The author of a commit as far as GitHub could link it to an account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommitAuthor {
    /// The login of the linked account, if any.
    pub login: Option<String>,
    /// Whether the linked account is a human or a bot.
    pub kind: AuthorKind,
}

/// A single commit in a comparison between two revisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The commit SHA.
    pub sha: String,
    /// The full commit message.
    pub message: String,
    /// The commit author.
    pub author: CommitAuthor,
}

/// One page of commits from a comparison between two revisions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComparisonPage {
    /// The commits on this page, oldest first.
    pub commits: Vec<Commit>,
    /// The total number of commits in the compared range.
    pub total_commits: u64,
    /// The page to request next, or `None` if this was the last page.
    pub next_page: Option<u32>,
}

impl ComparisonPage {
    /// Builds a page from the raw compare response, working out whether
    /// another page follows the one that was requested.
    pub(crate) fn from_response(response: CompareResponse, page: u32, per_page: u32) -> Self {
        let commits: Vec<Commit> = response.commits.into_iter().map(Commit::from).collect();

        let seen = u64::from(page) * u64::from(per_page);
        let next_page = if !commits.is_empty() && seen < response.total_commits {
            Some(page + 1)
        } else {
            None
        };

        Self {
            commits,
            total_commits: response.total_commits,
            next_page,
        }
    }
}

/// Body of `GET /repos/{owner}/{repo}/compare/{base}...{head}`.
#[derive(Debug, Deserialize)]
pub(crate) struct CompareResponse {
    #[serde(default)]
    pub total_commits: u64,
    #[serde(default)]
    pub commits: Vec<CompareCommit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompareCommit {
    pub sha: String,
    pub commit: CompareCommitDetail,
    pub author: Option<CompareAccount>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompareCommitDetail {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompareAccount {
    pub login: String,
    #[serde(rename = "type")]
    pub account_type: Option<String>,
}

impl From<CompareCommit> for Commit {
    fn from(value: CompareCommit) -> Self {
        let author = match value.author {
            Some(account) => CommitAuthor {
                kind: AuthorKind::classify(
                    Some(&account.login),
                    account.account_type.as_deref(),
                ),
                login: Some(account.login),
            },
            None => CommitAuthor::default(),
        };

        Self {
            sha: value.sha,
            message: value.commit.message,
            author,
        }
    }
}
