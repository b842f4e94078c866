//! Crate for interacting with the GitHub REST API.
//!
//! This crate provides the [`RepositoryClient`] trait, which describes the
//! repository operations needed to label the issues and pull requests touched
//! by a push, and [`GitHubClient`], an implementation backed by `octocrab`.

use async_trait::async_trait;
use octocrab::{Octocrab, Result as OctocrabResult};
use tracing::{debug, error, info, instrument};

pub mod errors;
pub use errors::Error;

pub mod commit;
pub use commit::{AuthorKind, Commit, CommitAuthor, ComparisonPage, COMPARE_PAGE_SIZE};

pub mod label;
pub use label::{Label, LABEL_PAGE_SIZE};

pub mod pull_request;
pub use pull_request::PullRequestRef;

use commit::CompareResponse;
use label::{AddLabelsPayload, LabelCreatePayload, PageParams};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// The GitHub REST API root used when no other URL is configured.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Trait for the repository operations used to label issues and pull requests.
///
/// Implementations perform exactly one logical operation per call and never
/// retry. Paged operations take the page to fetch so that callers can walk
/// the pages one at a time.
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// Fetches one page of the commits between two revisions.
    ///
    /// # Arguments
    ///
    /// * `owner` - The owner of the repository (user or organization name).
    /// * `repo` - The name of the repository.
    /// * `base` - The revision to compare from (exclusive).
    /// * `head` - The revision to compare to (inclusive).
    /// * `page` - The 1-based page number.
    ///
    /// # Errors
    /// Returns an `Error` if the API call fails.
    async fn compare_commits(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
        page: u32,
    ) -> Result<ComparisonPage, Error>;

    /// Lists the pull requests associated with a commit.
    ///
    /// # Errors
    /// Returns an `Error` if the API call fails.
    async fn list_pull_requests_for_commit(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<Vec<PullRequestRef>, Error>;

    /// Lists the names of all labels defined in a repository.
    ///
    /// # Errors
    /// Returns an `Error` if any page cannot be fetched.
    async fn list_repository_labels(&self, owner: &str, repo: &str) -> Result<Vec<String>, Error>;

    /// Creates a label in a repository.
    ///
    /// # Arguments
    ///
    /// * `name` - The label name.
    /// * `color` - Hex colour of the label, without the leading `#`.
    /// * `description` - Optional label description.
    ///
    /// # Errors
    /// Returns an `Error` if the API call fails, including when the label already exists.
    async fn create_label(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
        color: &str,
        description: Option<&str>,
    ) -> Result<(), Error>;

    /// Adds a label to an issue or pull request.
    ///
    /// Pull requests share the issue number space, so `number` may refer to either.
    ///
    /// # Errors
    /// Returns an `Error` if the API call fails.
    async fn add_label_to_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        label: &str,
    ) -> Result<(), Error>;
}

/// A client for interacting with the GitHub API.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` from an authenticated `Octocrab` instance.
    ///
    /// See [`create_token_client`] for building one from a token.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RepositoryClient for GitHubClient {
    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn compare_commits(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
        page: u32,
    ) -> Result<ComparisonPage, Error> {
        let path = format!("/repos/{}/{}/compare/{}...{}", owner, repo, base, head);
        let params = PageParams {
            per_page: COMPARE_PAGE_SIZE,
            page,
        };

        debug!("Making API call to: {}", path);
        let response: OctocrabResult<CompareResponse> =
            self.client.get(path, Some(&params)).await;

        match response {
            Ok(body) => {
                let page = ComparisonPage::from_response(body, page, COMPARE_PAGE_SIZE);
                debug!(
                    commit_count = page.commits.len(),
                    total_commits = page.total_commits,
                    next_page = ?page.next_page,
                    "Fetched comparison page"
                );
                Ok(page)
            }
            Err(e) => Err(map_octocrab_error("Failed to compare commits", e)),
        }
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn list_pull_requests_for_commit(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<Vec<PullRequestRef>, Error> {
        let path = format!("/repos/{}/{}/commits/{}/pulls", owner, repo, sha);

        let response: OctocrabResult<Vec<PullRequestRef>> =
            self.client.get(path, None::<&()>).await;
        response.map_err(|e| {
            map_octocrab_error("Failed to list pull requests associated with commit", e)
        })
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn list_repository_labels(&self, owner: &str, repo: &str) -> Result<Vec<String>, Error> {
        let path = format!("/repos/{}/{}/labels", owner, repo);

        let mut names = Vec::new();
        let mut page = 1;
        loop {
            let params = PageParams {
                per_page: LABEL_PAGE_SIZE,
                page,
            };
            let response: OctocrabResult<Vec<Label>> =
                self.client.get(&path, Some(&params)).await;
            let labels = response
                .map_err(|e| map_octocrab_error("Failed to list repository labels", e))?;

            let count = labels.len();
            names.extend(labels.into_iter().map(|l| l.name));

            if count < LABEL_PAGE_SIZE as usize {
                break;
            }
            page += 1;
        }

        debug!(label_count = names.len(), "Listed repository labels");
        Ok(names)
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn create_label(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
        color: &str,
        description: Option<&str>,
    ) -> Result<(), Error> {
        let path = format!("/repos/{}/{}/labels", owner, repo);
        let payload = LabelCreatePayload {
            name,
            color,
            description,
        };

        let response: OctocrabResult<Label> = self.client.post(path, Some(&payload)).await;
        match response {
            Ok(label) => {
                info!(label = label.name, "Created label");
                Ok(())
            }
            Err(e) => Err(map_octocrab_error("Failed to create label", e)),
        }
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn add_label_to_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        label: &str,
    ) -> Result<(), Error> {
        let path = format!("/repos/{}/{}/issues/{}/labels", owner, repo, number);
        let payload = AddLabelsPayload {
            labels: vec![label],
        };

        let response: OctocrabResult<Vec<Label>> = self.client.post(path, Some(&payload)).await;
        response
            .map(|_| ())
            .map_err(|e| map_octocrab_error("Failed to add label to issue", e))
    }
}

/// Creates an `Octocrab` client authenticated with a personal or installation access token.
///
/// # Arguments
///
/// * `token` - The access token.
/// * `base_uri` - The REST API root, e.g. a GitHub Enterprise Server URL. Defaults to
///   [`DEFAULT_API_URL`] when `None`.
///
/// # Errors
///
/// Returns an `Error::AuthError` if the base URI is invalid or the client cannot be built.
///
/// # Example
///
/// ```rust,no_run
/// use github_client::{create_token_client, GitHubClient};
///
/// let octocrab = create_token_client("ghp_example", None).unwrap();
/// let client = GitHubClient::new(octocrab);
/// ```
#[instrument(skip(token))]
pub fn create_token_client(token: &str, base_uri: Option<&str>) -> Result<Octocrab, Error> {
    let base_uri = base_uri.unwrap_or(DEFAULT_API_URL);

    Octocrab::builder()
        .base_uri(base_uri)
        .map_err(|e| {
            error!(base_uri = base_uri, error = %e, "Invalid GitHub API URL");
            Error::AuthError(format!("Invalid GitHub API URL '{}': {}", base_uri, e))
        })?
        .personal_token(token.to_string())
        .build()
        .map_err(|e| {
            error!(error = ?e, "Failed to build Octocrab client with token credentials");
            Error::AuthError("Failed to build a client for the access token.".to_string())
        })
}

/// Logs an octocrab error and converts it into an [`Error`].
fn map_octocrab_error(message: &str, e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, backtrace } => {
            let status = source.status_code.as_u16();
            error!(
                status = status,
                error_message = %source.message,
                backtrace = backtrace.to_string(),
                "{}. Received an error from GitHub",
                message
            );

            match status {
                404 => Error::NotFound,
                429 => Error::RateLimitExceeded,
                403 if source.message.to_ascii_lowercase().contains("rate limit") => {
                    Error::RateLimitExceeded
                }
                _ => Error::GitHub {
                    status,
                    message: source.message,
                },
            }
        }
        octocrab::Error::UriParse { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}. Failed to parse URI.",
                message
            );
            Error::InvalidResponse
        }
        _ => {
            error!(error_message = e.to_string(), "{}", message);
            Error::InvalidResponse
        }
    }
}
