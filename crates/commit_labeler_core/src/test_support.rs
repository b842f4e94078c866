//! Recording mock of the repository service shared by the unit tests.

use async_trait::async_trait;
use github_client::{
    AuthorKind, Commit, CommitAuthor, ComparisonPage, Error, PullRequestRef, RepositoryClient,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// A call made against [`MockRepositoryClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Compare { base: String, head: String, page: u32 },
    PullRequests { sha: String },
    ListLabels,
    CreateLabel { name: String, color: String },
    AddLabel { number: u64, label: String },
}

#[derive(Default)]
pub struct MockRepositoryClient {
    pages: Vec<Vec<Commit>>,
    pull_requests: HashMap<String, Vec<u64>>,
    labels: Vec<String>,
    failing_targets: HashSet<u64>,
    fail_compare: bool,
    fail_list_labels: bool,
    fail_create_label: bool,
    calls: Mutex<Vec<Call>>,
}

impl MockRepositoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each inner vector is served as one comparison page, in order.
    pub fn with_pages(mut self, pages: Vec<Vec<Commit>>) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_pull_requests(mut self, sha: &str, numbers: &[u64]) -> Self {
        self.pull_requests.insert(sha.to_string(), numbers.to_vec());
        self
    }

    pub fn with_labels(mut self, labels: &[&str]) -> Self {
        self.labels = labels.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn failing_on(mut self, number: u64) -> Self {
        self.failing_targets.insert(number);
        self
    }

    pub fn failing_compare(mut self) -> Self {
        self.fail_compare = true;
        self
    }

    pub fn failing_list_labels(mut self) -> Self {
        self.fail_list_labels = true;
        self
    }

    pub fn failing_create_label(mut self) -> Self {
        self.fail_create_label = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn labeled_targets(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::AddLabel { number, .. } => Some(number),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RepositoryClient for MockRepositoryClient {
    async fn compare_commits(
        &self,
        _owner: &str,
        _repo: &str,
        base: &str,
        head: &str,
        page: u32,
    ) -> Result<ComparisonPage, Error> {
        self.record(Call::Compare {
            base: base.to_string(),
            head: head.to_string(),
            page,
        });

        if self.fail_compare {
            return Err(Error::NotFound);
        }

        let index = (page as usize).saturating_sub(1);
        let commits = self.pages.get(index).cloned().unwrap_or_default();
        let total_commits = self.pages.iter().map(Vec::len).sum::<usize>() as u64;
        let next_page = if index + 1 < self.pages.len() {
            Some(page + 1)
        } else {
            None
        };

        Ok(ComparisonPage {
            commits,
            total_commits,
            next_page,
        })
    }

    async fn list_pull_requests_for_commit(
        &self,
        _owner: &str,
        _repo: &str,
        sha: &str,
    ) -> Result<Vec<PullRequestRef>, Error> {
        self.record(Call::PullRequests {
            sha: sha.to_string(),
        });

        Ok(self
            .pull_requests
            .get(sha)
            .map(|numbers| {
                numbers
                    .iter()
                    .map(|&number| PullRequestRef {
                        // Internal ids deliberately differ from the public numbers
                        id: number * 1000 + 7,
                        number,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_repository_labels(
        &self,
        _owner: &str,
        _repo: &str,
    ) -> Result<Vec<String>, Error> {
        self.record(Call::ListLabels);

        if self.fail_list_labels {
            return Err(Error::RateLimitExceeded);
        }
        Ok(self.labels.clone())
    }

    async fn create_label(
        &self,
        _owner: &str,
        _repo: &str,
        name: &str,
        color: &str,
        _description: Option<&str>,
    ) -> Result<(), Error> {
        self.record(Call::CreateLabel {
            name: name.to_string(),
            color: color.to_string(),
        });

        if self.fail_create_label {
            return Err(Error::GitHub {
                status: 422,
                message: "Validation Failed".to_string(),
            });
        }
        Ok(())
    }

    async fn add_label_to_issue(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
        label: &str,
    ) -> Result<(), Error> {
        self.record(Call::AddLabel {
            number,
            label: label.to_string(),
        });

        if self.failing_targets.contains(&number) {
            return Err(Error::NotFound);
        }
        Ok(())
    }
}

pub fn user_commit(sha: &str, message: &str) -> Commit {
    Commit {
        sha: sha.to_string(),
        message: message.to_string(),
        author: CommitAuthor {
            login: Some("octocat".to_string()),
            kind: AuthorKind::User,
        },
    }
}

pub fn bot_commit(sha: &str, message: &str) -> Commit {
    Commit {
        sha: sha.to_string(),
        message: message.to_string(),
        author: CommitAuthor {
            login: Some("mergebot[bot]".to_string()),
            kind: AuthorKind::Bot,
        },
    }
}
