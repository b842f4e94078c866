//! The event that triggered a labeling run.
//!
//! Events are validated here, at the boundary, so that the rest of the crate
//! can rely on a well-formed [`PushEvent`].

use github_client::{AuthorKind, Commit, CommitAuthor};
use serde::{Deserialize, Serialize};

use crate::errors::EventError;

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

/// The event name GitHub uses for branch and tag pushes.
pub const PUSH_EVENT_NAME: &str = "push";

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// A triggering event, tagged by its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    /// A push to a branch or tag.
    Push(PushEvent),
    /// Any other event. Only the event name is kept.
    Unsupported(String),
}

impl TriggerEvent {
    /// Builds a trigger event from the event name and its JSON payload.
    ///
    /// The payload is only parsed for push events; for any other event it is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns `EventError::InvalidPayload` if a push payload is not valid JSON,
    /// lacks one of `ref`, `before`, `after` or `commits`, or has an empty
    /// `before` or `after` revision.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use commit_labeler_core::TriggerEvent;
    ///
    /// let event = TriggerEvent::from_json("pull_request", "{}").unwrap();
    /// assert_eq!(event, TriggerEvent::Unsupported("pull_request".to_string()));
    /// ```
    pub fn from_json(event_name: &str, payload: &str) -> Result<Self, EventError> {
        if event_name != PUSH_EVENT_NAME {
            return Ok(Self::Unsupported(event_name.to_string()));
        }

        let push = serde_json::from_str::<PushEvent>(payload)
            .and_then(PushEvent::validated)
            .map_err(|e| EventError::InvalidPayload {
                event: event_name.to_string(),
                source: e,
            })?;
        Ok(Self::Push(push))
    }

    /// Returns the GitHub name of the event.
    pub fn name(&self) -> &str {
        match self {
            Self::Push(_) => PUSH_EVENT_NAME,
            Self::Unsupported(name) => name,
        }
    }
}

/// The parts of a push payload needed to find the pushed commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushEvent {
    /// The full ref that was pushed, e.g. `refs/heads/main`.
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// The SHA of the ref before the push.
    pub before: String,
    /// The SHA of the ref after the push.
    pub after: String,
    /// The pushed commits as listed in the payload. GitHub truncates this list,
    /// so it is only used when there is nothing to compare against.
    pub commits: Vec<InlineCommit>,
}

impl PushEvent {
    /// Rejects payloads whose `before` or `after` revision is empty.
    fn validated(self) -> Result<Self, serde_json::Error> {
        for (field, value) in [("before", &self.before), ("after", &self.after)] {
            if value.trim().is_empty() {
                return Err(serde::de::Error::custom(format!(
                    "field `{}` must not be empty",
                    field
                )));
            }
        }
        Ok(self)
    }

    /// Returns the pushed branch, or `None` when a tag or other ref was pushed.
    pub fn branch(&self) -> Option<&str> {
        self.git_ref.strip_prefix(BRANCH_REF_PREFIX)
    }

    /// Returns `true` when the push created the ref.
    pub fn is_branch_creation(&self) -> bool {
        is_null_sha(&self.before)
    }

    /// Returns `true` when the push deleted the ref.
    pub fn is_branch_deletion(&self) -> bool {
        is_null_sha(&self.after)
    }
}

/// A commit as listed inline in a push payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineCommit {
    /// The commit SHA.
    pub id: String,
    /// The commit message.
    pub message: String,
    /// The git author of the commit.
    #[serde(default)]
    pub author: InlineAuthor,
}

/// The git author of an inline commit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InlineAuthor {
    /// The GitHub login, present when the e-mail is linked to an account.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<&InlineCommit> for Commit {
    fn from(value: &InlineCommit) -> Self {
        let username = value.author.username.clone();
        Commit {
            sha: value.id.clone(),
            message: value.message.clone(),
            author: CommitAuthor {
                kind: AuthorKind::classify(username.as_deref(), None),
                login: username,
            },
        }
    }
}

fn is_null_sha(sha: &str) -> bool {
    !sha.is_empty() && sha.bytes().all(|b| b == b'0')
}
