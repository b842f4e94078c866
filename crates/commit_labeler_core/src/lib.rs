//! # Commit Labeler Core
//!
//! This crate labels the issues and pull requests touched by a push.
//!
//! ## Overview
//!
//! For a push to the configured branch a run:
//! 1. Walks every commit between the `before` and `after` revisions
//! 2. Optionally skips commits authored by bots
//! 3. Collects the pull requests GitHub associates with each commit
//! 4. Collects the issues each commit message closes (`Fixes #12`, `closes: #3`, ...)
//! 5. Creates the label if the repository does not define it yet
//! 6. Applies the label to every collected number, continuing past failures
//!
//! ## Main Functions
//!
//! - [`run`] - Run the whole pipeline for one event
//! - [`CommitResolver`] - Resolve a push into a [`ResolutionSet`]
//! - [`LabelManager`] - Ensure a label exists and apply it
//! - [`extract_closed_references`] - Find the issues a commit message closes
//!
//! ## Examples
//!
//! ```no_run
//! use commit_labeler_core::{run, LabelDefinition, RepositoryId, RunSettings, TriggerEvent};
//! use github_client::{create_token_client, GitHubClient};
//!
//! # async fn example(payload: &str) -> Result<(), Box<dyn std::error::Error>> {
//! let client = GitHubClient::new(create_token_client("ghp_example", None)?);
//! let settings = RunSettings {
//!     repository: RepositoryId::new("my-org", "my-repo"),
//!     branch: "main".to_string(),
//!     label: LabelDefinition::new("released"),
//!     exclude_bots: true,
//! };
//!
//! let event = TriggerEvent::from_json("push", payload)?;
//! let outcome = run(&client, &settings, &event).await?;
//! if outcome.is_failure() {
//!     eprintln!("Some issues could not be labeled");
//! }
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub use errors::{CoreError, CoreResult, EventError};

pub mod event;
pub use event::{InlineAuthor, InlineCommit, PushEvent, TriggerEvent};

pub mod label_manager;
pub use label_manager::{ApplyLabelResult, LabelFailure, LabelManager, LabelStatus};

pub mod references;
pub use references::extract_closed_references;

pub mod resolver;
pub use resolver::{CommitResolver, ResolutionSet};

mod run;
pub use run::{run, RunOutcome};

pub mod settings;
pub use settings::{LabelDefinition, ParseRepositoryIdError, RepositoryId, RunSettings};

#[cfg(test)]
mod test_support;
