//! Executes a labeling run from a resolved configuration.

use std::{fs, path::Path};

use commit_labeler_core::{event::PUSH_EVENT_NAME, run, RunOutcome, TriggerEvent};
use github_client::{create_token_client, GitHubClient};
use secrecy::ExposeSecret;
use tracing::{error, info};

use crate::annotations::{annotate, Annotation};
use crate::config::LabelerConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;

/// Exit code for a run that completed, was skipped, or had nothing to do.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for a run in which at least one target could not be labeled.
pub const EXIT_LABEL_FAILURE: i32 = 1;

/// Exit code for a run that failed before labeling.
pub const EXIT_ERROR: i32 = 2;

/// Loads the triggering event.
///
/// The payload file is only read for push events.
///
/// # Errors
///
/// Returns `Error::Config` if a push event has no payload path,
/// `Error::LoadFile` if the payload cannot be read and `Error::Event` if it
/// is not a valid push payload.
pub fn load_event(event_name: &str, event_path: Option<&Path>) -> Result<TriggerEvent, Error> {
    if event_name != PUSH_EVENT_NAME {
        return Ok(TriggerEvent::Unsupported(event_name.to_string()));
    }

    let path = event_path
        .ok_or_else(|| Error::Config("Missing required option 'event_path'".to_string()))?;
    let payload = fs::read_to_string(path).map_err(|e| Error::LoadFile {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(TriggerEvent::from_json(event_name, &payload)?)
}

/// Runs the labeling pipeline against GitHub.
///
/// # Errors
///
/// Returns an error if the event cannot be loaded, the client cannot be
/// built, or the run fails before labeling.
pub async fn execute(config: &LabelerConfig) -> Result<RunOutcome, Error> {
    let event = load_event(&config.event_name, config.event_path.as_deref())?;

    let octocrab = create_token_client(config.token.expose_secret(), config.api_url.as_deref())?;
    let client = GitHubClient::new(octocrab);

    Ok(run(&client, &config.settings, &event).await?)
}

/// Reports the outcome of a run and returns the process exit code.
pub fn report(outcome: &RunOutcome) -> i32 {
    match outcome {
        RunOutcome::SkippedUnsupportedEvent(name) => {
            annotate(Annotation::Warning, &format!("Unsupported event: {}", name));
            EXIT_SUCCESS
        }
        RunOutcome::SkippedBranchMismatch { .. } | RunOutcome::NothingToLabel => EXIT_SUCCESS,
        RunOutcome::Labeled(result) => {
            for failure in &result.failures {
                annotate(Annotation::Error, &failure.to_string());
            }

            if result.is_success() {
                info!(labeled = ?result.labeled, "Labeled all issues and pull requests");
                EXIT_SUCCESS
            } else {
                error!(
                    labeled = result.labeled.len(),
                    failed = result.failures.len(),
                    "Some issues or pull requests could not be labeled"
                );
                EXIT_LABEL_FAILURE
            }
        }
    }
}

/// Reports an error that aborted the run and returns the process exit code.
pub fn report_error(error: &Error) -> i32 {
    error!("Error: {error}");
    annotate(Annotation::Error, &error.to_string());
    EXIT_ERROR
}
