//! Configuration management for the commit labeler CLI.
//!
//! Options are taken, highest precedence first, from:
//!
//! 1. Command-line flags
//! 2. Environment variables, including the `INPUT_*` variables GitHub Actions
//!    sets for action inputs and the `GITHUB_*` runner variables
//! 3. An optional TOML configuration file given with `--config`
//!
//! Empty values are treated as unset, since GitHub Actions passes inputs that
//! were not provided as empty strings.

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use commit_labeler_core::{LabelDefinition, RepositoryId, RunSettings};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Values accepted as "true" for boolean options, compared case-insensitively.
const TRUTHY_VALUES: [&str; 4] = ["true", "1", "yes", "on"];

/// Command-line arguments of the `commit-labeler` binary.
#[derive(Parser, Debug, Default)]
#[command(name = "commit-labeler")]
#[command(
    about = "Label the issues and pull requests referenced by the commits of a push",
    long_about = None,
    version
)]
pub struct Args {
    /// Only pushes to this branch are processed
    #[arg(long, env = "INPUT_BRANCH")]
    pub branch: Option<String>,

    /// The label to apply
    #[arg(long, env = "INPUT_LABEL")]
    pub label: Option<String>,

    /// Colour used if the label has to be created
    #[arg(long, env = "INPUT_LABEL_COLOR")]
    pub label_color: Option<String>,

    /// Description used if the label has to be created
    #[arg(long, env = "INPUT_LABEL_DESCRIPTION")]
    pub label_description: Option<String>,

    /// GitHub token used for all API calls
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Skip commits authored by bots (true/false)
    #[arg(long, env = "INPUT_EXCLUDE_BOTS")]
    pub exclude_bots: Option<String>,

    /// The repository, as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// The GitHub REST API root
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// The name of the triggering event
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    pub event_name: Option<String>,

    /// Path to the JSON payload of the triggering event
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// Optional TOML configuration file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}

/// Options that may be set in the TOML configuration file.
///
/// The token is deliberately not accepted here so that it never ends up in a
/// checked-in file.
///
/// # Example TOML Configuration
///
/// ```toml
/// branch = "main"
/// label = "released"
/// label_color = "0e8a16"
/// exclude_bots = true
/// ```
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub branch: Option<String>,
    pub label: Option<String>,
    pub label_color: Option<String>,
    pub label_description: Option<String>,
    pub exclude_bots: Option<bool>,
    pub repository: Option<String>,
    pub api_url: Option<String>,
}

impl FileConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::LoadFile` if the file cannot be read and
    /// `Error::ParseTomlFile` if it is not valid TOML for this schema.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        let content = fs::read_to_string(path).map_err(|e| Error::LoadFile {
            path: path.display().to_string(),
            source: e,
        })?;

        toml::from_str(&content).map_err(Error::ParseTomlFile)
    }
}

/// Fully resolved configuration for one run.
#[derive(Debug)]
pub struct LabelerConfig {
    /// Settings handed to the labeling run
    pub settings: RunSettings,
    /// Token for the repository service
    pub token: SecretString,
    /// REST API root, `None` for github.com
    pub api_url: Option<String>,
    /// Name of the triggering event
    pub event_name: String,
    /// Path to the event payload
    pub event_path: Option<PathBuf>,
}

impl LabelerConfig {
    /// Merges the command-line/environment arguments with the optional file configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a required option is missing or invalid, and
    /// the file loading errors of [`FileConfig::load`].
    pub fn from_args(args: Args) -> Result<Self, Error> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        Self::merge(args, file)
    }

    fn merge(args: Args, file: FileConfig) -> Result<Self, Error> {
        let branch = required("branch", non_empty(args.branch).or(file.branch))?;
        let label_name = required("label", non_empty(args.label).or(file.label))?;
        let token = required("token", non_empty(args.token))?;
        let repository = required(
            "repository",
            non_empty(args.repository).or(file.repository),
        )?;
        let event_name = required("event_name", non_empty(args.event_name))?;

        let repository = repository
            .parse::<RepositoryId>()
            .map_err(|e| Error::Config(e.to_string()))?;

        let exclude_bots = match non_empty(args.exclude_bots) {
            Some(value) => is_truthy(&value),
            None => file.exclude_bots.unwrap_or(false),
        };

        let mut label = LabelDefinition::new(label_name);
        if let Some(color) = non_empty(args.label_color).or(file.label_color) {
            label.color = normalize_color(&color)?;
        }
        label.description = non_empty(args.label_description).or(file.label_description);

        Ok(Self {
            settings: RunSettings {
                repository,
                branch,
                label,
                exclude_bots,
            },
            token: SecretString::from(token),
            api_url: non_empty(args.api_url).or(file.api_url),
            event_name,
            event_path: args.event_path.filter(|p| !p.as_os_str().is_empty()),
        })
    }
}

/// Returns `true` for the values accepted as an enabled boolean option.
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    TRUTHY_VALUES
        .iter()
        .any(|truthy| truthy.eq_ignore_ascii_case(value))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(name: &str, value: Option<String>) -> Result<String, Error> {
    value.ok_or_else(|| Error::Config(format!("Missing required option '{}'", name)))
}

/// Accepts `rrggbb` with or without a leading `#`.
fn normalize_color(color: &str) -> Result<String, Error> {
    let color = color.trim().trim_start_matches('#');
    if color.len() == 6 && color.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(color.to_ascii_lowercase())
    } else {
        Err(Error::Config(format!(
            "Label colour '{}' is not a 6 digit hex colour",
            color
        )))
    }
}
