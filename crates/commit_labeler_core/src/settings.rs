//! Settings for a single labeling run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;

/// The label colour used when the label has to be created and no colour was given.
pub const DEFAULT_LABEL_COLOR: &str = "ededed";

/// Identifies a repository by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryId {
    /// The user or organization that owns the repository
    pub owner: String,
    /// The repository name
    pub name: String,
}

impl RepositoryId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Error returned when a string is not of the form `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Repository '{0}' is not of the form 'owner/name'")]
pub struct ParseRepositoryIdError(String);

impl FromStr for RepositoryId {
    type Err = ParseRepositoryIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(ParseRepositoryIdError(s.to_string())),
        }
    }
}

/// The label to ensure exists and apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDefinition {
    /// The label name
    pub name: String,
    /// Hex colour used if the label has to be created, without the leading `#`
    pub color: String,
    /// Description used if the label has to be created
    pub description: Option<String>,
}

impl LabelDefinition {
    /// Creates a label definition with the default colour and no description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: DEFAULT_LABEL_COLOR.to_string(),
            description: None,
        }
    }
}

/// Everything a labeling run needs besides the triggering event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// The repository the event belongs to
    pub repository: RepositoryId,
    /// Only pushes to this branch are processed
    pub branch: String,
    /// The label to apply
    pub label: LabelDefinition,
    /// Skip commits authored by bot accounts
    pub exclude_bots: bool,
}
