use std::io;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the commit labeler CLI application.
#[derive(Error, Debug)]
pub enum Error {
    /// The GitHub client could not be created.
    #[error("GitHub client error: {0}")]
    Client(#[from] github_client::Error),

    /// Configuration error occurred while loading or validating configuration.
    ///
    /// This error is returned when a required option is missing or has an
    /// invalid value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The labeling run failed before any label was applied.
    #[error(transparent)]
    Core(#[from] commit_labeler_core::CoreError),

    /// The triggering event payload is invalid.
    #[error(transparent)]
    Event(#[from] commit_labeler_core::EventError),

    /// Failed to load a file from the filesystem.
    #[error("Failed to load file '{path}'.")]
    LoadFile {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Failed to parse a TOML configuration file.
    #[error("Failed to parse TOML configuration file.")]
    ParseTomlFile(#[source] toml::de::Error),
}
