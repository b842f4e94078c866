//! Commit labeler CLI library exports for integration testing.

pub mod annotations;
pub mod config;
pub mod errors;
pub mod runner;
