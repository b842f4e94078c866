//! GitHub Actions workflow commands.
//!
//! When running inside GitHub Actions, warnings and failures are also printed
//! as workflow commands so that they show up as annotations on the run.

use std::env;

#[cfg(test)]
#[path = "annotations_tests.rs"]
mod tests;

/// The severity of a workflow annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    Warning,
    Error,
}

impl Annotation {
    fn command(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Returns `true` when running inside a GitHub Actions job.
pub fn is_github_actions() -> bool {
    env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

/// Formats a workflow command, escaping the message so that it stays on one line.
pub fn workflow_command(annotation: Annotation, message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::{}::{}", annotation.command(), escaped)
}

/// Prints a workflow command when running inside GitHub Actions.
pub fn annotate(annotation: Annotation, message: &str) {
    if is_github_actions() {
        println!("{}", workflow_command(annotation, message));
    }
}
