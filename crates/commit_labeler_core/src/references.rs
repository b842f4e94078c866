//! Extraction of issue references from commit messages.
//!
//! A commit closes an issue when its message contains a close keyword followed
//! by `#<number>`, e.g. `Fixes #12` or `resolved: #7`.

use regex::Regex;
use std::sync::LazyLock;

#[cfg(test)]
#[path = "references_tests.rs"]
mod tests;

/// The recognised close keywords, in the order their matches are reported.
pub const CLOSE_KEYWORDS: [&str; 9] = [
    "close", "closes", "closed", "fix", "fixes", "fixed", "resolve", "resolves", "resolved",
];

static CLOSE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    CLOSE_KEYWORDS
        .iter()
        .map(|keyword| {
            Regex::new(&format!(r"(?i){keyword}\s*:?\s*#(\d+)"))
                .expect("close keyword patterns are valid regular expressions")
        })
        .collect()
});

/// Returns the issue numbers a commit message closes.
///
/// Matches are grouped by keyword in [`CLOSE_KEYWORDS`] order, then by position
/// in the message. The same number may appear more than once.
///
/// # Examples
///
/// ```rust
/// use commit_labeler_core::references::extract_closed_references;
///
/// assert_eq!(extract_closed_references("Fixes #12, closes: #3"), vec![3, 12]);
/// assert!(extract_closed_references("Refs #12").is_empty());
/// ```
pub fn extract_closed_references(message: &str) -> Vec<u64> {
    CLOSE_PATTERNS
        .iter()
        .flat_map(|pattern| {
            pattern
                .captures_iter(message)
                // Numbers too large for u64 cannot address an issue
                .filter_map(|captures| captures[1].parse::<u64>().ok())
        })
        .collect()
}
