//! Filename sanitization.

use regex::Regex;
use std::sync::OnceLock;

static WORD_RUNS: OnceLock<Regex> = OnceLock::new();

/// Derive a filesystem-safe base name from a record title
///
/// Keeps only alphanumeric word runs, joined with underscores, so two
/// distinct titles normally map to distinct file names. Titles without a
/// single word character fall back to `UNTITLED`.
pub fn sanitize_title(title: &str) -> String {
    let word_runs = WORD_RUNS.get_or_init(|| Regex::new(r"\w+").expect("valid word-run pattern"));

    let parts: Vec<&str> = word_runs.find_iter(title).map(|m| m.as_str()).collect();
    if parts.is_empty() {
        "UNTITLED".to_string()
    } else {
        parts.join("_")
    }
}
