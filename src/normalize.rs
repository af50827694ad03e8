//! Whitespace normalisation for extracted document text.
//!
//! Every text snapshot the reader works with goes through [`normalize`]
//! first, so absolute character offsets stay comparable across successive
//! extractions of the same region.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every run of whitespace (spaces, tabs, newlines) to a single
/// space and trim the ends. Pure and total; empty input yields `""`.
pub fn normalize(raw: &str) -> String {
    RE_SPACES.replace_all(raw.trim(), " ").into_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_runs() {
        assert_eq!(normalize("a  b\t\tc\n\nd"), "a b c d");
    }

    #[test]
    fn test_trims_ends() {
        assert_eq!(normalize("  hello world \n"), "hello world");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t\n "), "");
    }

    #[test]
    fn test_already_clean_is_unchanged() {
        assert_eq!(normalize("já limpo"), "já limpo");
    }
}
