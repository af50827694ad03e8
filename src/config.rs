//! Reader configuration.
//!
//! Every policy knob lives here: exclusion selectors, voice preference,
//! control labels. All fields default to the values the original host page
//! shipped with, so an empty JSON object is a valid configuration.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::extract::ExclusionPolicy;
use crate::ui::UiLabels;
use crate::voice::VoicePreference;

/// Full reader configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub exclusions: ExclusionPolicy,
    pub voice: VoicePreference,
    pub labels: UiLabels,
}

impl ReaderConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Cannot parse reader configuration")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_valid() {
        let config = ReaderConfig::from_json("{}").unwrap();
        assert_eq!(config.voice.locale, "pt-BR");
        assert!(config.exclusions.always.contains(&".carousel".to_string()));
        assert_eq!(config.labels.read, "Ler");
    }

    #[test]
    fn test_partial_override() {
        let config = ReaderConfig::from_json(
            r#"{
                "voice": { "locale": "en-US", "language": "en", "preferred_names": [] },
                "labels": { "read": "Read" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.voice.locale, "en-US");
        assert!(config.voice.preferred_names.is_empty());
        assert_eq!(config.labels.read, "Read");
        // untouched sections keep their defaults
        assert!(config.exclusions.whole_document.contains(&"nav".to_string()));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = ReaderConfig::from_json("{ nope").unwrap_err();
        assert!(err.to_string().contains("reader configuration"));
    }
}
