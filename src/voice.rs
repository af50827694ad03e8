//! Voice selection as an ordered rule table.
//!
//! The fallback chain is explicit: curated voice names first, then a
//! locale match with a female-sounding name hint, then any voice in the
//! locale, then any voice in the language family, then whatever the engine
//! offers first. Each rule is a plain predicate with a description, so the
//! chain is testable without a live engine.
//!
//! Resolution runs fresh on every read start — engines load their voice
//! lists asynchronously, so a list that was empty at page load may be
//! populated by the time the user presses the button.

use serde::Deserialize;
use tracing::debug;

/// One voice reported by the speech engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Engine-reported display name, e.g. `"Microsoft Maria - Portuguese (Brazil)"`.
    pub name: String,
    /// BCP-47 locale tag, e.g. `"pt-BR"`.
    pub locale: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, locale: impl Into<String>) -> Self {
        Self { name: name.into(), locale: locale.into() }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Preference
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered voice-selection criteria. All name matching is case-insensitive
/// substring matching.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VoicePreference {
    /// Curated names tried first, in order.
    pub preferred_names: Vec<String>,
    /// Target locale, e.g. `"pt-BR"`.
    pub locale: String,
    /// Language family prefix, e.g. `"pt"`.
    pub language: String,
    /// Name fragments hinting at a female voice.
    pub female_hints: Vec<String>,
    /// Utterance locale when no voice resolves at all.
    pub fallback_locale: String,
}

impl Default for VoicePreference {
    fn default() -> Self {
        Self {
            preferred_names: vec![
                "Google português do Brasil".into(),
                "Microsoft Maria - Portuguese (Brazil)".into(),
                "Microsoft Leticia - Portuguese (Brazil)".into(),
                "Luciana".into(),
                "Camila".into(),
            ],
            locale: "pt-BR".into(),
            language: "pt".into(),
            female_hints: vec!["feminina".into(), "female".into(), "woman".into()],
            fallback_locale: "pt-BR".into(),
        }
    }
}

/// One step of the fallback chain: a predicate plus a description for
/// logging and tests.
pub struct VoiceRule {
    pub description: String,
    predicate: Box<dyn Fn(&Voice) -> bool>,
}

impl VoiceRule {
    fn new(description: impl Into<String>, predicate: impl Fn(&Voice) -> bool + 'static) -> Self {
        Self { description: description.into(), predicate: Box::new(predicate) }
    }

    pub fn matches(&self, voice: &Voice) -> bool {
        (self.predicate)(voice)
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl VoicePreference {
    /// Build the rule table, most specific first.
    pub fn rules(&self) -> Vec<VoiceRule> {
        let mut rules = Vec::new();
        for name in &self.preferred_names {
            let name = name.clone();
            rules.push(VoiceRule::new(format!("curated name '{}'", name), move |v| {
                contains_ci(&v.name, &name)
            }));
        }
        let locale = self.locale.clone();
        let hints = self.female_hints.clone();
        rules.push(VoiceRule::new(
            format!("{} voice with female name hint", self.locale),
            move |v| {
                v.locale.eq_ignore_ascii_case(&locale)
                    && hints.iter().any(|h| contains_ci(&v.name, h))
            },
        ));
        let locale = self.locale.clone();
        rules.push(VoiceRule::new(format!("any {} voice", self.locale), move |v| {
            v.locale.eq_ignore_ascii_case(&locale)
        }));
        let language = self.language.to_lowercase();
        rules.push(VoiceRule::new(
            format!("any '{}' language-family voice", self.language),
            move |v| v.locale.to_lowercase().starts_with(&language),
        ));
        rules.push(VoiceRule::new("first available voice", |_| true));
        rules
    }

    /// Pick the best voice from the engine's current list, or `None` when
    /// the list is empty.
    pub fn resolve<'a>(&self, voices: &'a [Voice]) -> Option<&'a Voice> {
        for rule in self.rules() {
            if let Some(voice) = voices.iter().find(|v| rule.matches(v)) {
                debug!(voice = %voice.name, rule = %rule.description, "voice resolved");
                return Some(voice);
            }
        }
        None
    }

    /// Locale for the utterance request: the resolved voice's own locale,
    /// else the configured fallback.
    pub fn utterance_locale(&self, resolved: Option<&Voice>) -> String {
        resolved.map_or_else(|| self.fallback_locale.clone(), |v| v.locale.clone())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn pref() -> VoicePreference {
        VoicePreference::default()
    }

    #[test]
    fn test_curated_name_wins() {
        let voices = vec![
            Voice::new("Microsoft Zira - English (United States)", "en-US"),
            Voice::new("Luciana", "pt-BR"),
            Voice::new("Google português do Brasil", "pt-BR"),
        ];
        // "Google português do Brasil" is earlier in the curated list than "Luciana"
        assert_eq!(pref().resolve(&voices).unwrap().name, "Google português do Brasil");
    }

    #[test]
    fn test_curated_match_is_case_insensitive_substring() {
        let voices = vec![Voice::new("pt-BR CAMILA (enhanced)", "pt-BR")];
        assert_eq!(pref().resolve(&voices).unwrap().name, "pt-BR CAMILA (enhanced)");
    }

    #[test]
    fn test_female_hint_beats_plain_locale_match() {
        let voices = vec![
            Voice::new("Voz genérica", "pt-BR"),
            Voice::new("Voz feminina brasileira", "pt-BR"),
        ];
        assert_eq!(pref().resolve(&voices).unwrap().name, "Voz feminina brasileira");
    }

    #[test]
    fn test_locale_beats_language_family() {
        let voices = vec![
            Voice::new("Joana", "pt-PT"),
            Voice::new("Outra", "pt-BR"),
        ];
        assert_eq!(pref().resolve(&voices).unwrap().name, "Outra");
    }

    #[test]
    fn test_language_family_beats_first_voice() {
        let voices = vec![
            Voice::new("Alex", "en-US"),
            Voice::new("Joana", "pt-PT"),
        ];
        assert_eq!(pref().resolve(&voices).unwrap().name, "Joana");
    }

    #[test]
    fn test_first_voice_is_last_resort() {
        let voices = vec![Voice::new("Alex", "en-US"), Voice::new("Yuna", "ko-KR")];
        assert_eq!(pref().resolve(&voices).unwrap().name, "Alex");
    }

    #[test]
    fn test_empty_list_resolves_to_none() {
        assert!(pref().resolve(&[]).is_none());
    }

    #[test]
    fn test_rule_order() {
        let rules = pref().rules();
        // 5 curated names + female hint + locale + family + catch-all
        assert_eq!(rules.len(), 9);
        assert!(rules[0].description.contains("Google português"));
        assert!(rules[5].description.contains("female"));
        assert_eq!(rules[8].description, "first available voice");
    }

    #[test]
    fn test_utterance_locale_fallback() {
        let p = pref();
        let voice = Voice::new("Joana", "pt-PT");
        assert_eq!(p.utterance_locale(Some(&voice)), "pt-PT");
        assert_eq!(p.utterance_locale(None), "pt-BR");
    }

    #[test]
    fn test_preference_from_json_defaults() {
        let p: VoicePreference = serde_json::from_str(r#"{ "locale": "en-US", "language": "en" }"#).unwrap();
        assert_eq!(p.locale, "en-US");
        // unspecified fields keep the defaults
        assert_eq!(p.fallback_locale, "pt-BR");
        assert!(!p.female_hints.is_empty());
    }
}
