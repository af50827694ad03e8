//! Content extraction with a configurable exclusion policy.
//!
//! Extraction always runs over a snapshot copy (see [`crate::dom`]):
//! excluded subtrees are removed from the copy first, then the remaining
//! visible text is read and normalised. Dynamic regions (carousels,
//! anything flagged `data-tts-ignore`) therefore never leak into the text
//! the reader works with, even partially.

use serde::Deserialize;
use tracing::warn;

use crate::dom::{DocumentView, Element, Selector};
use crate::normalize::normalize;

/// Provenance of a base text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSource {
    /// The user's active text selection.
    Selection,
    /// The designated primary content region.
    #[default]
    PrimaryContent,
    /// Whole-document fallback.
    WholeDocument,
}

/// Which region of the document to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Selection,
    PrimaryContent,
    WholeDocument,
}

// ─────────────────────────────────────────────────────────────────────────────
// Exclusion policy
// ─────────────────────────────────────────────────────────────────────────────

/// Selector lists removed before reading a region's text.
///
/// Selectors are CSS-style strings (see [`Selector::parse`]); unparseable
/// entries are skipped with a warning rather than failing extraction.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExclusionPolicy {
    /// Removed from every scope.
    pub always: Vec<String>,
    /// Additionally removed for whole-document scope (page chrome).
    pub whole_document: Vec<String>,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self {
            always: vec![
                "[data-tts-ignore]".into(),
                ".carousel".into(),
                ".carousel-inner".into(),
                ".carousel-item".into(),
                ".carousel-caption".into(),
                "script".into(),
                "style".into(),
                "noscript".into(),
            ],
            whole_document: vec![
                "#navbarSupportedContent".into(),
                "nav".into(),
                "footer".into(),
            ],
        }
    }
}

impl ExclusionPolicy {
    /// Parsed selectors for the given scope breadth.
    fn selectors(&self, whole_document: bool) -> Vec<Selector> {
        let mut entries: Vec<&String> = self.always.iter().collect();
        if whole_document {
            entries.extend(self.whole_document.iter());
        }
        entries
            .into_iter()
            .filter_map(|raw| {
                let parsed = Selector::parse(raw);
                if parsed.is_none() {
                    warn!(selector = %raw, "skipping unsupported exclusion selector");
                }
                parsed
            })
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Extraction
// ─────────────────────────────────────────────────────────────────────────────

/// Prune `region` per `selectors` and read its normalised visible text.
/// Falls back to raw text content when no visible text survives pruning,
/// mirroring an `innerText || textContent` read.
fn extract_region(region: Option<Element>, selectors: &[Selector]) -> String {
    let Some(mut copy) = region else {
        return String::new();
    };
    copy.remove_matching(selectors);
    let rendered = copy.rendered_text();
    let text = if rendered.trim().is_empty() { copy.raw_text() } else { rendered };
    normalize(&text)
}

/// Extract normalised plain text for one scope. Missing regions and empty
/// selections yield `""`, never an error.
pub fn extract(doc: &dyn DocumentView, scope: Scope, policy: &ExclusionPolicy) -> String {
    match scope {
        Scope::Selection => normalize(&doc.selection_text().unwrap_or_default()),
        Scope::PrimaryContent => {
            extract_region(doc.primary_content(), &policy.selectors(false))
        }
        Scope::WholeDocument => extract_region(doc.body(), &policy.selectors(true)),
    }
}

/// Choose the base text for a fresh read. The ordering is a contract:
/// a non-empty selection always wins, primary content is the default
/// surface, the whole document is the last resort (returned even when
/// empty).
pub fn select_base_text(doc: &dyn DocumentView, policy: &ExclusionPolicy) -> (String, TextSource) {
    let selection = extract(doc, Scope::Selection, policy);
    if !selection.is_empty() {
        return (selection, TextSource::Selection);
    }
    let primary = extract(doc, Scope::PrimaryContent, policy);
    if !primary.is_empty() {
        return (primary, TextSource::PrimaryContent);
    }
    (extract(doc, Scope::WholeDocument, policy), TextSource::WholeDocument)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
