//! Abstract document-tree snapshot.
//!
//! The extractor never touches a live rendering engine. The host hands it
//! owned [`Element`] snapshots (deep copies by construction), and exclusion
//! removal mutates only the copy. This keeps the extractor testable against
//! synthetic trees and keeps the live document untouched.

/// One node of a snapshot tree: an element or a run of text.
#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element snapshot: tag, identity, and children.
///
/// `attrs` holds bare attribute *names* (presence markers such as
/// `data-tts-ignore`); attribute values are not needed by any exclusion
/// rule the reader supports.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<String>,
    pub children: Vec<Node>,
}

/// Tags whose text never renders; skipped by [`Element::rendered_text`].
const NO_RENDER_TAGS: &[&str] = &["script", "style", "noscript", "template", "head"];

// ─────────────────────────────────────────────────────────────────────────────
// Selectors
// ─────────────────────────────────────────────────────────────────────────────

/// A single exclusion selector, the subset of CSS the reader needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Matches by tag name, e.g. `nav`.
    Tag(String),
    /// Matches by class, e.g. `.carousel`.
    Class(String),
    /// Matches by id, e.g. `#navbarSupportedContent`.
    Id(String),
    /// Matches by attribute presence, e.g. `[data-tts-ignore]`.
    Attr(String),
}

impl Selector {
    /// Parse one CSS-style selector string. Returns `None` for anything
    /// outside the supported subset (combinators, pseudo-classes, …).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        if let Some(rest) = s.strip_prefix('.') {
            return Some(Self::Class(rest.to_string()));
        }
        if let Some(rest) = s.strip_prefix('#') {
            return Some(Self::Id(rest.to_string()));
        }
        if let Some(rest) = s.strip_prefix('[') {
            let name = rest.strip_suffix(']')?;
            return Some(Self::Attr(name.to_string()));
        }
        if s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Some(Self::Tag(s.to_ascii_lowercase()));
        }
        None
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Element operations
// ─────────────────────────────────────────────────────────────────────────────

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), ..Self::default() }
    }

    // Builder helpers for hosts and tests.

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    pub fn child(mut self, node: Element) -> Self {
        self.children.push(Node::Element(node));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Does this element match the given selector?
    pub fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Tag(tag) => self.tag.eq_ignore_ascii_case(tag),
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
            Selector::Id(id) => self.id.as_deref() == Some(id.as_str()),
            Selector::Attr(attr) => self.attrs.iter().any(|a| a == attr),
        }
    }

    /// Remove every descendant (at any depth) matching any of `selectors`.
    /// The root element itself is never removed; callers filter it first if
    /// they need to.
    pub fn remove_matching(&mut self, selectors: &[Selector]) {
        self.children.retain(|child| match child {
            Node::Element(el) => !selectors.iter().any(|s| el.matches(s)),
            Node::Text(_) => true,
        });
        for child in &mut self.children {
            if let Node::Element(el) = child {
                el.remove_matching(selectors);
            }
        }
    }

    /// Visible text only: text reachable without entering a no-render tag.
    /// Runs of text from sibling subtrees are space-separated; callers
    /// normalise afterwards, so extra separators are harmless.
    pub fn rendered_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out, true);
        out
    }

    /// All text content, including no-render subtrees. The fallback when
    /// rendered extraction yields nothing.
    pub fn raw_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out, false);
        out
    }

    fn collect_text(&self, out: &mut String, visible_only: bool) {
        if visible_only && NO_RENDER_TAGS.iter().any(|t| self.tag.eq_ignore_ascii_case(t)) {
            return;
        }
        for child in &self.children {
            match child {
                Node::Text(text) => {
                    if !out.is_empty() {
                        out.push(' ');
                    }
                    out.push_str(text);
                }
                Node::Element(el) => el.collect_text(out, visible_only),
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DocumentView — the host-side seam
// ─────────────────────────────────────────────────────────────────────────────

/// Read-only view of the host document.
///
/// Implementations return owned snapshots; the reader mutates only those
/// copies. A missing region is `None` and degrades to empty extracted text,
/// never an error.
pub trait DocumentView {
    /// Plain text of the current user selection, if any.
    fn selection_text(&self) -> Option<String>;

    /// Snapshot of the designated primary content region.
    fn primary_content(&self) -> Option<Element>;

    /// Snapshot of the whole document body.
    fn body(&self) -> Option<Element>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("main")
            .with_id("conteudo-principal")
            .child(Element::new("p").text("Primeiro parágrafo."))
            .child(
                Element::new("div")
                    .with_class("carousel")
                    .child(Element::new("div").with_class("carousel-item").text("Slide um")),
            )
            .child(Element::new("script").text("var x = 1;"))
            .child(Element::new("p").with_attr("data-tts-ignore").text("ignorado"))
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!(Selector::parse(".carousel"), Some(Selector::Class("carousel".into())));
        assert_eq!(Selector::parse("#nav"), Some(Selector::Id("nav".into())));
        assert_eq!(
            Selector::parse("[data-tts-ignore]"),
            Some(Selector::Attr("data-tts-ignore".into()))
        );
        assert_eq!(Selector::parse("footer"), Some(Selector::Tag("footer".into())));
        assert_eq!(Selector::parse(""), None);
        assert_eq!(Selector::parse("div > p"), None);
    }

    #[test]
    fn test_matches() {
        let el = Element::new("div").with_class("carousel").with_id("c1").with_attr("hidden");
        assert!(el.matches(&Selector::Tag("div".into())));
        assert!(el.matches(&Selector::Tag("DIV".into())));
        assert!(el.matches(&Selector::Class("carousel".into())));
        assert!(el.matches(&Selector::Id("c1".into())));
        assert!(el.matches(&Selector::Attr("hidden".into())));
        assert!(!el.matches(&Selector::Class("nav".into())));
    }

    #[test]
    fn test_remove_matching_is_deep() {
        let mut root = sample();
        root.remove_matching(&[
            Selector::Class("carousel".into()),
            Selector::Attr("data-tts-ignore".into()),
        ]);
        let text = root.rendered_text();
        assert!(text.contains("Primeiro parágrafo."));
        assert!(!text.contains("Slide um"));
        assert!(!text.contains("ignorado"));
    }

    #[test]
    fn test_rendered_text_skips_script() {
        let text = sample().rendered_text();
        assert!(!text.contains("var x"));
        assert!(text.contains("Primeiro parágrafo."));
    }

    #[test]
    fn test_raw_text_includes_everything() {
        let text = sample().raw_text();
        assert!(text.contains("var x = 1;"));
        assert!(text.contains("ignorado"));
    }

    #[test]
    fn test_remove_does_not_touch_source_when_cloned() {
        let original = sample();
        let mut copy = original.clone();
        copy.remove_matching(&[Selector::Class("carousel".into())]);
        assert!(original.rendered_text().contains("Slide um"));
        assert!(!copy.rendered_text().contains("Slide um"));
    }
}
