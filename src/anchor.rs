//! Anchor capture and resume-position realignment.
//!
//! An anchor is a short fragment of the base text captured at the last
//! spoken position. When the document mutates between pause and resume, the
//! anchor relocates the position by content instead of trusting the old
//! numeric offset. Approximate recovery by design: a short literal search,
//! O(len), degrading to "restart from a plausible nearby point".
//!
//! All offsets here are **character** offsets, never bytes, so multi-byte
//! text (accented pt-BR prose is the norm) can never split a code point.

/// Trailing context captured at the resume position. 80 chars of context
/// is enough to be unique in practice while staying cheap to search.
pub const ANCHOR_CONTEXT_CHARS: usize = 80;

/// Length of `text` in characters.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// The suffix of `text` starting at character offset `index`; empty when
/// `index` is at or past the end.
pub(crate) fn tail(text: &str, index: usize) -> &str {
    match text.char_indices().nth(index) {
        Some((byte, _)) => &text[byte..],
        None => "",
    }
}

/// Capture the anchor at `index`: up to [`ANCHOR_CONTEXT_CHARS`] characters
/// of `text[index..]`, clamped to the text bounds.
pub fn make_anchor(text: &str, index: usize) -> String {
    tail(text, index).chars().take(ANCHOR_CONTEXT_CHARS).collect()
}

/// Relocate a resume offset inside a possibly-changed text snapshot.
///
/// An empty anchor means there is nothing to realign against (a fresh
/// read): `fallback_index` is returned unchanged. Otherwise the first
/// literal occurrence of `anchor` wins over the numeric fallback, because
/// it tolerates insertions and deletions elsewhere in the text. When the
/// anchor is gone entirely, `fallback_index` is kept if it still lies
/// within `new_text`, else the result is 0.
pub fn realign(new_text: &str, fallback_index: usize, anchor: &str) -> usize {
    if anchor.is_empty() {
        return fallback_index;
    }
    if let Some(byte_pos) = new_text.find(anchor) {
        return new_text[..byte_pos].chars().count();
    }
    if fallback_index < char_len(new_text) {
        fallback_index
    } else {
        0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_anchor_clamps_to_bounds() {
        assert_eq!(make_anchor("abc", 1), "bc");
        assert_eq!(make_anchor("abc", 3), "");
        assert_eq!(make_anchor("abc", 10), "");
        let long = "x".repeat(200);
        assert_eq!(make_anchor(&long, 10).len(), ANCHOR_CONTEXT_CHARS);
    }

    #[test]
    fn test_anchor_round_trip() {
        let text = "O rato roeu a roupa do rei de Roma.";
        for i in 0..char_len(text) {
            let anchor = make_anchor(text, i);
            assert_eq!(realign(text, i, &anchor), i, "at index {}", i);
        }
    }

    #[test]
    fn test_shifted_content_realigns_by_anchor() {
        let text = "Hello world. This is a test.";
        let anchor = make_anchor(text, 13);
        assert_eq!(anchor, "This is a test.");
        let edited = "NEW BANNER TEXT. Hello world. This is a test.";
        assert_eq!(realign(edited, 13, &anchor), 30);
    }

    #[test]
    fn test_missing_anchor_keeps_in_bounds_fallback() {
        assert_eq!(realign("short replacement text", 5, "vanished fragment"), 5);
    }

    #[test]
    fn test_missing_anchor_out_of_bounds_resets() {
        assert_eq!(realign("tiny", 10, "vanished fragment"), 0);
        assert_eq!(realign("tiny", 4, "vanished fragment"), 0);
    }

    #[test]
    fn test_empty_anchor_is_passthrough() {
        assert_eq!(realign("whatever", 3, ""), 3);
        assert_eq!(realign("whatever", 999, ""), 999);
    }

    #[test]
    fn test_multibyte_offsets_are_char_based() {
        let text = "ação e emoção são comuns";
        let anchor = make_anchor(text, 7);
        assert_eq!(anchor.chars().next(), Some('e'));
        let edited = format!("prefixo novo — {}", text);
        let realigned = realign(&edited, 7, &anchor);
        assert_eq!(tail(&edited, realigned).chars().next(), Some('e'));
        assert!(tail(&edited, realigned).starts_with(&anchor));
    }

    #[test]
    fn test_tail_helper() {
        assert_eq!(tail("ação", 2), "ão");
        assert_eq!(tail("ação", 4), "");
        assert_eq!(tail("", 0), "");
    }
}
