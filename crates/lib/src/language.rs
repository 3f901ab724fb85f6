//! Detection of input that must cross the translation boundary.

use regex::Regex;
use std::sync::LazyLock;

/// Matches any character in the Arabic script block used by Persian.
static PERSIAN_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u0600-\u06FF]").expect("static pattern is valid"));

/// Returns true when `text` contains at least one Persian character.
///
/// This is a presence heuristic, not full language identification: a single
/// character in the U+0600..=U+06FF range flags the whole text for
/// translation, even when mixed with Latin script.
pub fn needs_translation(text: &str) -> bool {
    PERSIAN_CHAR.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_persian_text() {
        assert!(needs_translation("سلام دنیا"));
    }

    #[test]
    fn detects_mixed_script_text() {
        assert!(needs_translation("please summarize سند for me"));
    }

    #[test]
    fn ignores_latin_text() {
        assert!(!needs_translation("summarize a.txt"));
        assert!(!needs_translation(""));
    }

    #[test]
    fn range_boundaries_are_inclusive() {
        assert!(needs_translation("\u{0600}"));
        assert!(needs_translation("\u{06FF}"));
        assert!(!needs_translation("\u{0700}"));
        assert!(!needs_translation("\u{05FF}"));
    }
}
