//! Text clean-up applied before text is written into a package.
//!
//! Content files are edited by hand, so text can arrive decomposed,
//! with Windows line endings, or carrying control characters that
//! XML 1.0 has no way to represent.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// C0 controls other than TAB, LF and CR, plus the two non-characters
/// XML rejects.
static XML_INVALID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x{FFFE}\x{FFFF}]").unwrap()
});

/// CRLF or a lone CR.
static LINE_ENDING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n?").unwrap());

/// Normalize text to NFC, fold line endings to `\n`, and drop characters
/// that cannot appear in XML. Applying it twice changes nothing.
pub fn sanitize(text: &str) -> String {
    let text: Cow<'_, str> = XML_INVALID_REGEX.replace_all(text, "");
    let text = LINE_ENDING_REGEX.replace_all(&text, "\n");
    text.nfc().collect()
}

/// Collapse a multi-line string onto one line.
pub fn single_line(text: &str) -> String {
    text.split('\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" / ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_plain_text_unchanged() {
        let text = "Manifesto — Studio W230";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn test_sanitize_folds_line_endings() {
        assert_eq!(sanitize("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn test_sanitize_strips_xml_invalid_controls() {
        assert_eq!(sanitize("bell\u{7} form\u{c}feed\u{0}"), "bell formfeed");
        assert_eq!(sanitize("tab\tkept"), "tab\tkept");
    }

    #[test]
    fn test_sanitize_composes_to_nfc() {
        // "Herme" + combining grave accent
        let decomposed = "Herme\u{300}s";
        assert_eq!(sanitize(decomposed), "Hermès");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let messy = "Line\r\none\u{1}\r\nHerme\u{300}s";
        let once = sanitize(messy);
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_single_line() {
        assert_eq!(
            single_line("The Villain\nVibe-Driven Deployment\n"),
            "The Villain / Vibe-Driven Deployment"
        );
        assert_eq!(single_line(""), "");
    }
}
