//! Filename sanitization.
//!
//! Turns any candidate string into something safe to use as a file stem on
//! Windows, macOS and Linux: reserved characters are dropped, whitespace is
//! normalized, and the result is bounded to [`MAX_FILENAME_CHARS`].

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length of a suggested filename, in characters.
pub const MAX_FILENAME_CHARS: usize = 100;

/// Returned whenever nothing usable is left of the input.
pub const UNTITLED: &str = "untitled";

/// Characters reserved in paths on at least one common platform.
pub const FORBIDDEN_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

static FORBIDDEN: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Where a candidate came from, as far as cleanup is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SanitizeMode {
    /// A metadata or layout title.
    #[default]
    Title,
    /// The document's original filename.
    ///
    /// Currently cleaned exactly like [`SanitizeMode::Title`].
    Fallback,
}

/// Sanitize a candidate title into a filename stem.
///
/// ```rust
/// use retitle::sanitize::sanitize;
///
/// assert_eq!(sanitize(Some("  Q3: Results / Draft  ")), "Q3 Results Draft");
/// assert_eq!(sanitize(None), "untitled");
/// ```
pub fn sanitize(text: Option<&str>) -> String {
    sanitize_with(text, SanitizeMode::Title)
}

/// Sanitize with an explicit [`SanitizeMode`].
pub fn sanitize_with(text: Option<&str>, _mode: SanitizeMode) -> String {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return UNTITLED.to_string();
    };

    let stripped = FORBIDDEN.replace_all(text.trim(), "");
    let collapsed = WHITESPACE.replace_all(&stripped, " ");
    let mut clean = collapsed.trim().to_string();

    if clean.chars().count() > MAX_FILENAME_CHARS {
        clean = clean.chars().take(MAX_FILENAME_CHARS).collect::<String>();
        clean.truncate(clean.trim_end().len());
    }

    if clean.is_empty() {
        return UNTITLED.to_string();
    }
    clean
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_and_empty_become_untitled() {
        assert_eq!(sanitize(None), "untitled");
        assert_eq!(sanitize(Some("")), "untitled");
    }

    #[test]
    fn removes_reserved_characters() {
        assert_eq!(
            sanitize(Some(r#"a<b>c:d"e/f\g|h?i*j"#)),
            "abcdefghij"
        );
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(sanitize(Some("  Annual \t\n Report   2023 ")), "Annual Report 2023");
    }

    #[test]
    fn trims_whitespace_exposed_by_removal() {
        assert_eq!(sanitize(Some("* Draft *")), "Draft");
    }

    #[test]
    fn truncates_to_limit_and_trims_tail() {
        let long = format!("{} tail", "x".repeat(99));
        let clean = sanitize(Some(&long));
        assert_eq!(clean.chars().count(), 99);
        assert!(!clean.ends_with(' '));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let long = "é".repeat(150);
        let clean = sanitize(Some(&long));
        assert_eq!(clean.chars().count(), MAX_FILENAME_CHARS);
    }

    #[test]
    fn only_reserved_characters_falls_back() {
        assert_eq!(sanitize(Some("///")), "untitled");
        assert_eq!(sanitize(Some("   ")), "untitled");
    }

    #[test]
    fn fallback_mode_matches_title_mode() {
        let input = " report_final: v2 ";
        assert_eq!(
            sanitize_with(Some(input), SanitizeMode::Fallback),
            sanitize_with(Some(input), SanitizeMode::Title)
        );
    }

    #[test]
    fn keeps_unicode_titles() {
        assert_eq!(sanitize(Some("Über die Zukunft")), "Über die Zukunft");
    }
}
