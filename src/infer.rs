//! Title inference from first-page typography.
//!
//! Font size is the strongest cheap signal for a title on papers, reports
//! and slides: the title is usually the largest text on the first page.
//! Fragments within a tolerance band of the largest size are treated as one
//! (possibly multi-line) title and joined in reading order.
//!
//! There is no check that the selected fragments are adjacent or near the
//! top of the page.

use crate::document::TextFragment;

/// Fragments at least this fraction of the largest glyph height are part of
/// the title.
pub const DEFAULT_HEIGHT_TOLERANCE: f64 = 0.95;

/// Fragments need more than this many characters (after trimming) to count.
const MIN_FRAGMENT_CHARS: usize = 2;

/// Infers a title from first-page text fragments.
#[derive(Debug, Clone, Copy)]
pub struct TitleInferrer {
    height_tolerance: f64,
}

impl TitleInferrer {
    /// Create an inferrer with a custom tolerance band (0.0..=1.0).
    pub fn new(height_tolerance: f64) -> Self {
        Self { height_tolerance }
    }

    pub fn height_tolerance(&self) -> f64 {
        self.height_tolerance
    }

    /// Infer the most prominent text on the page.
    ///
    /// Returns `None` when no fragment looks like title text. The result is
    /// not validated; the caller decides whether it is usable.
    pub fn infer(&self, fragments: &[TextFragment]) -> Option<String> {
        let candidates: Vec<&TextFragment> =
            fragments.iter().filter(|f| is_candidate(f)).collect();

        let max_height = candidates
            .iter()
            .map(|f| f.glyph_height)
            .reduce(f64::max)?;
        let threshold = max_height * self.height_tolerance;

        let title = candidates
            .iter()
            .filter(|f| f.glyph_height >= threshold)
            .map(|f| f.text.trim())
            .collect::<Vec<_>>()
            .join(" ");

        tracing::debug!(
            candidates = candidates.len(),
            max_height,
            "Inferred title {title:?}"
        );
        Some(title)
    }
}

impl Default for TitleInferrer {
    fn default() -> Self {
        Self::new(DEFAULT_HEIGHT_TOLERANCE)
    }
}

/// Infer with the default tolerance band.
///
/// ```rust
/// use retitle::document::TextFragment;
/// use retitle::infer::infer_title;
///
/// let fragments = vec![
///     TextFragment::new("Big Title", 24.0),
///     TextFragment::new("subtitle", 12.0),
///     TextFragment::new("Part Two", 23.5),
/// ];
/// assert_eq!(infer_title(&fragments).as_deref(), Some("Big Title Part Two"));
/// ```
pub fn infer_title(fragments: &[TextFragment]) -> Option<String> {
    TitleInferrer::default().infer(fragments)
}

/// Page numbers, bullets and stray marks are not title text. Fragments with
/// an unusable height are skipped as malformed.
fn is_candidate(fragment: &TextFragment) -> bool {
    let text = fragment.text.trim();
    fragment.glyph_height.is_finite()
        && fragment.glyph_height >= 0.0
        && text.chars().count() > MIN_FRAGMENT_CHARS
        && text.chars().any(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_none() {
        assert_eq!(infer_title(&[]), None);
    }

    #[test]
    fn no_candidates_yields_none() {
        let fragments = vec![
            TextFragment::new("12", 30.0),
            TextFragment::new("•", 30.0),
            TextFragment::new("2023", 30.0),
            TextFragment::new("  ab  ", 30.0),
        ];
        assert_eq!(infer_title(&fragments), None);
    }

    #[test]
    fn excludes_non_alphabetic_fragments() {
        let fragments = vec![TextFragment::new("1", 10.0), TextFragment::new("Intro", 10.0)];
        assert_eq!(infer_title(&fragments).as_deref(), Some("Intro"));
    }

    #[test]
    fn joins_fragments_within_band_in_reading_order() {
        let fragments = vec![
            TextFragment::new("Big Title", 24.0),
            TextFragment::new("subtitle", 12.0),
            TextFragment::new("Part Two", 23.5),
        ];
        assert_eq!(
            infer_title(&fragments).as_deref(),
            Some("Big Title Part Two")
        );
    }

    #[test]
    fn ignores_vertical_position() {
        let fragments = vec![
            TextFragment::new("Second", 20.0).at(100.0),
            TextFragment::new("First", 20.0).at(700.0),
        ];
        assert_eq!(infer_title(&fragments).as_deref(), Some("Second First"));
    }

    #[test]
    fn trims_parts_before_joining() {
        let fragments = vec![
            TextFragment::new("  Quarterly ", 18.0).continues_line(),
            TextFragment::new(" Results  ", 18.0),
        ];
        assert_eq!(
            infer_title(&fragments).as_deref(),
            Some("Quarterly Results")
        );
    }

    #[test]
    fn large_digits_do_not_set_the_band() {
        let fragments = vec![
            TextFragment::new("2024", 72.0),
            TextFragment::new("Annual Review", 28.0),
        ];
        assert_eq!(infer_title(&fragments).as_deref(), Some("Annual Review"));
    }

    #[test]
    fn malformed_heights_are_skipped() {
        let fragments = vec![
            TextFragment::new("Broken", f64::NAN),
            TextFragment::new("Negative", -40.0),
            TextFragment::new("Infinite", f64::INFINITY),
            TextFragment::new("Real Title", 16.0),
        ];
        assert_eq!(infer_title(&fragments).as_deref(), Some("Real Title"));
    }

    #[test]
    fn band_edge_is_inclusive() {
        let fragments = vec![
            TextFragment::new("Headline", 100.0),
            TextFragment::new("Second Line", 95.0),
            TextFragment::new("Byline", 94.999_99),
        ];
        assert_eq!(
            infer_title(&fragments).as_deref(),
            Some("Headline Second Line")
        );
    }

    #[test]
    fn accepts_non_latin_letters() {
        let fragments = vec![TextFragment::new("Введение", 20.0)];
        assert_eq!(infer_title(&fragments).as_deref(), Some("Введение"));
    }

    #[test]
    fn custom_band_widens_selection() {
        let fragments = vec![
            TextFragment::new("Main", 20.0),
            TextFragment::new("Heading", 15.0),
        ];
        let inferrer = TitleInferrer::new(0.7);
        assert_eq!(inferrer.infer(&fragments).as_deref(), Some("Main Heading"));
        assert_eq!(infer_title(&fragments).as_deref(), Some("Main"));
    }
}
