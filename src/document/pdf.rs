//! PDF document source backed by pdfium.
//!
//! Uses `pdfium-render` (Chromium's PDF library) to read the info dictionary
//! title and the positioned characters of the first page, then regroups the
//! characters into [`TextFragment`]s in reading order.
//!
//! # Pipeline
//!
//! ```text
//! PDF bytes → pdfium char extraction → line reconstruction → font-size runs → fragments
//! ```
//!
//! Pdfium calls are synchronous FFI and the library is not re-entrant, so
//! all work runs on the blocking pool behind a single process-wide lock.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use pdfium_render::prelude::*;

use super::types::{PdfChar, TextFragment};
use super::{DocumentError, DocumentSource, Result};

/// Characters whose font sizes differ by more than this start a new fragment.
const FONT_SIZE_EPSILON: f32 = 0.5;

static PDFIUM_LOCK: Mutex<()> = Mutex::new(());

/// A PDF held in memory, parsed on demand by pdfium.
pub struct PdfiumDocument {
    bytes: Arc<Vec<u8>>,
    library: Option<PathBuf>,
}

impl PdfiumDocument {
    /// Read the file at `path`. Parsing is deferred until a title or
    /// fragments are requested.
    ///
    /// `library` is a pdfium shared library, or a directory containing one.
    /// When `None`, the system library is used.
    pub async fn open(path: &Path, library: Option<PathBuf>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::from_bytes(bytes, library))
    }

    pub fn from_bytes(bytes: Vec<u8>, library: Option<PathBuf>) -> Self {
        Self {
            bytes: Arc::new(bytes),
            library,
        }
    }

    /// Load the document on the blocking pool and run `f` against it.
    async fn with_document<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: for<'a> FnOnce(&PdfDocument<'a>) -> Result<T> + Send + 'static,
    {
        let bytes = Arc::clone(&self.bytes);
        let library = self.library.clone();

        tokio::task::spawn_blocking(move || {
            let _guard = PDFIUM_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
            let pdfium = Pdfium::new(bind_pdfium(library.as_deref())?);
            let doc = pdfium
                .load_pdf_from_byte_slice(&bytes, None)
                .map_err(|e| DocumentError::Pdf(format!("failed to parse PDF: {e}")))?;
            f(&doc)
        })
        .await?
    }
}

#[async_trait]
impl DocumentSource for PdfiumDocument {
    async fn declared_title(&self) -> Result<Option<String>> {
        self.with_document(|doc| {
            Ok(doc
                .metadata()
                .get(PdfDocumentMetadataTagType::Title)
                .map(|tag| tag.value().to_string())
                .filter(|title| !title.is_empty()))
        })
        .await
    }

    async fn first_page_fragments(&self) -> Result<Vec<TextFragment>> {
        self.with_document(|doc| {
            let chars = extract_first_page_chars(doc)?;
            tracing::debug!("Extracted {} characters from first page", chars.len());
            Ok(group_fragments(&chars))
        })
        .await
    }
}

/// Bind to a configured pdfium library, falling back to the system one.
fn bind_pdfium(library: Option<&Path>) -> Result<Box<dyn PdfiumLibraryBindings>> {
    let bound = match library {
        Some(path) if path.is_dir() => {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(path))
        }
        Some(path) => Pdfium::bind_to_library(path),
        None => Pdfium::bind_to_system_library(),
    };
    bound.map_err(|e| DocumentError::Library(e.to_string()))
}

/// Extract the first page's characters with font size and position.
#[allow(deprecated)] // PdfRect field access deprecated in 0.8.28, removed in 0.9.0
fn extract_first_page_chars(doc: &PdfDocument<'_>) -> Result<Vec<PdfChar>> {
    let page = doc
        .pages()
        .get(0)
        .map_err(|e| DocumentError::Pdf(format!("no first page: {e}")))?;
    let text = page
        .text()
        .map_err(|e| DocumentError::Pdf(format!("failed to extract text: {e}")))?;

    let mut chars = Vec::new();
    for ch in text.chars().iter() {
        if let (Some(unicode_ch), Ok(rect)) = (ch.unicode_char(), ch.tight_bounds()) {
            chars.push(PdfChar {
                ch: unicode_ch,
                x: rect.left.value,
                y: rect.bottom.value,
                width: (rect.right.value - rect.left.value).abs(),
                height: ch.scaled_font_size().value.abs(),
            });
        }
    }

    Ok(chars)
}

/// Group positioned characters into fragments in reading order.
///
/// 1. Group characters into lines, top-to-bottom, by baseline proximity.
/// 2. Order each line left-to-right.
/// 3. Split lines into runs of equal font size; the last run ends the line.
pub fn group_fragments(chars: &[PdfChar]) -> Vec<TextFragment> {
    let mut fragments = Vec::new();

    for line in reconstruct_lines(chars) {
        let runs = split_runs(&line);
        let last = runs.len().saturating_sub(1);
        for (i, run) in runs.into_iter().enumerate() {
            fragments.push(TextFragment {
                text: build_text(run),
                glyph_height: f64::from(run_height(run)),
                vertical_position: f64::from(line[0].y),
                ends_line: i == last,
            });
        }
    }

    fragments
}

/// Group characters into lines, each sorted left-to-right.
///
/// A character joins the current line when its bottom edge is within half a
/// font size of the line's first character. Descenders sit lower than the
/// baseline, so lines are ordered by X only after grouping.
fn reconstruct_lines(chars: &[PdfChar]) -> Vec<Vec<PdfChar>> {
    let mut sorted = chars.to_vec();
    sorted.sort_by(|a, b| b.y.partial_cmp(&a.y).unwrap_or(std::cmp::Ordering::Equal));

    let mut lines: Vec<Vec<PdfChar>> = Vec::new();
    for ch in sorted {
        match lines.last_mut() {
            Some(line) if (line[0].y - ch.y).abs() < line[0].height.max(ch.height) * 0.5 => {
                line.push(ch);
            }
            _ => lines.push(vec![ch]),
        }
    }

    for line in &mut lines {
        line.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
    }

    lines
}

/// Split a line wherever the font size changes. Whitespace never starts a run.
fn split_runs(line: &[PdfChar]) -> Vec<&[PdfChar]> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut size: Option<f32> = None;

    for (i, ch) in line.iter().enumerate() {
        if ch.ch.is_whitespace() {
            continue;
        }
        match size {
            Some(current) if (ch.height - current).abs() > FONT_SIZE_EPSILON => {
                runs.push(&line[start..i]);
                start = i;
                size = Some(ch.height);
            }
            Some(_) => {}
            None => size = Some(ch.height),
        }
    }

    if start < line.len() {
        runs.push(&line[start..]);
    }
    runs
}

/// Concatenate characters, inserting spaces at horizontal gaps.
fn build_text(chars: &[PdfChar]) -> String {
    let mut text = String::new();
    if chars.is_empty() {
        return text;
    }

    let avg_char_width = chars.iter().map(|c| c.width).sum::<f32>() / chars.len() as f32;
    let space_threshold = avg_char_width * 0.3;

    for (i, ch) in chars.iter().enumerate() {
        if i > 0 {
            let prev = &chars[i - 1];
            let gap = ch.x - (prev.x + prev.width);
            if gap > space_threshold && !prev.ch.is_whitespace() && !ch.ch.is_whitespace() {
                text.push(' ');
            }
        }
        text.push(ch.ch);
    }

    text
}

/// Font size of a run, ignoring whitespace glyphs.
fn run_height(run: &[PdfChar]) -> f32 {
    run.iter()
        .filter(|c| !c.ch.is_whitespace())
        .map(|c| c.height)
        .fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs(text: &str, x: f32, y: f32, size: f32) -> Vec<PdfChar> {
        let width = size * 0.5;
        text.chars()
            .enumerate()
            .map(|(i, ch)| PdfChar {
                ch,
                x: x + i as f32 * width,
                y,
                width,
                height: size,
            })
            .collect()
    }

    #[test]
    fn group_fragments_empty() {
        assert!(group_fragments(&[]).is_empty());
    }

    #[test]
    fn lines_ordered_top_to_bottom() {
        let mut chars = glyphs("Body", 72.0, 500.0, 10.0);
        chars.extend(glyphs("Title", 72.0, 700.0, 24.0));

        let fragments = group_fragments(&chars);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "Title");
        assert_eq!(fragments[0].glyph_height, 24.0);
        assert_eq!(fragments[1].text, "Body");
        assert!(fragments.iter().all(|f| f.ends_line));
    }

    #[test]
    fn descenders_stay_on_their_line() {
        let mut chars = glyphs("gap", 72.0, 700.0, 20.0);
        // 'g' and 'p' hang below the baseline
        chars[0].y = 696.0;
        chars[2].y = 696.0;

        let fragments = group_fragments(&chars);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text, "gap");
    }

    #[test]
    fn font_size_change_splits_line() {
        let mut chars = glyphs("Report", 72.0, 700.0, 24.0);
        chars.extend(glyphs("draft", 200.0, 700.0, 9.0));

        let fragments = group_fragments(&chars);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "Report");
        assert!(!fragments[0].ends_line);
        assert_eq!(fragments[1].text, "draft");
        assert!(fragments[1].ends_line);
    }

    #[test]
    fn inserts_spaces_at_gaps() {
        let mut chars = glyphs("Big", 72.0, 700.0, 20.0);
        chars.extend(glyphs("Title", 130.0, 700.0, 20.0));

        let fragments = group_fragments(&chars);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text, "Big Title");
    }

    #[test]
    fn whitespace_glyphs_do_not_double_spaces() {
        let chars = glyphs("A B", 72.0, 700.0, 12.0);
        let fragments = group_fragments(&chars);
        assert_eq!(fragments[0].text, "A B");
    }

    #[tokio::test]
    async fn garbage_bytes_fail_cleanly() {
        let doc = PdfiumDocument::from_bytes(b"not a pdf".to_vec(), None);
        assert!(doc.declared_title().await.is_err());
        assert!(doc.first_page_fragments().await.is_err());
    }
}
