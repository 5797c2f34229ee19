//! Positioned text types shared by the PDF backend and the title inferrer.

use serde::Serialize;

/// One run of text on the first page, in reading order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextFragment {
    /// Text as extracted; may carry surrounding whitespace.
    pub text: String,
    /// Rendered font height in PDF points.
    pub glyph_height: f64,
    /// Baseline Y position (bottom-up coordinate system).
    pub vertical_position: f64,
    /// True if this is the last fragment on its visual line.
    pub ends_line: bool,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, glyph_height: f64) -> Self {
        Self {
            text: text.into(),
            glyph_height,
            vertical_position: 0.0,
            ends_line: true,
        }
    }

    #[must_use]
    pub fn at(mut self, vertical_position: f64) -> Self {
        self.vertical_position = vertical_position;
        self
    }

    #[must_use]
    pub fn continues_line(mut self) -> Self {
        self.ends_line = false;
        self
    }
}

/// A positioned character extracted from a PDF page.
#[derive(Debug, Clone)]
pub struct PdfChar {
    pub ch: char,
    /// Left edge in PDF points (1pt = 1/72 inch).
    pub x: f32,
    /// Baseline Y position (bottom-up coordinate system).
    pub y: f32,
    pub width: f32,
    /// Font size in points.
    pub height: f32,
}
