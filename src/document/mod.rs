//! Document access for title suggestion.
//!
//! The suggestion pipeline never parses files itself. It talks to a
//! [`DocumentSource`], which exposes the two things it needs: the declared
//! metadata title and the positioned text of the first page.
//!
//! # Sources
//!
//! | Source | Backing | Feature Flag |
//! |--------|---------|-------------|
//! | [`PdfiumDocument`](pdf::PdfiumDocument) | pdfium via `pdfium-render` | `pdf` |
//! | [`Unavailable`] | nothing; every call fails | always |
//!
//! Use [`open`] to get the right one for a path.

#[cfg(feature = "pdf")]
pub mod pdf;
pub mod types;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::Config;

pub use types::{PdfChar, TextFragment};

/// Errors raised by document sources.
///
/// These never escape the suggestion pipeline: a failing source is treated
/// as having no title and no text.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("PDF library unavailable: {0}")]
    Library(String),

    #[error("document unavailable: {0}")]
    Unavailable(String),

    #[error("extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, DocumentError>;

/// Read access to the parts of a document used for naming it.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// The title declared in the document's metadata, if any.
    async fn declared_title(&self) -> Result<Option<String>>;

    /// Text fragments of the first page, in reading order.
    async fn first_page_fragments(&self) -> Result<Vec<TextFragment>>;
}

/// A document that could not be opened. Every call fails with the reason.
#[derive(Debug, Clone)]
pub struct Unavailable {
    reason: String,
}

impl Unavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl DocumentSource for Unavailable {
    async fn declared_title(&self) -> Result<Option<String>> {
        Err(DocumentError::Unavailable(self.reason.clone()))
    }

    async fn first_page_fragments(&self) -> Result<Vec<TextFragment>> {
        Err(DocumentError::Unavailable(self.reason.clone()))
    }
}

/// Open the document at `path`.
///
/// Never fails: if the file cannot be read (or PDF support is compiled out)
/// an [`Unavailable`] source is returned, so the caller still gets a
/// filename-based suggestion.
pub async fn open(path: &Path, config: &Config) -> Box<dyn DocumentSource> {
    #[cfg(feature = "pdf")]
    {
        match pdf::PdfiumDocument::open(path, config.pdfium_library.clone()).await {
            Ok(doc) => Box::new(doc),
            Err(e) => {
                tracing::warn!("Could not open {}: {e}", path.display());
                Box::new(Unavailable::new(e.to_string()))
            }
        }
    }

    #[cfg(not(feature = "pdf"))]
    {
        let _ = config;
        tracing::warn!(
            "PDF support not compiled in; naming {} from its filename",
            path.display()
        );
        Box::new(Unavailable::new("built without the `pdf` feature"))
    }
}
