//! Filename suggestion: the metadata → layout → filename fallback chain.
//!
//! ```text
//! declared title ──valid──────────────────────────────┐
//!      │ invalid                                       │
//!      ▼                                               ▼
//! first-page fragments → inferred title ──valid──→ sanitize → suggestion
//!      │ invalid                                       ▲
//!      ▼                                               │
//! original filename minus ".pdf" ──────(fallback)──────┘
//! ```
//!
//! Collaborator failures are logged and treated as missing data, so a
//! suggestion is always produced.

use std::future::Future;

use serde::Serialize;

use crate::config::Config;
use crate::document::{DocumentSource, TextFragment};
use crate::infer::TitleInferrer;
use crate::sanitize::{sanitize_with, SanitizeMode};
use crate::validate::TitleValidator;

/// Which stage produced a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleOrigin {
    /// The document's declared metadata title.
    Metadata,
    /// The largest text on the first page.
    Layout,
    /// The original filename.
    Filename,
}

impl std::fmt::Display for TitleOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Metadata => "metadata",
            Self::Layout => "layout",
            Self::Filename => "filename",
        })
    }
}

/// A sanitized filename stem and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub filename: String,
    pub origin: TitleOrigin,
}

/// Composes validation, inference and sanitization.
#[derive(Debug, Clone, Default)]
pub struct Suggester {
    validator: TitleValidator,
    inferrer: TitleInferrer,
}

impl Suggester {
    pub fn new(validator: TitleValidator, inferrer: TitleInferrer) -> Self {
        Self {
            validator,
            inferrer,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            TitleValidator::new(config.placeholders.clone()),
            TitleInferrer::new(config.height_tolerance),
        )
    }

    pub fn validator(&self) -> &TitleValidator {
        &self.validator
    }

    pub fn inferrer(&self) -> &TitleInferrer {
        &self.inferrer
    }

    /// Suggest a filename stem from already-extracted document data.
    pub fn suggest(
        &self,
        declared_title: Option<&str>,
        fragments: &[TextFragment],
        original_filename: &str,
    ) -> String {
        self.resolve(declared_title, fragments, original_filename)
            .filename
    }

    /// Like [`suggest`](Self::suggest), also reporting which stage won.
    pub fn resolve(
        &self,
        declared_title: Option<&str>,
        fragments: &[TextFragment],
        original_filename: &str,
    ) -> Suggestion {
        // The layout stage is a ready future, so this never parks.
        futures::executor::block_on(self.decide(
            declared_title,
            || std::future::ready(self.inferrer.infer(fragments)),
            original_filename,
        ))
    }

    /// Suggest a filename for a document, querying the source as needed.
    ///
    /// First-page fragments are only requested when the declared title is
    /// rejected. Source errors are logged and treated as "no data".
    pub async fn suggest_filename(
        &self,
        source: &dyn DocumentSource,
        original_filename: &str,
    ) -> Suggestion {
        let declared = source.declared_title().await.unwrap_or_else(|e| {
            tracing::warn!("Metadata extraction failed for {original_filename}: {e}");
            None
        });

        self.decide(
            declared.as_deref(),
            move || async move {
                let fragments = source.first_page_fragments().await.unwrap_or_else(|e| {
                    tracing::warn!("Text extraction failed for {original_filename}: {e}");
                    Vec::new()
                });
                self.inferrer.infer(&fragments)
            },
            original_filename,
        )
        .await
    }

    /// Metadata, then layout, then the original filename.
    ///
    /// `layout` yields the inferred title and is only awaited when the
    /// declared title is rejected.
    async fn decide<F, Fut>(
        &self,
        declared_title: Option<&str>,
        layout: F,
        original_filename: &str,
    ) -> Suggestion
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<String>>,
    {
        if let Some(suggestion) = self.accept(declared_title, TitleOrigin::Metadata) {
            return suggestion;
        }
        tracing::debug!("Metadata title invalid or missing for {original_filename}, trying page text");

        let inferred = layout().await;
        if let Some(suggestion) = self.accept(inferred.as_deref(), TitleOrigin::Layout) {
            return suggestion;
        }
        tracing::debug!("No usable title in {original_filename}, keeping its name");

        fallback(original_filename)
    }

    fn accept(&self, candidate: Option<&str>, origin: TitleOrigin) -> Option<Suggestion> {
        match self.validator.check(candidate) {
            Ok(()) => Some(Suggestion {
                filename: sanitize_with(candidate, SanitizeMode::Title),
                origin,
            }),
            Err(rejection) => {
                tracing::debug!("Rejected {origin} title {candidate:?}: {rejection}");
                None
            }
        }
    }
}

fn fallback(original_filename: &str) -> Suggestion {
    Suggestion {
        filename: sanitize_with(
            Some(strip_pdf_extension(original_filename)),
            SanitizeMode::Fallback,
        ),
        origin: TitleOrigin::Filename,
    }
}

/// Strip a trailing `.pdf` (any case) from a filename.
pub fn strip_pdf_extension(filename: &str) -> &str {
    let split = filename.len().saturating_sub(4);
    match (filename.get(..split), filename.get(split..)) {
        (Some(stem), Some(ext)) if ext.eq_ignore_ascii_case(".pdf") => stem,
        _ => filename,
    }
}

/// Suggest a filename with the default configuration.
pub async fn suggest_filename(source: &dyn DocumentSource, original_filename: &str) -> Suggestion {
    Suggester::default()
        .suggest_filename(source, original_filename)
        .await
}
