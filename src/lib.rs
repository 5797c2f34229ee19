//! `retitle` - Suggest clean filenames for PDF documents
//!
//! # Pipeline
//!
//! - **Validate**: trust the declared metadata title unless it is missing,
//!   too short, or a known authoring-tool placeholder
//! - **Infer**: otherwise take the largest text on the first page
//! - **Fallback**: otherwise keep the original filename
//! - **Sanitize**: strip reserved characters, normalize whitespace, cap length
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use retitle::{document, suggest_filename, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let path = Path::new("scan_0042.pdf");
//!     let source = document::open(path, &config).await;
//!     let suggestion = suggest_filename(source.as_ref(), "scan_0042.pdf").await;
//!     println!("{}.pdf ({})", suggestion.filename, suggestion.origin);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod document;
pub mod infer;
pub mod sanitize;
pub mod suggest;
pub mod validate;

pub use config::{Config, ConfigError};
pub use document::{DocumentError, DocumentSource, TextFragment, Unavailable};
pub use infer::{infer_title, TitleInferrer};
pub use sanitize::{sanitize, sanitize_with, SanitizeMode};
pub use suggest::{strip_pdf_extension, suggest_filename, Suggester, Suggestion, TitleOrigin};
pub use validate::{is_valid_title, PlaceholderRule, Rejection, TitleValidator};

/// Version of retitle
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
