//! Subcommand implementations.

mod inspect;
mod output;
mod rename;
mod suggest;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;

use retitle::{document, Config, Suggester, Suggestion};

pub use inspect::cmd_inspect;
pub use rename::{cmd_rename, RenameOptions};
pub use suggest::cmd_suggest;

/// A PDF and the name suggested for it.
#[derive(Debug, Clone)]
pub struct Suggested {
    pub path: PathBuf,
    pub suggestion: Suggestion,
}

/// True if the path has a `.pdf` extension (any case).
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// The file name component, as shown to the suggestion pipeline.
pub fn original_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Split inputs into PDFs and everything else, warning about each skip.
pub fn partition_pdfs(files: Vec<PathBuf>) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let (pdfs, skipped): (Vec<_>, Vec<_>) = files.into_iter().partition(|p| is_pdf(p));
    for path in &skipped {
        tracing::warn!("Skipping non-PDF: {}", path.display());
    }
    (pdfs, skipped)
}

/// Suggest names for `paths` with at most `parallel` documents in flight.
///
/// Results are returned in input order.
pub async fn suggest_all(paths: Vec<PathBuf>, parallel: usize, config: &Config) -> Vec<Suggested> {
    let semaphore = Arc::new(Semaphore::new(parallel.max(1)));
    let suggester = Arc::new(Suggester::from_config(config));
    let config = Arc::new(config.clone());

    if paths.len() > 1 {
        tracing::info!(
            "Analyzing {} PDFs (concurrency: {})",
            paths.len(),
            parallel.max(1)
        );
    }

    let handles: Vec<_> = paths
        .iter()
        .cloned()
        .map(|path| {
            let sem = Arc::clone(&semaphore);
            let suggester = Arc::clone(&suggester);
            let config = Arc::clone(&config);

            tokio::spawn(async move {
                let _permit = sem.acquire_owned().await.ok();
                let name = original_name(&path);
                let source = document::open(&path, &config).await;
                suggester.suggest_filename(source.as_ref(), &name).await
            })
        })
        .collect();

    let results = futures::future::join_all(handles).await;

    paths
        .into_iter()
        .zip(results)
        .map(|(path, result)| {
            let suggestion = result.unwrap_or_else(|e| {
                tracing::error!("Analysis of {} aborted: {e}", path.display());
                suggester.resolve(None, &[], &original_name(&path))
            });
            Suggested { path, suggestion }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_pdf_ignores_case() {
        assert!(is_pdf(Path::new("a/b/Report.PDF")));
        assert!(is_pdf(Path::new("report.pdf")));
        assert!(!is_pdf(Path::new("report.pdf.txt")));
        assert!(!is_pdf(Path::new("pdf")));
    }

    #[test]
    fn partition_keeps_order() {
        let files = vec![
            PathBuf::from("a.pdf"),
            PathBuf::from("b.docx"),
            PathBuf::from("c.PDF"),
        ];
        let (pdfs, skipped) = partition_pdfs(files);
        assert_eq!(pdfs, vec![PathBuf::from("a.pdf"), PathBuf::from("c.PDF")]);
        assert_eq!(skipped, vec![PathBuf::from("b.docx")]);
    }

    #[tokio::test]
    async fn unreadable_files_fall_back_in_order() {
        let paths = vec![
            PathBuf::from("/missing/first_file.pdf"),
            PathBuf::from("/missing/Second File.pdf"),
        ];
        let results = suggest_all(paths, 2, &Config::default()).await;
        let names: Vec<_> = results
            .iter()
            .map(|r| r.suggestion.filename.as_str())
            .collect();
        assert_eq!(names, vec!["first_file", "Second File"]);
    }
}
