use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use retitle::TitleOrigin;

use super::Suggested;
use crate::OutputFormat;

/// What happened to one input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Suggested,
    Skipped,
    Planned,
    Renamed,
    Copied,
    Unchanged,
    Failed,
}

/// One line of command output.
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub path: PathBuf,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<TitleOrigin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Row {
    pub fn skipped(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            status: Status::Skipped,
            filename: None,
            origin: None,
            target: None,
            error: Some("not a PDF".into()),
        }
    }

    pub fn suggested(item: &Suggested) -> Self {
        Self {
            path: item.path.clone(),
            status: Status::Suggested,
            filename: Some(item.suggestion.filename.clone()),
            origin: Some(item.suggestion.origin),
            target: None,
            error: None,
        }
    }

    #[must_use]
    pub fn with_outcome(mut self, status: Status, target: PathBuf) -> Self {
        self.status = status;
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn failed(mut self, error: impl Into<String>) -> Self {
        self.status = Status::Failed;
        self.error = Some(error.into());
        self
    }
}

/// Print rows in the requested format.
pub fn print_rows(rows: &[Row], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rows)?);
        }
        OutputFormat::Compact => {
            for row in rows {
                println!("{}", compact_line(row));
            }
        }
        OutputFormat::Full => {
            for row in rows {
                println!("{}", full_line(row));
            }
            println!("\n({} files)", rows.len());
        }
    }
    Ok(())
}

fn status_name(status: Status) -> &'static str {
    match status {
        Status::Suggested => "suggested",
        Status::Skipped => "skipped",
        Status::Planned => "planned",
        Status::Renamed => "renamed",
        Status::Copied => "copied",
        Status::Unchanged => "unchanged",
        Status::Failed => "failed",
    }
}

fn compact_line(row: &Row) -> String {
    let detail = row
        .error
        .clone()
        .or_else(|| row.target.as_ref().map(|t| t.display().to_string()))
        .or_else(|| row.filename.clone())
        .unwrap_or_default();
    format!(
        "{}\t{}\t{detail}",
        status_name(row.status),
        row.path.display()
    )
}

fn full_line(row: &Row) -> String {
    let path = row.path.display();
    let target = row
        .target
        .as_ref()
        .map(|t| t.display().to_string())
        .unwrap_or_default();
    let error = row.error.as_deref().unwrap_or("unknown error");

    match row.status {
        Status::Suggested => format!(
            "📄 {path}\n   ✨ {}.pdf  [{}]",
            row.filename.as_deref().unwrap_or_default(),
            row.origin.map(|o| o.to_string()).unwrap_or_default()
        ),
        Status::Skipped => format!("⏭️  {path}: {error}"),
        Status::Planned => format!("📝 {path} → {target} (dry run)"),
        Status::Renamed => format!("✅ {path} → {target}"),
        Status::Copied => format!("📋 {path} → {target}"),
        Status::Unchanged => format!("✔️  {path}: already named"),
        Status::Failed => format!("❌ {path}: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use retitle::Suggestion;

    use super::*;

    fn sample() -> Suggested {
        Suggested {
            path: PathBuf::from("in/scan.pdf"),
            suggestion: Suggestion {
                filename: "Quarterly Results".into(),
                origin: TitleOrigin::Layout,
            },
        }
    }

    #[test]
    fn compact_prefers_error_then_target_then_name() {
        let row = Row::suggested(&sample());
        assert_eq!(compact_line(&row), "suggested\tin/scan.pdf\tQuarterly Results");

        let row = row.with_outcome(Status::Renamed, PathBuf::from("in/Quarterly Results.pdf"));
        assert_eq!(
            compact_line(&row),
            "renamed\tin/scan.pdf\tin/Quarterly Results.pdf"
        );

        let row = row.failed("target exists");
        assert_eq!(compact_line(&row), "failed\tin/scan.pdf\ttarget exists");
    }

    #[test]
    fn full_shows_origin() {
        let line = full_line(&Row::suggested(&sample()));
        assert!(line.contains("Quarterly Results.pdf"));
        assert!(line.contains("[layout]"));
    }

    #[test]
    fn json_omits_empty_fields() {
        let json = serde_json::to_value(Row::skipped(Path::new("notes.txt"))).unwrap();
        assert_eq!(json["status"], "skipped");
        assert!(json.get("filename").is_none());
        assert!(json.get("target").is_none());
    }
}
