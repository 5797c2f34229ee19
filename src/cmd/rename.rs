use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use retitle::{sanitize, Config};

use super::output::{print_rows, Row, Status};
use super::{partition_pdfs, suggest_all, Suggested};
use crate::OutputFormat;

/// Flags for `retitle rename`.
#[derive(Debug, Clone)]
pub struct RenameOptions {
    pub copy_to: Option<PathBuf>,
    pub interactive: bool,
    pub force: bool,
    pub dry_run: bool,
    pub format: OutputFormat,
    pub parallel: usize,
}

/// Rename or copy each PDF to `<suggestion>.pdf`.
///
/// Suggestions are computed concurrently; files are then applied one at a
/// time so a name taken earlier in the batch is seen by later files.
pub async fn cmd_rename(files: Vec<PathBuf>, options: &RenameOptions, config: Config) -> Result<()> {
    let (pdfs, skipped) = partition_pdfs(files);
    let suggested = suggest_all(pdfs, options.parallel, &config).await;

    if let Some(dir) = &options.copy_to {
        if !options.dry_run {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
    }

    let mut answers = options
        .interactive
        .then(|| BufReader::new(tokio::io::stdin()).lines());

    let mut rows = Vec::with_capacity(suggested.len() + skipped.len());
    for item in &suggested {
        let name = match answers.as_mut() {
            Some(lines) => prompt_name(lines, item).await?,
            None => item.suggestion.filename.clone(),
        };
        rows.push(apply(item, &name, options).await);
    }
    rows.extend(skipped.iter().map(|p| Row::skipped(p)));

    print_rows(&rows, options.format)?;

    let failed = rows.iter().filter(|r| r.status == Status::Failed).count();
    if failed > 0 {
        bail!("{failed} of {} files could not be renamed", suggested.len());
    }
    Ok(())
}

/// Ask for a name on stdin. An empty line (or EOF) keeps the suggestion.
async fn prompt_name(lines: &mut Lines<BufReader<Stdin>>, item: &Suggested) -> Result<String> {
    let mut stderr = tokio::io::stderr();
    let prompt = format!(
        "{} [{}]: ",
        item.path.display(),
        item.suggestion.filename
    );
    stderr.write_all(prompt.as_bytes()).await?;
    stderr.flush().await?;

    let line = lines
        .next_line()
        .await
        .context("failed to read name from stdin")?;

    Ok(match line.as_deref().map(str::trim) {
        Some(edited) if !edited.is_empty() => sanitize(Some(edited)),
        _ => item.suggestion.filename.clone(),
    })
}

/// Where `item` should end up when named `name`.
fn target_path(item: &Suggested, name: &str, copy_to: Option<&Path>) -> PathBuf {
    let dir = copy_to
        .map(Path::to_path_buf)
        .or_else(|| item.path.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(format!("{name}.pdf"))
}

async fn apply(item: &Suggested, name: &str, options: &RenameOptions) -> Row {
    let row = Row::suggested(item);
    let copying = options.copy_to.is_some();
    let target = target_path(item, name, options.copy_to.as_deref());

    let recase = if same_file(&item.path, &target).await {
        // Copying a file onto itself truncates it.
        if copying || !differs_only_in_case(&item.path, &target) {
            return row.with_outcome(Status::Unchanged, target);
        }
        true
    } else {
        false
    };

    if !recase && !options.force && tokio::fs::try_exists(&target).await.unwrap_or(false) {
        return row.failed(format!(
            "{} already exists (use --force to overwrite)",
            target.display()
        ));
    }
    if options.dry_run {
        return row.with_outcome(Status::Planned, target);
    }

    let result = if copying {
        tokio::fs::copy(&item.path, &target).await.map(|_| Status::Copied)
    } else {
        tokio::fs::rename(&item.path, &target)
            .await
            .map(|()| Status::Renamed)
    };

    match result {
        Ok(status) => {
            tracing::info!("{} → {}", item.path.display(), target.display());
            row.with_outcome(status, target)
        }
        Err(e) => row.failed(format!("{}: {e}", target.display())),
    }
}

/// True if both paths name the same file on disk.
///
/// Catches `./x.pdf` against `x.pdf`, symlinks, and names that differ only
/// in case on case-insensitive filesystems.
async fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    let (Ok(meta_a), Ok(meta_b)) = (tokio::fs::metadata(a).await, tokio::fs::metadata(b).await)
    else {
        return false;
    };
    if let (Ok(canon_a), Ok(canon_b)) =
        (tokio::fs::canonicalize(a).await, tokio::fs::canonicalize(b).await)
    {
        if canon_a == canon_b {
            return true;
        }
    }
    same_inode(&meta_a, &meta_b)
}

#[cfg(unix)]
fn same_inode(a: &std::fs::Metadata, b: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    a.dev() == b.dev() && a.ino() == b.ino()
}

#[cfg(not(unix))]
fn same_inode(_: &std::fs::Metadata, _: &std::fs::Metadata) -> bool {
    false
}

/// Same directory, file names equal up to case.
fn differs_only_in_case(a: &Path, b: &Path) -> bool {
    let (Some(name_a), Some(name_b)) = (a.file_name(), b.file_name()) else {
        return false;
    };
    name_a != name_b
        && a.parent() == b.parent()
        && name_a.to_string_lossy().to_lowercase() == name_b.to_string_lossy().to_lowercase()
}
