use std::path::PathBuf;

use anyhow::Result;

use retitle::Config;

use super::output::{print_rows, Row};
use super::{partition_pdfs, suggest_all};
use crate::OutputFormat;

pub async fn cmd_suggest(
    files: Vec<PathBuf>,
    format: OutputFormat,
    parallel: usize,
    config: Config,
) -> Result<()> {
    let (pdfs, skipped) = partition_pdfs(files);
    let suggested = suggest_all(pdfs, parallel, &config).await;

    let rows: Vec<Row> = suggested
        .iter()
        .map(Row::suggested)
        .chain(skipped.iter().map(|p| Row::skipped(p)))
        .collect();

    print_rows(&rows, format)
}
