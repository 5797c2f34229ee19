//! `retitle` CLI - Suggest and apply clean filenames for PDFs

mod cmd;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use retitle::Config;

#[derive(Parser)]
#[command(name = "retitle")]
#[command(about = "Rename PDFs to their apparent title")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/retitle/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show debug logs (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a suggested filename for each PDF
    Suggest {
        /// PDF files to name
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Full)]
        format: OutputFormat,

        /// Number of documents analyzed concurrently
        #[arg(short, long, default_value = "4")]
        parallel: usize,
    },

    /// Rename (or copy) each PDF to its suggested filename
    Rename {
        /// PDF files to rename
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Copy into this directory instead of renaming in place
        #[arg(long, value_name = "DIR")]
        copy_to: Option<PathBuf>,

        /// Confirm or edit each name on stdin (empty line accepts)
        #[arg(short, long)]
        interactive: bool,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,

        /// Show what would happen without touching any file
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Full)]
        format: OutputFormat,

        /// Number of documents analyzed concurrently
        #[arg(short, long, default_value = "4")]
        parallel: usize,
    },

    /// Show how a suggestion was reached for one PDF
    Inspect {
        /// PDF file to inspect
        file: PathBuf,
    },
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, one block per file
    Full,
    /// Tab-separated, one line per file
    Compact,
    /// JSON array
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable
    let default_filter = if cli.verbose {
        "warn,retitle=debug"
    } else {
        "warn,retitle=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    match cli.command {
        Commands::Suggest {
            files,
            format,
            parallel,
        } => {
            cmd::cmd_suggest(files, format, parallel, config).await?;
        }
        Commands::Rename {
            files,
            copy_to,
            interactive,
            force,
            dry_run,
            format,
            parallel,
        } => {
            let options = cmd::RenameOptions {
                copy_to,
                interactive,
                force,
                dry_run,
                format,
                parallel,
            };
            cmd::cmd_rename(files, &options, config).await?;
        }
        Commands::Inspect { file } => {
            cmd::cmd_inspect(&file, &config).await?;
        }
    }

    Ok(())
}
