//! Promptloom - Standalone Binary
//!
//! Terminal prompt editor with wildcard, tag and LoRA autocompletion.
//!
//! Usage:
//!   promptloom [OPTIONS] [FILE]
//!
//! Examples:
//!   promptloom prompt.txt --wildcards-dir ./wildcards
//!   promptloom --catalog snapshot.json prompt.txt

use anyhow::Result;
use clap::Parser;
use promptloom::{CandidateProvider, StudioApp, StudioConfig};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser)]
#[command(name = "promptloom")]
#[command(about = "Prompt editor with wildcard, tag and LoRA autocompletion")]
#[command(version)]
struct Args {
    /// Prompt file to edit (creates if it doesn't exist)
    file: Option<PathBuf>,

    /// Wildcard directory (.txt lists and .yaml tag files)
    #[arg(long)]
    wildcards_dir: Option<PathBuf>,

    /// LoRA model directory
    #[arg(long)]
    loras_dir: Option<PathBuf>,

    /// Catalog snapshot file (JSON); takes precedence over directories
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logging goes to stderr so it never fights the TUI for stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(args.log_level.clone())),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => StudioConfig::from_file(path)?,
        None => StudioConfig::default(),
    };

    // CLI flags override the config file
    if args.wildcards_dir.is_some() {
        config.wildcards_dir = args.wildcards_dir.clone();
    }
    if args.loras_dir.is_some() {
        config.loras_dir = args.loras_dir.clone();
    }
    if args.catalog.is_some() {
        config.catalog_snapshot = args.catalog.clone();
    }

    let mut provider = CandidateProvider::new().max_depth(config.scan_depth);
    if let Some(dir) = &config.wildcards_dir {
        provider = provider.wildcards_dir(dir);
    }
    if let Some(dir) = &config.loras_dir {
        provider = provider.loras_dir(dir);
    }
    if let Some(path) = &config.catalog_snapshot {
        provider = provider.snapshot_path(path);
    }

    debug!("starting promptloom");

    let mut app = StudioApp::new(config, provider);
    if let Some(file) = args.file {
        if file.exists() {
            app.load_file(file)?;
        } else {
            app.set_new_file(file);
        }
    }

    app.run().await
}
