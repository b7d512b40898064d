use clap::{Parser, ValueEnum};
use mdinline::fs_utils::read_document;
use mdinline::{InlineConfig, ReferenceStatus, Result, inspect_references, transform};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const LONG_HELP: &str = r#"
Reference:
  ![alt](images/cat.png)   - Inlined as ![alt](data:image/png;base64,...)
  ![alt](other/cat.png)    - Left untouched (only the images/ prefix is inlined)
  ![alt](https://...)      - Left untouched

Defaults:
  Without arguments the document is <program name>.md, the output is
  <program name>-convert.md and images are read from images/.
  With a DOCUMENT the output defaults to <document stem>-convert.md next to it.

Examples:
  # Inline images of mdinline.md into mdinline-convert.md
  mdinline
  # Explicit document, images directory and output
  mdinline post.md --images-dir assets/ -o post-standalone.md
  # Check which images would be inlined (dry run)
  mdinline post.md --dry-run
  # List all image references
  mdinline post.md --list
  # List with details and check existence
  mdinline post.md --list=detailed
  # Output as JSON for scripting
  mdinline post.md --list=json
"#;

/// Inline local Markdown images as base64 data URIs.
#[derive(Parser, Debug)]
#[command(
    name = "mdinline",
    version,
    about = "Inline local Markdown images as base64 data URIs.",
    after_long_help = LONG_HELP
)]
struct Cli {
    /// Markdown document to process (defaults to <program name>.md)
    #[arg(value_name = "DOCUMENT")]
    document: Option<PathBuf>,

    /// Directory that images/ references are resolved against
    #[arg(short, long, value_name = "DIR", env = "MDINLINE_IMAGES_DIR")]
    images_dir: Option<PathBuf>,

    /// Output file (defaults to <document stem>-convert.md)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Perform a dry run - check references without writing anything
    #[arg(long, conflicts_with = "list")]
    dry_run: bool,

    /// List image references (optionally with format: plain, detailed, json)
    #[arg(long, value_name = "FORMAT", num_args = 0..=1, default_missing_value = "plain", conflicts_with = "dry_run")]
    list: Option<ListFormat>,

    /// Increase verbosity (can be used multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq)]
enum ListFormat {
    /// Simple list of references
    Plain,
    /// Detailed information about each reference
    Detailed,
    /// JSON output for scripting
    Json,
}

#[derive(Serialize)]
struct ReferenceInfo {
    reference: String,
    alt: String,
    path: String,
    start: usize,
    end: usize,
    resolved: String,
    exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
}

impl From<&ReferenceStatus> for ReferenceInfo {
    fn from(status: &ReferenceStatus) -> Self {
        Self {
            reference: status.reference.full_match.clone(),
            alt: status.reference.alt.clone(),
            path: status.reference.path.clone(),
            start: status.reference.start,
            end: status.reference.end,
            resolved: status.resolved.display().to_string(),
            exists: status.exists,
            size: status.size,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli);

    let result = if cli.dry_run {
        dry_run(&config)
    } else if let Some(list_format) = cli.list {
        list_references(&config, list_format)
    } else {
        inline_document(&config)
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn build_config(cli: &Cli) -> InlineConfig {
    let mut config = match &cli.document {
        Some(document) => InlineConfig::for_document(document),
        None => InlineConfig::default(),
    };
    if let Some(dir) = &cli.images_dir {
        config.images_dir.clone_from(dir);
    }
    if let Some(output) = &cli.output {
        config.output_path.clone_from(output);
    }
    config
}

fn inline_document(config: &InlineConfig) -> Result<()> {
    let report = transform(config)?;

    for path in &report.missing {
        println!("Image not found: {}", path.display());
    }

    Ok(())
}

fn dry_run(config: &InlineConfig) -> Result<()> {
    info!("Performing dry run - checking image references...");

    let document = read_document(&config.document_path)?;
    let statuses = inspect_references(&document, &config.images_dir)?;

    let mut valid_count = 0;
    let mut missing_count = 0;

    for status in &statuses {
        if status.exists {
            info!(
                "✓ {} -> {}",
                status.reference.path,
                status.resolved.display()
            );
            valid_count += 1;
        } else {
            warn!(
                "✗ {} -> {} (not found)",
                status.reference.path,
                status.resolved.display()
            );
            missing_count += 1;
        }
    }

    println!("\nSummary: {} image references found", statuses.len());
    if valid_count > 0 {
        println!("  ✓ {valid_count} would be inlined");
    }
    if missing_count > 0 {
        println!("  ✗ {missing_count} missing");
        std::process::exit(1);
    }

    Ok(())
}

fn list_references(config: &InlineConfig, format: ListFormat) -> Result<()> {
    let document = read_document(&config.document_path)?;
    let statuses = inspect_references(&document, &config.images_dir)?;

    match format {
        ListFormat::Plain => {
            for status in &statuses {
                println!("{}", status.reference.path);
            }
        }
        ListFormat::Detailed => {
            for status in &statuses {
                println!("Reference: {}", status.reference.full_match);
                println!("  Alt: {}", status.reference.alt);
                println!(
                    "  Position: {}..{}",
                    status.reference.start, status.reference.end
                );
                println!("  Path: {}", status.resolved.display());
                println!("  Exists: {}", if status.exists { "yes" } else { "no" });
                if let Some(size) = status.size {
                    println!("  Size: {size} bytes");
                }
                println!();
            }
        }
        ListFormat::Json => {
            let infos: Vec<ReferenceInfo> = statuses.iter().map(ReferenceInfo::from).collect();
            let json = serde_json::to_string_pretty(&infos)?;
            println!("{json}");
        }
    }

    Ok(())
}
