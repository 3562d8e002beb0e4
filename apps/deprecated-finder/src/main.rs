//! Deprecated feature finder
//!
//! Walks a directory, reports PDF files carrying entries deprecated by
//! PDF 2.0, and writes a fixed copy of each into the output directory.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use deprecated_core::batch::{default_output_dir, DEFAULT_EXTENSION, DEFAULT_PREFIX};
use deprecated_core::RunConfig;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for the finder
#[derive(Parser, Debug)]
#[command(name = "deprecated-finder")]
#[command(version, about = "Find and strip deprecated PDF features")]
struct Args {
    /// File or directory to scan recursively
    input: PathBuf,

    /// Directory for fixed copies [default: ./fixed_files]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// File name prefix for fixed copies
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Case-sensitive path suffix selecting documents
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Report findings without writing fixed copies
    #[arg(long)]
    dry_run: bool,

    /// Print findings as JSON lines
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> RunConfig {
        let mut config = RunConfig::new(self.input);
        config.output_dir = self.output.unwrap_or_else(default_output_dir);
        config.prefix = self.prefix;
        config.extension = self.extension;
        config.dry_run = self.dry_run;
        config.json = self.json;
        config
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    // Findings go to stdout, logs to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = args.into_config();
    info!(
        "Scanning {} into {}",
        config.input.display(),
        config.output_dir.display()
    );

    let summary = deprecated_core::run(&config, io::stdout().lock())
        .with_context(|| format!("Batch over {} aborted", config.input.display()))?;

    info!(
        "Scanned {} documents, skipped {}",
        summary.scanned,
        summary.skipped.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["deprecated-finder", "docs"]).unwrap();
        let config = args.into_config();

        assert_eq!(config.input, PathBuf::from("docs"));
        assert_eq!(config.prefix, "fixed_");
        assert_eq!(config.extension, ".pdf");
        assert!(config.output_dir.ends_with("fixed_files"));
        assert!(!config.dry_run);
        assert!(!config.json);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "deprecated-finder",
            "docs",
            "--output",
            "/tmp/out",
            "--prefix",
            "clean_",
            "--dry-run",
            "--json",
        ])
        .unwrap();
        let config = args.into_config();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.prefix, "clean_");
        assert!(config.dry_run);
        assert!(config.json);
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["deprecated-finder"]).is_err());
    }
}
