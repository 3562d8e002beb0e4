//! Batch driver
//!
//! Walks an input tree, scans every PDF, and writes a fixed copy of each
//! document that carried a deprecated entry. One document is loaded,
//! reported, fixed and saved before the next one is read.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use lopdf::{Document, Object};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::DeprecatedError;
use crate::report::ScanReport;

/// Name of the output directory created under the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "fixed_files";
pub const DEFAULT_PREFIX: &str = "fixed_";
pub const DEFAULT_EXTENSION: &str = ".pdf";

#[derive(Debug, Clone)]
pub struct RunConfig {
    /// File or directory to scan
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Case-sensitive suffix a path must end with
    pub extension: String,
    /// Prepended to the file name of each fixed copy
    pub prefix: String,
    /// Report findings without writing anything
    pub dry_run: bool,
    /// Emit JSON lines instead of text
    pub json: bool,
}

impl RunConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: default_output_dir(),
            extension: DEFAULT_EXTENSION.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            dry_run: false,
            json: false,
        }
    }
}

pub fn default_output_dir() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DEFAULT_OUTPUT_DIR)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Documents that carried at least one deprecated entry
    pub fixed: usize,
    /// Documents loaded and scanned
    pub scanned: usize,
    /// Documents that failed to load
    pub skipped: Vec<PathBuf>,
    /// Fixed copies written to the output directory
    pub written: Vec<PathBuf>,
    /// Fixed copies replaced by a later document with the same file name
    pub overwritten: Vec<PathBuf>,
}

/// State threaded through one batch run
pub struct RunContext<'a, W: Write> {
    config: &'a RunConfig,
    out: W,
    summary: RunSummary,
}

impl<'a, W: Write> RunContext<'a, W> {
    pub fn new(config: &'a RunConfig, out: W) -> Self {
        Self {
            config,
            out,
            summary: RunSummary::default(),
        }
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Loads, scans and, when needed, fixes one document.
    ///
    /// # Errors
    ///
    /// Load failures are recorded and skipped. Decryption, traversal and
    /// write failures are returned.
    pub fn process_document(&mut self, path: &Path) -> Result<(), DeprecatedError> {
        let mut doc = match load(path) {
            Ok(doc) => doc,
            Err(err) => {
                warn!("Skipping {}: {}", path.display(), err);
                self.summary.skipped.push(path.to_path_buf());
                return Ok(());
            }
        };
        unprotect(&mut doc, path)?;
        self.summary.scanned += 1;

        let report = ScanReport::scan(&doc);
        if !report.has_findings() {
            debug!("No deprecated entries in {}", path.display());
            return Ok(());
        }

        self.print_report(path, &report)?;
        self.summary.fixed += 1;

        if self.config.dry_run {
            return Ok(());
        }

        let removed = report.apply(&mut doc)?;
        let target = self.target_path(path);
        if self.summary.written.contains(&target) {
            warn!(
                "{} replaces {} written earlier in this run",
                path.display(),
                target.display()
            );
            self.summary.overwritten.push(target.clone());
        }
        save(&mut doc, &target)?;
        info!(
            "Removed {} entries from {}, wrote {}",
            removed,
            path.display(),
            target.display()
        );
        self.summary.written.push(target);
        Ok(())
    }

    fn print_report(&mut self, path: &Path, report: &ScanReport) -> Result<(), DeprecatedError> {
        if self.config.json {
            let line = report.to_json(&path.display().to_string());
            writeln!(self.out, "{}", line)?;
        } else {
            writeln!(self.out, "{}", path.display())?;
            for line in report.lines() {
                writeln!(self.out, "{}", line)?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn target_path(&self, path: &Path) -> PathBuf {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.config
            .output_dir
            .join(format!("{}{}", self.config.prefix, file_name))
    }

    /// Writes the closing summary line and hands back the totals.
    pub fn finish(mut self) -> Result<RunSummary, DeprecatedError> {
        if self.config.json {
            let line = json!({
                "fixed": self.summary.fixed,
                "scanned": self.summary.scanned,
                "skipped": self.summary.skipped.len(),
            });
            writeln!(self.out, "{}", line)?;
        } else {
            writeln!(
                self.out,
                "There is {} files with deprecated features",
                self.summary.fixed
            )?;
        }
        self.out.flush()?;
        Ok(self.summary)
    }
}

/// Regular files under `root` whose path ends with `extension`. A walk
/// error is logged and ends the walk with what was found so far.
pub fn collect_candidates(root: &Path, extension: &str) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Stopped walking {}: {}", root.display(), err);
                break;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().to_string_lossy().ends_with(extension) {
            candidates.push(entry.into_path());
        }
    }
    candidates
}

pub fn prepare_output_dir(path: &Path) -> Result<(), DeprecatedError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
        info!("Created output directory {}", path.display());
    }
    Ok(())
}

pub fn load(path: &Path) -> Result<Document, DeprecatedError> {
    Document::load(path).map_err(|e| DeprecatedError::ParseError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Removes the security handler from a protected document so it can be
/// saved in the clear. Only documents openable with the empty user
/// password can be unprotected.
///
/// Decryption drops the trailer's `/Encrypt` entry; the encryption
/// dictionary it pointed to is deleted here as well.
pub fn unprotect(doc: &mut Document, path: &Path) -> Result<(), DeprecatedError> {
    if !doc.is_encrypted() {
        return Ok(());
    }
    let handler = doc
        .trailer
        .get(b"Encrypt")
        .and_then(Object::as_reference)
        .ok();
    doc.decrypt("").map_err(|e| DeprecatedError::EncryptedError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    if let Some(id) = handler {
        doc.objects.remove(&id);
    }
    debug!("Removed protection from {}", path.display());
    Ok(())
}

/// Serializes `doc` in memory and only then creates `target`, so a failed
/// save never leaves a truncated file behind.
pub fn save(doc: &mut Document, target: &Path) -> Result<(), DeprecatedError> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| DeprecatedError::SaveError {
            path: target.to_path_buf(),
            reason: e.to_string(),
        })?;
    fs::write(target, buffer)?;
    Ok(())
}

/// Runs the whole batch, writing the console report to `out`.
pub fn run<W: Write>(config: &RunConfig, out: W) -> Result<RunSummary, DeprecatedError> {
    if !config.dry_run {
        prepare_output_dir(&config.output_dir)?;
    }

    let candidates = collect_candidates(&config.input, &config.extension);
    info!(
        "Found {} candidate documents under {}",
        candidates.len(),
        config.input.display()
    );

    let mut context = RunContext::new(config, out);
    for path in &candidates {
        context.process_document(path)?;
    }
    context.finish()
}
