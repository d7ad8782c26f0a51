//! # Validate Subcommand
//!
//! Validates playlist data files against the playlist schema. Meant to run
//! as a build gate: any violation yields exit code 1 and a report listing
//! every offending file and field path.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use playlist_schema::{scan_collection, SchemaValidator, PLAYLISTS_COLLECTION};

use crate::config::ContentConfig;

/// Arguments for the `playlists validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Validate every data file in the content directory.
    #[arg(long)]
    pub all: bool,

    /// Validate specific data files (.json, .yaml, .yml).
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 on success, 1 on validation failure.
pub fn run_validate(args: &ValidateArgs, config: &ContentConfig) -> Result<u8> {
    if !args.all && args.paths.is_empty() {
        println!("Usage: playlists validate [--all] [PATH...]");
        return Ok(1);
    }

    let validator = SchemaValidator::new().context("failed to compile playlist schema")?;

    let mut had_failures = false;

    if args.all {
        had_failures |= validate_content_dir(&validator, config)?;
    }

    for path in &args.paths {
        let resolved = crate::resolve_path(path, &config.root);
        had_failures |= validate_single_path(&validator, &resolved);
    }

    Ok(if had_failures { 1 } else { 0 })
}

/// Validate every data file in the configured content directory.
fn validate_content_dir(validator: &SchemaValidator, config: &ContentConfig) -> Result<bool> {
    let dir = &config.content_dir;
    if !dir.is_dir() {
        println!("WARN: content directory not found at {}", dir.display());
        return Ok(false);
    }

    let report = scan_collection(validator, PLAYLISTS_COLLECTION, dir)
        .with_context(|| format!("failed to scan {}", dir.display()))?;

    println!("Playlists: {}/{} passed", report.passed(), report.total);

    for failure in report.failures.iter() {
        let rel = failure
            .path
            .strip_prefix(&config.root)
            .unwrap_or(&failure.path);
        println!("  FAIL: {} — {}", rel.display(), failure.error);
    }

    if report.failed() > 0 {
        println!(
            "\n{} playlist(s) failed validation out of {} total.",
            report.failed(),
            report.total
        );
    }

    Ok(report.failed() > 0)
}

/// Validate one data file. Returns true on failure.
fn validate_single_path(validator: &SchemaValidator, path: &Path) -> bool {
    if !path.is_file() {
        println!("ERROR: not a file: {}", path.display());
        return true;
    }

    match validator.validate_file(path) {
        Ok(record) => {
            tracing::debug!(
                playlist_id = %record.playlist_id(),
                songs = record.len(),
                "validated playlist"
            );
            println!("OK: {}", path.display());
            false
        }
        Err(e) => {
            println!("FAIL: {} — {}", path.display(), e);
            true
        }
    }
}
