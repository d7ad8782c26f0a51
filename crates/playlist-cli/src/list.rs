//! # List Subcommand
//!
//! Loads the whole collection, failing on any invalid entry, and prints one
//! line per playlist.

use anyhow::{Context, Result};
use clap::Args;

use playlist_schema::{load_collection, Collection};

use crate::config::ContentConfig;

/// Arguments for the `playlists list` subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print each record as a JSON line instead of a summary.
    #[arg(long)]
    pub json: bool,
}

/// Execute the list subcommand.
pub fn run_list(args: &ListArgs, config: &ContentConfig) -> Result<u8> {
    let collection = load_collection(&config.content_dir).with_context(|| {
        format!(
            "failed to load playlists from {}",
            config.content_dir.display()
        )
    })?;

    for line in render_lines(&collection, args.json)? {
        println!("{line}");
    }
    Ok(0)
}

fn render_lines(collection: &Collection, json: bool) -> Result<Vec<String>> {
    collection
        .entries()
        .iter()
        .map(|entry| {
            let record = entry.data();
            if json {
                let value = record
                    .to_value()
                    .with_context(|| format!("failed to serialize entry '{}'", entry.id()))?;
                Ok(value.to_string())
            } else {
                Ok(format!(
                    "{}\t{}\t{}\t{} song(s)",
                    entry.id(),
                    record.playlist_id(),
                    record.playlist_name(),
                    record.len()
                ))
            }
        })
        .collect()
}
