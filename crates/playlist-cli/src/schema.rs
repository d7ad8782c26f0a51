//! # Schema Subcommand
//!
//! Prints the JSON schema of a collection so other tooling (editors, data
//! producers) can validate against the same contract.

use anyhow::{Context, Result};
use clap::Args;

use playlist_schema::{collections, PLAYLISTS_COLLECTION};

/// Arguments for the `playlists schema` subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Collection whose schema to print.
    #[arg(long, default_value = PLAYLISTS_COLLECTION)]
    pub collection: String,
}

/// Execute the schema subcommand.
pub fn run_schema(args: &SchemaArgs) -> Result<u8> {
    println!("{}", render_schema(&args.collection)?);
    Ok(0)
}

fn render_schema(collection: &str) -> Result<String> {
    let schema = collections()
        .schema_for(collection)
        .with_context(|| format!("no schema for collection '{collection}'"))?;
    serde_json::to_string_pretty(&schema).context("failed to serialize schema")
}
