//! # playlists CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use playlist_cli::config::ContentConfig;
use playlist_cli::list::{run_list, ListArgs};
use playlist_cli::schema::{run_schema, SchemaArgs};
use playlist_cli::validate::{run_validate, ValidateArgs};

/// Playlists content collection toolchain.
///
/// Validates playlist data files against the collection schema before
/// page generation.
#[derive(Parser, Debug)]
#[command(name = "playlists", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding playlist data files.
    #[arg(long, global = true)]
    content_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate playlist data files against the schema.
    Validate(ValidateArgs),

    /// Print the JSON schema of a collection.
    Schema(SchemaArgs),

    /// Load the collection and list its entries.
    List(ListArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match load_config(cli.content_dir) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(2);
        }
    };

    tracing::debug!(
        root = %config.root.display(),
        content_dir = %config.content_dir.display(),
        "resolved content configuration"
    );

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &config),
        Commands::Schema(args) => run_schema(&args),
        Commands::List(args) => run_list(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn load_config(content_dir: Option<PathBuf>) -> anyhow::Result<ContentConfig> {
    let config = ContentConfig::from_env()?;
    match content_dir {
        Some(dir) => Ok(config.with_content_dir(dir)?),
        None => Ok(config),
    }
}
