//! # playlist-cli — CLI for the Playlists Collection
//!
//! Provides the `playlists` command-line interface, run as a site build
//! step before page generation.
//!
//! ## Subcommands
//!
//! - `playlists validate` — validate the content directory and/or files.
//! - `playlists schema` — print the playlist JSON schema.
//! - `playlists list` — load the collection and summarize each entry.
//!
//! ```bash
//! playlists validate --all
//! playlists validate src/content/playlists/chill.json
//! playlists --content-dir data/playlists list
//! ```

pub mod config;
pub mod list;
pub mod schema;
pub mod validate;

use std::path::{Path, PathBuf};

/// Resolve a path that may be relative to the project root.
///
/// Absolute paths are returned as-is. A relative path that exists under
/// `root` resolves there; otherwise it is left relative to the current
/// directory.
pub fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let rooted = root.join(path);
    if rooted.exists() {
        rooted
    } else {
        path.to_path_buf()
    }
}
