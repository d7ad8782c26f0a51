//! Content configuration.
//!
//! Locates the project root and the playlists content directory. Defaults
//! follow the usual static-site layout (`src/content/playlists`). Override
//! via environment variables or the `--content-dir` flag.

use std::path::{Path, PathBuf};

use crate::resolve_path;

/// Environment variable naming the content directory.
pub const CONTENT_DIR_VAR: &str = "PLAYLISTS_CONTENT_DIR";

/// Content directory used when nothing else is configured.
pub const DEFAULT_CONTENT_DIR: &str = "src/content/playlists";

/// Where the CLI looks for data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentConfig {
    /// Project root; relative paths resolve against it.
    pub root: PathBuf,
    /// Directory holding one data file per playlist.
    pub content_dir: PathBuf,
}

impl ContentConfig {
    /// Load configuration from the environment.
    ///
    /// Variables:
    /// - `PLAYLISTS_CONTENT_DIR` (default: `src/content/playlists`)
    ///
    /// The project root is the nearest ancestor of the current directory
    /// containing a `src/content` directory, or the current directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        let root = find_project_root(&cwd).unwrap_or(cwd);
        let content_dir =
            std::env::var(CONTENT_DIR_VAR).unwrap_or_else(|_| DEFAULT_CONTENT_DIR.to_string());
        Self::new(root, content_dir)
    }

    /// Build a configuration from explicit parts.
    pub fn new(root: PathBuf, content_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let content_dir = content_dir.into();
        if content_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyContentDir);
        }
        let content_dir = resolve_path(&content_dir, &root);
        Ok(Self { root, content_dir })
    }

    /// Replace the content directory, e.g. from a command-line flag.
    pub fn with_content_dir(self, content_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Self::new(self.root, content_dir)
    }
}

/// Walk up from `start` to the first directory containing `src/content`.
fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join("src").join("content").is_dir())
        .map(Path::to_path_buf)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot determine current directory: {0}")]
    CurrentDir(std::io::Error),
    #[error("content directory must not be empty")]
    EmptyContentDir,
}
