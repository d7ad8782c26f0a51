//! # Error Types
//!
//! Errors raised while constructing typed playlist values directly, outside
//! of schema validation. Schema-level failures live in `playlist-schema`.

use thiserror::Error;

/// Error constructing a playlist domain value.
#[derive(Error, Debug)]
pub enum PlaylistError {
    /// A required identifier was the empty string.
    #[error("{0} must not be empty")]
    EmptyIdentifier(&'static str),

    /// A URL-typed field did not parse as an absolute URL.
    #[error("invalid URL for {field}: {reason}")]
    InvalidUrl {
        /// Wire name of the offending field (e.g. `embedUrl`).
        field: &'static str,
        /// Parser error text.
        reason: String,
    },

    /// Conversion between a raw JSON value and a typed record failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
