//! # playlist-schema — Playlist Schema & Collection Loading
//!
//! Declares the `playlists` content collection and validates its data.
//!
//! ## Runtime Validation (`validate`)
//!
//! The [`validate`] module compiles the embedded `playlist.schema.json` and
//! checks raw JSON/YAML records against it. Key function:
//!
//! - [`SchemaValidator::validate_record`] — validates a raw value and
//!   returns a typed [`playlist_core::PlaylistRecord`], or a
//!   `SchemaViolation` listing every offending field path.
//!
//! ## Collections (`collection`)
//!
//! The [`collection`] module exposes the collection-name-to-schema mapping
//! ([`collections`]) and loads a directory of data files into a validated
//! [`Collection`] keyed by entry id.
//!
//! ## Crate Policy
//!
//! - Depends only on `playlist-core` internally.
//! - Validation never performs network I/O.
//! - Invalid documents are rejected with structured errors including the
//!   instance path and a message per violation.

pub mod collection;
pub mod validate;

pub use collection::{
    collections, load_collection, scan_collection, Collection, CollectionEntry, CollectionReport,
    CollectionRegistry, PLAYLISTS_COLLECTION,
};
pub use validate::{
    load_document, playlist_schema, EntryFailure, EntryFailures, SchemaValidationError,
    SchemaValidator, ValidationViolations, Violation, PLAYLIST_SCHEMA_NAME,
};
