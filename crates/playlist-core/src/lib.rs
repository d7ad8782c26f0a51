//! # playlist-core — Typed Values for the Playlists Collection
//!
//! Defines the validated shapes that a `playlists` content record is
//! converted into once it has passed schema validation. Every other crate
//! in the workspace depends on `playlist-core`; it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype for the playlist identifier.** `PlaylistId` can only be
//!    constructed non-empty, both from code and from serde input.
//!
//! 2. **URLs are checked but kept verbatim.** Every URL-typed field is a
//!    `WebUrl`: parsed on construction, serialized back as the source text.
//!
//! 3. **Immutable after load.** `PlaylistRecord` exposes read accessors only.
//!    Records are built once at content-load time.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `playlist-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod link;
pub mod record;

pub use error::PlaylistError;
pub use identity::PlaylistId;
pub use link::WebUrl;
pub use record::{PlaylistRecord, SongEntry};
