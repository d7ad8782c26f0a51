//! # Content Collections
//!
//! The collection registry maps a collection name to the schema its entries
//! must satisfy. There is one collection, `playlists`.
//!
//! [`load_collection`] plays the part of a content framework's data loader:
//! it discovers every data file in a directory, validates each one, and
//! registers the typed records under their entry ids. The entry id of a
//! data file is its file stem (`chill.json` becomes `chill`).
//!
//! A load never stops at the first bad file. Every file is validated and a
//! single [`SchemaValidationError::CollectionLoadFailed`] lists all of them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use playlist_core::PlaylistRecord;
use serde_json::Value;

use crate::validate::{
    parse_schema, EntryFailure, EntryFailures, SchemaValidationError, SchemaValidator,
    PLAYLIST_SCHEMA_NAME, PLAYLIST_SCHEMA_SOURCE,
};

/// Name of the playlists collection.
pub const PLAYLISTS_COLLECTION: &str = "playlists";

/// File extensions recognised as data entries.
pub const DATA_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// A named collection and the schema that governs it.
#[derive(Debug, Clone, Copy)]
pub struct CollectionDefinition {
    /// Collection key (e.g. `playlists`).
    pub name: &'static str,
    /// Filename of the governing schema.
    pub schema_name: &'static str,
    /// JSON text of the governing schema.
    pub schema_source: &'static str,
}

/// Name → schema mapping of every declared collection.
#[derive(Debug, Clone)]
pub struct CollectionRegistry {
    definitions: BTreeMap<&'static str, CollectionDefinition>,
}

/// The declared collections.
pub fn collections() -> CollectionRegistry {
    let mut definitions = BTreeMap::new();
    definitions.insert(
        PLAYLISTS_COLLECTION,
        CollectionDefinition {
            name: PLAYLISTS_COLLECTION,
            schema_name: PLAYLIST_SCHEMA_NAME,
            schema_source: PLAYLIST_SCHEMA_SOURCE,
        },
    );
    CollectionRegistry { definitions }
}

impl CollectionRegistry {
    /// Collection names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.definitions.keys().copied().collect()
    }

    pub fn get(&self, name: &str) -> Option<&CollectionDefinition> {
        self.definitions.get(name)
    }

    /// The schema document for a collection.
    pub fn schema_for(&self, name: &str) -> Result<Value, SchemaValidationError> {
        let definition = self.definition(name)?;
        parse_schema(definition.schema_name, definition.schema_source)
    }

    /// A compiled validator for a collection.
    pub fn validator_for(&self, name: &str) -> Result<SchemaValidator, SchemaValidationError> {
        let definition = self.definition(name)?;
        SchemaValidator::from_schema(definition.schema_name, self.schema_for(name)?)
    }

    fn definition(&self, name: &str) -> Result<&CollectionDefinition, SchemaValidationError> {
        self.get(name)
            .ok_or_else(|| SchemaValidationError::UnknownCollection(name.to_string()))
    }
}

/// One validated record and where it came from.
#[derive(Debug, Clone)]
pub struct CollectionEntry {
    id: String,
    path: PathBuf,
    data: PlaylistRecord,
}

impl CollectionEntry {
    /// Entry id (the data file's stem).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Data file the record was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &PlaylistRecord {
        &self.data
    }
}

/// A fully validated collection, entries ordered by id.
#[derive(Debug, Clone)]
pub struct Collection {
    name: String,
    entries: Vec<CollectionEntry>,
}

impl Collection {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[CollectionEntry] {
        &self.entries
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Option<&CollectionEntry> {
        self.entries
            .binary_search_by(|entry| entry.id.as_str().cmp(id))
            .ok()
            .map(|i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of validating every data file in a content directory.
#[derive(Debug)]
pub struct CollectionReport {
    /// Collection that was scanned.
    pub collection: String,
    /// Total number of data files found.
    pub total: usize,
    /// Entries that passed validation, ordered by id.
    pub entries: Vec<CollectionEntry>,
    /// Details of each failure.
    pub failures: EntryFailures,
}

impl CollectionReport {
    /// Number that passed validation.
    pub fn passed(&self) -> usize {
        self.entries.len()
    }

    /// Number that failed validation.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Turn the report into a collection, failing if any entry was rejected.
    pub fn into_collection(self) -> Result<Collection, SchemaValidationError> {
        if self.failures.is_empty() {
            Ok(Collection {
                name: self.collection,
                entries: self.entries,
            })
        } else {
            Err(SchemaValidationError::CollectionLoadFailed {
                collection: self.collection,
                failures: self.failures,
            })
        }
    }
}

/// Load and validate the `playlists` collection from `dir`.
///
/// # Errors
///
/// Returns `DuplicateEntry` if two files share a stem and
/// `CollectionLoadFailed` listing every invalid file otherwise.
pub fn load_collection(dir: &Path) -> Result<Collection, SchemaValidationError> {
    let validator = collections().validator_for(PLAYLISTS_COLLECTION)?;
    scan_collection(&validator, PLAYLISTS_COLLECTION, dir)?.into_collection()
}

/// Validate every data file in `dir` without failing on invalid entries.
///
/// Only directory-level problems (unreadable directory, duplicate entry
/// ids) are returned as errors; per-file failures land in the report.
pub fn scan_collection(
    validator: &SchemaValidator,
    collection: &str,
    dir: &Path,
) -> Result<CollectionReport, SchemaValidationError> {
    let files = find_data_files(dir)?;

    let mut ids: BTreeMap<String, PathBuf> = BTreeMap::new();
    for path in &files {
        let id = entry_id(path);
        if let Some(first) = ids.insert(id.clone(), path.clone()) {
            return Err(SchemaValidationError::DuplicateEntry {
                collection: collection.to_string(),
                id,
                first: first.display().to_string(),
                second: path.display().to_string(),
            });
        }
    }

    let mut entries = Vec::with_capacity(files.len());
    let mut failures = EntryFailures::default();

    for (id, path) in ids {
        match validator.validate_file(&path) {
            Ok(data) => entries.push(CollectionEntry { id, path, data }),
            Err(error) => {
                tracing::warn!(path = %path.display(), "rejected data file");
                failures.push(EntryFailure { path, error });
            }
        }
    }

    tracing::info!(
        collection,
        total = files.len(),
        passed = entries.len(),
        failed = failures.len(),
        "scanned collection"
    );

    Ok(CollectionReport {
        collection: collection.to_string(),
        total: files.len(),
        entries,
        failures,
    })
}

/// Data files directly inside `dir`, sorted by path.
///
/// Hidden files and files whose name starts with `_` are skipped.
pub fn find_data_files(dir: &Path) -> Result<Vec<PathBuf>, SchemaValidationError> {
    let entries = std::fs::read_dir(dir).map_err(|e| SchemaValidationError::DocumentLoadError {
        path: dir.display().to_string(),
        reason: format!("cannot read content directory: {e}"),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') || name.starts_with('_') {
            continue;
        }
        let is_data = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| DATA_EXTENSIONS.contains(&ext));
        if is_data {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn entry_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
