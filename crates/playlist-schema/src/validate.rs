//! # Schema Validation
//!
//! Runtime validation of playlist data records against the embedded
//! `playlist.schema.json` (Draft 2020-12).
//!
//! Validation is a build-time gate: a record either passes and becomes a
//! typed [`PlaylistRecord`], or is rejected with a [`SchemaValidationError::SchemaViolation`]
//! listing every offending field by its JSON Pointer path (for example
//! `/songs/2` when the third song is missing `embedUrl`).
//!
//! ## Format Assertions
//!
//! Draft 2020-12 treats `format` as an annotation by default. The validator
//! is compiled with format assertions switched on so that `"format": "uri"`
//! rejects values such as `"not-a-url"`. The `uri` format is overridden
//! with [`WebUrl::is_valid`], the same WHATWG parse the typed record uses,
//! so a URL that fails conversion is always reported at its field path.
//!
//! ## Schema Resolution
//!
//! The playlist schema only uses internal `$ref`s (`#/$defs/song`). Any
//! external reference is refused by [`OfflineRetriever`] so validation never
//! touches the network.

use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Draft, Retrieve, Uri, Validator};
use playlist_core::{PlaylistRecord, WebUrl};
use serde_json::Value;
use thiserror::Error;

/// Filename of the playlist schema, used to label violations.
pub const PLAYLIST_SCHEMA_NAME: &str = "playlist.schema.json";

pub(crate) const PLAYLIST_SCHEMA_SOURCE: &str = include_str!("../schemas/playlist.schema.json");

/// Retriever that refuses every external `$ref`.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external schema reference not available offline: {}", uri.as_str()).into())
    }
}

/// Error during schema validation or content loading.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The record did not conform to the schema.
    #[error("validation failed against schema '{schema_name}':\n{violations}")]
    SchemaViolation {
        /// Name of the schema that was validated against.
        schema_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The schema source could not be parsed.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The compiled validator could not be built (e.g., invalid schema).
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// The data file could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// No collection is registered under the requested name.
    #[error("unknown collection '{0}'")]
    UnknownCollection(String),

    /// Two data files map to the same entry id.
    #[error("duplicate entry '{id}' in collection '{collection}': {first} and {second}")]
    DuplicateEntry {
        /// Collection being loaded.
        collection: String,
        /// The clashing entry id.
        id: String,
        /// First file claiming the id.
        first: String,
        /// Second file claiming the id.
        second: String,
    },

    /// One or more entries in a collection failed validation.
    #[error("collection '{collection}' has {} invalid entries:\n{failures}", .failures.len())]
    CollectionLoadFailed {
        /// Collection being loaded.
        collection: String,
        /// Every failing entry.
        failures: EntryFailures,
    },

    /// IO error reading a content directory.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Instance paths of all violations, in report order.
    pub fn paths(&self) -> Vec<&str> {
        self.violations
            .iter()
            .map(|v| v.instance_path.as_str())
            .collect()
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A data file that failed to load as a collection entry.
#[derive(Debug)]
pub struct EntryFailure {
    /// Path to the offending data file.
    pub path: PathBuf,
    /// Why it was rejected.
    pub error: SchemaValidationError,
}

/// Every failing entry of one collection load.
#[derive(Debug, Default)]
pub struct EntryFailures(Vec<EntryFailure>);

impl EntryFailures {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntryFailure> {
        self.0.iter()
    }

    pub(crate) fn push(&mut self, failure: EntryFailure) {
        self.0.push(failure);
    }
}

impl fmt::Display for EntryFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", failure.path.display(), failure.error)?;
        }
        Ok(())
    }
}

/// A compiled validator for one collection schema.
///
/// ## Thread Safety
///
/// `SchemaValidator` is `Send + Sync` and immutable once built; compile it
/// once and share it across every record of a content load.
pub struct SchemaValidator {
    schema_name: String,
    schema: Value,
    validator: Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema_name", &self.schema_name)
            .finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Compile the embedded playlist schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaLoadError` if the embedded source is not valid JSON and
    /// `ValidatorBuildError` if it is not a valid schema.
    pub fn new() -> Result<Self, SchemaValidationError> {
        Self::from_schema(PLAYLIST_SCHEMA_NAME, playlist_schema()?)
    }

    /// Compile an arbitrary schema value under the given name.
    pub fn from_schema(
        schema_name: impl Into<String>,
        schema: Value,
    ) -> Result<Self, SchemaValidationError> {
        let schema_name = schema_name.into();
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .should_validate_formats(true)
            .with_format("uri", |s: &str| WebUrl::is_valid(s))
            .with_retriever(OfflineRetriever)
            .build(&schema)
            .map_err(|e| SchemaValidationError::ValidatorBuildError {
                schema_name: schema_name.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!(schema = %schema_name, "compiled schema validator");

        Ok(Self {
            schema_name,
            schema,
            validator,
        })
    }

    /// Name of the compiled schema.
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// The schema document this validator was compiled from.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Check a raw value against the schema, collecting every violation.
    ///
    /// # Errors
    ///
    /// Returns `SchemaViolation` with one entry per failed keyword.
    pub fn validate_value(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(self.violation(violations))
        }
    }

    /// Validate a raw value and convert it into a typed [`PlaylistRecord`].
    ///
    /// The shape check runs first so that failures carry field paths. It
    /// applies the same URL check as the typed conversion, so conversion
    /// only fails on values the schema cannot describe; those are reported
    /// as a root violation.
    pub fn validate_record(&self, instance: &Value) -> Result<PlaylistRecord, SchemaValidationError> {
        self.validate_value(instance)?;
        PlaylistRecord::from_value(instance.clone()).map_err(|e| {
            self.violation(vec![Violation {
                instance_path: String::new(),
                schema_path: String::new(),
                message: e.to_string(),
            }])
        })
    }

    /// Load a `.json`, `.yaml`, or `.yml` data file and validate it.
    ///
    /// # Errors
    ///
    /// Returns `DocumentLoadError` if the file cannot be read or parsed, and
    /// `SchemaViolation` if its contents do not conform.
    pub fn validate_file(&self, path: &Path) -> Result<PlaylistRecord, SchemaValidationError> {
        tracing::debug!(path = %path.display(), "validating data file");
        let instance = load_document(path)?;
        self.validate_record(&instance).map_err(|e| match e {
            SchemaValidationError::SchemaViolation { violations, .. } => {
                SchemaValidationError::SchemaViolation {
                    schema_name: format!("{} ({})", self.schema_name, path.display()),
                    violations,
                }
            }
            other => other,
        })
    }

    fn violation(&self, violations: Vec<Violation>) -> SchemaValidationError {
        SchemaValidationError::SchemaViolation {
            schema_name: self.schema_name.clone(),
            violations: ValidationViolations { violations },
        }
    }
}

/// Parse the embedded playlist schema.
pub fn playlist_schema() -> Result<Value, SchemaValidationError> {
    parse_schema(PLAYLIST_SCHEMA_NAME, PLAYLIST_SCHEMA_SOURCE)
}

/// Parse schema source text, labelling errors with `schema_name`.
pub(crate) fn parse_schema(schema_name: &str, source: &str) -> Result<Value, SchemaValidationError> {
    serde_json::from_str(source).map_err(|e| SchemaValidationError::SchemaLoadError {
        schema_name: schema_name.to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Read a data file as a JSON value, choosing the parser by extension.
///
/// `.yaml` and `.yml` are parsed as YAML; everything else as JSON.
pub fn load_document(path: &Path) -> Result<Value, SchemaValidationError> {
    let load_error = |reason: String| SchemaValidationError::DocumentLoadError {
        path: path.display().to_string(),
        reason,
    };

    let content = std::fs::read_to_string(path)
        .map_err(|e| load_error(format!("cannot read file: {e}")))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        "yaml" | "yml" => {
            let yaml_value: serde_yaml::Value = serde_yaml::from_str(&content)
                .map_err(|e| load_error(format!("invalid YAML: {e}")))?;
            yaml_to_json_value(&yaml_value)
                .map_err(|e| load_error(format!("YAML-to-JSON conversion failed: {e}")))
        }
        _ => serde_json::from_str(&content).map_err(|e| load_error(format!("invalid JSON: {e}"))),
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Tags are dropped and scalar map keys are stringified; data files only
/// use the JSON-compatible subset of YAML.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_song() -> Value {
        json!({
            "previewUrl": "https://x.com/p.mp3",
            "title": "T",
            "artists": "A",
            "album": "Alb",
            "imageUrl": "https://x.com/i.png",
            "embedUrl": "https://x.com/e"
        })
    }

    fn valid_playlist() -> Value {
        json!({
            "playlistId": "pl1",
            "playlistName": "Chill",
            "playlistImage": "https://x.com/a.png",
            "songs": [valid_song()]
        })
    }

    fn violations_of(err: SchemaValidationError) -> ValidationViolations {
        match err {
            SchemaValidationError::SchemaViolation { violations, .. } => violations,
            other => panic!("Expected SchemaViolation, got: {other}"),
        }
    }

    #[test]
    fn embedded_schema_compiles() {
        let validator = SchemaValidator::new().unwrap();
        assert_eq!(validator.schema_name(), PLAYLIST_SCHEMA_NAME);
        assert_eq!(validator.schema()["type"], "object");
    }

    #[test]
    fn valid_record_round_trips() {
        let validator = SchemaValidator::new().unwrap();
        let record = validator.validate_record(&valid_playlist()).unwrap();
        assert_eq!(record.playlist_id().as_str(), "pl1");
        assert_eq!(record.len(), 1);
        assert_eq!(record.to_value().unwrap(), valid_playlist());
    }

    #[test]
    fn each_missing_top_level_field_is_rejected() {
        let validator = SchemaValidator::new().unwrap();
        for field in ["playlistId", "playlistName", "playlistImage", "songs"] {
            let mut doc = valid_playlist();
            doc.as_object_mut().unwrap().remove(field);
            let violations = violations_of(validator.validate_record(&doc).unwrap_err());
            assert!(
                violations.violations().iter().any(|v| v.message.contains(field)),
                "Expected violation mentioning '{field}', got: {violations}"
            );
        }
    }

    #[test]
    fn each_missing_song_field_is_scoped_to_its_index() {
        let validator = SchemaValidator::new().unwrap();
        for field in ["previewUrl", "title", "artists", "album", "imageUrl", "embedUrl"] {
            let mut song = valid_song();
            song.as_object_mut().unwrap().remove(field);
            let mut doc = valid_playlist();
            doc["songs"] = json!([valid_song(), song]);

            let violations = violations_of(validator.validate_value(&doc).unwrap_err());
            assert_eq!(violations.paths(), ["/songs/1"], "field {field}");
            assert!(violations.violations()[0].message.contains(field));
        }
    }

    #[test]
    fn non_url_playlist_image_is_rejected() {
        let validator = SchemaValidator::new().unwrap();
        let mut doc = valid_playlist();
        doc["playlistImage"] = json!("not-a-url");
        let violations = violations_of(validator.validate_record(&doc).unwrap_err());
        assert_eq!(violations.paths(), ["/playlistImage"]);
    }

    #[test]
    fn non_url_song_fields_are_rejected() {
        let validator = SchemaValidator::new().unwrap();
        for field in ["previewUrl", "imageUrl", "embedUrl"] {
            let mut doc = valid_playlist();
            doc["songs"][0][field] = json!("not-a-url");
            let violations = violations_of(validator.validate_value(&doc).unwrap_err());
            let expected = format!("/songs/0/{field}");
            assert_eq!(violations.paths(), [expected.as_str()]);
        }
    }

    #[test]
    fn hostless_urls_are_reported_at_their_field() {
        let validator = SchemaValidator::new().unwrap();
        for bad in ["https://", "http:"] {
            let mut doc = valid_playlist();
            doc["playlistImage"] = json!(bad);
            doc["songs"][0]["previewUrl"] = json!(bad);
            let violations = violations_of(validator.validate_record(&doc).unwrap_err());
            let mut paths = violations.paths();
            paths.sort();
            assert_eq!(paths, ["/playlistImage", "/songs/0/previewUrl"], "value {bad}");
        }
    }

    #[test]
    fn lenient_urls_are_accepted_verbatim() {
        let validator = SchemaValidator::new().unwrap();
        let mut doc = valid_playlist();
        doc["playlistImage"] = json!("https://x.com/a b.png");
        doc["songs"][0]["imageUrl"] = json!("https://x.com/%zz");
        doc["songs"][0]["embedUrl"] = json!("HTTPS://X.com");
        let record = validator.validate_record(&doc).unwrap();
        assert_eq!(record.to_value().unwrap(), doc);
    }

    #[test]
    fn wrong_primitive_type_is_rejected() {
        let validator = SchemaValidator::new().unwrap();
        let mut doc = valid_playlist();
        doc["playlistName"] = json!(42);
        doc["songs"][0]["title"] = json!(["T"]);
        let violations = violations_of(validator.validate_value(&doc).unwrap_err());
        let mut paths = violations.paths();
        paths.sort();
        assert_eq!(paths, ["/playlistName", "/songs/0/title"]);
    }

    #[test]
    fn songs_must_be_an_array() {
        let validator = SchemaValidator::new().unwrap();
        let mut doc = valid_playlist();
        doc["songs"] = json!({});
        let violations = violations_of(validator.validate_value(&doc).unwrap_err());
        assert_eq!(violations.paths(), ["/songs"]);
    }

    #[test]
    fn empty_songs_is_accepted() {
        let validator = SchemaValidator::new().unwrap();
        let mut doc = valid_playlist();
        doc["songs"] = json!([]);
        let record = validator.validate_record(&doc).unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn empty_playlist_id_is_rejected() {
        let validator = SchemaValidator::new().unwrap();
        let mut doc = valid_playlist();
        doc["playlistId"] = json!("");
        let violations = violations_of(validator.validate_record(&doc).unwrap_err());
        assert_eq!(violations.paths(), ["/playlistId"]);
    }

    #[test]
    fn non_object_root_is_rejected() {
        let validator = SchemaValidator::new().unwrap();
        let violations = violations_of(validator.validate_value(&json!("pl1")).unwrap_err());
        assert_eq!(violations.paths(), [""]);
    }

    #[test]
    fn unknown_keys_are_accepted_and_stripped() {
        let validator = SchemaValidator::new().unwrap();
        let mut doc = valid_playlist();
        doc["followers"] = json!(1200);
        let record = validator.validate_record(&doc).unwrap();
        assert_eq!(record.to_value().unwrap(), valid_playlist());
    }

    #[test]
    fn external_refs_are_not_fetched() {
        let schema = json!({
            "$ref": "https://example.invalid/remote.schema.json"
        });
        match SchemaValidator::from_schema("remote.schema.json", schema) {
            Err(err) => assert!(
                matches!(err, SchemaValidationError::ValidatorBuildError { .. }),
                "Expected ValidatorBuildError, got: {err}"
            ),
            Ok(validator) => assert!(validator.validate_value(&json!({})).is_err()),
        }
    }

    #[test]
    fn validate_file_reads_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chill.yaml");
        std::fs::write(
            &path,
            r#"
playlistId: pl1
playlistName: Chill
playlistImage: https://x.com/a.png
songs:
  - previewUrl: https://x.com/p.mp3
    title: T
    artists: A
    album: Alb
    imageUrl: https://x.com/i.png
    embedUrl: https://x.com/e
"#,
        )
        .unwrap();

        let validator = SchemaValidator::new().unwrap();
        let record = validator.validate_file(&path).unwrap();
        assert_eq!(record.to_value().unwrap(), valid_playlist());
    }

    #[test]
    fn validate_file_labels_violation_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"{"playlistId": "pl1"}"#).unwrap();

        let validator = SchemaValidator::new().unwrap();
        let err = validator.validate_file(&path).unwrap_err();
        match &err {
            SchemaValidationError::SchemaViolation { schema_name, violations } => {
                assert!(schema_name.contains("broken.json"));
                let report = violations.to_string();
                for field in ["playlistName", "playlistImage", "songs"] {
                    assert!(report.contains(field), "missing {field} in: {report}");
                }
            }
            other => panic!("Expected SchemaViolation, got: {other}"),
        }
    }

    #[test]
    fn validate_file_reports_unparseable_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        let validator = SchemaValidator::new().unwrap();
        let err = validator.validate_file(&path).unwrap_err();
        assert!(
            matches!(err, SchemaValidationError::DocumentLoadError { .. }),
            "Expected DocumentLoadError, got: {err}"
        );
    }

    #[test]
    fn yaml_to_json_conversion() {
        let yaml_str = r#"
playlistId: pl1
count: 42
explicit: true
songs:
  - one
  - two
1: numeric key
"#;
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(yaml_str).unwrap();
        let json_value = yaml_to_json_value(&yaml_value).unwrap();

        assert_eq!(json_value["playlistId"], "pl1");
        assert_eq!(json_value["count"], 42);
        assert_eq!(json_value["explicit"], true);
        assert_eq!(json_value["songs"][1], "two");
        assert_eq!(json_value["1"], "numeric key");
    }

    #[test]
    fn violation_display_format() {
        let v = Violation {
            instance_path: "/songs/0".to_string(),
            schema_path: "/properties/songs/items/$ref/required".to_string(),
            message: r#""embedUrl" is a required property"#.to_string(),
        };
        let display = v.to_string();
        assert!(display.contains("/songs/0"));
        assert!(display.contains("embedUrl"));
    }

    #[test]
    fn violation_display_root() {
        let v = Violation {
            instance_path: String::new(),
            schema_path: "/required".to_string(),
            message: r#""playlistId" is a required property"#.to_string(),
        };
        assert!(v.to_string().contains("(root)"));
    }
}
