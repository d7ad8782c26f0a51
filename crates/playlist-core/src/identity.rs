//! # Playlist Identifier
//!
//! Newtype wrapper for the `playlistId` field so that a playlist
//! identifier cannot be confused with a display name or a song title.

use serde::{Deserialize, Serialize};

use crate::error::PlaylistError;

/// Identifier of a playlist as given by the data source (e.g. a Spotify
/// playlist id). Always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlaylistId(String);

impl PlaylistId {
    /// Create a playlist identifier, rejecting the empty string.
    pub fn new(id: impl Into<String>) -> Result<Self, PlaylistError> {
        let id = id.into();
        if id.is_empty() {
            return Err(PlaylistError::EmptyIdentifier("playlistId"));
        }
        Ok(Self(id))
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlaylistId {
    type Error = PlaylistError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlaylistId> for String {
    fn from(id: PlaylistId) -> Self {
        id.0
    }
}

impl std::fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_non_empty() {
        let id = PlaylistId::new("pl1").unwrap();
        assert_eq!(id.as_str(), "pl1");
        assert_eq!(id.to_string(), "pl1");
    }

    #[test]
    fn new_rejects_empty() {
        let err = PlaylistId::new("").unwrap_err();
        assert!(matches!(err, PlaylistError::EmptyIdentifier("playlistId")));
    }

    #[test]
    fn deserialize_rejects_empty_string() {
        let result: Result<PlaylistId, _> = serde_json::from_str(r#""""#);
        assert!(result.is_err());
    }

    #[test]
    fn serializes_as_bare_string() {
        let id = PlaylistId::new("37i9dQZF1DX4WYpdgoIcn6").unwrap();
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            r#""37i9dQZF1DX4WYpdgoIcn6""#
        );
    }
}
