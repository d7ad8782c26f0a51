//! # Playlist Records
//!
//! The typed form of one entry in the `playlists` collection. Field names
//! on the wire are camelCase; unknown keys in the input are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PlaylistError;
use crate::identity::PlaylistId;
use crate::link::WebUrl;

/// One track within a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongEntry {
    /// Short audio preview.
    pub preview_url: WebUrl,
    /// Track title.
    pub title: String,
    /// Free-form artist credit, possibly several names joined.
    pub artists: String,
    /// Album title.
    pub album: String,
    /// Cover art.
    pub image_url: WebUrl,
    /// Embeddable player.
    pub embed_url: WebUrl,
}

impl SongEntry {
    /// Build a song entry from raw strings, parsing the three URL fields.
    pub fn new(
        title: impl Into<String>,
        artists: impl Into<String>,
        album: impl Into<String>,
        preview_url: &str,
        image_url: &str,
        embed_url: &str,
    ) -> Result<Self, PlaylistError> {
        Ok(Self {
            preview_url: WebUrl::for_field("previewUrl", preview_url)?,
            title: title.into(),
            artists: artists.into(),
            album: album.into(),
            image_url: WebUrl::for_field("imageUrl", image_url)?,
            embed_url: WebUrl::for_field("embedUrl", embed_url)?,
        })
    }
}

/// A validated playlist and its songs in track order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistRecord {
    playlist_id: PlaylistId,
    playlist_name: String,
    playlist_image: WebUrl,
    songs: Vec<SongEntry>,
}

impl PlaylistRecord {
    /// Build a record from its parts.
    pub fn new(
        playlist_id: &str,
        playlist_name: impl Into<String>,
        playlist_image: &str,
        songs: Vec<SongEntry>,
    ) -> Result<Self, PlaylistError> {
        Ok(Self {
            playlist_id: PlaylistId::new(playlist_id)?,
            playlist_name: playlist_name.into(),
            playlist_image: WebUrl::for_field("playlistImage", playlist_image)?,
            songs,
        })
    }

    /// Convert an already shape-checked JSON value into a typed record.
    ///
    /// This does not report field paths; run the value through the schema
    /// validator first when diagnostics matter.
    pub fn from_value(value: Value) -> Result<Self, PlaylistError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Convert back into the wire representation.
    pub fn to_value(&self) -> Result<Value, PlaylistError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn playlist_id(&self) -> &PlaylistId {
        &self.playlist_id
    }

    pub fn playlist_name(&self) -> &str {
        &self.playlist_name
    }

    pub fn playlist_image(&self) -> &WebUrl {
        &self.playlist_image
    }

    /// Songs in track order.
    pub fn songs(&self) -> &[SongEntry] {
        &self.songs
    }

    /// Song at a zero-based track position.
    pub fn song(&self, index: usize) -> Option<&SongEntry> {
        self.songs.get(index)
    }

    /// Number of songs.
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}
