//! WASM-compatible type definitions

use crate::{PlayerError, TrackDescriptor};
use serde::{Deserialize, Serialize};

/// Song row as read from the page's `data-*` attributes
///
/// Field names follow the page (`uuid`, `coverUrl`), so the JavaScript side
/// can pass the dataset objects straight through.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WasmTrack {
    pub uuid: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
}

// Conversion from the page representation to the internal descriptor
impl TryFrom<WasmTrack> for TrackDescriptor {
    type Error = PlayerError;

    fn try_from(track: WasmTrack) -> Result<Self, Self::Error> {
        let mut descriptor = TrackDescriptor::new(track.uuid)?;
        if let Some(title) = track.title {
            descriptor = descriptor.with_title(title);
        }
        if let Some(artist) = track.artist {
            descriptor = descriptor.with_artist(artist);
        }
        if let Some(cover) = track.cover_url {
            descriptor = descriptor.with_cover(cover);
        }
        Ok(descriptor)
    }
}

// Conversion back for handing the playlist to JavaScript
impl From<&TrackDescriptor> for WasmTrack {
    fn from(track: &TrackDescriptor) -> Self {
        Self {
            uuid: track.id().to_string(),
            title: track.title().map(str::to_string),
            artist: track.artist().map(str::to_string),
            cover_url: track.cover_ref().map(str::to_string),
        }
    }
}
