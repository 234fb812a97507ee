//! Core types for playback control

use crate::error::{PlayerError, Result};
use serde::{Deserialize, Serialize};

/// Placeholder shown when a track carries no title
pub const UNKNOWN_TITLE: &str = "Unknown";

/// One playable song and its display metadata
///
/// Built from a rendered song row (or a single clicked song) and never
/// mutated afterwards. The id is the stable key used both for the streaming
/// URL and for highlighting the playing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackDescriptor {
    id: String,
    title: Option<String>,
    artist: Option<String>,
    cover_ref: Option<String>,
}

impl TrackDescriptor {
    /// Create a descriptor with only an id
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(PlayerError::EmptyTrackId);
        }

        Ok(Self {
            id,
            title: None,
            artist: None,
            cover_ref: None,
        })
    }

    /// Set the display title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the artist name
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Set the artwork reference
    #[must_use]
    pub fn with_cover(mut self, cover_ref: impl Into<String>) -> Self {
        self.cover_ref = Some(cover_ref.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw title, `None` when the row had no title
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Raw artist, `None` when the row had no artist
    pub fn artist(&self) -> Option<&str> {
        self.artist.as_deref()
    }

    /// Artwork reference; empty strings count as missing artwork
    pub fn cover_ref(&self) -> Option<&str> {
        self.cover_ref.as_deref().filter(|c| !c.is_empty())
    }

    /// Title to display, falling back to `placeholder`
    pub fn display_title<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => placeholder,
        }
    }

    /// Artist to display (empty when unknown)
    pub fn display_artist(&self) -> &str {
        self.artist.as_deref().unwrap_or_default()
    }
}

/// Display fields of the track that just started loading
///
/// Carried by [`crate::PlayerEvent::NowPlayingChanged`] so the presenter can
/// update title, artist, artwork and the highlighted row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    /// Track id, used to match the playing row
    pub id: String,
    /// Title with the placeholder already applied
    pub title: String,
    /// Artist, empty when unknown
    pub artist: String,
    /// Artwork reference; `None` hides the cover
    pub cover: Option<String>,
}

impl NowPlaying {
    pub(crate) fn from_track(track: &TrackDescriptor, placeholder: &str) -> Self {
        Self {
            id: track.id().to_string(),
            title: track.display_title(placeholder).to_string(),
            artist: track.display_artist().to_string(),
            cover: track.cover_ref().map(str::to_string),
        }
    }
}

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// No playlist has been started yet
    Idle,

    /// A track is selected; the sink may be playing or paused
    Loaded,
}
