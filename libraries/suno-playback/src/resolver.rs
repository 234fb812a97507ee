//! Streaming URL resolution
//!
//! Maps a track id to `{origin}/{id}.{extension}`. The id is inserted
//! verbatim; a bad id only shows up later as a load failure on the sink.

use crate::types::TrackDescriptor;

/// Default CDN serving the audio files
pub const DEFAULT_STREAMING_ORIGIN: &str = "https://cdn1.suno.ai";

/// Default container extension of the audio files
pub const DEFAULT_AUDIO_EXTENSION: &str = "m4a";

/// Builds streaming URLs for tracks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceResolver {
    origin: String,
    extension: String,
}

impl SourceResolver {
    /// Create a resolver for the given origin and extension
    ///
    /// A single trailing `/` on the origin is dropped so the joined URL
    /// never contains `//` before the id.
    pub fn new(origin: impl Into<String>, extension: impl Into<String>) -> Self {
        let mut origin = origin.into();
        if origin.ends_with('/') {
            origin.pop();
        }

        Self {
            origin,
            extension: extension.into(),
        }
    }

    /// Streaming URL for a track
    pub fn resolve(&self, track: &TrackDescriptor) -> String {
        format!("{}/{}.{}", self.origin, track.id(), self.extension)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl Default for SourceResolver {
    fn default() -> Self {
        Self::new(DEFAULT_STREAMING_ORIGIN, DEFAULT_AUDIO_EXTENSION)
    }
}
