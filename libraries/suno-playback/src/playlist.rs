//! Looping playlist
//!
//! Ordered tracks plus a cursor. The playlist is only ever replaced
//! wholesale, so the cursor can never dangle into a shrunk list.

use crate::error::{PlayerError, Result};
use crate::types::TrackDescriptor;

/// Playlist for the shared media element
///
/// ```text
///   [0] Track A
///   [1] Track B   <- cursor
///   [2] Track C
///   advance() from [2] wraps to [0], retreat() from [0] wraps to [2]
/// ```
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    /// Tracks in play order (display order, or shuffled)
    entries: Vec<TrackDescriptor>,

    /// Index into `entries`; only meaningful while `entries` is non-empty
    cursor: usize,
}

impl Playlist {
    /// Create new empty playlist
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
        }
    }

    /// Replace every entry and move the cursor to `start_index`
    ///
    /// An empty `entries` leaves an empty playlist. On error the previous
    /// contents are kept.
    pub fn replace(&mut self, entries: Vec<TrackDescriptor>, start_index: usize) -> Result<()> {
        if !entries.is_empty() && start_index >= entries.len() {
            return Err(PlayerError::InvalidIndex {
                index: start_index,
                len: entries.len(),
            });
        }

        self.entries = entries;
        self.cursor = if self.entries.is_empty() { 0 } else { start_index };
        Ok(())
    }

    /// Track under the cursor
    pub fn current(&self) -> Option<&TrackDescriptor> {
        self.entries.get(self.cursor)
    }

    /// Move forward one entry, wrapping after the last
    pub fn advance(&mut self) -> Option<&TrackDescriptor> {
        if self.entries.is_empty() {
            return None;
        }

        self.cursor = (self.cursor + 1) % self.entries.len();
        self.current()
    }

    /// Move back one entry, wrapping before the first
    pub fn retreat(&mut self) -> Option<&TrackDescriptor> {
        if self.entries.is_empty() {
            return None;
        }

        let len = self.entries.len();
        self.cursor = (self.cursor + len - 1) % len;
        self.current()
    }

    /// Cursor position, `None` when empty
    pub fn cursor(&self) -> Option<usize> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.cursor)
        }
    }

    /// First position holding a track with this id
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|t| t.id() == id)
    }

    /// All tracks in play order
    pub fn entries(&self) -> &[TrackDescriptor] {
        &self.entries
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
