//! User intents coming from the page
//!
//! The presenter turns clicks and slider drags into these values; the
//! controller never looks at page elements itself.

use crate::types::TrackDescriptor;

/// The rendered list a clicked song belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeSelection {
    /// Every song in the list, in display order
    pub entries: Vec<TrackDescriptor>,
    /// Position of the clicked song within `entries`
    pub anchor: usize,
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq)]
pub enum UserIntent {
    /// Play button (or double click) on one song row
    ///
    /// `scope` is the containing list when the row sits in one.
    SingleTrackClicked {
        track: TrackDescriptor,
        scope: Option<ScopeSelection>,
    },

    /// "Play all" or "Shuffle" on a list
    PlayScope {
        entries: Vec<TrackDescriptor>,
        shuffle: bool,
    },

    /// Progress bar dragged, 0-100
    Seek { percent: f64 },

    /// Volume slider dragged, 0-100
    Volume { level: f64 },

    /// Play/pause button
    TogglePlayPause,

    /// Next button
    Next,

    /// Previous button
    Previous,
}
