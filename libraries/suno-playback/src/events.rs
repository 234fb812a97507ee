//! Player Events
//!
//! Event-based communication for UI synchronization. The controller queues
//! events as playback moves and the presenter drains them:
//! - Track changes (every load, including restarts through next/previous)
//! - Play/pause changes (mirrored from the media sink)
//! - Progress updates (on every sink time update once the duration is known)
//! - Duration labels (when metadata arrives)

use crate::types::NowPlaying;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// A new track was loaded and playback requested
    ///
    /// The presenter shows the player bar, updates title/artist/cover and
    /// highlights every row whose id matches.
    NowPlayingChanged(NowPlaying),

    /// Sink started or stopped playing
    PlayStateChanged {
        /// Whether the sink is now playing
        playing: bool,
    },

    /// Playback position moved
    ProgressChanged {
        /// Elapsed share of the track, 0-100
        percent: f64,
        /// Elapsed time as `m:ss`
        elapsed_label: String,
    },

    /// Track length became known
    DurationKnown {
        /// Duration as `m:ss`
        label: String,
    },
}

impl PlayerEvent {
    /// Short name, used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            PlayerEvent::NowPlayingChanged(_) => "now_playing_changed",
            PlayerEvent::PlayStateChanged { .. } => "play_state_changed",
            PlayerEvent::ProgressChanged { .. } => "progress_changed",
            PlayerEvent::DurationKnown { .. } => "duration_known",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kinds() {
        let now = PlayerEvent::NowPlayingChanged(NowPlaying {
            id: "abc".to_string(),
            title: "Song".to_string(),
            artist: String::new(),
            cover: None,
        });
        assert_eq!(now.kind(), "now_playing_changed");
        assert_eq!(
            PlayerEvent::PlayStateChanged { playing: true }.kind(),
            "play_state_changed"
        );
        assert_eq!(
            PlayerEvent::DurationKnown {
                label: "3:00".to_string()
            }
            .kind(),
            "duration_known"
        );
    }

    #[test]
    fn events_serialize_for_the_presenter() {
        let event = PlayerEvent::ProgressChanged {
            percent: 50.0,
            elapsed_label: "1:30".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("ProgressChanged"));
        assert!(json.contains("1:30"));
    }
}
