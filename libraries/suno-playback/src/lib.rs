//! Suno Music Library - Playback Control
//!
//! Playlist and transport control for the library's audio player.
//!
//! This crate provides:
//! - Playlists built from a single song or a whole rendered list
//! - Shuffle (Fisher-Yates) for "shuffle all"
//! - Looping next/previous navigation, with "previous" restarting the
//!   current song once it is a few seconds in
//! - Streaming URL resolution for track ids
//! - Play/pause, seek and volume on a shared media element
//! - Progress, duration and now-playing events for the page
//!
//! # Architecture
//!
//! `suno-playback` never touches page elements. The audio element is reached
//! through the [`MediaSink`] trait, user actions arrive as [`UserIntent`]s and
//! UI updates leave as [`PlayerEvent`]s. With the `wasm` feature the crate
//! ships an `HtmlAudioElement` sink and a JavaScript-facing wrapper.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use suno_playback::{MediaSink, PlaybackController, PlayerConfig, PlayerEvent, TrackDescriptor};
//!
//! # #[derive(Default)]
//! # struct NullSink { source: Option<String>, paused: bool }
//! # impl MediaSink for NullSink {
//! #     fn source(&self) -> Option<String> { self.source.clone() }
//! #     fn set_source(&mut self, url: &str) { self.source = Some(url.to_string()); }
//! #     fn volume(&self) -> f64 { 1.0 }
//! #     fn set_volume(&mut self, _gain: f64) {}
//! #     fn current_time(&self) -> f64 { 0.0 }
//! #     fn set_current_time(&mut self, _seconds: f64) {}
//! #     fn duration(&self) -> f64 { f64::NAN }
//! #     fn paused(&self) -> bool { self.paused }
//! #     fn play(&mut self) { self.paused = false; }
//! #     fn pause(&mut self) { self.paused = true; }
//! # }
//! let mut controller = PlaybackController::new(NullSink::default(), &PlayerConfig::default());
//!
//! let tracks = vec![
//!     TrackDescriptor::new("abc123")?.with_title("First"),
//!     TrackDescriptor::new("def456")?.with_title("Second"),
//! ];
//!
//! // User clicked the second row of the list
//! controller.start_from_scope(tracks, 1, false)?;
//! assert_eq!(
//!     controller.sink().source().as_deref(),
//!     Some("https://cdn1.suno.ai/def456.m4a")
//! );
//!
//! // Loops back to the first song
//! controller.skip_to_next();
//! assert_eq!(controller.cursor(), Some(0));
//!
//! for event in controller.drain_events() {
//!     if let PlayerEvent::NowPlayingChanged(now) = event {
//!         println!("Now playing {} by {}", now.title, now.artist);
//!     }
//! }
//! # Ok::<(), suno_playback::PlayerError>(())
//! ```

mod clock;
mod config;
mod controller;
mod error;
mod events;
mod intent;
mod playlist;
mod resolver;
mod shuffle;
mod sink;
mod types;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use clock::format_clock;
pub use config::PlayerConfig;
pub use controller::PlaybackController;
pub use error::{PlayerError, Result};
pub use events::PlayerEvent;
pub use intent::{ScopeSelection, UserIntent};
pub use playlist::Playlist;
pub use resolver::{SourceResolver, DEFAULT_AUDIO_EXTENSION, DEFAULT_STREAMING_ORIGIN};
pub use shuffle::shuffle_tracks;
pub use sink::{MediaSink, SinkEvent};
pub use types::{NowPlaying, PlaybackStatus, TrackDescriptor, UNKNOWN_TITLE};
pub use volume::Volume;
