//! Playback controller - core orchestration
//!
//! Owns the playlist, drives the media sink and reacts to its events.
//! Everything runs on the page's event thread: each call does its work
//! synchronously and returns, and the one asynchronous step (the sink
//! starting playback) is never awaited.

use crate::{
    clock::format_clock,
    config::PlayerConfig,
    error::{PlayerError, Result},
    events::PlayerEvent,
    intent::{ScopeSelection, UserIntent},
    playlist::Playlist,
    resolver::SourceResolver,
    shuffle::shuffle_tracks,
    sink::{MediaSink, SinkEvent},
    types::{NowPlaying, PlaybackStatus, TrackDescriptor},
    volume::Volume,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info};

/// Central playback control
///
/// Coordinates:
/// - Playlist replacement from a single song or a whole list (optionally shuffled)
/// - Looping next/previous navigation with the restart-on-previous rule
/// - Play/pause, seek and volume on the media sink
/// - Progress, duration and play-state events for the presenter
///
/// The playing flag is only ever copied from sink events, never set here.
pub struct PlaybackController<S: MediaSink> {
    sink: S,
    playlist: Playlist,
    resolver: SourceResolver,
    volume: Volume,
    restart_threshold_secs: f64,
    unknown_title: String,

    // Observed from PlayStarted / PlayPaused
    is_playing: bool,

    rng: StdRng,

    // Event queue for UI synchronization
    pending_events: Vec<PlayerEvent>,
}

impl<S: MediaSink> PlaybackController<S> {
    /// Create a controller around a sink
    ///
    /// Applies the configured initial volume to the sink.
    pub fn new(mut sink: S, config: &PlayerConfig) -> Self {
        let volume = Volume::new(config.initial_volume);
        sink.set_volume(volume.gain());

        Self {
            sink,
            playlist: Playlist::new(),
            resolver: config.resolver(),
            volume,
            restart_threshold_secs: config.restart_threshold_secs,
            unknown_title: config.unknown_title.clone(),
            is_playing: false,
            rng: StdRng::from_entropy(),
            pending_events: Vec::new(),
        }
    }

    /// Replace the shuffle RNG (seeded RNGs make shuffles reproducible)
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    // ===== Starting Playback =====

    /// Play one song on its own
    pub fn start_from_single(&mut self, track: TrackDescriptor) {
        info!(track_id = %track.id(), "Starting single track");

        // One entry at index 0 can't be out of bounds
        self.playlist.replace(vec![track], 0).ok();
        self.load_and_play_current();
    }

    /// Play a whole list, starting at `anchor`
    ///
    /// With `shuffle` the list is randomized and playback starts at the top
    /// of the new order; the anchor is ignored. Without it, an anchor outside
    /// the list is rejected and the current playlist is left alone. An empty
    /// list is ignored.
    pub fn start_from_scope(
        &mut self,
        mut entries: Vec<TrackDescriptor>,
        anchor: usize,
        shuffle: bool,
    ) -> Result<()> {
        if entries.is_empty() {
            debug!(shuffle, "Ignoring play request for empty scope");
            return Ok(());
        }

        let start = if shuffle {
            shuffle_tracks(&mut entries, &mut self.rng);
            0
        } else {
            anchor
        };

        let len = entries.len();
        self.playlist.replace(entries, start).map_err(|e| {
            error!(anchor, len, "Anchor outside of scope");
            e
        })?;

        info!(len, start, shuffle, "Playlist replaced");
        self.load_and_play_current();
        Ok(())
    }

    // ===== Transport =====

    /// Pause when playing, resume when paused
    ///
    /// Reads the sink's paused state rather than a cached flag. Does nothing
    /// before the first track has been loaded.
    pub fn toggle_play_pause(&mut self) {
        if self.sink.source().is_none() {
            debug!("Toggle ignored, nothing loaded");
            return;
        }

        if self.sink.paused() {
            self.sink.play();
        } else {
            self.sink.pause();
        }
    }

    /// Go to the next track, wrapping to the first after the last
    pub fn skip_to_next(&mut self) {
        if self.playlist.advance().is_none() {
            return;
        }

        debug!(cursor = ?self.playlist.cursor(), "Skipping to next track");
        self.load_and_play_current();
    }

    /// Restart the track, or go to the previous one near its start
    ///
    /// Past the restart threshold the current track seeks back to 0 and the
    /// playlist position stays. Otherwise move back one track, wrapping to
    /// the last from the first.
    pub fn skip_to_previous(&mut self) {
        if self.playlist.is_empty() {
            return;
        }

        if self.sink.current_time() > self.restart_threshold_secs {
            debug!("Restarting current track");
            self.sink.set_current_time(0.0);
            return;
        }

        self.playlist.retreat();
        debug!(cursor = ?self.playlist.cursor(), "Skipping to previous track");
        self.load_and_play_current();
    }

    /// Current track played to the end: continue with the next one
    pub fn handle_ended(&mut self) {
        self.skip_to_next();
    }

    /// Seek to a share of the track (0-100)
    ///
    /// Ignored until the sink knows the track duration.
    pub fn seek_to_percent(&mut self, percent: f64) {
        let duration = self.sink.duration();
        if !has_known_duration(duration) || percent.is_nan() {
            return;
        }

        let percent = percent.clamp(0.0, 100.0);
        self.sink.set_current_time(percent / 100.0 * duration);
    }

    // ===== Volume =====

    /// Set volume (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.sink.set_volume(self.volume.gain());
    }

    /// Get current volume level (0-100)
    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    // ===== Sink Events =====

    /// React to a notification from the media sink
    pub fn handle_sink_event(&mut self, event: SinkEvent) {
        match event {
            SinkEvent::TimeAdvanced => self.emit_progress(),
            SinkEvent::MetadataReady => {
                let label = format_clock(self.sink.duration());
                self.emit(PlayerEvent::DurationKnown { label });
            }
            SinkEvent::Ended => self.handle_ended(),
            SinkEvent::PlayStarted => self.observe_play_state(true),
            SinkEvent::PlayPaused => self.observe_play_state(false),
            SinkEvent::PlayRejected { source, reason } => {
                log_play_rejection(&source, self.sink.source().as_deref(), &reason);
            }
        }
    }

    // ===== User Intents =====

    /// Route a presenter intent to the matching operation
    pub fn handle_intent(&mut self, intent: UserIntent) -> Result<()> {
        match intent {
            UserIntent::SingleTrackClicked { track, scope } => match scope {
                Some(ScopeSelection { entries, anchor }) => {
                    self.start_from_scope(entries, anchor, false)?;
                }
                None => self.start_from_single(track),
            },
            UserIntent::PlayScope { entries, shuffle } => {
                self.start_from_scope(entries, 0, shuffle)?;
            }
            UserIntent::Seek { percent } => self.seek_to_percent(percent),
            UserIntent::Volume { level } => self.set_volume(Volume::from_slider(level).level()),
            UserIntent::TogglePlayPause => self.toggle_play_pause(),
            UserIntent::Next => self.skip_to_next(),
            UserIntent::Previous => self.skip_to_previous(),
        }
        Ok(())
    }

    // ===== State Queries =====

    /// Idle until the first non-empty start, Loaded afterwards
    pub fn status(&self) -> PlaybackStatus {
        if self.playlist.is_empty() {
            PlaybackStatus::Idle
        } else {
            PlaybackStatus::Loaded
        }
    }

    /// Track under the playlist cursor
    pub fn current_track(&self) -> Option<&TrackDescriptor> {
        self.playlist.current()
    }

    /// Playlist cursor, `None` while idle
    pub fn cursor(&self) -> Option<usize> {
        self.playlist.cursor()
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Whether the sink last reported playing
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn resolver(&self) -> &SourceResolver {
        &self.resolver
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable sink access, for hosts that poke the media element directly
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // ===== Events =====

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    /// Resolve, assign and play the track under the cursor
    fn load_and_play_current(&mut self) {
        let Some(track) = self.playlist.current() else {
            return;
        };

        let url = self.resolver.resolve(track);
        let now_playing = NowPlaying::from_track(track, &self.unknown_title);

        info!(track_id = %now_playing.id, url = %url, "Loading track");
        self.sink.set_source(&url);
        self.sink.play();

        self.emit(PlayerEvent::NowPlayingChanged(now_playing));
    }

    /// Streams report an infinite duration: the label still moves, the bar stays at 0
    fn emit_progress(&mut self) {
        let duration = self.sink.duration();
        if duration.is_nan() || duration <= 0.0 {
            return;
        }

        let position = self.sink.current_time();
        let percent = if duration.is_finite() {
            position / duration * 100.0
        } else {
            0.0
        };

        self.emit(PlayerEvent::ProgressChanged {
            percent,
            elapsed_label: format_clock(position),
        });
    }

    fn observe_play_state(&mut self, playing: bool) {
        self.is_playing = playing;
        self.emit(PlayerEvent::PlayStateChanged { playing });
    }

    fn emit(&mut self, event: PlayerEvent) {
        debug!(kind = event.kind(), "Queueing player event");
        self.pending_events.push(event);
    }
}

fn has_known_duration(duration: f64) -> bool {
    duration.is_finite() && duration > 0.0
}

/// Log a failed play request
///
/// Rejections for a source the sink has since moved away from are stale:
/// they're noted at debug level and otherwise dropped. Nothing is retried.
/// Returns `true` when the rejection concerns the current source.
pub(crate) fn log_play_rejection(requested: &str, current: Option<&str>, reason: &str) -> bool {
    if current == Some(requested) {
        let err = PlayerError::PlaybackRejected(reason.to_string());
        error!(source = %requested, "{}", err);
        true
    } else {
        debug!(
            source = %requested,
            current = ?current,
            reason = %reason,
            "Ignoring stale playback rejection"
        );
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::DummySink;

    fn create_test_track(id: &str) -> TrackDescriptor {
        TrackDescriptor::new(id)
            .unwrap()
            .with_title(format!("Track {}", id))
            .with_artist("Test Artist")
    }

    fn create_tracks(ids: &[&str]) -> Vec<TrackDescriptor> {
        ids.iter().map(|id| create_test_track(id)).collect()
    }

    fn create_controller() -> PlaybackController<DummySink> {
        PlaybackController::new(DummySink::new(), &PlayerConfig::default())
            .with_rng(StdRng::seed_from_u64(11))
    }

    #[test]
    fn create_playback_controller() {
        let controller = create_controller();
        assert_eq!(controller.status(), PlaybackStatus::Idle);
        assert_eq!(controller.volume(), 80);
        assert!((controller.sink().volume - 0.8).abs() < 1e-9);
        assert!(controller.current_track().is_none());
        assert!(!controller.is_playing());
    }

    #[test]
    fn start_single_loads_and_plays() {
        let mut controller = create_controller();
        controller.start_from_single(create_test_track("abc123"));

        assert_eq!(controller.status(), PlaybackStatus::Loaded);
        assert_eq!(controller.cursor(), Some(0));
        assert_eq!(controller.playlist().len(), 1);
        assert_eq!(
            controller.sink().play_requests,
            vec!["https://cdn1.suno.ai/abc123.m4a".to_string()]
        );

        let events = controller.drain_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            PlayerEvent::NowPlayingChanged(now) => {
                assert_eq!(now.id, "abc123");
                assert_eq!(now.title, "Track abc123");
                assert_eq!(now.artist, "Test Artist");
                assert_eq!(now.cover, None);
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert!(!controller.has_pending_events());
    }

    #[test]
    fn start_scope_uses_anchor() {
        let mut controller = create_controller();
        controller
            .start_from_scope(create_tracks(&["a", "b", "c"]), 1, false)
            .unwrap();

        assert_eq!(controller.cursor(), Some(1));
        assert_eq!(controller.current_track().unwrap().id(), "b");
        assert_eq!(
            controller.sink().source.as_deref(),
            Some("https://cdn1.suno.ai/b.m4a")
        );
    }

    #[test]
    fn start_scope_rejects_bad_anchor() {
        let mut controller = create_controller();
        controller
            .start_from_scope(create_tracks(&["a", "b"]), 1, false)
            .unwrap();
        controller.drain_events();

        let result = controller.start_from_scope(create_tracks(&["x", "y"]), 2, false);
        assert!(matches!(
            result,
            Err(PlayerError::InvalidIndex { index: 2, len: 2 })
        ));

        // Nothing changed
        assert_eq!(controller.current_track().unwrap().id(), "b");
        assert_eq!(controller.sink().play_requests.len(), 1);
        assert!(!controller.has_pending_events());
    }

    #[test]
    fn shuffle_ignores_anchor() {
        let mut controller = create_controller();
        controller
            .start_from_scope(create_tracks(&["a", "b", "c", "d"]), 3, true)
            .unwrap();

        assert_eq!(controller.cursor(), Some(0));
        let first = controller.playlist().entries()[0].id().to_string();
        assert_eq!(controller.current_track().unwrap().id(), first);
    }

    #[test]
    fn shuffle_with_out_of_range_anchor_still_starts() {
        let mut controller = create_controller();
        controller
            .start_from_scope(create_tracks(&["a", "b"]), 99, true)
            .unwrap();
        assert_eq!(controller.cursor(), Some(0));
    }

    #[test]
    fn empty_scope_is_ignored() {
        let mut controller = create_controller();
        controller
            .start_from_scope(create_tracks(&["a", "b"]), 1, false)
            .unwrap();

        controller.start_from_scope(Vec::new(), 0, false).unwrap();
        controller.start_from_scope(Vec::new(), 0, true).unwrap();

        assert_eq!(controller.playlist().len(), 2);
        assert_eq!(controller.cursor(), Some(1));
    }

    #[test]
    fn toggle_without_source_is_noop() {
        let mut controller = create_controller();
        controller.toggle_play_pause();

        assert!(controller.sink().play_requests.is_empty());
        assert_eq!(controller.sink().pause_requests, 0);
    }

    #[test]
    fn toggle_follows_sink_state() {
        let mut controller = create_controller();
        controller.start_from_single(create_test_track("a"));
        assert!(!controller.sink().paused);

        controller.toggle_play_pause();
        assert!(controller.sink().paused);
        assert_eq!(controller.sink().pause_requests, 1);

        // Sink resumed on its own (e.g. media keys): toggle pauses again
        controller.sink_mut().paused = false;
        controller.toggle_play_pause();
        assert_eq!(controller.sink().pause_requests, 2);

        controller.toggle_play_pause();
        assert!(!controller.sink().paused);
        assert_eq!(controller.sink().play_requests.len(), 2);
    }

    #[test]
    fn next_wraps_around() {
        let mut controller = create_controller();
        controller
            .start_from_scope(create_tracks(&["a", "b", "c"]), 2, false)
            .unwrap();

        controller.skip_to_next();
        assert_eq!(controller.cursor(), Some(0));
        assert_eq!(
            controller.sink().source.as_deref(),
            Some("https://cdn1.suno.ai/a.m4a")
        );
    }

    #[test]
    fn navigation_on_idle_is_noop() {
        let mut controller = create_controller();
        controller.skip_to_next();
        controller.skip_to_previous();
        controller.handle_ended();

        assert_eq!(controller.status(), PlaybackStatus::Idle);
        assert!(controller.sink().source.is_none());
        assert!(!controller.has_pending_events());
    }

    #[test]
    fn previous_restarts_past_threshold() {
        let mut controller = create_controller();
        controller
            .start_from_scope(create_tracks(&["a", "b", "c"]), 1, false)
            .unwrap();
        controller.sink_mut().current_time = 3.01;

        controller.skip_to_previous();

        assert_eq!(controller.cursor(), Some(1));
        assert_eq!(controller.sink().current_time, 0.0);
        assert_eq!(controller.sink().play_requests.len(), 1);
    }

    #[test]
    fn previous_at_threshold_goes_back() {
        let mut controller = create_controller();
        controller
            .start_from_scope(create_tracks(&["a", "b", "c"]), 1, false)
            .unwrap();
        controller.sink_mut().current_time = 3.0;

        controller.skip_to_previous();
        assert_eq!(controller.cursor(), Some(0));
    }

    #[test]
    fn previous_wraps_to_last() {
        let mut controller = create_controller();
        controller
            .start_from_scope(create_tracks(&["a", "b", "c"]), 0, false)
            .unwrap();
        controller.sink_mut().current_time = 2.99;

        controller.skip_to_previous();
        assert_eq!(controller.cursor(), Some(2));
        assert_eq!(
            controller.sink().source.as_deref(),
            Some("https://cdn1.suno.ai/c.m4a")
        );
    }

    #[test]
    fn ended_plays_next() {
        let mut controller = create_controller();
        controller
            .start_from_scope(create_tracks(&["a", "b", "c"]), 2, false)
            .unwrap();

        controller.handle_sink_event(SinkEvent::Ended);
        assert_eq!(controller.cursor(), Some(0));
        assert_eq!(controller.status(), PlaybackStatus::Loaded);
    }

    #[test]
    fn seek_needs_known_duration() {
        let mut controller = create_controller();
        controller.start_from_single(create_test_track("a"));

        controller.seek_to_percent(50.0);
        assert_eq!(controller.sink().current_time, 0.0);

        controller.sink_mut().duration = 200.0;
        controller.seek_to_percent(25.0);
        assert_eq!(controller.sink().current_time, 50.0);

        controller.seek_to_percent(150.0);
        assert_eq!(controller.sink().current_time, 200.0);
    }

    #[test]
    fn set_volume_updates_sink() {
        let mut controller = create_controller();
        controller.set_volume(30);
        assert_eq!(controller.volume(), 30);
        assert!((controller.sink().volume - 0.3).abs() < 1e-9);

        controller.set_volume(200);
        assert_eq!(controller.volume(), 100);
        assert_eq!(controller.sink().volume, 1.0);
    }

    #[test]
    fn progress_and_duration_events() {
        let mut controller = create_controller();
        controller.start_from_single(create_test_track("a"));
        controller.drain_events();

        // Unknown duration: no progress
        controller.handle_sink_event(SinkEvent::TimeAdvanced);
        assert!(!controller.has_pending_events());

        controller.sink_mut().duration = 125.7;
        controller.handle_sink_event(SinkEvent::MetadataReady);
        controller.sink_mut().current_time = 62.85;
        controller.handle_sink_event(SinkEvent::TimeAdvanced);

        let events = controller.drain_events();
        assert_eq!(
            events[0],
            PlayerEvent::DurationKnown {
                label: "2:05".to_string()
            }
        );
        match &events[1] {
            PlayerEvent::ProgressChanged {
                percent,
                elapsed_label,
            } => {
                assert!((percent - 50.0).abs() < 1e-9);
                assert_eq!(elapsed_label, "1:02");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn progress_with_unbounded_duration() {
        let mut controller = create_controller();
        controller.start_from_single(create_test_track("live"));
        controller.drain_events();

        controller.sink_mut().duration = f64::INFINITY;
        controller.sink_mut().current_time = 75.0;
        controller.handle_sink_event(SinkEvent::TimeAdvanced);

        assert_eq!(
            controller.drain_events(),
            vec![PlayerEvent::ProgressChanged {
                percent: 0.0,
                elapsed_label: "1:15".to_string(),
            }]
        );

        // Seeking still needs a finite duration
        controller.seek_to_percent(50.0);
        assert_eq!(controller.sink().current_time, 75.0);
    }

    #[test]
    fn play_state_is_observed() {
        let mut controller = create_controller();
        controller.handle_sink_event(SinkEvent::PlayStarted);
        assert!(controller.is_playing());

        controller.handle_sink_event(SinkEvent::PlayPaused);
        assert!(!controller.is_playing());

        assert_eq!(
            controller.drain_events(),
            vec![
                PlayerEvent::PlayStateChanged { playing: true },
                PlayerEvent::PlayStateChanged { playing: false },
            ]
        );
    }

    #[test]
    fn rejection_changes_nothing() {
        let mut controller = create_controller();
        controller
            .start_from_scope(create_tracks(&["a", "b"]), 0, false)
            .unwrap();
        controller.drain_events();

        controller.handle_sink_event(SinkEvent::PlayRejected {
            source: "https://cdn1.suno.ai/a.m4a".to_string(),
            reason: "NotAllowedError".to_string(),
        });

        assert_eq!(controller.cursor(), Some(0));
        assert_eq!(controller.sink().play_requests.len(), 1);
        assert!(!controller.has_pending_events());
    }

    #[test]
    fn rejection_for_current_source_is_reported() {
        let url = "https://cdn1.suno.ai/a.m4a";
        assert!(log_play_rejection(url, Some(url), "NotAllowedError"));
    }

    #[test]
    fn stale_rejection_is_not_reported() {
        let old = "https://cdn1.suno.ai/a.m4a";
        let new = "https://cdn1.suno.ai/b.m4a";
        assert!(!log_play_rejection(old, Some(new), "AbortError"));
        assert!(!log_play_rejection(old, None, "AbortError"));
    }

    #[test]
    fn intents_route_to_operations() {
        let mut controller = create_controller();

        controller
            .handle_intent(UserIntent::SingleTrackClicked {
                track: create_test_track("b"),
                scope: Some(ScopeSelection {
                    entries: create_tracks(&["a", "b", "c"]),
                    anchor: 1,
                }),
            })
            .unwrap();
        assert_eq!(controller.cursor(), Some(1));
        assert_eq!(controller.playlist().len(), 3);

        controller
            .handle_intent(UserIntent::SingleTrackClicked {
                track: create_test_track("solo"),
                scope: None,
            })
            .unwrap();
        assert_eq!(controller.playlist().len(), 1);
        assert_eq!(controller.current_track().unwrap().id(), "solo");

        controller
            .handle_intent(UserIntent::PlayScope {
                entries: create_tracks(&["x", "y"]),
                shuffle: false,
            })
            .unwrap();
        assert_eq!(controller.current_track().unwrap().id(), "x");

        controller.handle_intent(UserIntent::Next).unwrap();
        assert_eq!(controller.current_track().unwrap().id(), "y");

        controller.handle_intent(UserIntent::Previous).unwrap();
        assert_eq!(controller.current_track().unwrap().id(), "x");

        controller
            .handle_intent(UserIntent::Volume { level: 55.0 })
            .unwrap();
        assert_eq!(controller.volume(), 55);

        controller.handle_intent(UserIntent::TogglePlayPause).unwrap();
        assert!(controller.sink().paused);
    }

    #[test]
    fn intent_with_bad_anchor_fails() {
        let mut controller = create_controller();
        let result = controller.handle_intent(UserIntent::SingleTrackClicked {
            track: create_test_track("a"),
            scope: Some(ScopeSelection {
                entries: create_tracks(&["a"]),
                anchor: 4,
            }),
        });
        assert!(matches!(result, Err(PlayerError::InvalidIndex { .. })));
        assert_eq!(controller.status(), PlaybackStatus::Idle);
    }

    #[test]
    fn unknown_title_placeholder_from_config() {
        let config = PlayerConfig {
            unknown_title: "Untitled".to_string(),
            ..Default::default()
        };
        let mut controller = PlaybackController::new(DummySink::new(), &config);
        controller.start_from_single(TrackDescriptor::new("a").unwrap());

        match &controller.drain_events()[0] {
            PlayerEvent::NowPlayingChanged(now) => assert_eq!(now.title, "Untitled"),
            other => panic!("unexpected event {:?}", other),
        }
    }
}
