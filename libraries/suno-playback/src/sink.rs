//! Platform-agnostic media sink
//!
//! Abstracts the single shared media element (an HTML `<audio>` tag in the
//! browser, a fake in tests) that the controller drives and observes.

use serde::{Deserialize, Serialize};

/// Audio output the controller drives
///
/// The sink owns the real playback state: whether it is paused, where it is
/// in the track and how long the track is. The controller only ever reads
/// these back, so external changes (media keys, the browser pausing a
/// background tab) are picked up naturally.
pub trait MediaSink {
    /// Currently assigned source URL, `None` before the first load
    fn source(&self) -> Option<String>;

    /// Assign a new source URL, replacing whatever was loaded
    fn set_source(&mut self, url: &str);

    /// Output gain (0.0-1.0)
    fn volume(&self) -> f64;

    /// Set output gain (0.0-1.0)
    fn set_volume(&mut self, gain: f64);

    /// Playback position in seconds
    fn current_time(&self) -> f64;

    /// Move the playback position (seconds)
    fn set_current_time(&mut self, seconds: f64);

    /// Track length in seconds; NaN until metadata is known
    fn duration(&self) -> f64;

    /// Whether the sink is paused (true before anything played)
    fn paused(&self) -> bool;

    /// Request playback of the current source
    ///
    /// Fire-and-forget: the outcome arrives later, a failure as
    /// [`SinkEvent::PlayRejected`]. A newer request supersedes an older one.
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);
}

/// Notifications coming back from the media sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SinkEvent {
    /// Playback position moved
    TimeAdvanced,

    /// Duration became known for the current source
    MetadataReady,

    /// Current track played to the end
    Ended,

    /// Sink started playing
    PlayStarted,

    /// Sink paused
    PlayPaused,

    /// A play request failed
    PlayRejected {
        /// Source that was being played when the request was made
        source: String,
        /// Reason given by the sink (policy, decode or network failure)
        reason: String,
    },
}

/// In-memory sink for unit tests
///
/// Records every call so tests can assert on what the controller asked for.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct DummySink {
    pub source: Option<String>,
    pub volume: f64,
    pub current_time: f64,
    pub duration: f64,
    pub paused: bool,
    pub play_requests: Vec<String>,
    pub pause_requests: usize,
}

#[cfg(test)]
impl DummySink {
    pub fn new() -> Self {
        Self {
            volume: 1.0,
            duration: f64::NAN,
            paused: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
impl MediaSink for DummySink {
    fn source(&self) -> Option<String> {
        self.source.clone()
    }

    fn set_source(&mut self, url: &str) {
        self.source = Some(url.to_string());
        self.current_time = 0.0;
        self.duration = f64::NAN;
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, gain: f64) {
        self.volume = gain;
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds;
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn paused(&self) -> bool {
        self.paused
    }

    fn play(&mut self) {
        if let Some(source) = &self.source {
            self.play_requests.push(source.clone());
        }
        self.paused = false;
    }

    fn pause(&mut self) {
        self.pause_requests += 1;
        self.paused = true;
    }
}
