//! Volume level for the media element
//!
//! The slider works in 0-100%, the media element takes a 0.0-1.0 gain.
//! The mapping is linear, matching the slider position one to one.

/// Default slider position
pub const DEFAULT_VOLUME: u8 = 80;

/// Volume level (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Volume {
    level: u8,
}

impl Volume {
    /// Create new volume, clamped to 100
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
        }
    }

    /// Volume from a raw slider value, clamped to `[0, 100]`
    ///
    /// NaN maps to silence.
    pub fn from_slider(value: f64) -> Self {
        if value.is_nan() {
            return Self::new(0);
        }
        Self::new(value.clamp(0.0, 100.0).round() as u8)
    }

    /// Set volume level (0-100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Gain handed to the media sink
    pub fn gain(&self) -> f64 {
        f64::from(self.level) / 100.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}
