//! Player configuration
//!
//! Defaults match the public site. Deployments can override them with a
//! TOML file and `SUNO_PLAYER_*` environment variables.

use crate::error::{PlayerError, Result};
use crate::resolver::{SourceResolver, DEFAULT_AUDIO_EXTENSION, DEFAULT_STREAMING_ORIGIN};
use crate::types::UNKNOWN_TITLE;
use crate::volume::DEFAULT_VOLUME;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "SUNO_PLAYER";

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Origin serving the audio files (default: `https://cdn1.suno.ai`)
    #[serde(default = "default_streaming_origin")]
    pub streaming_origin: String,

    /// Audio file extension (default: `m4a`)
    #[serde(default = "default_audio_extension")]
    pub audio_extension: String,

    /// Past this many seconds "previous" restarts the track (default: 3.0)
    #[serde(default = "default_restart_threshold_secs")]
    pub restart_threshold_secs: f64,

    /// Volume applied at startup, 0-100 (default: 80)
    #[serde(default = "default_initial_volume")]
    pub initial_volume: u8,

    /// Title shown for tracks without one (default: `Unknown`)
    #[serde(default = "default_unknown_title")]
    pub unknown_title: String,
}

fn default_streaming_origin() -> String {
    DEFAULT_STREAMING_ORIGIN.to_string()
}

fn default_audio_extension() -> String {
    DEFAULT_AUDIO_EXTENSION.to_string()
}

fn default_restart_threshold_secs() -> f64 {
    3.0
}

fn default_initial_volume() -> u8 {
    DEFAULT_VOLUME
}

fn default_unknown_title() -> String {
    UNKNOWN_TITLE.to_string()
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            streaming_origin: default_streaming_origin(),
            audio_extension: default_audio_extension(),
            restart_threshold_secs: default_restart_threshold_secs(),
            initial_volume: default_initial_volume(),
            unknown_title: default_unknown_title(),
        }
    }
}

impl PlayerConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// A missing file is not an error; environment variables such as
    /// `SUNO_PLAYER_STREAMING_ORIGIN` take precedence over the file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = ::config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(::config::File::from(path));
            } else {
                tracing::debug!(
                    path = %path.display(),
                    "Player config file not found, using defaults"
                );
            }
        }

        settings = settings.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.streaming_origin.trim().is_empty() {
            return Err(PlayerError::Config(
                "streaming_origin cannot be empty".to_string(),
            ));
        }

        if self.audio_extension.trim().is_empty() {
            return Err(PlayerError::Config(
                "audio_extension cannot be empty".to_string(),
            ));
        }

        if !self.restart_threshold_secs.is_finite() || self.restart_threshold_secs < 0.0 {
            return Err(PlayerError::Config(format!(
                "restart_threshold_secs must be a non-negative number, got {}",
                self.restart_threshold_secs
            )));
        }

        if self.initial_volume > 100 {
            return Err(PlayerError::Config(format!(
                "initial_volume must be 0-100, got {}",
                self.initial_volume
            )));
        }

        Ok(())
    }

    /// Resolver for the configured origin and extension
    pub fn resolver(&self) -> SourceResolver {
        SourceResolver::new(&self.streaming_origin, &self.audio_extension)
    }
}
