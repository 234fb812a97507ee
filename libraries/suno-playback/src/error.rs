//! Error types for the player

use thiserror::Error;

/// Player errors
#[derive(Debug, Error)]
pub enum PlayerError {
    /// Start index does not point into the playlist
    #[error("Invalid index {index} for playlist of {len} tracks")]
    InvalidIndex { index: usize, len: usize },

    /// Track descriptor built without an identifier
    #[error("Track id cannot be empty")]
    EmptyTrackId,

    /// The media sink refused to start playback
    #[error("Playback rejected: {0}")]
    PlaybackRejected(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<::config::ConfigError> for PlayerError {
    fn from(err: ::config::ConfigError) -> Self {
        PlayerError::Config(err.to_string())
    }
}

/// Result type for player operations
pub type Result<T> = std::result::Result<T, PlayerError>;
