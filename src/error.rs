//! Error types for the playback controller

use thiserror::Error;

/// Playback controller errors
#[derive(Debug, Error)]
pub enum PlayerError {
    /// Track index outside playlist bounds
    ///
    /// This is a programmer error and is rejected before the audio
    /// engine is touched.
    #[error("track index {index} out of range for playlist of {len}")]
    InvalidIndex { index: usize, len: usize },

    /// Pause was requested with no session loaded
    ///
    /// Recoverable; callers may ignore it.
    #[error("no active session")]
    NoActiveSession,

    /// Controller was constructed with an empty playlist
    #[error("playlist must contain at least one track")]
    EmptyPlaylist,

    /// Opaque audio engine failure
    #[error("audio engine error: {0}")]
    Engine(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlayerError>;
