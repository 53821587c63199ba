//! Platform-agnostic audio engine seam
//!
//! Abstracts audio decoding and output behind two traits so the
//! controller can run against any backend (or a scripted double in
//! tests). Engine callbacks are replaced by a tagged event enum that the
//! controller pulls via [`AudioSession::drain_events`]; no closures ever
//! capture controller state.

use crate::error::Result;
use crate::types::SessionState;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Notification from an audio session
///
/// Sessions buffer these as they happen; the controller drains them once
/// per frame and ignores any that arrive from a session other than the
/// current track's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Audio is loaded and playback has begun; duration is now known
    Ready,

    /// Track finished naturally (drives auto-advance)
    Ended,

    /// Playback was paused
    Paused,

    /// Playback was stopped and position reset to zero
    Stopped,

    /// A seek completed
    Seeked,

    /// Engine-level failure (decode error, network failure while
    /// streaming). Passed through to the display layer untouched.
    Failed {
        /// Engine-provided description, opaque to the controller
        message: String,
    },
}

/// One playback session, bound to a single track's source
///
/// Commands are fire-and-forget: control returns immediately and the
/// outcome arrives later as a [`SessionEvent`]. Engine failures are never
/// surfaced as command errors.
pub trait AudioSession {
    /// Start or resume playback
    fn play(&mut self);

    /// Suspend playback, keeping the current position
    fn pause(&mut self);

    /// Halt playback and reset position to zero
    fn stop(&mut self);

    /// Move the play position
    fn seek(&mut self, position: Duration);

    /// Current play position
    fn position(&self) -> Duration;

    /// Total track duration, once known (None until loaded)
    fn duration(&self) -> Option<Duration>;

    /// Whether the session is actively producing audio
    fn is_playing(&self) -> bool;

    /// Current lifecycle state
    fn state(&self) -> SessionState;

    /// Take all events buffered since the last drain
    fn drain_events(&mut self) -> Vec<SessionEvent>;
}

/// Audio engine capability
///
/// Creates sessions and owns the process-wide volume, which applies to
/// every session, current and future.
pub trait AudioEngine {
    /// Create a session for `source_ref`
    ///
    /// `source_ref` is the track's opaque source reference; the engine
    /// decides how to resolve it.
    fn create_session(&mut self, source_ref: &str) -> Result<Box<dyn AudioSession>>;

    /// Set the global volume (0.0 - 1.0), affecting all sessions
    fn set_volume(&mut self, level: f32);
}
