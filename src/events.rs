//! Player events
//!
//! Event-based communication for UI synchronization. The controller
//! buffers these and the UI drains them once per frame, alongside (or
//! instead of) polling the display snapshot.

use crate::types::SessionState;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// The current track's session changed lifecycle state
    StateChanged {
        /// The new session state
        state: SessionState,
    },

    /// The current index moved to a different track
    TrackChanged {
        /// New playlist index (0-based)
        index: usize,
        /// Title of the new track
        title: String,
    },

    /// Periodic position sample while playing
    PositionUpdate {
        /// Elapsed position in milliseconds
        position_ms: u64,
        /// Track duration in milliseconds (0 when not yet known)
        duration_ms: u64,
        /// Elapsed divided by duration, 0.0 - 1.0
        progress: f32,
    },

    /// Global volume changed
    VolumeChanged {
        /// New level (0.0 - 1.0)
        level: f32,
    },

    /// Opaque engine failure, passed through untouched
    PlaybackFailed {
        /// Engine-provided description
        message: String,
    },
}
