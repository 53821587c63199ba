//! Core types for the playback controller

use crate::error::{PlayerError, Result};
use serde::{Deserialize, Serialize};

/// One playlist entry
///
/// Metadata only; the audio session for a track is created lazily by the
/// controller on first play and owned by its playlist slot from then on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Display title
    pub title: String,

    /// Opaque source reference handed to the audio engine (file name,
    /// URL, storage key - the controller never interprets it)
    pub source_ref: String,

    /// Lyric text shown alongside the title
    pub lyric: String,
}

impl Track {
    /// Convenience constructor for a track without lyrics
    pub fn new(title: impl Into<String>, source_ref: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source_ref: source_ref.into(),
            lyric: String::new(),
        }
    }

    /// Attach lyric text
    pub fn with_lyric(mut self, lyric: impl Into<String>) -> Self {
        self.lyric = lyric.into();
        self
    }
}

/// Ordered set of tracks, immutable after construction
///
/// Length and order never change, so a track index taken at any point
/// stays valid for the lifetime of the playlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Create a playlist
    ///
    /// Rejects an empty track list: the controller's current index must
    /// always refer to a real track.
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }
        Ok(Self { tracks })
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false; empty playlists cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Iterate over tracks in order
    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Index following `index`, wrapping past the end to 0
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.tracks.len()
    }

    /// Index preceding `index`, wrapping past 0 to the last track
    pub fn prev_index(&self, index: usize) -> usize {
        (index + self.tracks.len() - 1) % self.tracks.len()
    }
}

/// Skip direction for relative track navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Advance to the following track (wraps to the first)
    Next,

    /// Go back to the preceding track (wraps to the last)
    Prev,
}

/// Lifecycle of one track's audio session
///
/// ```text
/// Unloaded -> Loading -> Ready -> Playing -> (Paused | Ready | Ended)
/// ```
///
/// `Paused` returns to `Playing` via play. A stop from any state returns
/// to `Ready` with position reset to zero. `Ended` triggers the
/// controller-level auto-advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Session exists but has not begun fetching audio
    Unloaded,

    /// Audio is being fetched/decoded
    Loading,

    /// Loaded and idle at some position
    Ready,

    /// Actively producing audio
    Playing,

    /// Suspended mid-track
    Paused,

    /// Reached the end of the track
    Ended,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Initial process-wide volume (0.0 - 1.0, default: 1.0)
    pub volume: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { volume: 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(len: usize) -> Playlist {
        let tracks = (0..len)
            .map(|i| Track::new(format!("Track {i}"), format!("track_{i}")))
            .collect();
        Playlist::new(tracks).unwrap()
    }

    #[test]
    fn empty_playlist_rejected() {
        assert!(matches!(
            Playlist::new(Vec::new()),
            Err(PlayerError::EmptyPlaylist)
        ));
    }

    #[test]
    fn next_index_wraps_to_start() {
        let list = playlist(3);
        assert_eq!(list.next_index(0), 1);
        assert_eq!(list.next_index(1), 2);
        assert_eq!(list.next_index(2), 0);
    }

    #[test]
    fn prev_index_wraps_to_end() {
        let list = playlist(3);
        assert_eq!(list.prev_index(2), 1);
        assert_eq!(list.prev_index(1), 0);
        assert_eq!(list.prev_index(0), 2);
    }

    #[test]
    fn single_track_wraps_to_itself() {
        let list = playlist(1);
        assert_eq!(list.next_index(0), 0);
        assert_eq!(list.prev_index(0), 0);
    }

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.volume, 1.0);
    }
}
