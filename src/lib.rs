//! Playdeck - Playlist Playback Controller
//!
//! Platform-agnostic playlist playback management.
//!
//! This crate provides:
//! - An ordered, fixed playlist with a current-index cursor
//! - Play/pause/skip with wraparound at both ends
//! - Fractional seeking within the playing track
//! - Process-wide volume control
//! - Auto-advance when a track finishes, with a stale-event guard
//! - A per-frame display snapshot (title, M:SS times, progress fraction)
//!
//! # Architecture
//!
//! `playdeck` is completely platform-agnostic: audio decoding and output
//! live behind the [`AudioEngine`]/[`AudioSession`] traits, and waveform
//! rendering behind [`WaveformVisualizer`]. The controller is glue: it
//! issues fire-and-forget commands and pulls session outcomes back in as
//! tagged [`SessionEvent`]s once per frame.
//!
//! # Example
//!
//! ```rust,no_run
//! use playdeck::{
//!     AudioEngine, AudioSession, Direction, PlaybackController, PlayerConfig, Playlist, Track,
//! };
//!
//! fn engine() -> Box<dyn AudioEngine> {
//!     unimplemented!("platform audio backend")
//! }
//!
//! let playlist = Playlist::new(vec![
//!     Track::new("Fix You", "fix_you").with_lyric("When you try your best..."),
//!     Track::new("Smoke", "smoke"),
//! ])?;
//!
//! let mut player = PlaybackController::new(playlist, engine(), PlayerConfig::default());
//!
//! player.set_volume(0.8);
//! player.play(None)?;
//! player.skip(Direction::Next)?;
//!
//! // Once per rendered frame, until it returns false:
//! while player.tick() {
//!     let display = player.display();
//!     println!("{} {} / {}", display.numbered_title(), display.elapsed, display.duration);
//! }
//! # Ok::<(), playdeck::PlayerError>(())
//! ```

mod controller;
mod display;
mod engine;
mod error;
mod events;
mod slider;
pub mod types;
mod visual;

// Public exports
pub use controller::PlaybackController;
pub use display::{format_elapsed, DisplayState};
pub use engine::{AudioEngine, AudioSession, SessionEvent};
pub use error::{PlayerError, Result};
pub use events::PlayerEvent;
pub use slider::VolumeSlider;
pub use types::{Direction, PlayerConfig, Playlist, SessionState, Track};
pub use visual::WaveformVisualizer;
