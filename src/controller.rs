//! Playback controller - core orchestration
//!
//! Owns the playlist and current-index cursor, lazily creates one audio
//! session per track, and reflects session state into a display snapshot
//! plus a drained event queue for the UI.

use crate::{
    display::{format_elapsed, DisplayState},
    engine::{AudioEngine, AudioSession, SessionEvent},
    error::{PlayerError, Result},
    events::PlayerEvent,
    types::{Direction, PlayerConfig, Playlist, SessionState, Track},
    visual::WaveformVisualizer,
};
use std::time::Duration;
use tracing::{debug, trace};

/// Playlist playback controller
///
/// All methods run on the single logical UI thread. Engine interaction is
/// fire-and-forget: commands return immediately and session outcomes are
/// pulled back in as tagged events on the next [`tick`](Self::tick).
///
/// Invariant: at most one session is playing at any time, and
/// `current_index` always names the most recently selected track, whether
/// or not anything is playing.
pub struct PlaybackController {
    playlist: Playlist,

    /// One session slot per track, filled on first play and kept for the
    /// life of the controller (the original never evicts sessions either)
    sessions: Vec<Option<Box<dyn AudioSession>>>,

    current_index: usize,

    engine: Box<dyn AudioEngine>,
    visualizer: Option<Box<dyn WaveformVisualizer>>,

    volume: f32,

    // Last-sampled display fields
    elapsed: Duration,
    duration: Option<Duration>,
    progress: f32,
    loading: bool,

    // Event queue for UI synchronization
    pending_events: Vec<PlayerEvent>,
}

impl PlaybackController {
    /// Create a controller over `playlist`
    ///
    /// The configured volume is applied to the engine immediately, so it
    /// is global before the first track ever plays.
    pub fn new(playlist: Playlist, mut engine: Box<dyn AudioEngine>, config: PlayerConfig) -> Self {
        let volume = clamp_level(config.volume);
        engine.set_volume(volume);

        let sessions = (0..playlist.len()).map(|_| None).collect();

        Self {
            playlist,
            sessions,
            current_index: 0,
            engine,
            visualizer: None,
            volume,
            elapsed: Duration::ZERO,
            duration: None,
            progress: 0.0,
            loading: false,
            pending_events: Vec::new(),
        }
    }

    /// Attach a waveform visualizer
    ///
    /// The controller starts it while audio plays and stops it on
    /// pause/stop/end.
    pub fn set_visualizer(&mut self, visualizer: Box<dyn WaveformVisualizer>) {
        self.visualizer = Some(visualizer);
    }

    // ===== Playback Control =====

    /// Play a track
    ///
    /// `None` replays (or resumes) the track at the current index. An
    /// out-of-range index is rejected before the engine is touched. The
    /// target track's session is created lazily on first play and reused
    /// afterwards.
    pub fn play(&mut self, index: Option<usize>) -> Result<()> {
        let index = index.unwrap_or(self.current_index);
        let len = self.playlist.len();
        let track = match self.playlist.get(index) {
            Some(track) => track.clone(),
            None => return Err(PlayerError::InvalidIndex { index, len }),
        };

        // Selecting a different track supersedes whatever is playing now
        let changed = index != self.current_index;
        if changed {
            if let Some(session) = self.sessions[self.current_index].as_mut() {
                if session.is_playing() {
                    session.stop();
                }
            }
            self.reset_progress();
        }

        if self.sessions[index].is_none() {
            debug!(index, source = %track.source_ref, "creating audio session");
            let session = self.engine.create_session(&track.source_ref)?;
            self.sessions[index] = Some(session);
        }

        self.current_index = index;

        let mut state = SessionState::Loading;
        let mut now_playing = false;
        if let Some(session) = self.sessions[index].as_mut() {
            session.play();
            state = session.state();
            now_playing = session.is_playing();
            if matches!(state, SessionState::Playing | SessionState::Ready) {
                self.duration = session.duration();
                self.loading = false;
            } else {
                // Duration and visualizer wait for the Ready event
                self.loading = true;
            }
        }

        if now_playing {
            if let Some(viz) = self.visualizer.as_mut() {
                viz.start();
            }
        }

        if changed {
            self.push_event(PlayerEvent::TrackChanged {
                index,
                title: track.title,
            });
        }
        self.push_event(PlayerEvent::StateChanged { state });

        Ok(())
    }

    /// Pause the current track
    ///
    /// Soft error when no session has been created yet; callers may
    /// ignore it.
    pub fn pause(&mut self) -> Result<()> {
        let state = match self.sessions[self.current_index].as_mut() {
            Some(session) => {
                session.pause();
                session.state()
            }
            None => return Err(PlayerError::NoActiveSession),
        };

        if let Some(viz) = self.visualizer.as_mut() {
            viz.stop();
        }
        self.push_event(PlayerEvent::StateChanged { state });

        Ok(())
    }

    /// Skip to the adjacent track, wrapping at both ends
    pub fn skip(&mut self, direction: Direction) -> Result<()> {
        let target = match direction {
            Direction::Next => self.playlist.next_index(self.current_index),
            Direction::Prev => self.playlist.prev_index(self.current_index),
        };
        debug!(?direction, from = self.current_index, to = target, "skip");
        self.skip_to(target)
    }

    /// Skip to a specific track
    ///
    /// Stops the current track's session if one exists (resetting its
    /// position and the displayed progress to zero), then plays `index`.
    pub fn skip_to(&mut self, index: usize) -> Result<()> {
        let len = self.playlist.len();
        if index >= len {
            return Err(PlayerError::InvalidIndex { index, len });
        }

        if let Some(session) = self.sessions[self.current_index].as_mut() {
            session.stop();
        }
        self.reset_progress();

        self.play(Some(index))
    }

    /// Seek within the current track
    ///
    /// `fraction` is a position in [0, 1] of the track's duration. Only
    /// effective while the current track is actively playing; a silent
    /// no-op otherwise, never an error.
    pub fn seek(&mut self, fraction: f32) {
        if !fraction.is_finite() {
            return;
        }
        let Some(session) = self.sessions[self.current_index].as_mut() else {
            return;
        };
        if !session.is_playing() {
            return;
        }
        let Some(duration) = session.duration() else {
            return;
        };

        let target = duration.mul_f32(fraction.clamp(0.0, 1.0));
        trace!(?target, "seek");
        session.seek(target);
    }

    // ===== Volume =====

    /// Set the process-wide volume (0.0 - 1.0)
    ///
    /// Applied at the engine, so it affects every session, current and
    /// future, with no per-track override.
    pub fn set_volume(&mut self, level: f32) {
        let level = clamp_level(level);
        self.volume = level;
        self.engine.set_volume(level);
        self.push_event(PlayerEvent::VolumeChanged { level });
    }

    /// Current global volume level
    pub fn volume(&self) -> f32 {
        self.volume
    }

    // ===== Frame Sampling =====

    /// Per-frame callback
    ///
    /// Pumps buffered session events (applying only those from the
    /// current track's session), then, while the current track is
    /// actively playing, samples the elapsed position and recomputes the
    /// progress fraction.
    ///
    /// Returns true while the caller should reschedule it for the next
    /// frame; false once playback is no longer active. Callers re-arm the
    /// chain from `play`/`seek`, as the original did from its engine
    /// callbacks.
    pub fn tick(&mut self) -> bool {
        self.pump_session_events();

        let playing = self.sessions[self.current_index]
            .as_ref()
            .is_some_and(|session| session.is_playing());

        if playing {
            self.sample_position();
            true
        } else {
            // Keep ticking while a load is in flight so its Ready event
            // still gets pumped
            self.loading
        }
    }

    /// Forward a viewport resize to the visualizer
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(viz) = self.visualizer.as_mut() {
            viz.resize(width, height);
        }
    }

    // ===== State Queries =====

    /// Snapshot of everything the UI renders
    pub fn display(&self) -> DisplayState {
        let track = self.playlist.get(self.current_index);
        let (playing, paused) = match self.sessions[self.current_index].as_ref() {
            Some(session) => (
                session.is_playing(),
                session.state() == SessionState::Paused,
            ),
            None => (false, false),
        };

        DisplayState {
            index: self.current_index,
            title: track.map(|t| t.title.clone()).unwrap_or_default(),
            lyric: track.map(|t| t.lyric.clone()).unwrap_or_default(),
            elapsed: format_elapsed(self.elapsed.as_secs_f64()),
            duration: format_elapsed(
                self.duration.map_or(0.0, |d| d.as_secs_f64()),
            ),
            progress: self.progress,
            playing,
            paused,
            loading: self.loading,
        }
    }

    /// Current playlist index
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Track at the current index
    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.get(self.current_index)
    }

    /// The playlist this controller was built over
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns everything emitted since the last drain. The UI calls
    /// this once per frame, typically right after [`tick`](Self::tick).
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    /// Drain every live session and apply current-track events
    ///
    /// Events from any session other than the current track's are stale
    /// (e.g. an in-flight Ended from a track the user already skipped
    /// away from) and are dropped on index mismatch, so rapid skipping
    /// can never double-advance.
    fn pump_session_events(&mut self) {
        let mut batches: Vec<(usize, Vec<SessionEvent>)> = Vec::new();
        for (index, slot) in self.sessions.iter_mut().enumerate() {
            if let Some(session) = slot.as_mut() {
                let events = session.drain_events();
                if !events.is_empty() {
                    batches.push((index, events));
                }
            }
        }

        for (index, events) in batches {
            for event in events {
                if index != self.current_index {
                    trace!(
                        index,
                        current = self.current_index,
                        ?event,
                        "dropping stale session event"
                    );
                    continue;
                }
                self.apply_session_event(event);
            }
        }
    }

    fn apply_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Ready => {
                let mut state = SessionState::Playing;
                if let Some(session) = self.sessions[self.current_index].as_ref() {
                    self.duration = session.duration();
                    state = session.state();
                }
                self.loading = false;
                if let Some(viz) = self.visualizer.as_mut() {
                    viz.start();
                }
                self.push_event(PlayerEvent::StateChanged { state });
            }
            SessionEvent::Ended => {
                debug!(index = self.current_index, "track ended, auto-advancing");
                if let Some(viz) = self.visualizer.as_mut() {
                    viz.stop();
                }
                self.reset_progress();
                self.push_event(PlayerEvent::StateChanged {
                    state: SessionState::Ended,
                });
                if let Err(err) = self.skip(Direction::Next) {
                    self.push_event(PlayerEvent::PlaybackFailed {
                        message: err.to_string(),
                    });
                }
            }
            SessionEvent::Paused => {
                if let Some(viz) = self.visualizer.as_mut() {
                    viz.stop();
                }
                self.push_event(PlayerEvent::StateChanged {
                    state: SessionState::Paused,
                });
            }
            SessionEvent::Stopped => {
                if let Some(viz) = self.visualizer.as_mut() {
                    viz.stop();
                }
                self.reset_progress();
                self.push_event(PlayerEvent::StateChanged {
                    state: SessionState::Ready,
                });
            }
            SessionEvent::Seeked => {
                self.sample_position();
            }
            SessionEvent::Failed { message } => {
                self.loading = false;
                self.push_event(PlayerEvent::PlaybackFailed { message });
            }
        }
    }

    /// Sample the current session's position into the display fields
    fn sample_position(&mut self) {
        let sampled = self.sessions[self.current_index]
            .as_ref()
            .map(|session| (session.position(), session.duration()));
        let Some((elapsed, duration)) = sampled else {
            return;
        };

        self.elapsed = elapsed;
        if duration.is_some() {
            self.duration = duration;
        }
        self.progress = match duration {
            Some(total) if !total.is_zero() => {
                (elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0) as f32
            }
            // Duration unknown: progress reads as zero
            _ => 0.0,
        };

        self.push_event(PlayerEvent::PositionUpdate {
            position_ms: elapsed.as_millis() as u64,
            duration_ms: duration.map_or(0, |d| d.as_millis() as u64),
            progress: self.progress,
        });
    }

    fn reset_progress(&mut self) {
        self.elapsed = Duration::ZERO;
        self.duration = None;
        self.progress = 0.0;
    }

    fn push_event(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }
}

fn clamp_level(level: f32) -> f32 {
    if level.is_finite() {
        level.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fake::{EngineProbe, FakeEngine};

    fn playlist(len: usize) -> Playlist {
        let tracks = (0..len)
            .map(|i| Track::new(format!("Track {i}"), format!("track_{i}")))
            .collect();
        Playlist::new(tracks).unwrap()
    }

    fn controller(len: usize, ready_immediately: bool) -> (PlaybackController, EngineProbe) {
        let engine = FakeEngine::new(ready_immediately);
        let probe = engine.probe();
        let controller =
            PlaybackController::new(playlist(len), Box::new(engine), PlayerConfig::default());
        (controller, probe)
    }

    #[test]
    fn starts_stopped_at_index_zero() {
        let (controller, probe) = controller(3, true);
        assert_eq!(controller.current_index(), 0);
        assert!(!controller.display().playing);
        assert_eq!(probe.session_count(), 0);
    }

    #[test]
    fn play_out_of_range_is_rejected_before_engine() {
        let (mut controller, probe) = controller(3, true);
        let err = controller.play(Some(7)).unwrap_err();
        assert!(matches!(err, PlayerError::InvalidIndex { index: 7, len: 3 }));
        assert_eq!(probe.session_count(), 0);
    }

    #[test]
    fn session_created_lazily_and_reused() {
        let (mut controller, probe) = controller(3, true);

        controller.play(None).unwrap();
        assert_eq!(probe.session_count(), 1);
        assert_eq!(probe.created.borrow()[0], "track_0");

        // Replay reuses the session
        controller.pause().unwrap();
        controller.play(None).unwrap();
        assert_eq!(probe.session_count(), 1);
        assert_eq!(probe.session(0).borrow().play_calls, 2);
    }

    #[test]
    fn pause_without_session_is_soft_error() {
        let (mut controller, _probe) = controller(2, true);
        assert!(matches!(
            controller.pause(),
            Err(PlayerError::NoActiveSession)
        ));
    }

    #[test]
    fn volume_is_clamped_and_forwarded() {
        let (mut controller, probe) = controller(2, true);

        controller.set_volume(1.5);
        assert_eq!(controller.volume(), 1.0);
        controller.set_volume(f32::NAN);
        assert_eq!(controller.volume(), 0.0);

        // Initial config volume plus the two calls above
        assert_eq!(&*probe.volume_calls.borrow(), &[1.0, 1.0, 0.0]);
    }

    #[test]
    fn seek_with_nothing_playing_is_silent_noop() {
        let (mut controller, probe) = controller(2, true);
        controller.seek(0.5);
        assert_eq!(probe.session_count(), 0);

        controller.play(None).unwrap();
        controller.pause().unwrap();
        controller.seek(0.5);
        assert!(probe.session(0).borrow().seek_calls.is_empty());
    }

    #[test]
    fn playing_a_different_index_stops_the_current_session() {
        let (mut controller, probe) = controller(3, true);

        controller.play(Some(0)).unwrap();
        assert!(probe.session(0).borrow().state == SessionState::Playing);

        // Direct play (not skip_to) still upholds the single-playing
        // invariant
        controller.play(Some(2)).unwrap();
        assert_eq!(probe.session(0).borrow().stop_calls, 1);
        assert!(probe.session(0).borrow().state != SessionState::Playing);
        // Probe indexes sessions by creation order: track 0, then track 2
        assert!(probe.session(1).borrow().state == SessionState::Playing);
        assert_eq!(controller.current_index(), 2);
    }

    #[test]
    fn loading_flag_follows_session_readiness() {
        let (mut controller, probe) = controller(2, false);

        controller.play(None).unwrap();
        assert!(controller.display().loading);

        // Engine finishes loading and reports ready
        {
            let session = probe.session(0);
            let mut inner = session.borrow_mut();
            inner.state = SessionState::Playing;
            inner.duration = Some(Duration::from_secs(65));
            inner.pending.push(SessionEvent::Ready);
        }
        assert!(controller.tick());

        let display = controller.display();
        assert!(!display.loading);
        assert!(display.playing);
        assert_eq!(display.duration, "1:05");
    }
}
