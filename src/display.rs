//! Display-state snapshot and time formatting

use serde::Serialize;

/// Everything a UI needs to render the player for one frame
///
/// Produced by [`PlaybackController::display`](crate::PlaybackController::display);
/// plain data, no handles back into the controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayState {
    /// Current playlist index (0-based)
    pub index: usize,

    /// Title of the current track
    pub title: String,

    /// Lyric text of the current track
    pub lyric: String,

    /// Elapsed time, formatted "M:SS"
    pub elapsed: String,

    /// Track duration, formatted "M:SS" ("0:00" until known)
    pub duration: String,

    /// Elapsed divided by duration, 0.0 - 1.0
    pub progress: f32,

    /// Audio is actively playing
    pub playing: bool,

    /// Session is suspended mid-track
    pub paused: bool,

    /// A session is still loading its source
    pub loading: bool,
}

impl DisplayState {
    /// Title prefixed with its 1-based playlist position, e.g. "1. Intro"
    pub fn numbered_title(&self) -> String {
        format!("{}. {}", self.index + 1, self.title)
    }
}

/// Format a second count as "M:SS"
///
/// Seconds are rounded to the nearest whole second and the remainder is
/// zero-padded to two digits. Non-finite and negative input formats as
/// "0:00" (the fallback-to-zero the display layer relies on when a
/// position sample is not available yet).
pub fn format_elapsed(seconds: f64) -> String {
    let secs = if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    };
    let minutes = secs / 60;
    let remainder = secs - minutes * 60;

    format!("{minutes}:{remainder:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_zero_zero() {
        assert_eq!(format_elapsed(0.0), "0:00");
    }

    #[test]
    fn nan_falls_back_to_zero() {
        assert_eq!(format_elapsed(f64::NAN), "0:00");
    }

    #[test]
    fn infinity_falls_back_to_zero() {
        assert_eq!(format_elapsed(f64::INFINITY), "0:00");
        assert_eq!(format_elapsed(f64::NEG_INFINITY), "0:00");
    }

    #[test]
    fn negative_falls_back_to_zero() {
        assert_eq!(format_elapsed(-5.0), "0:00");
    }

    #[test]
    fn seconds_are_zero_padded() {
        assert_eq!(format_elapsed(65.0), "1:05");
        assert_eq!(format_elapsed(9.0), "0:09");
    }

    #[test]
    fn just_under_ten_minutes() {
        assert_eq!(format_elapsed(599.0), "9:59");
    }

    #[test]
    fn fractional_seconds_round() {
        assert_eq!(format_elapsed(64.6), "1:05");
        assert_eq!(format_elapsed(64.4), "1:04");
    }

    #[test]
    fn over_an_hour_keeps_counting_minutes() {
        assert_eq!(format_elapsed(3661.0), "61:01");
    }

    #[test]
    fn numbered_title_is_one_based() {
        let state = DisplayState {
            index: 0,
            title: "Intro".to_string(),
            lyric: String::new(),
            elapsed: "0:00".to_string(),
            duration: "0:00".to_string(),
            progress: 0.0,
            playing: false,
            paused: false,
            loading: false,
        };
        assert_eq!(state.numbered_title(), "1. Intro");
    }
}
