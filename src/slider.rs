//! Volume-slider interaction state
//!
//! The original UI tracked slider dragging through a global flag that any
//! handler could flip. Here the drag state is an explicit object owned by
//! the volume-slider component and passed by reference to its event
//! handlers; handlers translate pointer coordinates into volume levels
//! and the caller forwards those to the controller.

/// Drag state for a horizontal volume slider
#[derive(Debug, Default, Clone)]
pub struct VolumeSlider {
    dragging: bool,
}

impl VolumeSlider {
    /// Create a slider in the released state
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer pressed on the slider knob
    pub fn press(&mut self) {
        self.dragging = true;
    }

    /// Pointer released anywhere
    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer moved to `x` over a slider track `track_width` wide
    ///
    /// Returns the volume level the move maps to, clamped to 0.0 - 1.0,
    /// or None when no drag is in progress (moves outside a drag are
    /// ignored, matching the original behavior).
    pub fn drag_to(&self, x: f32, track_width: f32) -> Option<f32> {
        if !self.dragging || track_width <= 0.0 {
            return None;
        }
        Some((x / track_width).clamp(0.0, 1.0))
    }

    /// Direct click on the slider track at `x`
    ///
    /// Clicks set the volume regardless of drag state.
    pub fn click_at(&self, x: f32, track_width: f32) -> Option<f32> {
        if track_width <= 0.0 {
            return None;
        }
        Some((x / track_width).clamp(0.0, 1.0))
    }
}
