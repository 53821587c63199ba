//! Waveform visualizer seam

/// Waveform animation capability
///
/// The controller only drives visibility: the animation runs while audio
/// plays and stops on pause/stop/end. Rendering itself is the
/// implementor's business.
pub trait WaveformVisualizer {
    /// Begin (or resume) the animation
    fn start(&mut self);

    /// Halt the animation
    fn stop(&mut self);

    /// Adjust to a new viewport size
    fn resize(&mut self, width: u32, height: u32);
}
