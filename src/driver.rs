use std::time::Instant;

use crossbeam_channel::Receiver;

use crate::signals::ControlSignals;

/// Everything the renderer needs for one tick.
#[derive(Debug, Clone, Copy)]
pub struct FrameState {
    /// Seconds since the driver started, monotonic, variable step.
    pub time: f32,
    /// Cumulative field rotation, radians.
    pub rotation: f32,
    pub signals: ControlSignals,
}

/// Owns the frame clock, the cumulative field rotation and the latest
/// control-signal snapshot. Single steady-state loop; runs until the
/// process exits.
pub struct FrameDriver {
    start: Instant,
    rotation: f32,
    signals: ControlSignals,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            rotation: 0.0,
            signals: ControlSignals::default(),
        }
    }

    /// Advances one tick: drains the signal channel down to the newest
    /// message without ever blocking (skipped updates are fine, the feed
    /// always overwrites), accumulates the spin, and stamps the time.
    pub fn tick(&mut self, rx: &Receiver<ControlSignals>) -> FrameState {
        if let Some(latest) = rx.try_iter().last() {
            self.signals = latest;
        }
        self.rotation += self.signals.spin_boost;
        FrameState {
            time: self.start.elapsed().as_secs_f32(),
            rotation: self.rotation,
            signals: self.signals,
        }
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}
