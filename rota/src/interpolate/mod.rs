pub mod slerp;

pub use slerp::slerp;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::orientation::Orientation;

/// How an interpolation binding receives its progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Driver {
    /// Advanced by clock ticks, wrapping for continuous replay.
    Clock,
    /// Set directly from a slider position.
    Manual,
}

/// A start/end pair plus the progress `t ∈ [0, 1]` between them.
///
/// Replacing an endpoint never touches `t`; the new endpoint is picked up by
/// the next [`InterpolationSession::evaluate`].
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolationSession {
    start: Orientation,
    end: Orientation,
    t: f64,
    period: Duration,
}

impl InterpolationSession {
    pub fn new(start: Orientation, end: Orientation, period: Duration) -> Self {
        Self {
            start,
            end,
            t: 0.0,
            period,
        }
    }

    pub fn start(&self) -> Orientation {
        self.start
    }

    pub fn end(&self) -> Orientation {
        self.end
    }

    pub fn progress(&self) -> f64 {
        self.t
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn set_start(&mut self, start: Orientation) {
        self.start = start;
    }

    pub fn set_end(&mut self, end: Orientation) {
        self.end = end;
    }

    /// Moves progress forward by `dt / period`, wrapping into `[0, 1)`.
    ///
    /// A zero period has no meaningful playback rate; progress stays put.
    pub fn advance(&mut self, dt: Duration) {
        let period = self.period.as_secs_f64();
        if period <= 0.0 {
            return;
        }
        self.t = (self.t + dt.as_secs_f64() / period).rem_euclid(1.0);
    }

    /// Sets progress directly, clamped into `[0, 1]`. Non-finite input is ignored.
    pub fn set_progress(&mut self, t: f64) {
        if t.is_finite() {
            self.t = t.clamp(0.0, 1.0);
        }
    }

    pub fn evaluate(&self) -> Orientation {
        slerp(&self.start, &self.end, self.t)
    }
}

/// Maps an integer slider position onto interpolation progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderMapping {
    pub max: u32,
}

impl Default for SliderMapping {
    fn default() -> Self {
        Self { max: 1000 }
    }
}

impl SliderMapping {
    pub fn progress(&self, position: i64) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        (position as f64 / self.max as f64).clamp(0.0, 1.0)
    }
}
