//! Frame throttling
//!
//! The host calls back at its own display rate; [`FrameClock`] accepts a
//! callback only once at least the target interval has passed since the last
//! accepted one, and reports the real elapsed time for time-based physics.

/// Timing of an accepted frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStep {
    pub now_ms: f64,
    /// Time since the previously accepted frame
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone)]
pub struct FrameClock {
    target_interval_ms: f64,
    last_frame_ms: Option<f64>,
    cancelled: bool,
}

impl FrameClock {
    pub fn new(target_interval_ms: f64) -> Self {
        Self {
            target_interval_ms,
            last_frame_ms: None,
            cancelled: false,
        }
    }

    /// Offer a host timestamp; returns the step to simulate, if any
    ///
    /// The first timestamp only primes the clock.
    pub fn accept(&mut self, timestamp_ms: f64) -> Option<FrameStep> {
        if self.cancelled || !timestamp_ms.is_finite() {
            return None;
        }
        let Some(last) = self.last_frame_ms else {
            self.last_frame_ms = Some(timestamp_ms);
            return None;
        };

        let elapsed_ms = timestamp_ms - last;
        if elapsed_ms < self.target_interval_ms {
            return None;
        }
        self.last_frame_ms = Some(timestamp_ms);
        Some(FrameStep {
            now_ms: timestamp_ms,
            elapsed_ms,
        })
    }

    /// Stop accepting frames for good
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Forget the last frame so the next timestamp primes again
    pub fn reset(&mut self) {
        self.last_frame_ms = None;
    }
}
