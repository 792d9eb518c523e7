//! Frame clock: host timestamps in, clamped deltas out

use std::time::Instant;

/// Largest step handed to a system in one tick (one frame at 30Hz)
pub const DEFAULT_MAX_DELTA: f64 = 1.0 / 30.0;

/// Converts successive host timestamps into per-frame deltas.
///
/// The delta is clamped to `[0, max_delta]` so a stall (backgrounded app,
/// dropped frames) never turns into one huge integration step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Total simulated time in seconds (sum of clamped deltas)
    pub total_time: f64,
    /// Clamped time since the previous frame in seconds
    pub delta_time: f64,
    /// Upper bound for a single delta
    pub max_delta: f64,
    /// Frames advanced since construction
    pub frame_count: u64,
    /// Timestamp of the previous frame, `None` until the first frame
    last_timestamp: Option<f64>,
    /// Reference point for `advance_now`
    origin: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            max_delta: DEFAULT_MAX_DELTA,
            frame_count: 0,
            last_timestamp: None,
            origin: Instant::now(),
        }
    }
}

impl FrameClock {
    /// Create a new clock clamping at 1/30 second
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock with a custom clamp ceiling (seconds)
    pub fn with_max_delta(max_delta: f64) -> Self {
        Self {
            max_delta: max_delta.max(0.0),
            ..Self::default()
        }
    }

    /// Forget the previous timestamp. The next frame yields a zero delta.
    pub fn reset(&mut self) {
        self.last_timestamp = None;
        self.delta_time = 0.0;
    }

    /// Advance to a host timestamp (seconds) and return the clamped delta.
    pub fn advance(&mut self, timestamp: f64) -> f64 {
        let elapsed = match self.last_timestamp {
            Some(prev) => timestamp - prev,
            None => 0.0,
        };
        if timestamp.is_finite() {
            self.last_timestamp = Some(timestamp);
        }

        // NaN falls through to zero as well
        self.delta_time = if elapsed > 0.0 {
            elapsed.min(self.max_delta)
        } else {
            0.0
        };
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }

    /// Advance using the process monotonic clock.
    pub fn advance_now(&mut self) -> f64 {
        let now = self.origin.elapsed().as_secs_f64();
        self.advance(now)
    }
}
