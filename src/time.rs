//! Frame timing and one-shot countdowns.
//!
//! `draw_web()` calls at ~60fps with variable delta. [`FrameClock`] turns the
//! `performance.now()` timestamps into clamped per-frame deltas, and
//! [`Countdown`] consumes them to fire a single timed event (the splash
//! auto-advance).

pub struct FrameClock {
    /// Timestamp of the last update (ms), None if first frame
    last_timestamp: Option<f64>,
    /// Total milliseconds handed out since creation
    pub elapsed_ms: f64,
}

/// Upper bound for a single frame delta. A backgrounded tab resumes with one
/// long frame; clamping keeps timers from jumping ahead.
pub const MAX_FRAME_MS: f64 = 500.0;

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_timestamp: None,
            elapsed_ms: 0.0,
        }
    }

    /// Feed a wall-clock timestamp. Returns the milliseconds since the
    /// previous frame (0 on the first frame).
    pub fn update(&mut self, now_ms: f64) -> f64 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);
        self.elapsed_ms += delta;
        delta
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CountdownState {
    Armed,
    Fired,
    Cancelled,
}

/// Fires once after `delay_ms` of accumulated frame time.
#[derive(Clone, Debug)]
pub struct Countdown {
    remaining_ms: f64,
    state: CountdownState,
}

impl Countdown {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            remaining_ms: delay_ms as f64,
            state: CountdownState::Armed,
        }
    }

    /// Advance by `delta_ms`. Returns true exactly once, on the frame the
    /// delay runs out.
    pub fn advance(&mut self, delta_ms: f64) -> bool {
        if self.state != CountdownState::Armed {
            return false;
        }
        self.remaining_ms -= delta_ms.max(0.0);
        if self.remaining_ms <= 0.0 {
            self.state = CountdownState::Fired;
            return true;
        }
        false
    }

    /// After this the countdown never fires.
    pub fn cancel(&mut self) {
        if self.state == CountdownState::Armed {
            self.state = CountdownState::Cancelled;
        }
    }

    pub fn is_armed(&self) -> bool {
        self.state == CountdownState::Armed
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == CountdownState::Cancelled
    }

    /// Whole seconds left, rounded up, for display.
    pub fn seconds_left(&self) -> u32 {
        if self.state != CountdownState::Armed {
            return 0;
        }
        (self.remaining_ms.max(0.0) / 1000.0).ceil() as u32
    }
}
