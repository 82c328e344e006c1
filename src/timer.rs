use std::time::{Duration, Instant};

pub const DEFAULT_COUNTDOWN_SECS: u64 = 30;

/// Final-round countdown stored as a start instant; callers pass `now` on every redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    started_at: Instant,
    duration: Duration,
}

impl Countdown {
    pub fn start(now: Instant, duration: Duration) -> Self {
        Self {
            started_at: now,
            duration,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn deadline(&self) -> Instant {
        self.started_at + self.duration
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline().saturating_duration_since(now)
    }

    /// Whole seconds left, rounded up so a fresh 30s countdown reads 30 and not 29.
    pub fn seconds_left(&self, now: Instant) -> u64 {
        let remaining = self.remaining(now);
        let secs = remaining.as_secs();
        if remaining.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.remaining(now).is_zero()
    }

    pub fn label(&self, now: Instant) -> String {
        if self.is_expired(now) {
            "Time's up!".to_string()
        } else {
            format!("Time Remaining: {} seconds", self.seconds_left(now))
        }
    }
}
