// Leading-edge rate limiting with caller-supplied time.

use crate::types::Timestamp;

/// Leading-edge rate limiter. The first call of a burst passes immediately;
/// calls during the cooldown window are dropped, not queued.
#[derive(Debug)]
pub struct Throttle {
    window_us: u64,
    cooldown_until: Option<Timestamp>,
}

impl Throttle {
    pub fn new(window_us: u64) -> Self {
        Throttle {
            window_us,
            cooldown_until: None,
        }
    }

    /// Returns true if the call may proceed, entering cooldown until
    /// `now + window`. Best-effort: no trailing call is ever replayed.
    pub fn allow(&mut self, now: Timestamp) -> bool {
        if let Some(deadline) = self.cooldown_until {
            if now < deadline {
                return false;
            }
        }
        self.cooldown_until = Some(Timestamp::from_micros(now.as_micros() + self.window_us));
        true
    }

    /// Clear the cooldown so the next call passes immediately.
    pub fn reset(&mut self) {
        self.cooldown_until = None;
    }
}
