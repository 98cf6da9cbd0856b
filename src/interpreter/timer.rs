//! Countdown timer measured against a host clock reading

use std::time::Duration;

/// Countdown that fires once (or repeatedly) after `duration`
///
/// The timer holds no clock; every call takes the current reading so the
/// host decides what "now" means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    duration: Duration,
    deadline: Duration,
    repeat: bool,
    fired: bool,
}

impl Timer {
    pub fn new(duration: Duration, now: Duration) -> Self {
        Timer {
            duration,
            deadline: now + duration,
            repeat: false,
            fired: false,
        }
    }

    /// Timer that rearms itself every time it fires
    pub fn repeating(duration: Duration, now: Duration) -> Self {
        Timer {
            repeat: true,
            ..Self::new(duration, now)
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn time_left(&self, now: Duration) -> Duration {
        self.deadline.saturating_sub(now)
    }

    pub fn done(&self, now: Duration) -> bool {
        self.time_left(now).is_zero()
    }

    /// Restart the countdown from `now`
    pub fn reset(&mut self, now: Duration) {
        self.deadline = now + self.duration;
        self.fired = false;
    }

    /// Force the timer to be done as of `now`
    pub fn finish(&mut self, now: Duration) {
        self.deadline = now;
    }

    /// Returns true on the call where the timer fires
    ///
    /// A one-shot timer fires at most once; a repeating timer rearms from
    /// `now` after each firing.
    pub fn update(&mut self, now: Duration) -> bool {
        if self.fired || !self.done(now) {
            return false;
        }
        if self.repeat {
            self.reset(now);
        } else {
            self.fired = true;
        }
        true
    }
}
