//! Auto-seal countdown.

use serde::Serialize;

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No countdown is armed.
    Idle,
    /// Countdown is still running with this many seconds left.
    Running(u32),
    /// Countdown reached zero on this tick and is now disarmed.
    Expired,
}

/// Single countdown measured in whole seconds.
///
/// `remaining_seconds` is `None` while disarmed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Countdown {
    remaining_seconds: Option<u32>,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the countdown, replacing any running one.
    ///
    /// A zero duration expires on the next tick.
    pub fn start(&mut self, seconds: u32) {
        self.remaining_seconds = Some(seconds);
    }

    /// Decrements by one second.
    ///
    /// Expiry is reported exactly once; the countdown is disarmed afterwards.
    pub fn tick(&mut self) -> TickOutcome {
        match self.remaining_seconds {
            None => TickOutcome::Idle,
            Some(0) | Some(1) => {
                self.remaining_seconds = None;
                TickOutcome::Expired
            }
            Some(remaining) => {
                let next = remaining - 1;
                self.remaining_seconds = Some(next);
                TickOutcome::Running(next)
            }
        }
    }

    /// Disarms without firing. Returns whether a countdown was armed.
    pub fn cancel(&mut self) -> bool {
        self.remaining_seconds.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.remaining_seconds.is_some()
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        self.remaining_seconds
    }
}

/// Plain-text read-out for adapters without their own formatting.
pub fn remaining_label(remaining_seconds: u32) -> String {
    format!("Time remaining: {remaining_seconds} seconds")
}

#[cfg(test)]
mod tests {
    use super::{remaining_label, Countdown, TickOutcome};

    #[test]
    fn expires_exactly_once_after_full_duration() {
        let mut countdown = Countdown::new();
        countdown.start(3);
        assert_eq!(countdown.tick(), TickOutcome::Running(2));
        assert_eq!(countdown.tick(), TickOutcome::Running(1));
        assert_eq!(countdown.tick(), TickOutcome::Expired);
        assert_eq!(countdown.tick(), TickOutcome::Idle);
        assert!(!countdown.is_armed());
    }

    #[test]
    fn start_replaces_running_countdown() {
        let mut countdown = Countdown::new();
        countdown.start(30);
        countdown.tick();
        countdown.start(5);
        assert_eq!(countdown.remaining_seconds(), Some(5));
    }

    #[test]
    fn cancel_disarms_without_expiry() {
        let mut countdown = Countdown::new();
        countdown.start(2);
        assert!(countdown.cancel());
        assert!(!countdown.cancel());
        assert_eq!(countdown.tick(), TickOutcome::Idle);
    }

    #[test]
    fn zero_duration_expires_on_first_tick() {
        let mut countdown = Countdown::new();
        countdown.start(0);
        assert_eq!(countdown.tick(), TickOutcome::Expired);
    }

    #[test]
    fn label_matches_read_out() {
        assert_eq!(remaining_label(7), "Time remaining: 7 seconds");
    }
}
