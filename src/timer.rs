//! Focus session countdown.
//!
//! The timer is advanced by the UI once per frame with the elapsed wall-clock time and
//! counts down in whole seconds, like a one-second interval would.

use crate::constants::DEFAULT_FOCUS_SECS;

/// Events reported by [`FocusTimer::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The countdown reached zero; the timer stopped and reset itself
    Completed,
}

/// Countdown for one focus session.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusTimer {
    duration_secs: u32,
    remaining_secs: u32,
    running: bool,
    /// Fraction of a second accumulated since the last whole-second tick
    carry: f64,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_SECS)
    }
}

impl FocusTimer {
    /// Creates a stopped timer for a session of `duration_secs` (at least one second).
    pub fn new(duration_secs: u32) -> Self {
        let duration_secs = duration_secs.max(1);
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            running: false,
            carry: 0.0,
        }
    }

    /// Configured session length.
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Seconds left in the current session.
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Whether the countdown is currently running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts a stopped timer or pauses a running one.
    pub fn toggle(&mut self) {
        self.running = !self.running;
        if !self.running {
            self.carry = 0.0;
        }
    }

    /// Stops the timer and restores the full session length.
    pub fn reset(&mut self) {
        self.running = false;
        self.carry = 0.0;
        self.remaining_secs = self.duration_secs;
    }

    /// Changes the session length. Ignored while the timer runs.
    pub fn set_duration(&mut self, duration_secs: u32) {
        if self.running {
            return;
        }
        self.duration_secs = duration_secs.max(1);
        self.remaining_secs = self.duration_secs;
        self.carry = 0.0;
    }

    /// Advances the countdown by `elapsed_secs` of wall-clock time.
    ///
    /// Returns [`TimerEvent::Completed`] exactly once per finished session.
    pub fn advance(&mut self, elapsed_secs: f64) -> Option<TimerEvent> {
        if !self.running || elapsed_secs.is_nan() || elapsed_secs <= 0.0 {
            return None;
        }
        self.carry += elapsed_secs;
        while self.carry >= 1.0 && self.remaining_secs > 0 {
            self.carry -= 1.0;
            self.remaining_secs -= 1;
        }
        if self.remaining_secs == 0 {
            self.reset();
            return Some(TimerEvent::Completed);
        }
        None
    }
}

/// Formats a number of seconds as `m:ss`.
pub fn format_time(total_secs: u32) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(5), "0:05");
        assert_eq!(format_time(25 * 60), "25:00");
        assert_eq!(format_time(61), "1:01");
    }

    #[test]
    fn test_stopped_timer_does_not_count() {
        let mut timer = FocusTimer::new(10);
        assert_eq!(timer.advance(3.0), None);
        assert_eq!(timer.remaining_secs(), 10);
    }

    #[test]
    fn test_counts_whole_seconds() {
        let mut timer = FocusTimer::new(10);
        timer.toggle();
        assert_eq!(timer.advance(0.6), None);
        assert_eq!(timer.remaining_secs(), 10);
        assert_eq!(timer.advance(0.6), None);
        assert_eq!(timer.remaining_secs(), 9);
        assert_eq!(timer.advance(2.0), None);
        assert_eq!(timer.remaining_secs(), 7);
    }

    #[test]
    fn test_pause_keeps_remaining_time() {
        let mut timer = FocusTimer::new(10);
        timer.toggle();
        timer.advance(4.0);
        timer.toggle();
        assert!(!timer.is_running());
        timer.advance(100.0);
        assert_eq!(timer.remaining_secs(), 6);
    }

    #[test]
    fn test_completion_fires_once_and_resets() {
        let mut timer = FocusTimer::new(3);
        timer.toggle();
        assert_eq!(timer.advance(2.0), None);
        assert_eq!(timer.advance(5.0), Some(TimerEvent::Completed));
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_secs(), 3);
        assert_eq!(timer.advance(5.0), None);
    }

    #[test]
    fn test_set_duration_only_when_stopped() {
        let mut timer = FocusTimer::new(60);
        timer.set_duration(0);
        assert_eq!(timer.duration_secs(), 1);

        timer.set_duration(120);
        timer.toggle();
        timer.set_duration(30);
        assert_eq!(timer.duration_secs(), 120);
        assert_eq!(timer.remaining_secs(), 120);
    }
}
