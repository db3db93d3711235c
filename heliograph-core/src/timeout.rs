//! Deadline tracking against a caller-supplied millisecond clock
//!
//! A [`Timeout`] wraps a duration and the absolute deadline computed from
//! it. The clock is whatever the host loop samples (embassy `Instant`,
//! a hardware tick counter, a test variable) truncated to `u32`
//! milliseconds; deadline comparisons use wrapping arithmetic so the
//! counter rolling over at `u32::MAX` does not produce a stuck or
//! permanently-elapsed timeout.

/// Millisecond timeout with an absolute deadline.
///
/// Invariant: `deadline_ms` is always `duration_ms` past the last restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timeout {
    duration_ms: u32,
    deadline_ms: u32,
    /// If true, an elapsed [`Timeout::is_elapsed`] check restarts the
    /// interval as a side effect.
    auto_restart: bool,
}

impl Timeout {
    /// Create a timeout with the given duration.
    ///
    /// The deadline is seeded as if the timeout had been restarted at tick
    /// zero; call [`Timeout::restart`] with real time before relying on it.
    pub const fn new(duration_ms: u32, auto_restart: bool) -> Self {
        Self {
            duration_ms,
            deadline_ms: duration_ms,
            auto_restart,
        }
    }

    /// Restart the interval: the deadline becomes `now + duration`.
    pub fn restart(&mut self, now_ms: u32) {
        self.deadline_ms = now_ms.wrapping_add(self.duration_ms);
    }

    /// Change the duration, optionally restarting the interval.
    ///
    /// With `restart_now = false` the current deadline is left untouched
    /// and the new duration only applies from the next restart.
    pub fn set_duration(&mut self, duration_ms: u32, restart_now: bool, now_ms: u32) {
        self.duration_ms = duration_ms;
        if restart_now {
            self.restart(now_ms);
        }
    }

    /// Check whether the deadline has been reached.
    ///
    /// This is a query with a side effect: when the deadline has passed and
    /// the timeout was created with `auto_restart`, the interval restarts
    /// from `now_ms` before returning. The next interval therefore measures
    /// from this poll rather than from the missed deadline, so irregular
    /// polling accumulates drift. That approximation is deliberate and
    /// matches how the blinkers expect to be driven.
    pub fn is_elapsed(&mut self, now_ms: u32) -> bool {
        // Wrap-safe comparison: reinterpret the wrapping difference as
        // signed, valid for intervals up to i32::MAX ms.
        let elapsed = now_ms.wrapping_sub(self.deadline_ms) as i32 >= 0;
        if elapsed && self.auto_restart {
            self.restart(now_ms);
        }
        elapsed
    }

    /// Get the configured duration in milliseconds.
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_elapsed_before_deadline() {
        let mut timeout = Timeout::new(500, false);
        timeout.restart(1000);
        assert!(!timeout.is_elapsed(1000));
        assert!(!timeout.is_elapsed(1499));
    }

    #[test]
    fn test_elapsed_at_deadline() {
        let mut timeout = Timeout::new(500, false);
        timeout.restart(1000);
        assert!(timeout.is_elapsed(1500));
        // No auto-restart: stays elapsed
        assert!(timeout.is_elapsed(1501));
    }

    #[test]
    fn test_auto_restart_measures_from_poll_time() {
        let mut timeout = Timeout::new(500, true);
        timeout.restart(0);

        // Late poll: elapsed, restarts from the poll time (650), not the
        // missed deadline (500)
        assert!(timeout.is_elapsed(650));
        assert!(!timeout.is_elapsed(1100));
        assert!(timeout.is_elapsed(1150));
    }

    #[test]
    fn test_set_duration_without_restart_keeps_deadline() {
        let mut timeout = Timeout::new(500, false);
        timeout.restart(0);
        timeout.set_duration(10_000, false, 0);

        // Old deadline still stands
        assert!(timeout.is_elapsed(500));
        assert_eq!(timeout.duration_ms(), 10_000);
    }

    #[test]
    fn test_set_duration_with_restart() {
        let mut timeout = Timeout::new(500, false);
        timeout.restart(0);
        timeout.set_duration(200, true, 100);

        assert!(!timeout.is_elapsed(299));
        assert!(timeout.is_elapsed(300));
    }

    #[test]
    fn test_elapsed_across_clock_wraparound() {
        let mut timeout = Timeout::new(500, false);

        // Deadline lands 400ms past the u32 wrap point
        timeout.restart(u32::MAX - 99);
        assert!(!timeout.is_elapsed(u32::MAX - 99));
        assert!(!timeout.is_elapsed(u32::MAX));
        assert!(!timeout.is_elapsed(399));
        assert!(timeout.is_elapsed(400));
    }

    #[test]
    fn test_auto_restart_across_wraparound() {
        let mut timeout = Timeout::new(1000, true);
        timeout.restart(u32::MAX - 499);

        assert!(timeout.is_elapsed(500));
        // Fresh interval measured from the wrapped poll time
        assert!(!timeout.is_elapsed(1499));
        assert!(timeout.is_elapsed(1500));
    }
}
