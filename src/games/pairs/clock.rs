//! Elapsed-time clock driven by explicit ticks.
//!
//! The clock never reads wall time. Each tick advances it by one sampling
//! interval, so a scheduler decides how fast time passes.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Lifecycle of the clock within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockState {
    /// No selection yet.
    Unstarted,
    /// Counting.
    Running,
    /// Frozen at game completion.
    Stopped,
}

/// Monotonic elapsed-time counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElapsedClock {
    interval: Duration,
    elapsed: Duration,
    state: ClockState,
}

impl ElapsedClock {
    /// Creates an unstarted clock advancing `interval` per tick.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            state: ClockState::Unstarted,
        }
    }

    /// Starts the clock. Returns false if it was already started or stopped.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> bool {
        if self.state != ClockState::Unstarted {
            return false;
        }
        debug!("Clock started");
        self.state = ClockState::Running;
        true
    }

    /// Advances by one interval while running.
    pub fn tick(&mut self) -> Option<ClockReading> {
        if self.state != ClockState::Running {
            return None;
        }
        self.elapsed += self.interval;
        Some(self.reading())
    }

    /// Freezes the clock at its current value.
    #[instrument(skip(self), fields(elapsed = ?self.elapsed))]
    pub fn stop(&mut self) {
        if self.state == ClockState::Running {
            debug!("Clock stopped");
        }
        self.state = ClockState::Stopped;
    }

    /// Time accumulated so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Sampling interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Display form of the elapsed time.
    pub fn reading(&self) -> ClockReading {
        ClockReading::from_duration(self.elapsed)
    }
}

/// Elapsed time split into minutes, seconds and hundredths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClockReading {
    /// Whole minutes.
    pub minutes: u64,
    /// Seconds within the minute.
    pub seconds: u8,
    /// Hundredths within the second.
    pub hundredths: u8,
}

impl ClockReading {
    /// Splits a duration, truncating below one hundredth.
    pub fn from_duration(elapsed: Duration) -> Self {
        let total_hundredths = elapsed.as_millis() / 10;
        Self {
            minutes: (total_hundredths / 6000) as u64,
            seconds: ((total_hundredths / 100) % 60) as u8,
            hundredths: (total_hundredths % 100) as u8,
        }
    }

    /// Minutes, zero-padded to two digits.
    pub fn minutes_text(&self) -> String {
        format!("{:02}", self.minutes)
    }

    /// Seconds, zero-padded to two digits.
    pub fn seconds_text(&self) -> String {
        format!("{:02}", self.seconds)
    }

    /// Hundredths, zero-padded to two digits.
    pub fn hundredths_text(&self) -> String {
        format!("{:02}", self.hundredths)
    }
}

impl std::fmt::Display for ClockReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.minutes_text(),
            self.seconds_text(),
            self.hundredths_text()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unstarted_clock_ignores_ticks() {
        let mut clock = ElapsedClock::new(Duration::from_millis(10));
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_running_clock_advances_per_tick() {
        let mut clock = ElapsedClock::new(Duration::from_millis(10));
        assert!(clock.start());
        assert!(!clock.start());
        for _ in 0..150 {
            clock.tick();
        }
        assert_eq!(clock.elapsed(), Duration::from_millis(1500));
        assert_eq!(clock.reading().to_string(), "00:01:50");
    }

    #[test]
    fn test_stopped_clock_is_frozen() {
        let mut clock = ElapsedClock::new(Duration::from_millis(10));
        clock.start();
        clock.tick();
        clock.stop();
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.elapsed(), Duration::from_millis(10));
        assert!(!clock.start());
    }

    #[test]
    fn test_reading_pads_each_field() {
        let reading = ClockReading::from_duration(Duration::from_millis(61_070));
        assert_eq!(reading.minutes_text(), "01");
        assert_eq!(reading.seconds_text(), "01");
        assert_eq!(reading.hundredths_text(), "07");
        assert_eq!(reading.to_string(), "01:01:07");
    }
}
