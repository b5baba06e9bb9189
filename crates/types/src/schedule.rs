//! Timer schedule for a display

use std::time::Duration;
use thiserror::Error;

/// Errors raised while building a timer schedule
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// A repeating timer needs a non-zero period
    #[error("timer interval must be greater than zero")]
    ZeroInterval,
}

/// When a display's timer first fires and how often it repeats.
///
/// `TimerSchedule::NONE` (no delay, no interval) marks a display that never
/// uses a timer; timer operations on such a display do nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerSchedule {
    /// Delay before the first firing
    pub start_delay: Duration,
    /// Period between firings; `None` fires once after `start_delay`
    pub interval: Option<Duration>,
}

impl TimerSchedule {
    /// Schedule for displays that are never timer driven
    pub const NONE: TimerSchedule = TimerSchedule {
        start_delay: Duration::ZERO,
        interval: None,
    };

    /// Build a schedule from millisecond values as found in configuration
    pub fn from_millis(start_delay_ms: u64, interval_ms: Option<u64>) -> Result<Self, ScheduleError> {
        if interval_ms == Some(0) {
            return Err(ScheduleError::ZeroInterval);
        }
        Ok(Self {
            start_delay: Duration::from_millis(start_delay_ms),
            interval: interval_ms.map(Duration::from_millis),
        })
    }

    /// True when this schedule means "no timer behaviour"
    pub fn is_unused(&self) -> bool {
        *self == Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unused() {
        assert!(TimerSchedule::default().is_unused());
        assert!(TimerSchedule::from_millis(0, None).unwrap().is_unused());
    }

    #[test]
    fn test_delay_only_is_one_shot() {
        let schedule = TimerSchedule::from_millis(250, None).unwrap();
        assert!(!schedule.is_unused());
        assert_eq!(schedule.start_delay, Duration::from_millis(250));
        assert_eq!(schedule.interval, None);
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert_eq!(
            TimerSchedule::from_millis(100, Some(0)),
            Err(ScheduleError::ZeroInterval)
        );
        assert_eq!(
            TimerSchedule::from_millis(0, Some(0)),
            Err(ScheduleError::ZeroInterval)
        );
    }
}
