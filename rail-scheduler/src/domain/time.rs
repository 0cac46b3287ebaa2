//! Clock time handling for published schedules.
//!
//! Schedule files encode times of day as HHMM integers (`930` is 09:30).
//! This module turns them into a validated [`ClockTime`] so that durations
//! are measured in real minutes rather than by subtracting the raw integers.

use chrono::{NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an invalid time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day at minute precision.
///
/// Schedules have no date component and no overnight wraparound, so a
/// `ClockTime` is always within a single day (00:00 to 23:59).
///
/// # Examples
///
/// ```
/// use rail_scheduler::domain::ClockTime;
///
/// let time = ClockTime::from_hhmm(930).unwrap();
/// assert_eq!(time.to_string(), "09:30");
/// assert_eq!(time.to_hhmm(), 930);
///
/// // Minutes past 59 are rejected
/// assert!(ClockTime::from_hhmm(960).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create a time from hour and minute components.
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Create a time from its HHMM integer encoding.
    pub fn from_hhmm(hhmm: u32) -> Result<Self, TimeError> {
        if hhmm > 2359 {
            return Err(TimeError::new("HHMM value must be 0-2359"));
        }
        Self::new(hhmm / 100, hhmm % 100)
    }

    /// Returns the HHMM integer encoding.
    pub fn to_hhmm(&self) -> u32 {
        self.hour() * 100 + self.minute()
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Signed number of minutes from `self` until `later`.
    ///
    /// Negative if `later` is actually earlier in the day.
    pub fn minutes_until(&self, later: ClockTime) -> i64 {
        later.0.signed_duration_since(self.0).num_minutes()
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    /// Parse `HH:MM`, `H:MM` or a bare HHMM digit string such as `0930` or `930`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some((hours, minutes)) = s.split_once(':') {
            if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
                return Err(TimeError::new("expected HH:MM format"));
            }
            let hour = parse_digits(hours).ok_or_else(|| TimeError::new("invalid hour digits"))?;
            let minute =
                parse_digits(minutes).ok_or_else(|| TimeError::new("invalid minute digits"))?;
            return Self::new(hour, minute);
        }

        if s.is_empty() || s.len() > 4 {
            return Err(TimeError::new("expected HHMM or HH:MM format"));
        }
        let hhmm = parse_digits(s).ok_or_else(|| TimeError::new("invalid digits"))?;
        Self::from_hhmm(hhmm)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse a short run of ASCII digits. Signs and whitespace are rejected.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every valid HHMM value survives the integer round trip
        #[test]
        fn hhmm_roundtrip(hour in 0u32..24, minute in 0u32..60) {
            let hhmm = hour * 100 + minute;
            let time = ClockTime::from_hhmm(hhmm).unwrap();
            prop_assert_eq!(time.to_hhmm(), hhmm);
        }

        /// The displayed form parses back to the same time
        #[test]
        fn display_parses_back(hour in 0u32..24, minute in 0u32..60) {
            let time = ClockTime::new(hour, minute).unwrap();
            let parsed: ClockTime = time.to_string().parse().unwrap();
            prop_assert_eq!(parsed, time);
        }

        /// Minute differences agree with minutes since midnight
        #[test]
        fn minutes_until_consistent(a in 0u32..1440, b in 0u32..1440) {
            let ta = ClockTime::new(a / 60, a % 60).unwrap();
            let tb = ClockTime::new(b / 60, b % 60).unwrap();
            prop_assert_eq!(ta.minutes_until(tb), i64::from(b) - i64::from(a));
        }
    }
}
