//! Wall-clock times within a planned day.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use thiserror::Error;

const MINUTES_PER_HOUR: u32 = 60;
const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

/// A time of day stored as whole minutes since the day's midnight.
///
/// Values at or past `24:00` are allowed so a day that overruns midnight keeps
/// monotonic stop times. They render as `25:10` and so on.
///
/// # Examples
/// ```
/// use voyager_core::ClockTime;
///
/// let start = ClockTime::from_hm(9, 0).expect("valid time");
/// assert_eq!(start.add_minutes(135).to_string(), "11:15");
/// assert_eq!("17:30".parse::<ClockTime>(), Ok(ClockTime::from_minutes(1050)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ClockTime(u32);

impl ClockTime {
    /// The start of the day.
    pub const MIDNIGHT: Self = Self(0);

    /// Construct a time from minutes past midnight.
    #[must_use]
    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    /// Construct a time from an hour and minute.
    ///
    /// Returns `None` when `minute` is 60 or more. Hours past 23 are accepted.
    #[must_use]
    pub const fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if minute >= MINUTES_PER_HOUR {
            return None;
        }
        match hour.checked_mul(MINUTES_PER_HOUR) {
            Some(hours) => match hours.checked_add(minute) {
                Some(total) => Some(Self(total)),
                None => None,
            },
            None => None,
        }
    }

    /// Minutes past midnight.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.0
    }

    /// Hour component; may exceed 23 for overrunning days.
    #[must_use]
    #[expect(
        clippy::integer_division,
        reason = "whole hours are the truncated quotient by design of the format"
    )]
    pub const fn hour(self) -> u32 {
        self.0 / MINUTES_PER_HOUR
    }

    /// Minute component in `0..60`.
    #[must_use]
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "minute component is the remainder after whole hours"
    )]
    pub const fn minute(self) -> u32 {
        self.0 % MINUTES_PER_HOUR
    }

    /// Advance by `minutes`, saturating at the representable maximum.
    #[must_use]
    pub const fn add_minutes(self, minutes: u32) -> Self {
        Self(self.0.saturating_add(minutes))
    }

    /// Minutes from `self` until `later`, or zero when `later` is earlier.
    #[must_use]
    pub const fn minutes_until(self, later: Self) -> u32 {
        later.0.saturating_sub(self.0)
    }

    /// Whether this time lies on the following calendar day.
    #[must_use]
    pub const fn overruns_day(self) -> bool {
        self.0 >= MINUTES_PER_DAY
    }

    /// Parse a wall-clock `HH:MM` time within a single day.
    ///
    /// Unlike [`FromStr`], hours past 23 are rejected.
    ///
    /// # Errors
    /// Returns [`ParseClockTimeError`] when `text` is not a valid time of day.
    ///
    /// # Examples
    /// ```
    /// use voyager_core::ClockTime;
    ///
    /// assert_eq!(ClockTime::parse_time_of_day("08:30").map(|t| t.minutes()), Ok(510));
    /// assert!(ClockTime::parse_time_of_day("25:00").is_err());
    /// ```
    pub fn parse_time_of_day(text: &str) -> Result<Self, ParseClockTimeError> {
        NaiveTime::parse_from_str(text.trim(), "%H:%M")
            .map(Self::from)
            .map_err(|_| ParseClockTimeError {
                input: text.to_owned(),
            })
    }
}

impl From<NaiveTime> for ClockTime {
    /// Seconds are truncated.
    fn from(time: NaiveTime) -> Self {
        Self(time.hour() * MINUTES_PER_HOUR + time.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Error returned when a string is not an `HH:MM` time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time {input:?}, expected HH:MM")]
pub struct ParseClockTimeError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for ClockTime {
    type Err = ParseClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseClockTimeError {
            input: s.to_owned(),
        };
        let (hour_text, minute_text) = s.trim().split_once(':').ok_or_else(invalid)?;
        if minute_text.len() != 2 {
            return Err(invalid());
        }
        let hour = hour_text.parse::<u32>().map_err(|_| invalid())?;
        let minute = minute_text.parse::<u32>().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ClockTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ClockTime {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
