//! Time-of-day tokens and class time windows.
//!
//! Upstream records carry times as loose strings: `"9:00"`, `"09:00"`,
//! `"09:00:00"`, or a combined `"9:00 - 10:30"` / `"9:00-10:30"`. Everything
//! here turns those into a [`ClockTime`], whose `Display` is always the
//! zero-padded `HH:MM` form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Span, TimetableError};

/// Time of day (hours and minutes), 24-hour clock.
///
/// Ordering is chronological, which for the zero-padded `HH:MM` rendering is
/// the same as lexicographic string order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// `None` unless `hour` is 0-23 and `minute` is 0-59.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    /// Parse an `H:MM` or `HH:MM` token, optionally followed by `:SS`.
    ///
    /// Seconds are accepted because SQL `time` columns render that way, and
    /// then dropped. Surrounding whitespace is ignored.
    pub fn parse(token: &str) -> Result<Self, TimetableError> {
        let offset = token.len() - token.trim_start().len();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(TimetableError::time(
                "expected time, found nothing",
                Span::new(offset, offset),
                token,
            ));
        }

        let bytes = trimmed.as_bytes();
        let span = |start: usize, end: usize| Span::new(offset + start, offset + end);
        let digits_from = |start: usize| {
            let mut end = start;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            end
        };

        let hour_end = digits_from(0);
        if hour_end == 0 {
            return Err(TimetableError::time(
                "expected hour digits",
                span(0, 1),
                token,
            ));
        }
        if hour_end > 2 {
            return Err(TimetableError::time(
                "hour must be one or two digits",
                span(0, hour_end),
                token,
            ));
        }
        if hour_end >= bytes.len() || bytes[hour_end] != b':' {
            return Err(TimetableError::time(
                "expected ':' after hour",
                span(hour_end, hour_end + 1),
                token,
            ));
        }

        let minute_start = hour_end + 1;
        let minute_end = digits_from(minute_start);
        if minute_end - minute_start != 2 {
            return Err(TimetableError::time(
                "minute must be two digits",
                span(minute_start, minute_end.max(minute_start + 1)),
                token,
            ));
        }

        let mut end = minute_end;
        if end < bytes.len() && bytes[end] == b':' {
            let seconds_end = digits_from(end + 1);
            let seconds_ok = seconds_end - (end + 1) == 2
                && trimmed[end + 1..seconds_end]
                    .parse::<u8>()
                    .is_ok_and(|s| s <= 59);
            if !seconds_ok {
                return Err(TimetableError::time(
                    "invalid seconds",
                    span(end + 1, seconds_end.max(end + 2)),
                    token,
                ));
            }
            end = seconds_end;
        }
        if end < bytes.len() {
            return Err(TimetableError::time(
                format!(
                    "unexpected character '{}'",
                    trimmed[end..].chars().next().unwrap_or('?')
                ),
                span(end, end + 1),
                token,
            ));
        }

        // Both slices are 1-2 ASCII digits, so these parses cannot overflow u8.
        let hour: u8 = trimmed[..hour_end]
            .parse()
            .map_err(|_| TimetableError::time("invalid hour", span(0, hour_end), token))?;
        let minute: u8 = trimmed[minute_start..minute_end].parse().map_err(|_| {
            TimetableError::time("invalid minute", span(minute_start, minute_end), token)
        })?;
        if hour > 23 {
            return Err(TimetableError::time(
                "hour must be between 0 and 23",
                span(0, hour_end),
                token,
            ));
        }
        if minute > 59 {
            return Err(TimetableError::time(
                "minute must be between 00 and 59",
                span(minute_start, minute_end),
                token,
            ));
        }
        Ok(Self { hour, minute })
    }

    /// The time of day of a civil time, truncated to the minute.
    pub fn from_jiff(time: jiff::civil::Time) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ClockTime::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Normalize a raw time token to zero-padded `HH:MM`.
pub fn normalize_time(token: &str) -> Result<String, TimetableError> {
    ClockTime::parse(token).map(|t| t.to_string())
}

/// A class's time window: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    /// Inclusive.
    pub start: ClockTime,
    /// Exclusive.
    pub end: ClockTime,
}

impl TimeWindow {
    pub const fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// Parse a combined range token such as `"9:00 - 10:30"` or `"9:00-10:30"`.
    pub fn parse(token: &str) -> Result<Self, TimetableError> {
        split_range(token).map(|(start, end)| Self::new(start, end))
    }

    pub fn contains(self, time: ClockTime) -> bool {
        self.start <= time && time < self.end
    }

    pub fn starts_after(self, time: ClockTime) -> bool {
        self.start > time
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Split a combined range token into its two normalized times.
///
/// The spaced separator `" - "` is tried first; bare `"-"` is the fallback.
/// Either split must produce exactly two non-empty parts.
pub fn split_range(token: &str) -> Result<(ClockTime, ClockTime), TimetableError> {
    let (start, end, end_offset) = split_parts(token, " - ")
        .or_else(|| split_parts(token, "-"))
        .ok_or_else(|| {
            TimetableError::range("expected 'HH:MM - HH:MM'", Span::whole(token), token)
        })?;

    let start = ClockTime::parse(start).map_err(|e| e.within_range(0, token))?;
    let end = ClockTime::parse(end).map_err(|e| e.within_range(end_offset, token))?;
    Ok((start, end))
}

/// Returns `(start, end, byte offset of end)` when `sep` splits `token` into
/// exactly two non-blank parts.
fn split_parts<'a>(token: &'a str, sep: &str) -> Option<(&'a str, &'a str, usize)> {
    let mut parts = token.split(sep);
    let start = parts.next()?;
    let end = parts.next()?;
    if parts.next().is_some() || start.trim().is_empty() || end.trim().is_empty() {
        return None;
    }
    Some((start, end, start.len() + sep.len()))
}
