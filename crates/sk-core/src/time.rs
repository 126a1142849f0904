//! Wall-clock-of-day parsing and duration arithmetic.
//!
//! Every function here is fail-soft: malformed input yields a zero duration or
//! zero seconds instead of an error, so one bad timestamp only affects the
//! quantity it feeds.

use std::fmt;

use chrono::{NaiveTime, TimeDelta};
use serde::{Serialize, Serializer};

/// Width of a rendered `HH:MM:SS.mmm` string.
pub const CLOCK_WIDTH: usize = 12;

/// Parse a strict `HH:MM:SS.mmm` wall-clock time of day.
///
/// Each component must have exactly its fixed number of digits.
pub fn parse_clock(s: &str) -> Option<NaiveTime> {
    let (hms, millis) = s.split_once('.')?;
    let mut parts = hms.split(':');
    let hours = fixed_digits(parts.next()?, 2)?;
    let minutes = fixed_digits(parts.next()?, 2)?;
    let seconds = fixed_digits(parts.next()?, 2)?;
    if parts.next().is_some() {
        return None;
    }
    let millis = fixed_digits(millis, 3)?;
    NaiveTime::from_hms_milli_opt(hours, minutes, seconds, millis)
}

fn fixed_digits(s: &str, width: usize) -> Option<u32> {
    if s.len() != width || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Duration from `start` to `end`, both `HH:MM:SS.mmm`.
///
/// Returns zero when either side fails to parse (including the empty string)
/// or when `end` is earlier than `start`.
pub fn duration_between(start: &str, end: &str) -> TimeDelta {
    match (parse_clock(start), parse_clock(end)) {
        (Some(start), Some(end)) if end >= start => end.signed_duration_since(start),
        _ => TimeDelta::zero(),
    }
}

/// Convert an `HH:MM:SS.mmm` duration string to fractional seconds.
///
/// Returns `0.0` for a wrong segment count or a non-numeric component.
/// Hours are not limited to a single day.
pub fn duration_to_seconds(duration: &str) -> f64 {
    let Some((hms, millis)) = duration.split_once('.') else {
        return 0.0;
    };
    let parts: Vec<&str> = hms.split(':').collect();
    let &[hours, minutes, seconds] = parts.as_slice() else {
        return 0.0;
    };
    let number = |s: &str| s.parse::<u64>().ok();
    match (
        number(hours),
        number(minutes),
        number(seconds),
        number(millis),
    ) {
        (Some(h), Some(m), Some(s), Some(ms)) => h
            .checked_mul(3600)
            .and_then(|secs| secs.checked_add(m.checked_mul(60)?))
            .and_then(|secs| secs.checked_add(s))
            .and_then(|secs| secs.checked_mul(1000))
            .and_then(|total| total.checked_add(ms))
            .map_or(0.0, |total_ms| total_ms as f64 / 1000.0),
        _ => 0.0,
    }
}

/// Render a duration as `HH:MM:SS.mmm`, floored to whole milliseconds.
///
/// Negative durations render as `00:00:00.000`.
pub fn format_duration(duration: TimeDelta) -> String {
    let total_ms = duration.num_milliseconds().max(0);
    let hours = total_ms / 3_600_000;
    let minutes = total_ms / 60_000 % 60;
    let seconds = total_ms / 1000 % 60;
    let millis = total_ms % 1000;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}

/// A non-negative race duration, displayed as `HH:MM:SS.mmm`.
///
/// `Display` goes through [`fmt::Formatter::pad`], so `{:.12}` truncates
/// the rendered string like any other `str`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Elapsed(TimeDelta);

impl Elapsed {
    /// The zero duration.
    pub fn zero() -> Self {
        Self(TimeDelta::zero())
    }

    /// Duration from `start` to `end`, following [`duration_between`].
    pub fn between(start: &str, end: &str) -> Self {
        Self(duration_between(start, end))
    }

    /// Same as [`Elapsed::between`], treating a missing side as unparsable.
    pub fn between_opt(start: Option<&str>, end: Option<&str>) -> Self {
        Self::between(start.unwrap_or_default(), end.unwrap_or_default())
    }

    /// The underlying chrono delta.
    pub fn delta(&self) -> TimeDelta {
        self.0
    }

    /// Fractional seconds, equal to [`duration_to_seconds`] of the rendered form.
    pub fn as_secs_f64(&self) -> f64 {
        self.0.num_milliseconds().max(0) as f64 / 1000.0
    }

    /// True for the zero duration.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Elapsed {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<TimeDelta> for Elapsed {
    fn from(delta: TimeDelta) -> Self {
        Self(delta.max(TimeDelta::zero()))
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format_duration(self.0))
    }
}

impl Serialize for Elapsed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
