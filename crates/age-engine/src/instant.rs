//! Canonical instants and strict parsing of date/time input.
//!
//! Every operation in this crate works on [`Instant`], an absolute point in
//! time read through UTC. Callers hand in whatever they have (a chrono
//! datetime, a `SystemTime`, or a string) through [`IntoInstant`]; strings
//! go through [`parse_instant`], which accepts a small fixed grammar and
//! rejects everything else instead of guessing.
//!
//! # Accepted strings
//!
//! - RFC 3339 with an offset: `1993-02-09T00:00:00Z`, `1993-02-09 05:30:00+05:30`
//! - Date-time without an offset, read as UTC: `1993-02-09T00:00:00`, `1993-02-09T00:00:00.250`
//! - Bare date, read as UTC midnight: `1993-02-09`

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::Serialize;

use crate::calendar::CalendarFields;
use crate::error::{AgeError, Result};

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// An absolute point in time, observed at UTC for all calendar field reads.
///
/// Always a real date once constructed; a failed parse is an [`AgeError`],
/// never a sentinel `Instant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Instant(DateTime<Utc>);

impl Instant {
    pub fn new(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Build an instant from UTC calendar fields (`month` is 1-based).
    ///
    /// # Errors
    ///
    /// Returns [`AgeError::Parse`] if the fields do not name a real date/time.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self> {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
            .single()
            .map(Self)
            .ok_or_else(|| {
                AgeError::Parse(format!(
                    "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02} is not a calendar date"
                ))
            })
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// UTC calendar fields of this instant.
    pub fn fields(&self) -> CalendarFields {
        CalendarFields::of(self)
    }

    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }
}

impl From<DateTime<FixedOffset>> for Instant {
    fn from(datetime: DateTime<FixedOffset>) -> Self {
        Self(datetime.with_timezone(&Utc))
    }
}

impl FromStr for Instant {
    type Err = AgeError;

    fn from_str(s: &str) -> Result<Self> {
        parse_instant(s)
    }
}

/// Anything that can be normalized into an [`Instant`].
pub trait IntoInstant {
    /// # Errors
    ///
    /// Returns [`AgeError::Parse`] if the value does not denote a valid instant.
    fn into_instant(self) -> Result<Instant>;
}

impl IntoInstant for Instant {
    fn into_instant(self) -> Result<Instant> {
        Ok(self)
    }
}

impl IntoInstant for &Instant {
    fn into_instant(self) -> Result<Instant> {
        Ok(*self)
    }
}

impl IntoInstant for DateTime<Utc> {
    fn into_instant(self) -> Result<Instant> {
        Ok(Instant(self))
    }
}

impl IntoInstant for DateTime<FixedOffset> {
    fn into_instant(self) -> Result<Instant> {
        Ok(Instant::from(self))
    }
}

impl IntoInstant for SystemTime {
    fn into_instant(self) -> Result<Instant> {
        let (secs, nanos) = match self.duration_since(UNIX_EPOCH) {
            Ok(after) => (i64::try_from(after.as_secs()).ok(), after.subsec_nanos()),
            Err(before) => {
                let before = before.duration();
                let secs = i64::try_from(before.as_secs()).ok();
                if before.subsec_nanos() == 0 {
                    (secs.map(|s| -s), 0)
                } else {
                    // Floor to the previous whole second, keep nanos positive.
                    (secs.map(|s| -s - 1), 1_000_000_000 - before.subsec_nanos())
                }
            }
        };

        secs.and_then(|s| DateTime::from_timestamp(s, nanos))
            .map(Instant)
            .ok_or_else(|| AgeError::Parse("system time outside the calendar range".to_string()))
    }
}

impl IntoInstant for &str {
    fn into_instant(self) -> Result<Instant> {
        parse_instant(self)
    }
}

impl IntoInstant for &String {
    fn into_instant(self) -> Result<Instant> {
        parse_instant(self)
    }
}

impl IntoInstant for String {
    fn into_instant(self) -> Result<Instant> {
        parse_instant(&self)
    }
}

/// Parse a date/time string into an [`Instant`].
///
/// Surrounding whitespace is ignored. Input without an offset is read as UTC.
///
/// # Errors
///
/// Returns [`AgeError::Parse`] for empty input, input outside the accepted
/// grammar, or input naming a date that does not exist (e.g. `2021-02-30`).
///
/// # Examples
///
/// ```
/// use age_engine::parse_instant;
///
/// let a = parse_instant("1993-02-09T00:00:00Z").unwrap();
/// let b = parse_instant("1993-02-09").unwrap();
/// assert_eq!(a, b);
/// assert!(parse_instant("next tuesday").is_err());
/// ```
pub fn parse_instant(input: &str) -> Result<Instant> {
    let s = input.trim();
    if s.is_empty() {
        return Err(AgeError::Parse("empty input".to_string()));
    }

    try_rfc3339(s)
        .or_else(|| try_naive_datetime(s))
        .or_else(|| try_naive_date(s))
        .map(Instant)
        .ok_or_else(|| {
            tracing::debug!(input = s, "rejected datetime input");
            AgeError::Parse(format!(
                "'{s}': expected YYYY-MM-DD, YYYY-MM-DDTHH:MM:SS[.fff] or RFC 3339 with offset"
            ))
        })
}

fn try_rfc3339(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

fn try_naive_datetime(s: &str) -> Option<DateTime<Utc>> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn try_naive_date(s: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
