//! Calendar-accurate difference between two instants.
//!
//! The difference is decomposed by subtracting UTC calendar fields and then
//! borrowing from the least significant unit upward, like mixed-radix
//! subtraction: 60 seconds, 60 minutes, 24 hours, one calendar month of days
//! (whose length depends on the month), 12 months.
//!
//! # Functions
//!
//! - [`diff`] — Decompose the span between two [`Instant`]s
//! - [`diff_inputs`] — Same, parsing both sides first

use std::fmt;

use chrono::Months;
use serde::Serialize;

use crate::calendar::{self, CalendarFields};
use crate::error::{AgeError, Result};
use crate::instant::{Instant, IntoInstant};

/// A non-negative calendar duration in six units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Duration6 {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    /// 0-23.
    pub hours: u32,
    /// 0-59.
    pub minutes: u32,
    /// 0-59.
    pub seconds: u32,
}

impl Duration6 {
    pub const ZERO: Duration6 = Duration6 {
        years: 0,
        months: 0,
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Add this duration to `start` with calendar-aware arithmetic.
    ///
    /// Years and months are added together as `12 * years + months` calendar
    /// months, clamping to the last day of a shorter month; days, hours,
    /// minutes and seconds are then added as elapsed time. For any
    /// `start <= end` at whole-second precision,
    /// `diff(start, end)?.add_to(start) == Some(end)`.
    ///
    /// Returns `None` if the result leaves the supported calendar range.
    pub fn add_to(&self, start: &Instant) -> Option<Instant> {
        let total_months = self.years.checked_mul(12)?.checked_add(self.months)?;
        let shifted = start
            .as_datetime()
            .checked_add_months(Months::new(total_months))?;
        let elapsed = chrono::Duration::days(i64::from(self.days))
            + chrono::Duration::seconds(
                i64::from(self.hours) * 3600
                    + i64::from(self.minutes) * 60
                    + i64::from(self.seconds),
            );
        shifted.checked_add_signed(elapsed).map(Instant::new)
    }

    /// Human-readable form, e.g. `"1 year, 2 months, 3 days"`.
    ///
    /// Zero units are skipped; an all-zero duration reads `"0 seconds"`.
    pub fn human_readable(&self) -> String {
        let units = [
            (self.years, "year"),
            (self.months, "month"),
            (self.days, "day"),
            (self.hours, "hour"),
            (self.minutes, "minute"),
            (self.seconds, "second"),
        ];
        let parts: Vec<String> = units
            .iter()
            .filter(|(n, _)| *n > 0)
            .map(|(n, unit)| format!("{} {}{}", n, unit, if *n == 1 { "" } else { "s" }))
            .collect();
        if parts.is_empty() {
            "0 seconds".to_string()
        } else {
            parts.join(", ")
        }
    }
}

impl fmt::Display for Duration6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.human_readable())
    }
}

/// Compute the calendar difference from `birth` to `target`.
///
/// # Returns
///
/// A [`Duration6`] whose fields are all non-negative. If `target` precedes
/// `birth` the result is [`Duration6::ZERO`]; that is a defined outcome, not
/// an error. Sub-second parts are ignored in the decomposition but do take
/// part in the `target < birth` comparison.
///
/// # Errors
///
/// Returns [`AgeError::InvalidPair`] if the month needed for a day borrow
/// lies outside the supported calendar, or a component is left negative
/// after borrowing.
///
/// # Examples
///
/// ```
/// use age_engine::{diff, parse_instant};
///
/// let birth = parse_instant("2021-01-31T00:00:00Z").unwrap();
/// let target = parse_instant("2021-03-01T00:00:00Z").unwrap();
/// let d = diff(&birth, &target).unwrap();
/// assert_eq!((d.years, d.months, d.days), (0, 1, 1));
/// ```
pub fn diff(birth: &Instant, target: &Instant) -> Result<Duration6> {
    if target < birth {
        tracing::debug!(%birth, %target, "target precedes birth, clamping to zero");
        return Ok(Duration6::ZERO);
    }

    let b = CalendarFields::of(birth);
    let t = CalendarFields::of(target);

    let mut years = i64::from(t.year) - i64::from(b.year);
    let mut months = i64::from(t.month0) - i64::from(b.month0);
    let mut days = i64::from(t.day) - i64::from(b.day);
    let mut hours = i64::from(t.hour) - i64::from(b.hour);
    let mut minutes = i64::from(t.minute) - i64::from(b.minute);
    let mut seconds = i64::from(t.second) - i64::from(b.second);

    // Each borrow can push the next unit negative, so the order matters.
    if seconds < 0 {
        seconds += 60;
        minutes -= 1;
    }

    if minutes < 0 {
        minutes += 60;
        hours -= 1;
    }

    if hours < 0 {
        hours += 24;
        days -= 1;
    }

    if days < 0 {
        // Borrow the month before the target's month. A birth day past that
        // month's end clamps to its last day.
        let (prev_year, prev_month0) = calendar::previous_month(t.year, t.month0);
        let prev_len = calendar::days_in_month(prev_year, prev_month0).ok_or_else(|| {
            AgeError::InvalidPair(format!(
                "no calendar month before {target} to borrow days from"
            ))
        })?;
        days += i64::from(prev_len.max(b.day));
        months -= 1;
    }

    if months < 0 {
        months += 12;
        years -= 1;
    }

    Ok(Duration6 {
        years: component(years, "years")?,
        months: component(months, "months")?,
        days: component(days, "days")?,
        hours: component(hours, "hours")?,
        minutes: component(minutes, "minutes")?,
        seconds: component(seconds, "seconds")?,
    })
}

/// Parse both sides and compute [`diff`].
///
/// # Errors
///
/// Returns a single [`AgeError::InvalidPair`] naming every side that failed
/// to parse, so callers can tell a bad pair from a bad single input.
pub fn diff_inputs(birth: impl IntoInstant, target: impl IntoInstant) -> Result<Duration6> {
    match (birth.into_instant(), target.into_instant()) {
        (Ok(birth), Ok(target)) => diff(&birth, &target),
        (Err(e), Ok(_)) => Err(AgeError::InvalidPair(format!("birth: {e}"))),
        (Ok(_), Err(e)) => Err(AgeError::InvalidPair(format!("target: {e}"))),
        (Err(b), Err(t)) => Err(AgeError::InvalidPair(format!("birth: {b}; target: {t}"))),
    }
}

fn component(value: i64, unit: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        AgeError::InvalidPair(format!("{unit} out of range after borrowing: {value}"))
    })
}
