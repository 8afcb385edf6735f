//! Next annual recurrence of a month/day, and the countdown to it.

use crate::calendar;
use crate::diff::{diff, Duration6};
use crate::error::{AgeError, Result};
use crate::instant::Instant;

/// A leap year, used to validate month/day pairs so that February 29 is accepted.
const LEAP_REFERENCE_YEAR: i32 = 2000;

/// Longest run of Gregorian years without a February 29 (e.g. 2096 to 2104).
const MAX_RECURRENCE_GAP_YEARS: i32 = 8;

/// Find the next UTC midnight on `month`/`day` at or after `from`.
///
/// Starts from the UTC year of `from` and advances a year at a time while the
/// candidate is strictly before `from`. An occurrence exactly at `from` is
/// returned as-is. February 29 only exists in leap years, so it may advance
/// more than one year.
///
/// # Arguments
///
/// * `month` — 1 (January) through 12
/// * `day` — Day of month, 1 through the longest length of that month
/// * `from` — The reference "now" instant
///
/// # Errors
///
/// Returns [`AgeError::InvalidMonthDay`] if `month` is out of range or `day`
/// does not exist in `month` in any year. Out-of-range days are rejected,
/// never rolled into the following month.
///
/// # Examples
///
/// ```
/// use age_engine::{next_occurrence, parse_instant};
///
/// let from = parse_instant("2030-03-01T00:00:00Z").unwrap();
/// let next = next_occurrence(2, 9, &from).unwrap();
/// assert_eq!(next.to_string(), "2031-02-09T00:00:00Z");
/// ```
pub fn next_occurrence(month: u32, day: u32, from: &Instant) -> Result<Instant> {
    validate_month_day(month, day)?;

    let start_year = from.fields().year;
    let next = (start_year..=start_year.saturating_add(MAX_RECURRENCE_GAP_YEARS))
        .filter_map(|year| Instant::from_ymd_hms(year, month, day, 0, 0, 0).ok())
        .find(|candidate| candidate >= from)
        .ok_or_else(|| {
            AgeError::InvalidMonthDay(format!(
                "{month:02}-{day:02} does not recur after {from}"
            ))
        })?;

    let rolled = next.fields().year - start_year;
    if rolled > 0 {
        tracing::trace!(month, day, %from, %next, rolled, "occurrence rolled forward");
    }
    Ok(next)
}

/// Countdown from `from` to the next occurrence of `month`/`day`.
///
/// # Errors
///
/// Same as [`next_occurrence`].
///
/// # Examples
///
/// ```
/// use age_engine::{countdown, parse_instant};
///
/// let from = parse_instant("2030-01-01T00:00:00Z").unwrap();
/// let left = countdown(2, 9, &from).unwrap();
/// assert_eq!((left.months, left.days), (1, 8));
/// ```
pub fn countdown(month: u32, day: u32, from: &Instant) -> Result<Duration6> {
    let next = next_occurrence(month, day, from)?;
    diff(from, &next)
}

fn validate_month_day(month: u32, day: u32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(AgeError::InvalidMonthDay(format!(
            "month {month} is not in 1-12"
        )));
    }
    let longest = calendar::days_in_month(LEAP_REFERENCE_YEAR, month - 1).unwrap_or(0);
    if !(1..=longest).contains(&day) {
        return Err(AgeError::InvalidMonthDay(format!(
            "day {day} is not in 1-{longest} for month {month}"
        )));
    }
    Ok(())
}
