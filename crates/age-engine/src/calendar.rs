//! UTC calendar field extraction and month-length lookup.

use chrono::{Datelike, NaiveDate, Timelike};

use crate::instant::Instant;

/// The six UTC calendar components of an [`Instant`].
///
/// Derived on demand, never stored. `month0` is zero-based (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFields {
    pub year: i32,
    pub month0: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CalendarFields {
    pub fn of(instant: &Instant) -> Self {
        let dt = instant.as_datetime();
        Self {
            year: dt.year(),
            month0: dt.month0(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            // Leap seconds read as :59.
            second: dt.second(),
        }
    }
}

/// Number of days in month `month0` (0-based) of `year`.
///
/// Computed as the day-of-month of the day before the first of the following
/// month, so leap years come from the calendar itself. Returns `None` when
/// `month0 > 11` or the month lies outside chrono's supported range.
pub fn days_in_month(year: i32, month0: u32) -> Option<u32> {
    if month0 > 11 {
        return None;
    }
    let (next_year, next_month) = if month0 == 11 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month0 + 2)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some(first_next.pred_opt()?.day())
}

/// The (year, month0) immediately before the given month.
pub fn previous_month(year: i32, month0: u32) -> (i32, u32) {
    if month0 == 0 {
        (year - 1, 11)
    } else {
        (year, month0 - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_of_instant() {
        let instant = Instant::from_ymd_hms(1993, 2, 9, 13, 45, 30).unwrap();
        assert_eq!(
            CalendarFields::of(&instant),
            CalendarFields {
                year: 1993,
                month0: 1,
                day: 9,
                hour: 13,
                minute: 45,
                second: 30,
            }
        );
    }

    #[test]
    fn test_days_in_month_fixed_lengths() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (month0, days) in expected.iter().enumerate() {
            assert_eq!(days_in_month(2021, month0 as u32), Some(*days), "month0 {month0}");
        }
    }

    #[test]
    fn test_days_in_month_february_leap_rules() {
        assert_eq!(days_in_month(2020, 1), Some(29));
        assert_eq!(days_in_month(2021, 1), Some(28));
        assert_eq!(days_in_month(1900, 1), Some(28));
        assert_eq!(days_in_month(2000, 1), Some(29));
    }

    #[test]
    fn test_days_in_month_december_crosses_year() {
        assert_eq!(days_in_month(1999, 11), Some(31));
    }

    #[test]
    fn test_days_in_month_out_of_range() {
        assert_eq!(days_in_month(2021, 12), None);
        assert_eq!(days_in_month(i32::MAX, 0), None);
    }

    #[test]
    fn test_previous_month_wraps_year() {
        assert_eq!(previous_month(2021, 0), (2020, 11));
        assert_eq!(previous_month(2021, 2), (2021, 1));
    }
}
