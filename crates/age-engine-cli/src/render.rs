//! Text lines printed by the CLI.

use age_engine::Duration6;

/// `"Your age is 33 years 8 months 7 days 8 hours 15 minutes 42 seconds"`.
pub fn age_line(age: &Duration6) -> String {
    format!(
        "Your age is {} years {} months {} days {} hours {} minutes {} seconds",
        age.years, age.months, age.days, age.hours, age.minutes, age.seconds
    )
}

/// `"Next birthday in 3 months 24 days 0 hours 0 minutes 0 seconds"`.
///
/// Years are shown only when non-zero (February 29 can be years away).
pub fn countdown_line(left: &Duration6) -> String {
    let years = if left.years > 0 {
        format!("{} years ", left.years)
    } else {
        String::new()
    };
    format!(
        "Next birthday in {}{} months {} days {} hours {} minutes {} seconds",
        years, left.months, left.days, left.hours, left.minutes, left.seconds
    )
}
