//! # age-engine
//!
//! Deterministic, calendar-accurate elapsed time.
//!
//! Computes the span between two instants as non-negative years, months,
//! days, hours, minutes and seconds by subtracting UTC calendar fields and
//! borrowing between units (so a "month" is however long the calendar says),
//! and counts down to the next annual recurrence of a month/day.
//!
//! ## Modules
//!
//! - [`instant`] — Strict parsing of date/time input into [`Instant`]
//! - [`calendar`] — UTC field extraction and month lengths
//! - [`diff`](mod@diff) — Borrowing subtraction into a [`Duration6`]
//! - [`occurrence`] — Next month/day recurrence and countdown
//! - [`clock`] — Injected "now" and the [`AgeClock`] facade
//! - [`error`] — Error types

pub mod calendar;
pub mod clock;
pub mod diff;
pub mod error;
pub mod instant;
pub mod occurrence;

pub use calendar::{days_in_month, CalendarFields};
pub use clock::{AgeClock, Clock, FixedClock, SystemClock};
pub use diff::{diff, diff_inputs, Duration6};
pub use error::{AgeError, Result};
pub use instant::{parse_instant, Instant, IntoInstant};
pub use occurrence::{countdown, next_occurrence};
