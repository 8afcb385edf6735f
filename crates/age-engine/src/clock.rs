//! Injected "now" and the [`AgeClock`] facade.
//!
//! The computation functions in this crate never read the system clock; they
//! take the reference instant explicitly. [`AgeClock`] binds a [`Clock`] to
//! them for callers that want "now" as the default, such as a display that
//! refreshes once per tick. Tests use [`FixedClock`] to stay deterministic.

use chrono::Utc;

use crate::diff::{diff, diff_inputs, Duration6};
use crate::error::Result;
use crate::instant::{Instant, IntoInstant};
use crate::occurrence;

/// A source of the current instant.
pub trait Clock {
    fn now(&self) -> Instant;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Reads the operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::new(Utc::now())
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Instant);

impl Clock for FixedClock {
    fn now(&self) -> Instant {
        self.0
    }
}

/// Age and countdown computations anchored at a [`Clock`].
///
/// Each call reads the clock once; calls share no state.
///
/// # Examples
///
/// ```
/// use age_engine::{AgeClock, FixedClock, parse_instant};
///
/// let clock = AgeClock::new(FixedClock(parse_instant("2030-01-01").unwrap()));
/// let age = clock.age("1993-02-09T00:00:00Z").unwrap();
/// assert_eq!((age.years, age.months, age.days), (36, 10, 23));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AgeClock<C: Clock = SystemClock> {
    clock: C,
}

impl AgeClock<SystemClock> {
    pub fn system() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> AgeClock<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Elapsed time from `birth` to now.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AgeError::Parse`] if `birth` cannot be parsed.
    pub fn age(&self, birth: impl IntoInstant) -> Result<Duration6> {
        let birth = birth.into_instant()?;
        diff(&birth, &self.now())
    }

    /// Elapsed time from `birth` to an explicit `target`; the clock is not read.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AgeError::InvalidPair`] if either side cannot be parsed.
    pub fn age_at(&self, birth: impl IntoInstant, target: impl IntoInstant) -> Result<Duration6> {
        diff_inputs(birth, target)
    }

    /// Next occurrence of `month`/`day` at or after now.
    pub fn next_occurrence(&self, month: u32, day: u32) -> Result<Instant> {
        occurrence::next_occurrence(month, day, &self.now())
    }

    /// Countdown from now to the next occurrence of `month`/`day`.
    pub fn countdown(&self, month: u32, day: u32) -> Result<Duration6> {
        occurrence::countdown(month, day, &self.now())
    }

    /// Countdown from now to the next anniversary of `birth`'s UTC month and day.
    pub fn next_birthday_countdown(&self, birth: &Instant) -> Result<Duration6> {
        let fields = birth.fields();
        self.countdown(fields.month0 + 1, fields.day)
    }
}
