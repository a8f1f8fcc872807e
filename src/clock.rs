//! Where "now" comes from.
//!
//! Everything that depends on the current date takes a [`Clock`] so tests can
//! freeze time with [`FixedClock`].

use std::sync::LazyLock;

use chrono::{Local, NaiveDateTime};

use crate::DayValue;

/// Source of the current local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the operating system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// A clock frozen at noon of `day`.
    pub fn at_noon(day: DayValue) -> Self {
        Self(day.at_noon())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

static STARTUP_TODAY: LazyLock<DayValue> = LazyLock::new(|| DayValue::today(&SystemClock));

/// The system date as of the first call in this process. Later calls return
/// the same value even after midnight passes.
pub fn startup_today() -> DayValue {
    *STARTUP_TODAY
}

/// Caps `day` at today when `enabled`, otherwise returns it unchanged.
pub fn clamp_to_today<C: Clock + ?Sized>(day: DayValue, enabled: bool, clock: &C) -> DayValue {
    if enabled {
        day.min(DayValue::today(clock))
    } else {
        day
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{clock_at, day};

    #[test]
    fn test_fixed_clock_reports_its_instant() {
        let clock = FixedClock::at_noon(day(2026, 2, 10));
        assert_eq!(clock.now().to_string(), "2026-02-10 12:00:00");
        assert_eq!((&clock).now(), clock.now());
    }

    #[test]
    fn test_clamp_to_today() {
        let clock = clock_at(2026, 2, 10);

        assert_eq!(
            clamp_to_today(day(2026, 3, 1), true, &clock),
            day(2026, 2, 10)
        );
        assert_eq!(
            clamp_to_today(day(2026, 1, 5), true, &clock),
            day(2026, 1, 5)
        );
        assert_eq!(
            clamp_to_today(day(2026, 3, 1), false, &clock),
            day(2026, 3, 1)
        );
    }

    #[test]
    fn test_startup_today_is_stable() {
        let first = startup_today();
        assert_eq!(startup_today(), first);
        assert!(first <= DayValue::today(&SystemClock));
    }
}
