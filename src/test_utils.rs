//! Shorthand constructors shared by the unit tests.

use crate::{DayValue, FixedClock};

pub fn day(year: i32, month: u32, day: u32) -> DayValue {
    DayValue::from_ymd(year, month, day).expect("test date must be valid")
}

/// A clock frozen at noon of the given date.
pub fn clock_at(year: i32, month: u32, d: u32) -> FixedClock {
    FixedClock::at_noon(day(year, month, d))
}
