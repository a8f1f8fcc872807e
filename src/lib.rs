mod consts;
mod prelude;
mod types;

pub mod clock;
pub mod i18n;
pub mod mount;
mod natural;
pub mod units;
pub mod validator;

#[cfg(test)]
mod test_utils;

pub use clock::{Clock, FixedClock, SystemClock, clamp_to_today, startup_today};
pub use consts::*;
pub use i18n::{Catalog, I18n, IdentityTranslator, Translate};
pub use mount::{Completion, DoneHandle, MountError, MountHost, MountedApp, mount_temporary};
pub use types::{Day, Month, Year};
pub use units::{Length, px, rex};
pub use validator::{DayParser, ParseOptions, day_validator, parse_day_text};

use crate::prelude::*;
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use std::fmt;
use std::str::FromStr;

/// `NaiveDate::num_days_from_ce()` of 1970-01-01, the zero of [`DayValue`].
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Compiles a pattern that is a string literal in this crate.
#[allow(clippy::expect_used)]
pub(crate) fn static_regex(pattern: &str) -> regex::Regex {
    regex::Regex::new(pattern).expect("pattern literal must compile")
}

fn noon() -> NaiveTime {
    NaiveTime::from_hms_opt(NOON_HOUR, 0, 0).unwrap_or_default()
}

/// A calendar date with no time-of-day and no timezone.
///
/// Stored as the number of days since 1970-01-01, so two values compare the
/// same way the dates they stand for do and subtracting them yields a distance
/// in whole days. The canonical text form is ISO `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayValue(i32);

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum CalendarError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(i32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u32),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },
    #[display(fmt = "Invalid day: {} (must be 1-31)", "_0")]
    InvalidDayOfMonth(u32),
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "Date is outside the supported range")]
    OutOfRange,
}

impl std::error::Error for CalendarError {}

impl DayValue {
    /// Builds a day value from calendar components, rejecting anything that
    /// is not a real date (no rollover of day 31 into the next month).
    ///
    /// # Errors
    /// Returns the `CalendarError` of the first component that fails validation.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, CalendarError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;

        // Year, Month and Day already agree on a real date in 1..=9999, all of
        // which chrono represents; OutOfRange is only the type-level fallback
        NaiveDate::from_ymd_opt(year.get(), month.get(), day.get())
            .map(Self::from_naive_date)
            .ok_or(CalendarError::OutOfRange)
    }

    /// Builds a day value from its ordinal (days since 1970-01-01).
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the ordinal falls outside years
    /// `MIN_YEAR..=MAX_YEAR`.
    pub fn from_ordinal(ordinal: i32) -> Result<Self, CalendarError> {
        ordinal
            .checked_add(EPOCH_DAYS_FROM_CE)
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .filter(|date| Year::new(date.year()).is_ok())
            .map(Self::from_naive_date)
            .ok_or(CalendarError::OutOfRange)
    }

    pub fn from_naive_date(date: NaiveDate) -> Self {
        Self(date.num_days_from_ce() - EPOCH_DAYS_FROM_CE)
    }

    /// Takes the calendar date of a wall-clock timestamp; the time of day is dropped.
    pub fn from_naive_datetime(datetime: NaiveDateTime) -> Self {
        Self::from_naive_date(datetime.date())
    }

    /// Takes the local calendar date of an absolute timestamp.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        Self::from_naive_date(datetime.with_timezone(&Local).date_naive())
    }

    /// Today's day value according to `clock`.
    pub fn today<C: Clock + ?Sized>(clock: &C) -> Self {
        Self::from_naive_datetime(clock.now())
    }

    #[inline]
    pub const fn ordinal(self) -> i32 {
        self.0
    }

    pub fn to_naive_date(self) -> NaiveDate {
        // Every value was built from a NaiveDate, so the lookup cannot miss
        NaiveDate::from_num_days_from_ce_opt(self.0 + EPOCH_DAYS_FROM_CE).unwrap_or_default()
    }

    /// The timestamp this day stands for: noon, never midnight.
    pub fn at_noon(self) -> NaiveDateTime {
        self.to_naive_date().and_time(noon())
    }

    pub fn year(self) -> i32 {
        self.to_naive_date().year()
    }

    pub fn month(self) -> u32 {
        self.to_naive_date().month()
    }

    pub fn day(self) -> u32 {
        self.to_naive_date().day()
    }

    /// Shifts the value by `days`, which may be negative.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the result leaves years
    /// `MIN_YEAR..=MAX_YEAR`.
    pub fn add_days(self, days: i32) -> Result<Self, CalendarError> {
        self.0
            .checked_add(days)
            .ok_or(CalendarError::OutOfRange)
            .and_then(Self::from_ordinal)
    }
}

/// Signed number of days from `from` to `to`.
pub const fn day_diff(from: DayValue, to: DayValue) -> i32 {
    to.0 - from.0
}

impl fmt::Display for DayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.to_naive_date();
        write!(f, "{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
    }
}

impl FromStr for DayValue {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CalendarError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(CalendarError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} parts: {trimmed}",
                parts.len()
            )));
        };

        Self::from_ymd(parse_field(year)?, parse_field(month)?, parse_field(day)?)
    }
}

/// Parses one numeric ISO field; signs and inner whitespace are rejected.
fn parse_field<T: FromStr>(s: &str) -> Result<T, CalendarError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CalendarError::InvalidFormat(s.to_owned()));
    }
    s.parse::<T>()
        .map_err(|_| CalendarError::InvalidFormat(s.to_owned()))
}

impl From<DayValue> for NaiveDate {
    fn from(day: DayValue) -> Self {
        day.to_naive_date()
    }
}

impl From<NaiveDate> for DayValue {
    fn from(date: NaiveDate) -> Self {
        Self::from_naive_date(date)
    }
}

impl serde::Serialize for DayValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for DayValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
