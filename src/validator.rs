//! Forgiving parser for dates typed into a day field.
//!
//! Accepts ISO dates, month names and the short numeric forms people type
//! by hand (`2.10.26`, `12/25`, `15`). Anything that cannot be turned into a
//! real calendar date yields `None`; the field is then left unset.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::clock::{Clock, SystemClock};
use crate::natural;
use crate::{
    CalendarError, DayValue, ROLLBACK_THRESHOLD_DAYS, TWO_DIGIT_YEAR_MAX, TWO_DIGIT_YEAR_WINDOW,
    day_diff, static_regex,
};

static ISO_DAY: LazyLock<Regex> = LazyLock::new(|| static_regex(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$"));

/// One or two 1-2 digit numbers, then an optional year of up to four digits.
/// Only the start is anchored; whatever follows the last group is ignored.
static SHORT_DATE: LazyLock<Regex> = LazyLock::new(|| {
    static_regex(r"^([0-9]{1,2})(?:[\s,\\'`./-]+([0-9]{1,2})(?:[\s,\\'`./-]+([0-9]{1,4}))?)?")
});

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Read two-number input as month first (`12/25`) instead of day first (`25.12`).
    pub usa_mode: bool,
}

/// Why a piece of text did not produce a day. Only ever logged.
#[derive(Debug, thiserror::Error)]
pub(crate) enum Rejection {
    #[error("input is blank")]
    Blank,
    #[error("input does not start with a number")]
    NoLeadingNumber,
    #[error("leading number is zero")]
    ZeroLeadingNumber,
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

/// A day-text parser bound to its options and a clock.
#[derive(Debug, Clone, Default)]
pub struct DayParser<C = SystemClock> {
    options: ParseOptions,
    clock:   C,
}

impl<C: Clock> DayParser<C> {
    pub const fn new(options: ParseOptions, clock: C) -> Self {
        Self { options, clock }
    }

    pub const fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parses `text` into a day, or `None` if no date can be derived from it.
    pub fn parse(&self, text: &str) -> Option<DayValue> {
        match resolve(text, self.options.usa_mode, self.clock.now()) {
            Ok(day) => {
                trace!(input = text, %day, "parsed day text");
                Some(day)
            }
            Err(reason) => {
                trace!(input = text, %reason, "rejected day text");
                None
            }
        }
    }
}

/// Parses `text` against the given clock.
pub fn parse_day_text<C: Clock + ?Sized>(text: &str, usa_mode: bool, clock: &C) -> Option<DayValue> {
    DayParser::new(ParseOptions { usa_mode }, clock).parse(text)
}

/// Parses `text` against the system clock.
pub fn day_validator(text: &str, usa_mode: bool) -> Option<DayValue> {
    parse_day_text(text, usa_mode, &SystemClock)
}

/// Maps `1..=100` onto a four-digit year in a window that reaches twenty
/// years ahead of `current_year`; other values pass through.
pub(crate) const fn expand_two_digit_year(year: i32, current_year: i32) -> i32 {
    if year < 1 || year > TWO_DIGIT_YEAR_MAX {
        return year;
    }
    let window_end = current_year.rem_euclid(100) + TWO_DIGIT_YEAR_WINDOW;
    let century = current_year.div_euclid(100) * 100;
    if year > window_end {
        year + century - 100
    } else {
        year + century
    }
}

fn resolve(text: &str, usa_mode: bool, now: NaiveDateTime) -> Result<DayValue, Rejection> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Rejection::Blank);
    }

    if ISO_DAY.is_match(trimmed) {
        if let Ok(day) = trimmed.parse::<DayValue>() {
            return Ok(day);
        }
    }

    if trimmed.bytes().any(|b| b.is_ascii_alphabetic()) {
        if let Some(date) = natural::parse_free_text(trimmed, now) {
            return Ok(DayValue::from_naive_date(date));
        }
    }

    resolve_short(trimmed, usa_mode, now)
}

fn resolve_short(text: &str, usa_mode: bool, now: NaiveDateTime) -> Result<DayValue, Rejection> {
    let caps = SHORT_DATE
        .captures(text)
        .ok_or(Rejection::NoLeadingNumber)?;
    let group = |index: usize| {
        caps.get(index)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0)
    };

    let left = group(1);
    let right = group(2);
    let year = i32::try_from(group(3)).unwrap_or(0);
    let year = expand_two_digit_year(year, now.year());

    if left == 0 {
        return Err(Rejection::ZeroLeadingNumber);
    }

    // A lone number is a day in the current month
    if right == 0 {
        return Ok(DayValue::from_ymd(now.year(), now.month(), left)?);
    }

    let (day, month) = if usa_mode { (right, left) } else { (left, right) };

    if year > 0 {
        return Ok(DayValue::from_ymd(year, month, day)?);
    }

    let today = DayValue::from_naive_datetime(now);
    let candidate = DayValue::from_ymd(now.year(), month, day)?;
    if day_diff(candidate, today) < ROLLBACK_THRESHOLD_DAYS {
        return Ok(DayValue::from_ymd(now.year() - 1, month, day)?);
    }

    Ok(candidate)
}
