//! Free-text dates that contain words: `Dec 25 2026`, `Tue, 10 Feb 2026`,
//! `10. Februar 2026`, RFC 3339 and RFC 2822 timestamps.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::{DayValue, Year};
use crate::validator::expand_two_digit_year;

/// Month names in English and German. Any prefix of three or more letters matches.
const MONTH_NAMES: [(&str, u32); 21] = [
    ("january", 1),
    ("januar", 1),
    ("february", 2),
    ("februar", 2),
    ("march", 3),
    ("märz", 3),
    ("maerz", 3),
    ("april", 4),
    ("may", 5),
    ("mai", 5),
    ("june", 6),
    ("juni", 6),
    ("july", 7),
    ("juli", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("oktober", 10),
    ("november", 11),
    ("december", 12),
    ("dezember", 12),
];

const WEEKDAY_NAMES: [&str; 14] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
    "montag",
    "dienstag",
    "mittwoch",
    "donnerstag",
    "freitag",
    "samstag",
    "sonntag",
];

const FILLER_WORDS: [&str; 7] = ["of", "the", "at", "am", "pm", "utc", "gmt"];

const ORDINAL_SUFFIXES: [&str; 4] = ["st", "nd", "rd", "th"];

const MIN_MONTH_PREFIX: usize = 3;
const MIN_WEEKDAY_PREFIX: usize = 2;

/// A token of free text after splitting.
#[derive(Debug, PartialEq, Eq)]
enum Token {
    Month(u32),
    Number { value: u32, digits: usize },
    Ignored,
}

/// Fields collected while walking the tokens.
#[derive(Debug, Default)]
struct Fields {
    month: Option<u32>,
    day:   Option<u32>,
    year:  Option<i32>,
}

/// Reads a date out of text containing words. `now` supplies the year when
/// the text has none.
pub(crate) fn parse_free_text(text: &str, now: NaiveDateTime) -> Option<NaiveDate> {
    parse_timestamp(text).or_else(|| parse_words(text, now))
}

/// Timestamps with an offset give the calendar date written in that offset,
/// so `2026-02-10T23:30:00-05:00` is the 10th whatever the host timezone is.
fn parse_timestamp(text: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_rfc2822(text))
        .map(|datetime| datetime.date_naive())
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|datetime| datetime.date())
        })
        .filter(|date| Year::new(date.year()).is_ok())
}

fn parse_words(text: &str, now: NaiveDateTime) -> Option<NaiveDate> {
    let mut fields = Fields::default();

    for raw in text.split(|c: char| !(c.is_alphanumeric() || c == ':')) {
        if raw.is_empty() {
            continue;
        }
        match classify(raw)? {
            Token::Ignored => {}
            Token::Month(month) => {
                if fields.month.replace(month).is_some() {
                    return None;
                }
            }
            Token::Number { value, digits } => fields.push_number(value, digits, now.year())?,
        }
    }

    let month = fields.month?;
    let (year, day) = match (fields.year, fields.day) {
        (Some(year), Some(day)) => (year, day),
        (Some(year), None) => (year, 1),
        (None, Some(day)) => (now.year(), day),
        (None, None) => return None,
    };

    DayValue::from_ymd(year, month, day)
        .ok()
        .map(DayValue::to_naive_date)
}

impl Fields {
    fn push_number(&mut self, value: u32, digits: usize, current_year: i32) -> Option<()> {
        if digits > 2 {
            if self.year.is_some() {
                return None;
            }
            self.year = Some(i32::try_from(value).ok()?);
        } else if self.day.is_none() {
            self.day = Some(value);
        } else if self.year.is_none() {
            let year = i32::try_from(value).ok()?;
            self.year = Some(expand_two_digit_year(year, current_year));
        } else {
            return None;
        }
        Some(())
    }
}

fn classify(raw: &str) -> Option<Token> {
    // Clock times such as 12:00 or 09:30:15
    if raw.contains(':') {
        return raw
            .split(':')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
            .then_some(Token::Ignored);
    }

    let lower = raw.to_lowercase();
    let digits = lower.bytes().take_while(u8::is_ascii_digit).count();

    if digits > 0 {
        let (number, suffix) = lower.split_at(digits);
        if !suffix.is_empty() && !ORDINAL_SUFFIXES.contains(&suffix) {
            return None;
        }
        let value = number.parse::<u32>().ok()?;
        return Some(Token::Number { value, digits });
    }

    if let Some(month) = month_number(&lower) {
        return Some(Token::Month(month));
    }

    let is_weekday = lower.chars().count() >= MIN_WEEKDAY_PREFIX
        && WEEKDAY_NAMES.iter().any(|name| name.starts_with(&lower));
    if is_weekday || FILLER_WORDS.contains(&lower.as_str()) {
        return Some(Token::Ignored);
    }

    None
}

fn month_number(word: &str) -> Option<u32> {
    if word.chars().count() < MIN_MONTH_PREFIX {
        return None;
    }
    MONTH_NAMES
        .iter()
        .find(|(name, _)| name.starts_with(word))
        .map(|&(_, month)| month)
}
