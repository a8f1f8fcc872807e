//! CSS length helpers.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::{REM_PER_PX, static_regex};

static PX_LENGTH: LazyLock<Regex> = LazyLock::new(|| static_regex(r"^(-?[0-9]+(?:\.[0-9]+)?)px$"));

/// Input to [`rex`]: a bare number (read as px) or CSS text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length<'a> {
    Px(f64),
    Css(&'a str),
}

impl From<f64> for Length<'_> {
    fn from(value: f64) -> Self {
        Self::Px(value)
    }
}

impl From<i32> for Length<'_> {
    fn from(value: i32) -> Self {
        Self::Px(f64::from(value))
    }
}

impl<'a> From<&'a str> for Length<'a> {
    fn from(value: &'a str) -> Self {
        Self::Css(value)
    }
}

/// Appends `px`: `px(16) == "16px"`.
pub fn px(value: impl fmt::Display) -> String {
    format!("{value}px")
}

/// Converts px to rem at 16px per rem, so `rex(16) == "1rem"` and
/// `rex("24px") == "1.5rem"`. Zero becomes a unitless `"0"` and CSS text in
/// any other unit (`2rem`, `100%`, `auto`) is returned as is.
pub fn rex<'a>(value: impl Into<Length<'a>>) -> String {
    match value.into() {
        Length::Px(px) => px_to_rem(px),
        Length::Css(text) => PX_LENGTH
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .map_or_else(|| text.to_owned(), px_to_rem),
    }
}

fn px_to_rem(px: f64) -> String {
    if px == 0.0 {
        return "0".to_owned();
    }
    format!("{}rem", px * REM_PER_PX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px() {
        assert_eq!(px(16), "16px");
        assert_eq!(px(0), "0px");
        assert_eq!(px(24), "24px");
        assert_eq!(px("16"), "16px");
        assert_eq!(px(1.5), "1.5px");
    }

    #[test]
    fn test_rex_numbers() {
        assert_eq!(rex(16), "1rem");
        assert_eq!(rex(8), "0.5rem");
        assert_eq!(rex(24), "1.5rem");
        assert_eq!(rex(32), "2rem");
        assert_eq!(rex(4), "0.25rem");
        assert_eq!(rex(2.0), "0.125rem");
    }

    #[test]
    fn test_rex_zero_is_unitless() {
        assert_eq!(rex(0), "0");
        assert_eq!(rex("0px"), "0");
        assert_eq!(rex("0.0px"), "0");
    }

    #[test]
    fn test_rex_px_strings() {
        assert_eq!(rex("16px"), "1rem");
        assert_eq!(rex("8px"), "0.5rem");
        assert_eq!(rex("24px"), "1.5rem");
        assert_eq!(rex("4px"), "0.25rem");
    }

    #[test]
    fn test_rex_negative() {
        assert_eq!(rex(-16), "-1rem");
        assert_eq!(rex("-16px"), "-1rem");
    }

    #[test]
    fn test_rex_leaves_other_units() {
        for text in ["2rem", "1.5em", "100%", "auto", "var(--spacing)", "16 px", "px"] {
            assert_eq!(rex(text), text);
        }
    }
}
