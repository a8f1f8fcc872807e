/// Minimum valid year (inclusive)
pub const MIN_YEAR: i32 = 1;
/// Maximum valid year (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u32 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u32 = 1;

/// Month number for February
pub const FEBRUARY: u32 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u32 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u32; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';

/// Hour used when a day value is turned into a timestamp.
/// Noon keeps the calendar date stable under any UTC offset.
pub const NOON_HOUR: u32 = 12;

/// A yearless candidate more than this many days after today is moved to last year.
pub const ROLLBACK_THRESHOLD_DAYS: i32 = -7;

/// Two-digit years up to `current % 100 + 20` stay in the current century.
pub const TWO_DIGIT_YEAR_WINDOW: i32 = 20;

/// Largest value treated as a two-digit year.
pub const TWO_DIGIT_YEAR_MAX: i32 = 100;

/// One "rex" is 1/16 rem, so a px value converts 1:1 at a 16px root font size.
pub const REM_PER_PX: f64 = 0.0625;
