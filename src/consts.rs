/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
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
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Separator of the ISO `YYYY-MM-DD` text form used by [`crate::CalendarDate`]
pub const ISO_SEPARATOR: char = '-';

/// Separator of the slash catalog layouts
pub const SLASH_SEPARATOR: &str = "/";
/// Separator of the hyphen catalog layouts
pub const HYPHEN_SEPARATOR: &str = "-";

/// Earliest year accepted by a four-digit year field
pub const MIN_LONG_YEAR: u16 = 1860;

/// Two-digit years below this value resolve into the 2000s, the rest into the 1900s
pub const SHORT_YEAR_PIVOT: u16 = 50;

/// Largest day a February can hold in any year
pub const MAX_FEBRUARY_DAY: u8 = FEBRUARY_DAYS_LEAP;

/// English short month names, January first
pub const SHORT_MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
