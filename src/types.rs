use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, ISO_SEPARATOR,
    LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR,
};
use crate::error::CalendarError;
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;
use std::str::FromStr;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, CalendarError> {
        let non_zero = NonZeroU16::new(value).ok_or(CalendarError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(CalendarError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<u16> for Year {
    type Error = CalendarError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, CalendarError> {
        let non_zero = NonZeroU8::new(value).ok_or(CalendarError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(CalendarError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day of month. Only [`Day::new`] checks it against a concrete month; the
/// `TryFrom<u8>` conversion used by serde only rejects zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it exists in the given year and month.
    /// Never rolls an overflowing day into the following month.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDay` if the value is 0 or past the end of the month,
    /// and `CalendarError::InvalidMonth` if `month` itself is out of range.
    pub fn new(value: u8, year: u16, month: u8) -> Result<Self, CalendarError> {
        let invalid = CalendarError::InvalidDay {
            year,
            month,
            day: value,
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(|| invalid.clone())?;
        let month = Month::new(month)?;

        if value > days_in_month(year, month.get()) {
            return Err(invalid);
        }

        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        NonZeroU8::new(value)
            .map(Self)
            .ok_or(CalendarError::InvalidDay {
                year: 0,
                month: 0,
                day: value,
            })
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A concrete calendar day. Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct CalendarDate {
    year:  Year,
    month: Month,
    day:   Day,
}

impl CalendarDate {
    /// Builds a date from numeric parts, rejecting days past the end of the month.
    ///
    /// # Errors
    /// Returns the `CalendarError` of the first part that is out of range.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, CalendarError> {
        Ok(Self {
            year:  Year::new(year)?,
            month: Month::new(month)?,
            day:   Day::new(day, year, month)?,
        })
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Splits back into (year, month, day).
    pub const fn parts(&self) -> (u16, u8, u8) {
        (self.year.get(), self.month.get(), self.day.get())
    }
}

impl TryFrom<(u16, u8, u8)> for CalendarDate {
    type Error = CalendarError;

    fn try_from((year, month, day): (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month, day)
    }
}

impl FromStr for CalendarDate {
    type Err = CalendarError;

    /// Parses the ISO `YYYY-MM-DD` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CalendarError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(ISO_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(CalendarError::InvalidFormat(trimmed.to_owned()));
        };
        if year.len() != 4 || month.len() != 2 || day.len() != 2 {
            return Err(CalendarError::InvalidFormat(trimmed.to_owned()));
        }

        Self::new(
            parse_digits(year, trimmed)?,
            parse_digits(month, trimmed)?,
            parse_digits(day, trimmed)?,
        )
    }
}

/// `str::parse` accepts a leading `+`, so digits are checked first.
fn parse_digits<T: FromStr>(part: &str, whole: &str) -> Result<T, CalendarError> {
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CalendarError::InvalidFormat(whole.to_owned()));
    }
    part.parse()
        .map_err(|_| CalendarError::InvalidFormat(whole.to_owned()))
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Length of `month` in `year`, or 0 for a month outside 1-12.
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        FEBRUARY if is_leap_year(year) => FEBRUARY_DAYS_LEAP,
        1..=MAX_MONTH => DAYS_IN_MONTH[month as usize],
        _ => 0,
    }
}
