//! Per-field rules: how wide a field is, which values it accepts once typed, and which
//! lone leading digit already forces a zero pad.

use crate::consts::{MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_LONG_YEAR};
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// The calendar field a component resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
}

/// The closed set of field encodings a layout can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    #[display(fmt = "dd")]
    Day,
    #[display(fmt = "MM")]
    Month,
    #[display(fmt = "MMM")]
    MonthName,
    #[display(fmt = "yy")]
    YearShort,
    #[display(fmt = "yyyy")]
    YearLong,
}

/// Numeric policy of a component kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub width:           usize,
    pub min:             u32,
    pub max:             u32,
    /// Largest lone leading digit that can still grow into a legal value.
    pub max_first_digit: u32,
}

impl ComponentKind {
    pub const fn field(self) -> Field {
        match self {
            Self::Day => Field::Day,
            Self::Month | Self::MonthName => Field::Month,
            Self::YearShort | Self::YearLong => Field::Year,
        }
    }

    pub const fn rule(self) -> Rule {
        match self {
            Self::Day => Rule {
                width:           2,
                min:             MIN_DAY as u32,
                max:             31,
                max_first_digit: 3,
            },
            Self::Month => Rule {
                width:           2,
                min:             1,
                max:             MAX_MONTH as u32,
                max_first_digit: 1,
            },
            Self::MonthName => Rule {
                width:           3,
                min:             1,
                max:             MAX_MONTH as u32,
                max_first_digit: MAX_MONTH as u32,
            },
            Self::YearShort => Rule {
                width:           2,
                min:             0,
                max:             99,
                max_first_digit: 99,
            },
            Self::YearLong => Rule {
                width:           4,
                min:             MIN_LONG_YEAR as u32,
                max:             MAX_YEAR as u32,
                max_first_digit: MAX_YEAR as u32,
            },
        }
    }

    pub const fn width(self) -> usize {
        self.rule().width
    }

    /// Whether the field is typed as digits.
    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::MonthName)
    }

    /// Pattern token, e.g. `"dd"`.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Day => "dd",
            Self::Month => "MM",
            Self::MonthName => "MMM",
            Self::YearShort => "yy",
            Self::YearLong => "yyyy",
        }
    }

    /// Inverse of [`ComponentKind::token`].
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "dd" => Some(Self::Day),
            "MM" => Some(Self::Month),
            "MMM" => Some(Self::MonthName),
            "yy" => Some(Self::YearShort),
            "yyyy" => Some(Self::YearLong),
            _ => None,
        }
    }
}

/// One field of a layout: its kind, inclusive character span, and the text that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentSpec {
    kind:      ComponentKind,
    start:     usize,
    end:       usize,
    separator: String,
}

impl ComponentSpec {
    /// Spans are checked when the owning [`crate::DateLayout`] is built.
    pub fn new(kind: ComponentKind, start: usize, end: usize, separator: impl Into<String>) -> Self {
        Self {
            kind,
            start,
            end,
            separator: separator.into(),
        }
    }

    pub const fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub const fn field(&self) -> Field {
        self.kind.field()
    }

    /// Inclusive `(start, end)` character offsets.
    pub const fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn end(&self) -> usize {
        self.end
    }

    pub const fn min_value(&self) -> u32 {
        self.kind.rule().min
    }

    pub const fn max_value(&self) -> u32 {
        self.kind.rule().max
    }

    pub const fn max_first_digit(&self) -> u32 {
        self.kind.rule().max_first_digit
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Offset of the first character after this component and its separator.
    pub fn next_start(&self) -> usize {
        self.end + 1 + self.separator.chars().count()
    }

    pub const fn contains(&self, value: u32) -> bool {
        value >= self.min_value() && value <= self.max_value()
    }

    /// Reads the digits of a numeric component. `None` for anything but plain ASCII digits.
    pub fn parse_digits(&self, digits: &[char]) -> Option<u32> {
        if digits.is_empty() || !digits.iter().all(char::is_ascii_digit) {
            return None;
        }
        digits
            .iter()
            .try_fold(0u32, |acc, c| acc.checked_mul(10)?.checked_add(c.to_digit(10)?))
    }
}
