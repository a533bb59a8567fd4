use crate::component::{ComponentKind, Field};
use crate::prelude::*;
use crate::{CalendarDate, MAX_MONTH, MAX_YEAR};

/// Failure to build a calendar date from numeric parts or from ISO text.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum CalendarError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for CalendarError {}

/// A layout declaration that cannot be used. Raised once, when the layout is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("Layout has no date fields")]
    Empty,

    #[error("Unsupported pattern token {token:?} at offset {offset}")]
    UnsupportedToken { token: String, offset: usize },

    #[error("Field {0} appears more than once")]
    DuplicateField(Field),

    #[error("Field {0} is missing")]
    MissingField(Field),

    #[error("Component {index} ({kind}) spans {found} characters, expected {expected}")]
    SpanWidth {
        index:    usize,
        kind:     ComponentKind,
        expected: usize,
        found:    usize,
    },

    #[error("Component {index} starts at {found}, expected {expected}")]
    NotContiguous { index: usize, expected: usize, found: usize },

    #[error("Component {index} is followed by another field without a separator")]
    MissingSeparator { index: usize },

    #[error("Last component carries separator {0:?}")]
    TrailingSeparator(String),

    #[error("Pattern {pattern:?} is {found} characters long, components cover {expected}")]
    LengthMismatch {
        pattern:  String,
        expected: usize,
        found:    usize,
    },

    #[error("Month name {name:?} is not {expected} characters wide")]
    MonthNameWidth { name: String, expected: usize },

    #[error("Month name {0:?} is listed twice")]
    DuplicateMonthName(String),

    #[error("Unknown layout: {0}")]
    UnknownLayout(String),
}

/// Failure to read a complete date string in a given layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Expected {expected} characters, found {found}")]
    Length { expected: usize, found: usize },

    #[error("Expected separator {expected:?} at offset {offset}")]
    Separator { offset: usize, expected: String },

    #[error("Invalid {field} value: {text:?}")]
    Component { field: Field, text: String },

    #[error("Year {year} cannot be written as {kind}")]
    YearOutOfLayout { year: u16, kind: ComponentKind },

    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

/// Error type for the allowed date window.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoundsError {
    /// Minimum is after maximum.
    #[error("Invalid date bounds: minimum ({min}) is after maximum ({max})")]
    Inverted { min: CalendarDate, max: CalendarDate },

    /// A bound given as text did not parse in the active layout.
    #[error(transparent)]
    Field(#[from] FieldError),
}
