use std::{fmt, str::FromStr};

use crate::{
    CalendarDate, ValidationOutcome,
    error::{BoundsError, CalendarError, FieldError},
};

/// Marker for an open side of a window in text form.
const OPEN_BOUND: &str = "..";
const BOUND_SEPARATOR: char = '/';

/// Inclusive window of allowed dates. Either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateBounds {
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
}

impl DateBounds {
    /// Creates a window with validation.
    ///
    /// # Errors
    /// Returns `BoundsError::Inverted` if both sides are set and min > max.
    pub fn new(min: Option<CalendarDate>, max: Option<CalendarDate>) -> Result<Self, BoundsError> {
        match (min, max) {
            (Some(min), Some(max)) if min > max => Err(BoundsError::Inverted { min, max }),
            _ => Ok(Self { min, max }),
        }
    }

    /// A window that accepts every date.
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    pub const fn min(&self) -> Option<CalendarDate> {
        self.min
    }

    pub const fn max(&self) -> Option<CalendarDate> {
        self.max
    }

    /// Where `date` falls relative to the window.
    pub fn check(&self, date: &CalendarDate) -> ValidationOutcome {
        window_outcome(date, self.min.as_ref(), self.max.as_ref())
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.check(date) == ValidationOutcome::Valid
    }
}

/// The minimum is tested first, so an inverted pair reports `BelowMinimum`.
pub(crate) fn window_outcome(
    date: &CalendarDate,
    min: Option<&CalendarDate>,
    max: Option<&CalendarDate>,
) -> ValidationOutcome {
    if min.is_some_and(|min| date < min) {
        ValidationOutcome::BelowMinimum
    } else if max.is_some_and(|max| date > max) {
        ValidationOutcome::AboveMaximum
    } else {
        ValidationOutcome::Valid
    }
}

impl fmt::Display for DateBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.min {
            Some(min) => write!(f, "{min}")?,
            None => f.write_str(OPEN_BOUND)?,
        }
        write!(f, "{BOUND_SEPARATOR}")?;
        match self.max {
            Some(max) => write!(f, "{max}"),
            None => f.write_str(OPEN_BOUND),
        }
    }
}

impl FromStr for DateBounds {
    type Err = BoundsError;

    /// Parses `min/max` in ISO form, with `..` or nothing for an open side.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some((min, max)) = trimmed.split_once(BOUND_SEPARATOR) else {
            let error = CalendarError::InvalidFormat(format!(
                "No bounds separator found (expected '{BOUND_SEPARATOR}'): {s}"
            ));
            return Err(FieldError::from(error).into());
        };

        let side = |text: &str| -> Result<Option<CalendarDate>, BoundsError> {
            let text = text.trim();
            if text.is_empty() || text == OPEN_BOUND {
                return Ok(None);
            }
            let date = text.parse().map_err(FieldError::from)?;
            Ok(Some(date))
        };

        Self::new(side(min)?, side(max)?)
    }
}
