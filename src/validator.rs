use crate::layout::DateLayout;
use crate::prelude::*;
use crate::range::{DateBounds, window_outcome};
use crate::CalendarDate;
use serde::{Deserialize, Serialize};

/// Classification of a text value against a layout and an optional date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationOutcome {
    #[display(fmt = "valid")]
    Valid,
    /// Wrong length, a bad component, or a day that does not exist.
    #[display(fmt = "invalid format")]
    InvalidFormat,
    #[display(fmt = "below minimum")]
    BelowMinimum,
    #[display(fmt = "above maximum")]
    AboveMaximum,
}

impl ValidationOutcome {
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Classifies `text` in `layout`. Either bound may be absent; both are inclusive.
///
/// Safe to call on partial text, which is always `InvalidFormat`.
pub fn classify(
    text: &str,
    layout: &DateLayout,
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
) -> ValidationOutcome {
    match layout.parse(text) {
        Ok(date) => window_outcome(&date, min.as_ref(), max.as_ref()),
        Err(_) => ValidationOutcome::InvalidFormat,
    }
}

impl DateLayout {
    /// [`classify`] with a prepared window.
    pub fn classify(&self, text: &str, bounds: &DateBounds) -> ValidationOutcome {
        classify(text, self, bounds.min(), bounds.max())
    }
}
