use crate::catalog::LayoutKind;
use crate::error::BoundsError;
use crate::field::{DateField, ValidationMode};
use crate::range::DateBounds;
use crate::CalendarDate;
use serde::{Deserialize, Serialize};

/// Host configuration of a date field. Bounds are ISO `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldSettings {
    pub layout:          LayoutKind,
    pub min_date:        Option<CalendarDate>,
    pub max_date:        Option<CalendarDate>,
    pub validation_mode: ValidationMode,
}

impl FieldSettings {
    /// # Errors
    /// Returns `BoundsError::Inverted` if `min_date` is after `max_date`.
    pub fn bounds(&self) -> Result<DateBounds, BoundsError> {
        DateBounds::new(self.min_date, self.max_date)
    }
}

impl DateField<'static> {
    /// An empty field on a catalog layout.
    ///
    /// # Errors
    /// Returns `BoundsError::Inverted` if the configured bounds are inverted.
    pub fn from_settings(settings: &FieldSettings) -> Result<Self, BoundsError> {
        Ok(Self::new(settings.layout.layout())
            .with_bounds(settings.bounds()?)
            .with_mode(settings.validation_mode))
    }
}
