mod catalog;
mod component;
mod consts;
mod error;
mod field;
mod formatter;
mod layout;
mod prelude;
mod range;
mod settings;
mod types;
mod validator;

#[cfg(test)]
mod test_utils;

pub use catalog::LayoutKind;
pub use component::{ComponentKind, ComponentSpec, Field, Rule};
pub use consts::*;
pub use error::{BoundsError, CalendarError, FieldError, LayoutError};
pub use field::{DateField, ListenerId, ValidationMode};
pub use formatter::{EditEvent, Reformat};
pub use layout::{DateLayout, FieldOrder, MonthNames, expand_short_year};
pub use range::DateBounds;
pub use settings::FieldSettings;
pub use types::{CalendarDate, Day, Month, Year, days_in_month, is_leap_year};
pub use validator::{ValidationOutcome, classify};
