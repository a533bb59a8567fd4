//! A text field session: the current value, the layout it is typed in, the allowed window
//! and the listeners told about its validity.

use crate::error::{BoundsError, FieldError};
use crate::formatter::{EditEvent, Reformat};
use crate::layout::DateLayout;
use crate::range::DateBounds;
use crate::validator::ValidationOutcome;
use crate::CalendarDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// When listeners hear about the validity of the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Only from [`DateField::validate`].
    OnCall,
    /// After every edit.
    OnInput,
    /// After an edit that leaves the value at full layout length.
    #[default]
    OnFinishedInput,
}

/// Handle returned by [`DateField::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<'a> = Box<dyn FnMut(&str, ValidationOutcome) + 'a>;

pub struct DateField<'a> {
    layout:        &'a DateLayout,
    text:          String,
    bounds:        DateBounds,
    mode:          ValidationMode,
    listeners:     Vec<(ListenerId, Listener<'a>)>,
    next_listener: u64,
}

impl fmt::Debug for DateField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateField")
            .field("layout", &self.layout.pattern())
            .field("text", &self.text)
            .field("bounds", &self.bounds)
            .field("mode", &self.mode)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<'a> DateField<'a> {
    /// An empty, unbounded field.
    pub const fn new(layout: &'a DateLayout) -> Self {
        Self {
            layout,
            text: String::new(),
            bounds: DateBounds::unbounded(),
            mode: ValidationMode::OnFinishedInput,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: DateBounds) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn layout(&self) -> &'a DateLayout {
        self.layout
    }

    /// Switches layout. The old value means nothing in the new layout, so it is cleared.
    pub fn set_layout(&mut self, layout: &'a DateLayout) {
        self.layout = layout;
        self.text.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn bounds(&self) -> &DateBounds {
        &self.bounds
    }

    pub const fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ValidationMode) {
        self.mode = mode;
    }

    /// Takes a raw edit made by the host, reshapes it and stores the result.
    pub fn apply_edit(&mut self, edit: &EditEvent<'_>) -> Reformat {
        let reformat = self.layout.reformat(edit);
        self.text = reformat
            .replacement()
            .map_or_else(|| edit.text.to_owned(), str::to_owned);

        match self.mode {
            ValidationMode::OnInput => {
                self.notify();
            }
            ValidationMode::OnFinishedInput if self.text.chars().count() == self.layout.len() => {
                self.notify();
            }
            _ => {}
        }
        reformat
    }

    /// Types `typed` at character offset `at`, clamped to the end of the value. Typing
    /// nothing is not an edit.
    pub fn insert(&mut self, at: usize, typed: &str) -> Reformat {
        if typed.is_empty() {
            return Reformat::NoChange;
        }
        let at = at.min(self.text.chars().count());
        let raw: String = self
            .text
            .chars()
            .take(at)
            .chain(typed.chars())
            .chain(self.text.chars().skip(at))
            .collect();
        self.apply_edit(&EditEvent::insertion(&raw, at, typed.chars().count()))
    }

    /// Types `typed` at the end of the value.
    pub fn append(&mut self, typed: &str) -> Reformat {
        self.insert(self.text.chars().count(), typed)
    }

    /// Deletes up to `count` characters starting at `at`.
    pub fn delete(&mut self, at: usize, count: usize) -> Reformat {
        let len = self.text.chars().count();
        let at = at.min(len);
        let removed = count.min(len - at);
        let raw: String = self
            .text
            .chars()
            .take(at)
            .chain(self.text.chars().skip(at + removed))
            .collect();
        self.apply_edit(&EditEvent::deletion(&raw, at, removed))
    }

    /// Replaces the value as is, without reshaping or notifying.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Shows `date` in the field's layout, or clears it for `None`.
    ///
    /// # Errors
    /// Returns `FieldError::YearOutOfLayout` if the layout cannot hold the year. The current
    /// value is kept.
    pub fn set_date(&mut self, date: Option<&CalendarDate>) -> Result<(), FieldError> {
        match date {
            Some(date) => self.text = self.layout.render(date)?,
            None => self.clear(),
        }
        Ok(())
    }

    /// Sets a value typed in the field's layout. An empty string clears the field.
    ///
    /// # Errors
    /// Returns a `FieldError` if `text` is not a real date in the layout. The current value
    /// is kept.
    pub fn set_date_str(&mut self, text: &str) -> Result<(), FieldError> {
        let text = text.trim();
        if text.is_empty() {
            self.clear();
            return Ok(());
        }
        let date = self.layout.parse(text)?;
        self.set_date(Some(&date))
    }

    /// The value as a date, only when it is valid and inside the window.
    pub fn date(&self) -> Option<CalendarDate> {
        if !self.is_valid() {
            return None;
        }
        self.layout.parse(&self.text).ok()
    }

    /// The value as typed, only when it is valid and inside the window.
    pub fn date_string(&self) -> Option<&str> {
        self.is_valid().then_some(self.text.as_str())
    }

    /// The valid value rewritten in another layout, `None` while there is no valid value.
    ///
    /// # Errors
    /// Returns `FieldError::YearOutOfLayout` if `layout` cannot hold the year.
    pub fn text_as(&self, layout: &DateLayout) -> Result<Option<String>, FieldError> {
        self.date().map(|date| layout.render(&date)).transpose()
    }

    pub fn status(&self) -> ValidationOutcome {
        self.layout.classify(&self.text, &self.bounds)
    }

    pub fn is_valid(&self) -> bool {
        self.status().is_valid()
    }

    /// Classifies the value and tells every listener, whatever the mode.
    pub fn validate(&mut self) -> ValidationOutcome {
        self.notify()
    }

    /// Sets the earliest allowed date and clears the value.
    ///
    /// # Errors
    /// Returns `BoundsError::Inverted` if `min` is after the current maximum.
    pub fn set_min_date(&mut self, min: Option<CalendarDate>) -> Result<(), BoundsError> {
        self.update_min_date(min)?;
        self.clear();
        Ok(())
    }

    /// Sets the latest allowed date and clears the value.
    ///
    /// # Errors
    /// Returns `BoundsError::Inverted` if `max` is before the current minimum.
    pub fn set_max_date(&mut self, max: Option<CalendarDate>) -> Result<(), BoundsError> {
        self.update_max_date(max)?;
        self.clear();
        Ok(())
    }

    /// Sets the earliest allowed date and keeps the value.
    ///
    /// # Errors
    /// Returns `BoundsError::Inverted` if `min` is after the current maximum.
    pub fn update_min_date(&mut self, min: Option<CalendarDate>) -> Result<(), BoundsError> {
        self.bounds = DateBounds::new(min, self.bounds.max())?;
        Ok(())
    }

    /// Sets the latest allowed date and keeps the value.
    ///
    /// # Errors
    /// Returns `BoundsError::Inverted` if `max` is before the current minimum.
    pub fn update_max_date(&mut self, max: Option<CalendarDate>) -> Result<(), BoundsError> {
        self.bounds = DateBounds::new(self.bounds.min(), max)?;
        Ok(())
    }

    /// [`DateField::set_min_date`] with the date typed in the field's layout. An empty string
    /// removes the bound.
    ///
    /// # Errors
    /// Returns a `BoundsError` if the text does not parse or inverts the window.
    pub fn set_min_date_str(&mut self, text: &str) -> Result<(), BoundsError> {
        let min = self.parse_bound(text)?;
        self.set_min_date(min)
    }

    /// [`DateField::set_max_date`] with the date typed in the field's layout. An empty string
    /// removes the bound.
    ///
    /// # Errors
    /// Returns a `BoundsError` if the text does not parse or inverts the window.
    pub fn set_max_date_str(&mut self, text: &str) -> Result<(), BoundsError> {
        let max = self.parse_bound(text)?;
        self.set_max_date(max)
    }

    fn parse_bound(&self, text: &str) -> Result<Option<CalendarDate>, FieldError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        self.layout.parse(text).map(Some)
    }

    pub fn add_listener(&mut self, listener: impl FnMut(&str, ValidationOutcome) + 'a) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns whether the listener was registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) -> ValidationOutcome {
        let status = self.status();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            layout = %self.layout.pattern(),
            text = %self.text,
            status = %status,
            listeners = self.listeners.len(),
            "notifying date listeners"
        );

        for (_, listener) in &mut self.listeners {
            listener(&self.text, status);
        }
        status
    }
}
