//! Keystroke-level reshaping of a partially typed date.
//!
//! Each edit is evaluated against every component of the layout in left-to-right order.
//! The first rule that fires for a component rewrites the text, and the rewritten text is
//! what the next component sees. The pass never stops early: a user who deletes back through
//! a separator and keeps typing needs the separator repaired before the following field is
//! examined.

use crate::component::{ComponentKind, ComponentSpec, Field};
use crate::consts::{FEBRUARY, MAX_FEBRUARY_DAY};
use crate::layout::{DateLayout, FieldOrder};

/// A raw text change reported by the host input, after it has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditEvent<'a> {
    /// Full text after the raw edit.
    pub text:     &'a str,
    /// Character offset where the change begins.
    pub start:    usize,
    /// Characters removed by the change.
    pub removed:  usize,
    /// Characters inserted by the change.
    pub inserted: usize,
}

impl<'a> EditEvent<'a> {
    pub const fn new(text: &'a str, start: usize, removed: usize, inserted: usize) -> Self {
        Self {
            text,
            start,
            removed,
            inserted,
        }
    }

    /// `inserted` characters typed at `start`.
    pub const fn insertion(text: &'a str, start: usize, inserted: usize) -> Self {
        Self::new(text, start, 0, inserted)
    }

    /// `removed` characters deleted at `start`.
    pub const fn deletion(text: &'a str, start: usize, removed: usize) -> Self {
        Self::new(text, start, removed, 0)
    }
}

/// Result of reformatting an edit. After `Replace` the host puts the caret at the end of the
/// new text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reformat {
    NoChange,
    Replace(String),
}

impl Reformat {
    pub fn replacement(&self) -> Option<&str> {
        match self {
            Self::NoChange => None,
            Self::Replace(text) => Some(text),
        }
    }

    pub const fn is_change(&self) -> bool {
        matches!(self, Self::Replace(_))
    }
}

impl DateLayout {
    /// Decides how the text of an edit should be reshaped.
    ///
    /// Deleting anywhere but at the end clears the field, since repairing a structured value
    /// in place can leave a hybrid that looks complete but is not.
    pub fn reformat(&self, edit: &EditEvent<'_>) -> Reformat {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            layout = %self.pattern(),
            text = edit.text,
            start = edit.start,
            removed = edit.removed,
            inserted = edit.inserted,
            "date field edit"
        );

        if edit.inserted == 0 {
            return if edit.start < edit.text.chars().count() {
                Reformat::Replace(String::new())
            } else {
                Reformat::NoChange
            };
        }

        let mut text: Vec<char> = edit.text.chars().take(self.len()).collect();
        for spec in self.components() {
            if let Some(next) = self.step(spec, &text) {
                text = next;
            }
        }

        let text: String = text.into_iter().collect();
        if text == edit.text {
            Reformat::NoChange
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(layout = %self.pattern(), text = %text, "date field reformatted");
            Reformat::Replace(text)
        }
    }

    /// Applies the first matching rule for one component.
    fn step(&self, spec: &ComponentSpec, text: &[char]) -> Option<Vec<char>> {
        let (start, end) = spec.span();
        let len = text.len();
        let separator: Vec<char> = spec.separator().chars().collect();

        // Name layouts accept letters, so digits-only fields are filtered here.
        if self.order() == FieldOrder::MonthName && spec.kind().is_numeric() && len > start {
            let typed = &text[start..len.min(end + 1)];
            if let Some(offset) = typed.iter().position(|c| !c.is_ascii_digit()) {
                return Some(text[..start + offset].to_vec());
            }
        }

        if let Some(keep) = self.february_conflict(spec, text) {
            #[cfg(feature = "tracing")]
            tracing::trace!(field = %spec.field(), "day does not fit February");
            return Some(text[..keep].to_vec());
        }

        if !separator.is_empty() && len > end + 1 && len <= end + 1 + separator.len() {
            let typed = &text[end + 1..];
            if typed != separator.as_slice() {
                let mut repaired = text[..=end].to_vec();
                repaired.extend_from_slice(&separator);
                if !separator.starts_with(typed) {
                    repaired.push(text[len - 1]);
                }
                return Some(repaired);
            }
        }

        if spec.kind().is_numeric() && len == start + 1 {
            let overflows = text[start]
                .to_digit(10)
                .is_some_and(|digit| digit > spec.max_first_digit());
            if overflows {
                let mut padded = text[..start].to_vec();
                padded.push('0');
                padded.push(text[start]);
                padded.extend_from_slice(&separator);
                return Some(padded);
            }
        }

        if len == end + 1 {
            let accepted = self
                .component_value(spec, &text[start..=end])
                .is_some_and(|value| spec.contains(value));
            if accepted {
                let mut completed = text.to_vec();
                completed.extend_from_slice(&separator);
                return Some(completed);
            }

            #[cfg(feature = "tracing")]
            tracing::trace!(field = %spec.field(), "completed component rejected");
            if spec.kind() == ComponentKind::MonthName {
                return Some(Vec::new());
            }
            return Some(text[..=start].to_vec());
        }

        None
    }

    /// Length to truncate to when the day and month being typed cannot both hold for
    /// February.
    fn february_conflict(&self, spec: &ComponentSpec, text: &[char]) -> Option<usize> {
        let (start, end) = spec.span();
        let len = text.len();
        let february = u32::from(FEBRUARY);
        let max_day = u32::from(MAX_FEBRUARY_DAY);

        match (self.order(), spec.field()) {
            (FieldOrder::DayFirst, Field::Month) => {
                if self.typed_value(Field::Day, text)? <= max_day {
                    return None;
                }
                if len == start + 1 && text[start].to_digit(10) == Some(february) {
                    return Some(start);
                }
                if len == end + 1 && spec.parse_digits(&text[start..=end]) == Some(february) {
                    return Some(start + 1);
                }
                None
            }
            (FieldOrder::MonthFirst | FieldOrder::MonthName, Field::Day) => {
                if self.typed_value(Field::Month, text)? != february {
                    return None;
                }
                if len == start + 1 && text[start].to_digit(10).is_some_and(|d| d > max_day / 10) {
                    return Some(start);
                }
                let value = text.get(start..=end).and_then(|digits| spec.parse_digits(digits));
                if len == end + 1 && value.is_some_and(|day| day > max_day) {
                    return Some(start + 1);
                }
                None
            }
            _ => None,
        }
    }
}
