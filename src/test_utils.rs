use crate::{CalendarDate, DateLayout, EditEvent};

/// Types `key` at the end of `current` and returns what the field shows afterwards.
pub fn type_key(layout: &DateLayout, current: &str, key: char) -> String {
    let mut raw = current.to_owned();
    raw.push(key);
    let edit = EditEvent::insertion(&raw, current.chars().count(), 1);
    layout
        .reformat(&edit)
        .replacement()
        .map_or_else(|| raw.clone(), str::to_owned)
}

/// Types every character of `keys` into an empty field.
pub fn type_keys(layout: &DateLayout, keys: &str) -> String {
    keys.chars()
        .fold(String::new(), |text, key| type_key(layout, &text, key))
}

pub fn date(year: u16, month: u8, day: u8) -> CalendarDate {
    CalendarDate::new(year, month, day).unwrap()
}
