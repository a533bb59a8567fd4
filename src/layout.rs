use crate::component::{ComponentKind, ComponentSpec, Field};
use crate::consts::{SHORT_MONTH_NAMES, SHORT_YEAR_PIVOT};
use crate::error::{FieldError, LayoutError};
use crate::prelude::*;
use crate::CalendarDate;
use std::collections::HashSet;

/// Short month names in calendar order. Lookups are case-exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref)]
pub struct MonthNames([String; 12]);

impl MonthNames {
    pub const fn new(names: [String; 12]) -> Self {
        Self(names)
    }

    /// Month number (1-12) of `name`.
    pub fn lookup(&self, name: &str) -> Option<u8> {
        self.0
            .iter()
            .position(|candidate| candidate == name)
            .and_then(|index| u8::try_from(index + 1).ok())
    }

    pub fn name(&self, month: u8) -> Option<&str> {
        let index = usize::from(month).checked_sub(1)?;
        self.0.get(index).map(String::as_str)
    }
}

impl Default for MonthNames {
    fn default() -> Self {
        Self(SHORT_MONTH_NAMES.map(str::to_owned))
    }
}

/// Where the month sits relative to the day, which decides how the two are cross-checked
/// while typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldOrder {
    /// Numeric day typed before numeric month (`dd/MM/yyyy`).
    DayFirst,
    /// Numeric month typed before the day (`yyyy/MM/dd`).
    MonthFirst,
    /// Month typed as a short name (`MMM dd, yyyy`).
    MonthName,
}

/// An immutable date layout: a display pattern plus the ordered fields it is made of.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "{pattern}")]
pub struct DateLayout {
    pattern:     String,
    components:  Vec<ComponentSpec>,
    month_names: MonthNames,
    order:       FieldOrder,
}

impl DateLayout {
    /// Builds a layout from explicit spans.
    ///
    /// # Errors
    /// Returns a `LayoutError` if the spans overlap, leave gaps, have the wrong width for
    /// their kind, or do not cover the pattern exactly.
    pub fn new(pattern: impl Into<String>, components: Vec<ComponentSpec>) -> Result<Self, LayoutError> {
        let order = field_order(&components);
        let layout = Self {
            pattern: pattern.into(),
            components,
            month_names: MonthNames::default(),
            order,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Builds a layout from a symbolic pattern such as `"dd/MM/yyyy"` or `"MMM dd, yyyy"`.
    ///
    /// # Errors
    /// Returns a `LayoutError` for tokens other than `dd`, `MM`, `MMM`, `yy`, `yyyy`, for
    /// text before the first field, and for any field set that is not one day, one month and
    /// one year.
    pub fn from_pattern(pattern: &str) -> Result<Self, LayoutError> {
        let parts = tokenize(pattern)?;
        let parts: Vec<(ComponentKind, &str)> =
            parts.iter().map(|(kind, sep)| (*kind, sep.as_str())).collect();
        let layout = Self::from_parts(pattern, &parts);
        layout.validate()?;
        Ok(layout)
    }

    /// Lays fields out back to back, each followed by its separator. Spans cannot overlap by
    /// construction; field-set rules are left to [`DateLayout::validate`].
    pub(crate) fn from_parts(pattern: &str, parts: &[(ComponentKind, &str)]) -> Self {
        let mut offset = 0;
        let components: Vec<ComponentSpec> = parts
            .iter()
            .map(|&(kind, separator)| {
                let spec = ComponentSpec::new(kind, offset, offset + kind.width() - 1, separator);
                offset = spec.next_start();
                spec
            })
            .collect();

        Self {
            pattern: pattern.to_owned(),
            order: field_order(&components),
            components,
            month_names: MonthNames::default(),
        }
    }

    /// Replaces the short month name table.
    ///
    /// # Errors
    /// Returns a `LayoutError` if a name does not fit the month-name field or is repeated.
    pub fn with_month_names(mut self, names: MonthNames) -> Result<Self, LayoutError> {
        self.month_names = names;
        self.validate_month_names()?;
        Ok(self)
    }

    /// Checks the structural invariants of the layout.
    ///
    /// # Errors
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let last = self.components.last().ok_or(LayoutError::Empty)?;

        let mut seen = HashSet::new();
        for spec in &self.components {
            if !seen.insert(spec.field()) {
                return Err(LayoutError::DuplicateField(spec.field()));
            }
        }
        for field in [Field::Day, Field::Month, Field::Year] {
            if !seen.contains(&field) {
                return Err(LayoutError::MissingField(field));
            }
        }

        let mut expected_start = 0;
        for (index, spec) in self.components.iter().enumerate() {
            if spec.start() != expected_start {
                return Err(LayoutError::NotContiguous {
                    index,
                    expected: expected_start,
                    found: spec.start(),
                });
            }
            let width = (spec.end() + 1).saturating_sub(spec.start());
            if width != spec.kind().width() {
                return Err(LayoutError::SpanWidth {
                    index,
                    kind: spec.kind(),
                    expected: spec.kind().width(),
                    found: width,
                });
            }
            let is_last = index + 1 == self.components.len();
            if !is_last && spec.separator().is_empty() {
                return Err(LayoutError::MissingSeparator { index });
            }
            expected_start = spec.next_start();
        }

        if !last.separator().is_empty() {
            return Err(LayoutError::TrailingSeparator(last.separator().to_owned()));
        }

        let pattern_len = self.pattern.chars().count();
        if pattern_len != expected_start {
            return Err(LayoutError::LengthMismatch {
                pattern:  self.pattern.clone(),
                expected: expected_start,
                found:    pattern_len,
            });
        }

        self.validate_month_names()
    }

    fn validate_month_names(&self) -> Result<(), LayoutError> {
        let Some(spec) = self
            .components
            .iter()
            .find(|spec| spec.kind() == ComponentKind::MonthName)
        else {
            return Ok(());
        };

        let mut seen = HashSet::new();
        for name in self.month_names.iter() {
            if name.chars().count() != spec.kind().width() {
                return Err(LayoutError::MonthNameWidth {
                    name:     name.clone(),
                    expected: spec.kind().width(),
                });
            }
            if !seen.insert(name) {
                return Err(LayoutError::DuplicateMonthName(name.clone()));
            }
        }
        Ok(())
    }

    /// Display-only pattern, e.g. `"dd/MM/yyyy"`.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Fields in left-to-right order.
    pub fn components(&self) -> &[ComponentSpec] {
        &self.components
    }

    pub fn component(&self, field: Field) -> Option<&ComponentSpec> {
        self.components.iter().find(|spec| spec.field() == field)
    }

    /// Separator typed after `field`, empty for the last one.
    pub fn separator(&self, field: Field) -> Option<&str> {
        self.component(field).map(ComponentSpec::separator)
    }

    pub const fn month_names(&self) -> &MonthNames {
        &self.month_names
    }

    pub const fn order(&self) -> FieldOrder {
        self.order
    }

    /// Length in characters of a complete value.
    pub fn len(&self) -> usize {
        self.components.last().map_or(0, ComponentSpec::next_start)
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Numeric value of one component's characters, or the month number of a short name.
    pub(crate) fn component_value(&self, spec: &ComponentSpec, chars: &[char]) -> Option<u32> {
        if spec.kind() == ComponentKind::MonthName {
            let name: String = chars.iter().collect();
            self.month_names.lookup(&name).map(u32::from)
        } else {
            spec.parse_digits(chars)
        }
    }

    /// Value of `field` if it has been typed in full.
    pub(crate) fn typed_value(&self, field: Field, text: &[char]) -> Option<u32> {
        let spec = self.component(field)?;
        let chars = text.get(spec.start()..=spec.end())?;
        self.component_value(spec, chars)
    }

    /// Writes `date` in this layout.
    ///
    /// # Errors
    /// Returns `FieldError::YearOutOfLayout` if the year field could not read the written
    /// year back: a two-digit year outside 1950..=2049, or a four-digit year below 1860.
    pub fn render(&self, date: &CalendarDate) -> Result<String, FieldError> {
        let mut out = String::with_capacity(self.len());
        for spec in &self.components {
            match spec.kind() {
                ComponentKind::Day => out.push_str(&format!("{:02}", date.day())),
                ComponentKind::Month => out.push_str(&format!("{:02}", date.month())),
                ComponentKind::MonthName => {
                    out.push_str(self.month_names.name(date.month()).unwrap_or_default());
                }
                ComponentKind::YearShort => {
                    let short = date.year() % 100;
                    if expand_short_year(short) != date.year() {
                        return Err(year_out_of_layout(date, spec));
                    }
                    out.push_str(&format!("{short:02}"));
                }
                ComponentKind::YearLong => {
                    if !spec.contains(u32::from(date.year())) {
                        return Err(year_out_of_layout(date, spec));
                    }
                    out.push_str(&format!("{:04}", date.year()));
                }
            }
            out.push_str(spec.separator());
        }
        Ok(out)
    }

    /// Reads every component of a complete value and returns (year, month, day) without
    /// checking that the day exists in that month.
    ///
    /// # Errors
    /// Returns a `FieldError` on a length mismatch, a misplaced separator, or a component
    /// that does not parse or is outside its range.
    pub fn resolve(&self, text: &str) -> Result<(u16, u8, u8), FieldError> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != self.len() {
            return Err(FieldError::Length {
                expected: self.len(),
                found:    chars.len(),
            });
        }

        let (mut year, mut month, mut day) = (0, 0, 0);
        for spec in &self.components {
            let separator: Vec<char> = spec.separator().chars().collect();
            if chars[spec.end() + 1..spec.next_start()] != separator[..] {
                return Err(FieldError::Separator {
                    offset:   spec.end() + 1,
                    expected: spec.separator().to_owned(),
                });
            }

            let raw = &chars[spec.start()..=spec.end()];
            let invalid = || FieldError::Component {
                field: spec.field(),
                text:  raw.iter().collect(),
            };
            let value = self
                .component_value(spec, raw)
                .filter(|value| spec.contains(*value))
                .ok_or_else(invalid)?;

            match spec.kind() {
                ComponentKind::Day => day = u8::try_from(value).map_err(|_| invalid())?,
                ComponentKind::Month | ComponentKind::MonthName => {
                    month = u8::try_from(value).map_err(|_| invalid())?;
                }
                ComponentKind::YearShort => {
                    year = expand_short_year(u16::try_from(value).map_err(|_| invalid())?);
                }
                ComponentKind::YearLong => year = u16::try_from(value).map_err(|_| invalid())?,
            }
        }

        Ok((year, month, day))
    }

    /// Reads a complete value into a calendar date. Days past the end of the month are an
    /// error, never rolled over.
    ///
    /// # Errors
    /// Returns a `FieldError` if the text does not resolve or names no real day.
    pub fn parse(&self, text: &str) -> Result<CalendarDate, FieldError> {
        let (year, month, day) = self.resolve(text)?;
        Ok(CalendarDate::new(year, month, day)?)
    }
}

/// Maps a two-digit year into 1950..=2049.
pub const fn expand_short_year(year: u16) -> u16 {
    if year < SHORT_YEAR_PIVOT {
        2000 + year
    } else {
        1900 + year
    }
}

const fn year_out_of_layout(date: &CalendarDate, spec: &ComponentSpec) -> FieldError {
    FieldError::YearOutOfLayout {
        year: date.year(),
        kind: spec.kind(),
    }
}

fn field_order(components: &[ComponentSpec]) -> FieldOrder {
    let position = |field: Field| components.iter().position(|spec| spec.field() == field);
    if components
        .iter()
        .any(|spec| spec.kind() == ComponentKind::MonthName)
    {
        return FieldOrder::MonthName;
    }
    match (position(Field::Day), position(Field::Month)) {
        (Some(day), Some(month)) if month < day => FieldOrder::MonthFirst,
        _ => FieldOrder::DayFirst,
    }
}

/// Splits a pattern into field tokens and the literal text after each one.
fn tokenize(pattern: &str) -> Result<Vec<(ComponentKind, String)>, LayoutError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut parts: Vec<(ComponentKind, String)> = Vec::new();
    let mut index = 0;

    while index < chars.len() {
        let c = chars[index];
        if matches!(c, 'd' | 'M' | 'y') {
            let run = chars[index..].iter().take_while(|&&next| next == c).count();
            let token: String = chars[index..index + run].iter().collect();
            let kind = ComponentKind::from_token(&token).ok_or(LayoutError::UnsupportedToken {
                token,
                offset: index,
            })?;
            parts.push((kind, String::new()));
            index += run;
        } else {
            let Some((_, separator)) = parts.last_mut() else {
                return Err(LayoutError::UnsupportedToken {
                    token:  c.to_string(),
                    offset: index,
                });
            };
            separator.push(c);
            index += 1;
        }
    }

    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_from_pattern_spans() {
        let layout = DateLayout::from_pattern("MMM dd, yyyy").unwrap();
        let spans: Vec<_> = layout
            .components()
            .iter()
            .map(|spec| (spec.kind(), spec.span(), spec.separator().to_owned()))
            .collect();
        assert_eq!(
            spans,
            vec![
                (ComponentKind::MonthName, (0, 2), " ".to_owned()),
                (ComponentKind::Day, (4, 5), ", ".to_owned()),
                (ComponentKind::YearLong, (8, 11), String::new()),
            ]
        );
        assert_eq!(layout.len(), 12);
        assert_eq!(layout.order(), FieldOrder::MonthName);
        assert_eq!(layout.separator(Field::Month), Some(" "));
        assert_eq!(layout.separator(Field::Day), Some(", "));
        assert_eq!(layout.separator(Field::Year), Some(""));
    }

    #[test]
    fn test_field_order() {
        struct TestCase {
            pattern: &'static str,
            order:   FieldOrder,
        }

        let cases = [
            TestCase {
                pattern: "dd/MM/yy",
                order:   FieldOrder::DayFirst,
            },
            TestCase {
                pattern: "yyyy-MM-dd",
                order:   FieldOrder::MonthFirst,
            },
            TestCase {
                pattern: "MM/dd/yyyy",
                order:   FieldOrder::MonthFirst,
            },
            TestCase {
                pattern: "MMM dd, yyyy",
                order:   FieldOrder::MonthName,
            },
        ];

        for case in &cases {
            let layout = DateLayout::from_pattern(case.pattern).unwrap();
            assert_eq!(layout.order(), case.order, "{}", case.pattern);
        }
    }

    #[test]
    fn test_from_pattern_errors() {
        assert!(matches!(
            DateLayout::from_pattern("ddd/MM/yyyy"),
            Err(LayoutError::UnsupportedToken { offset: 0, .. })
        ));
        assert!(matches!(
            DateLayout::from_pattern("dd/MM/yyy"),
            Err(LayoutError::UnsupportedToken { offset: 6, .. })
        ));
        assert!(matches!(
            DateLayout::from_pattern("[dd/MM/yyyy"),
            Err(LayoutError::UnsupportedToken { offset: 0, .. })
        ));
        assert_eq!(
            DateLayout::from_pattern("dd/dd/yyyy"),
            Err(LayoutError::DuplicateField(Field::Day))
        );
        assert_eq!(
            DateLayout::from_pattern("dd/yyyy"),
            Err(LayoutError::MissingField(Field::Month))
        );
        assert_eq!(
            DateLayout::from_pattern("dd/MM/yyyy."),
            Err(LayoutError::TrailingSeparator(".".to_owned()))
        );
        assert_eq!(DateLayout::from_pattern(""), Err(LayoutError::Empty));
    }

    #[test]
    fn test_new_rejects_bad_spans() {
        let overlapping = vec![
            ComponentSpec::new(ComponentKind::Day, 0, 1, "/"),
            ComponentSpec::new(ComponentKind::Month, 2, 3, "/"),
            ComponentSpec::new(ComponentKind::YearLong, 5, 8, ""),
        ];
        assert_eq!(
            DateLayout::new("dd/MM/yyyy", overlapping),
            Err(LayoutError::NotContiguous {
                index:    1,
                expected: 3,
                found:    2,
            })
        );

        let zero_width = vec![
            ComponentSpec::new(ComponentKind::Day, 0, 1, "/"),
            ComponentSpec::new(ComponentKind::Month, 3, 2, "/"),
            ComponentSpec::new(ComponentKind::YearLong, 6, 9, ""),
        ];
        assert!(matches!(
            DateLayout::new("dd/MM/yyyy", zero_width),
            Err(LayoutError::SpanWidth { index: 1, found: 0, .. })
        ));

        let joined = vec![
            ComponentSpec::new(ComponentKind::Day, 0, 1, ""),
            ComponentSpec::new(ComponentKind::Month, 2, 3, "/"),
            ComponentSpec::new(ComponentKind::YearLong, 5, 8, ""),
        ];
        assert_eq!(
            DateLayout::new("ddMM/yyyy", joined),
            Err(LayoutError::MissingSeparator { index: 0 })
        );

        let short_pattern = vec![
            ComponentSpec::new(ComponentKind::Day, 0, 1, "/"),
            ComponentSpec::new(ComponentKind::Month, 3, 4, "/"),
            ComponentSpec::new(ComponentKind::YearLong, 6, 9, ""),
        ];
        assert!(matches!(
            DateLayout::new("dd/MM/yy", short_pattern),
            Err(LayoutError::LengthMismatch {
                expected: 10,
                found: 8,
                ..
            })
        ));
    }

    #[test]
    fn test_new_accepts_matching_spans() {
        let layout = DateLayout::new(
            "dd.MM.yyyy",
            vec![
                ComponentSpec::new(ComponentKind::Day, 0, 1, "."),
                ComponentSpec::new(ComponentKind::Month, 3, 4, "."),
                ComponentSpec::new(ComponentKind::YearLong, 6, 9, ""),
            ],
        )
        .unwrap();
        assert_eq!(layout, DateLayout::from_pattern("dd.MM.yyyy").unwrap());
    }

    #[test]
    fn test_month_names() {
        let names = MonthNames::default();
        assert_eq!(names.lookup("Jan"), Some(1));
        assert_eq!(names.lookup("Dec"), Some(12));
        assert_eq!(names.lookup("jan"), None);
        assert_eq!(names.name(2), Some("Feb"));
        assert_eq!(names.name(0), None);
        assert_eq!(names.name(13), None);
    }

    #[test]
    fn test_with_month_names() {
        let layout = DateLayout::from_pattern("MMM dd, yyyy").unwrap();
        let french = MonthNames::new(
            ["JAN", "FEV", "MAR", "AVR", "MAI", "JUN", "JUL", "AOU", "SEP", "OCT", "NOV", "DEC"]
                .map(str::to_owned),
        );
        let layout = layout.with_month_names(french).unwrap();
        assert_eq!(layout.parse("FEV 03, 2021").unwrap(), date(2021, 2, 3));
        assert!(layout.parse("Feb 03, 2021").is_err());

        let mut long = SHORT_MONTH_NAMES.map(str::to_owned);
        long[8] = "Sept".to_owned();
        assert_eq!(
            DateLayout::from_pattern("MMM dd, yyyy")
                .unwrap()
                .with_month_names(MonthNames::new(long)),
            Err(LayoutError::MonthNameWidth {
                name:     "Sept".to_owned(),
                expected: 3,
            })
        );

        let mut repeated = SHORT_MONTH_NAMES.map(str::to_owned);
        repeated[1] = "Jan".to_owned();
        assert_eq!(
            DateLayout::from_pattern("MMM dd, yyyy")
                .unwrap()
                .with_month_names(MonthNames::new(repeated)),
            Err(LayoutError::DuplicateMonthName("Jan".to_owned()))
        );
    }

    #[test]
    fn test_render() {
        let day = date(2022, 1, 5);
        let cases = [
            ("dd/MM/yy", "05/01/22"),
            ("yyyy-MM-dd", "2022-01-05"),
            ("MMM dd, yyyy", "Jan 05, 2022"),
        ];
        for (pattern, expected) in cases {
            let layout = DateLayout::from_pattern(pattern).unwrap();
            assert_eq!(layout.render(&day).unwrap(), expected, "{pattern}");
        }
    }

    #[test]
    fn test_render_rejects_years_the_layout_cannot_read_back() {
        struct TestCase {
            pattern:     &'static str,
            date:        CalendarDate,
            expected:    Result<&'static str, FieldError>,
            description: &'static str,
        }

        let cases = [
            TestCase {
                pattern:     "dd/MM/yy",
                date:        date(1940, 1, 1),
                expected:    Err(FieldError::YearOutOfLayout {
                    year: 1940,
                    kind: ComponentKind::YearShort,
                }),
                description: "would read back as 2040",
            },
            TestCase {
                pattern:     "dd/MM/yy",
                date:        date(2050, 1, 1),
                expected:    Err(FieldError::YearOutOfLayout {
                    year: 2050,
                    kind: ComponentKind::YearShort,
                }),
                description: "would read back as 1950",
            },
            TestCase {
                pattern:     "dd/MM/yy",
                date:        date(1950, 1, 1),
                expected:    Ok("01/01/50"),
                description: "start of the short window",
            },
            TestCase {
                pattern:     "yy-MM-dd",
                date:        date(2049, 12, 31),
                expected:    Ok("49-12-31"),
                description: "end of the short window",
            },
            TestCase {
                pattern:     "dd/MM/yyyy",
                date:        date(1700, 1, 1),
                expected:    Err(FieldError::YearOutOfLayout {
                    year: 1700,
                    kind: ComponentKind::YearLong,
                }),
                description: "below the four-digit minimum",
            },
            TestCase {
                pattern:     "MMM dd, yyyy",
                date:        date(1860, 1, 1),
                expected:    Ok("Jan 01, 1860"),
                description: "four-digit minimum",
            },
        ];

        for case in &cases {
            let layout = DateLayout::from_pattern(case.pattern).unwrap();
            let rendered = layout.render(&case.date);
            assert_eq!(
                rendered.as_deref().map_err(Clone::clone),
                case.expected.clone(),
                "{}",
                case.description
            );
            if let Ok(text) = rendered {
                assert_eq!(layout.parse(&text), Ok(case.date), "{}", case.description);
            }
        }
    }

    #[test]
    fn test_resolve_and_parse() {
        let layout = DateLayout::from_pattern("dd/MM/yyyy").unwrap();
        assert_eq!(layout.resolve("31/06/2020"), Ok((2020, 6, 31)));
        assert!(matches!(
            layout.parse("31/06/2020"),
            Err(FieldError::Calendar(_))
        ));
        assert_eq!(layout.parse("29/02/2024"), Ok(date(2024, 2, 29)));
        assert_eq!(
            layout.resolve("31/06/20"),
            Err(FieldError::Length {
                expected: 10,
                found:    8,
            })
        );
        assert_eq!(
            layout.resolve("31-06-2020"),
            Err(FieldError::Separator {
                offset:   2,
                expected: "/".to_owned(),
            })
        );
        assert_eq!(
            layout.resolve("31/13/2020"),
            Err(FieldError::Component {
                field: Field::Month,
                text:  "13".to_owned(),
            })
        );
        assert!(matches!(
            layout.resolve("31/12/1859"),
            Err(FieldError::Component {
                field: Field::Year,
                ..
            })
        ));
        assert!(matches!(
            layout.resolve("3a/12/2020"),
            Err(FieldError::Component { field: Field::Day, .. })
        ));
    }

    #[test]
    fn test_short_year_window() {
        assert_eq!(expand_short_year(0), 2000);
        assert_eq!(expand_short_year(49), 2049);
        assert_eq!(expand_short_year(50), 1950);
        assert_eq!(expand_short_year(99), 1999);

        let layout = DateLayout::from_pattern("yy-MM-dd").unwrap();
        assert_eq!(layout.parse("99-12-31"), Ok(date(1999, 12, 31)));
        assert_eq!(layout.parse("00-02-29"), Ok(date(2000, 2, 29)));
    }
}
