//! The fixed set of layouts a host can pick from.

use crate::component::ComponentKind;
use crate::consts::{HYPHEN_SEPARATOR, SLASH_SEPARATOR};
use crate::error::LayoutError;
use crate::layout::DateLayout;
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

/// A catalog entry, named and serialized by its pattern.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize,
)]
pub enum LayoutKind {
    #[display(fmt = "dd/MM/yy")]
    #[serde(rename = "dd/MM/yy")]
    DdMmYySlash,
    #[default]
    #[display(fmt = "dd/MM/yyyy")]
    #[serde(rename = "dd/MM/yyyy")]
    DdMmYyyySlash,
    #[display(fmt = "yy/MM/dd")]
    #[serde(rename = "yy/MM/dd")]
    YyMmDdSlash,
    #[display(fmt = "yyyy/MM/dd")]
    #[serde(rename = "yyyy/MM/dd")]
    YyyyMmDdSlash,
    #[display(fmt = "dd-MM-yy")]
    #[serde(rename = "dd-MM-yy")]
    DdMmYyHyphen,
    #[display(fmt = "dd-MM-yyyy")]
    #[serde(rename = "dd-MM-yyyy")]
    DdMmYyyyHyphen,
    #[display(fmt = "yy-MM-dd")]
    #[serde(rename = "yy-MM-dd")]
    YyMmDdHyphen,
    #[display(fmt = "yyyy-MM-dd")]
    #[serde(rename = "yyyy-MM-dd")]
    YyyyMmDdHyphen,
    #[display(fmt = "MMM dd, yyyy")]
    #[serde(rename = "MMM dd, yyyy")]
    MonthNameDdYyyy,
}

static CATALOG: LazyLock<[DateLayout; 9]> =
    LazyLock::new(|| LayoutKind::ALL.map(|kind| DateLayout::from_parts(kind.pattern(), &kind.parts())));

impl LayoutKind {
    pub const ALL: [Self; 9] = [
        Self::DdMmYySlash,
        Self::DdMmYyyySlash,
        Self::YyMmDdSlash,
        Self::YyyyMmDdSlash,
        Self::DdMmYyHyphen,
        Self::DdMmYyyyHyphen,
        Self::YyMmDdHyphen,
        Self::YyyyMmDdHyphen,
        Self::MonthNameDdYyyy,
    ];

    pub const fn pattern(self) -> &'static str {
        match self {
            Self::DdMmYySlash => "dd/MM/yy",
            Self::DdMmYyyySlash => "dd/MM/yyyy",
            Self::YyMmDdSlash => "yy/MM/dd",
            Self::YyyyMmDdSlash => "yyyy/MM/dd",
            Self::DdMmYyHyphen => "dd-MM-yy",
            Self::DdMmYyyyHyphen => "dd-MM-yyyy",
            Self::YyMmDdHyphen => "yy-MM-dd",
            Self::YyyyMmDdHyphen => "yyyy-MM-dd",
            Self::MonthNameDdYyyy => "MMM dd, yyyy",
        }
    }

    /// Fields in order, each with the separator typed after it.
    const fn parts(self) -> [(ComponentKind, &'static str); 3] {
        use ComponentKind::{Day, Month, MonthName, YearLong, YearShort};

        let (first, second, third, separator) = match self {
            Self::DdMmYySlash => (Day, Month, YearShort, SLASH_SEPARATOR),
            Self::DdMmYyyySlash => (Day, Month, YearLong, SLASH_SEPARATOR),
            Self::YyMmDdSlash => (YearShort, Month, Day, SLASH_SEPARATOR),
            Self::YyyyMmDdSlash => (YearLong, Month, Day, SLASH_SEPARATOR),
            Self::DdMmYyHyphen => (Day, Month, YearShort, HYPHEN_SEPARATOR),
            Self::DdMmYyyyHyphen => (Day, Month, YearLong, HYPHEN_SEPARATOR),
            Self::YyMmDdHyphen => (YearShort, Month, Day, HYPHEN_SEPARATOR),
            Self::YyyyMmDdHyphen => (YearLong, Month, Day, HYPHEN_SEPARATOR),
            Self::MonthNameDdYyyy => return [(MonthName, " "), (Day, ", "), (YearLong, "")],
        };
        [(first, separator), (second, separator), (third, "")]
    }

    /// The shared, prevalidated layout for this entry.
    pub fn layout(self) -> &'static DateLayout {
        &CATALOG[self as usize]
    }
}

impl FromStr for LayoutKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.pattern() == s)
            .ok_or_else(|| LayoutError::UnknownLayout(s.to_owned()))
    }
}
