//! Calendar helpers: canonical `YYYY-MM` month keys and `YYYY-MM-DD` date strings.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// ASCII digits only; `\d` would also accept other Unicode digits.
static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date pattern"));

static MONTH_KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}$").expect("valid month key pattern"));

/// Returns true when `value` has the stored `YYYY-MM-DD` shape.
///
/// Only the shape is checked; `2024-02-31` passes.
pub fn is_date_string(value: &str) -> bool {
    DATE_PATTERN.is_match(value)
}

/// Strictly parses a calendar date as entered on the form.
pub fn parse_entry_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if !is_date_string(trimmed) {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// `YYYY-MM-DD`, the stored entry date form.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Number of days in the given month (`month_index` is zero-based).
pub fn days_in_month(year: i32, month_index: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month_index + 1, 1);
    let next = if month_index >= 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month_index + 2, 1)
    };
    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 0,
    }
}

/// Weekday of the first day of the month, Sunday = 0.
pub fn first_weekday(year: i32, month_index: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month_index + 1, 1)
        .map(|date| date.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// Canonical identifier of a calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month_index: u32,
}

impl MonthKey {
    /// `month_index` is zero-based (January = 0).
    pub fn new(year: i32, month_index: u32) -> Option<Self> {
        if month_index > 11 || !(0..=9999).contains(&year) {
            return None;
        }
        Some(Self { year, month_index })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month_index: date.month0(),
        }
    }

    /// Month key of a stored `YYYY-MM-DD` string.
    pub fn from_date_str(value: &str) -> Option<Self> {
        value.get(..7)?.parse().ok()
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month_index(&self) -> u32 {
        self.month_index
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month_index as usize]
    }

    pub fn days(&self) -> u32 {
        days_in_month(self.year, self.month_index)
    }

    /// Returns true when a stored date string falls inside this month.
    pub fn contains(&self, date: &str) -> bool {
        date.get(..7) == Some(self.to_string().as_str())
    }

    pub fn date_string(&self, day: u32) -> String {
        format!("{}-{:02}", self, day)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month_index + 1)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if !MONTH_KEY_PATTERN.is_match(value) {
            return Err(format!("`{}` is not a YYYY-MM month key", value));
        }
        let year: i32 = value[..4]
            .parse()
            .map_err(|_| format!("invalid year in `{}`", value))?;
        let month: u32 = value[5..]
            .parse()
            .map_err(|_| format!("invalid month in `{}`", value))?;
        if !(1..=12).contains(&month) {
            return Err(format!("month out of range in `{}`", value));
        }
        MonthKey::new(year, month - 1).ok_or_else(|| format!("invalid month key `{}`", value))
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
