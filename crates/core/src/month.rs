//! Calendar-month keys.
//!
//! A [`MonthKey`] is the `"YYYY-MM"` identifier used by payments, salary
//! contributions and payouts. Ordering is numeric on `(year, month)`, never on
//! the string form.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{Error, Result, ValidationError};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month, e.g. `2024-03`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Returns `None` unless `month` is in `1..=12`.
    pub const fn new(year: i32, month: u32) -> Option<Self> {
        if matches!(month, 1..=12) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First calendar day of the month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Abbreviated month name ("Jan", "Feb", ...).
    pub fn label(&self) -> &'static str {
        MONTH_LABELS[(self.month - 1) as usize]
    }

    pub fn succ(&self) -> Self {
        self.offset(1)
    }

    pub fn pred(&self) -> Self {
        self.offset(-1)
    }

    /// Moves by `months` calendar months (negative moves backwards).
    pub fn offset(&self, months: i32) -> Self {
        let ordinal = self.ordinal() + i64::from(months);
        Self::from_ordinal(ordinal)
    }

    /// Number of months from `self` through `end`, both inclusive.
    /// Zero when `end` precedes `self`.
    pub fn months_through(&self, end: MonthKey) -> u32 {
        if end < *self {
            return 0;
        }
        let span = end.ordinal() - self.ordinal() + 1;
        u32::try_from(span).unwrap_or(u32::MAX)
    }

    /// Every month from `start` through `end` inclusive, oldest first.
    pub fn range(start: MonthKey, end: MonthKey) -> Vec<MonthKey> {
        let mut months = Vec::with_capacity(start.months_through(end) as usize);
        let mut current = start;
        while current <= end {
            months.push(current);
            current = current.succ();
        }
        months
    }

    fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    fn from_ordinal(ordinal: i64) -> Self {
        Self {
            year: ordinal.div_euclid(12) as i32,
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }
}

/// Every calendar month from `start` to `end` inclusive, ordered
/// chronologically. Empty when `start > end`.
pub fn enumerate_months(start: NaiveDate, end: NaiveDate) -> Vec<MonthKey> {
    if start > end {
        return Vec::new();
    }
    MonthKey::range(MonthKey::from_date(start), MonthKey::from_date(end))
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    /// Accepts `YYYY-MM` as well as ISO dates and timestamps, of which only
    /// the leading `YYYY-MM` is read.
    fn from_str(value: &str) -> Result<Self> {
        let invalid = || Error::Validation(ValidationError::InvalidMonthKey(value.to_string()));
        let trimmed = value.trim();
        let bytes = trimmed.as_bytes();
        if bytes.len() < 7 || bytes[4] != b'-' || (bytes.len() > 7 && bytes[7] != b'-') {
            return Err(invalid());
        }
        let digits = |range: std::ops::Range<usize>| {
            let part = &trimmed[range];
            if part.bytes().all(|b| b.is_ascii_digit()) {
                Some(part)
            } else {
                None
            }
        };
        let year = digits(0..4)
            .and_then(|y| y.parse::<i32>().ok())
            .ok_or_else(invalid)?;
        let month = digits(5..7)
            .and_then(|m| m.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for MonthKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
