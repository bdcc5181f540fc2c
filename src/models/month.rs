//! Calendar month keys
//!
//! Every grouping and filter in the engine runs on `MonthKey`, never on
//! locale-rendered month strings. The canonical text form is "YYYY-MM";
//! the legacy "Jul 2024" label form is accepted on input so older data
//! sets funnel through the same conversion.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const MONTH_NAMES: [&str; 12] = [
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

/// Three-letter English abbreviation for a 1-based month number
pub(crate) fn short_month_name(month: u32) -> &'static str {
    &MONTH_NAMES[(month - 1) as usize][..3]
}

/// A calendar month, e.g. "2024-07"
///
/// Ordered chronologically. Fields are private so every instance passes
/// through a validated constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a month key; `None` if the month is outside 1-12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month a date falls in
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current month from the local clock
    ///
    /// Presentation-edge convenience; report generation never calls this.
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::from_date(date) == *self
    }

    /// Human-readable label, e.g. "Jul 2024"
    pub fn label(&self) -> String {
        format!("{} {}", short_month_name(self.month), self.year)
    }

    /// Parse a month key
    ///
    /// Accepts the canonical "2024-07" form and the legacy label forms
    /// "Jul 2024" / "July 2024".
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();

        if let Some((year_str, month_str)) = s.split_once('-') {
            let year: i32 = year_str
                .parse()
                .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
            let month: u32 = month_str
                .parse()
                .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
            return Self::new(year, month).ok_or(MonthParseError::InvalidMonth(month));
        }

        if let Some((name, year_str)) = s.split_once(' ') {
            let year: i32 = year_str
                .trim()
                .parse()
                .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
            let token = name.to_ascii_lowercase();
            if token.len() >= 3 {
                for (idx, full) in MONTH_NAMES.iter().enumerate() {
                    if full.to_ascii_lowercase().starts_with(&token) {
                        return Ok(Self {
                            year,
                            month: idx as u32 + 1,
                        });
                    }
                }
            }
        }

        Err(MonthParseError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Serialized as the canonical string form so the wire shape matches the
// dashboard's `month` fields.
impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Error type for month key parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => write!(f, "Invalid month format: {}", s),
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for MonthParseError {}
