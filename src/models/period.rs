//! Budget period key
//!
//! A period is a calendar month written as `YYYY-MM`. The same string tags
//! `Budget::month` and matches the year-month prefix of a transaction date.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month, the unit of budgeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Create a period, validating the month
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The period containing today's local date
    pub fn current() -> Self {
        Self::containing(chrono::Local::now().date_naive())
    }

    /// The period a date falls in
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Format a year and month as a period key
    ///
    /// ```
    /// use budget_reconciler::models::Period;
    /// assert_eq!(Period::format(2025, 3), "2025-03");
    /// ```
    pub fn format(year: i32, month: u32) -> String {
        format!("{:04}-{:02}", year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The immediately preceding month; January wraps to December of the prior year
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The immediately following month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Check whether a date's year and month equal this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Parse a `YYYY-MM` period key
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Self::format(self.year, self.month))
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Period {
    type Error = PeriodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(year: i32, month: u32) -> Period {
        Period::new(year, month).unwrap()
    }

    #[test]
    fn test_format_zero_pads() {
        assert_eq!(Period::format(2025, 1), "2025-01");
        assert_eq!(Period::format(2025, 12), "2025-12");
        assert_eq!(period(2024, 7).to_string(), "2024-07");
    }

    #[test]
    fn test_previous() {
        assert_eq!(period(2025, 3).previous(), period(2025, 2));
        assert_eq!(period(2025, 1).previous(), period(2024, 12));
    }

    #[test]
    fn test_next_inverts_previous() {
        for month in 1..=12 {
            let p = period(2025, month);
            assert_eq!(p.previous().next(), p);
        }
        assert_eq!(period(2024, 12).next(), period(2025, 1));
    }

    #[test]
    fn test_invalid_month() {
        assert_eq!(Period::new(2025, 0), Err(PeriodParseError::InvalidMonth(0)));
        assert_eq!(Period::new(2025, 13), Err(PeriodParseError::InvalidMonth(13)));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Period::parse("2025-01").unwrap(), period(2025, 1));
        assert_eq!(
            Period::parse("2025-13"),
            Err(PeriodParseError::InvalidMonth(13))
        );
        assert!(Period::parse("2025-1").is_err());
        assert!(Period::parse("2025-W03").is_err());
        assert!(Period::parse("January").is_err());
    }

    #[test]
    fn test_contains_matches_date_prefix() {
        let jan = period(2025, 1);
        assert!(jan.contains(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        assert!(jan.contains(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()));
        assert!(!jan.contains(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
        assert!(!jan.contains(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()));
    }

    #[test]
    fn test_ordering() {
        assert!(period(2024, 12) < period(2025, 1));
        assert!(period(2025, 2) > period(2025, 1));
    }

    #[test]
    fn test_serialized_as_key() {
        let json = serde_json::to_string(&period(2025, 4)).unwrap();
        assert_eq!(json, "\"2025-04\"");
        let back: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(back, period(2025, 4));
        assert!(serde_json::from_str::<Period>("\"2025-00\"").is_err());
    }
}
