//! Calendar month value object and report period selector.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{AppError, AppResult};

/// A calendar month written as `YYYY-MM`.
///
/// Ordering is chronological, so `Month` values can be compared the same
/// way the stored `YYYY-MM` strings are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        if !(1..=12).contains(&month) || !(1..=9999).contains(&year) {
            return Err(AppError::validation(format!(
                "Invalid month {:04}-{:02}",
                year, month
            )));
        }
        Ok(Self { year, month })
    }

    /// Month containing the given date
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Month containing today's date (UTC)
    pub fn current() -> Self {
        Self::of(Utc::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

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

    pub fn days_in_month(&self) -> u32 {
        let days = self.next().first_day() - self.first_day();
        days.num_days() as u32
    }

    /// Date of the given day in this month, if it exists
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }

    /// Whole calendar months from `self` to `other` (negative if `other` is earlier)
    pub fn months_until(&self, other: Month) -> i32 {
        (other.year - self.year) * 12 + other.month as i32 - self.month as i32
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid =
            || AppError::validation(format!("Month must be in YYYY-MM format, got '{}'", s));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Month::new(year, month)
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Report period: a single month or the whole history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    All,
    Month(Month),
}

impl Period {
    /// Parse an optional query value; absent, empty and `all` select everything
    pub fn parse(raw: Option<&str>) -> AppResult<Self> {
        match raw.map(str::trim) {
            None | Some("") | Some("all") => Ok(Period::All),
            Some(value) => Ok(Period::Month(value.parse()?)),
        }
    }

    pub fn includes(&self, month: Month) -> bool {
        match self {
            Period::All => true,
            Period::Month(selected) => *selected == month,
        }
    }

    /// The selected month, or `fallback` for the whole-history period
    pub fn month_or(&self, fallback: Month) -> Month {
        match self {
            Period::All => fallback,
            Period::Month(month) => *month,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::All => f.write_str("all"),
            Period::Month(month) => month.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(s: &str) -> Month {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let m = month("2024-03");
        assert_eq!(m.year(), 2024);
        assert_eq!(m.month(), 3);
        assert_eq!(m.to_string(), "2024-03");
    }

    #[test]
    fn test_rejects_malformed_months() {
        for raw in ["2024-13", "2024-00", "24-03", "2024-3", "2024/03", "march"] {
            assert!(raw.parse::<Month>().is_err(), "{} should be rejected", raw);
        }
    }

    #[test]
    fn test_ordering_matches_string_ordering() {
        assert!(month("2023-12") < month("2024-01"));
        assert!(month("2024-02") < month("2024-10"));
    }

    #[test]
    fn test_previous_and_next_wrap_years() {
        assert_eq!(month("2024-01").previous(), month("2023-12"));
        assert_eq!(month("2023-12").next(), month("2024-01"));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(month("2024-02").days_in_month(), 29);
        assert_eq!(month("2023-02").days_in_month(), 28);
        assert_eq!(month("2024-04").days_in_month(), 30);
        assert_eq!(month("2024-12").days_in_month(), 31);
    }

    #[test]
    fn test_months_until() {
        assert_eq!(month("2024-01").months_until(month("2024-06")), 5);
        assert_eq!(month("2024-06").months_until(month("2023-06")), -12);
    }

    #[test]
    fn test_serde_round_trip_as_string() {
        let json = serde_json::to_string(&month("2024-05")).unwrap();
        assert_eq!(json, "\"2024-05\"");
        let parsed: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, month("2024-05"));
        assert!(serde_json::from_str::<Month>("\"2024-5\"").is_err());
    }

    #[test]
    fn test_period_parse() {
        assert_eq!(Period::parse(None).unwrap(), Period::All);
        assert_eq!(Period::parse(Some("all")).unwrap(), Period::All);
        assert_eq!(
            Period::parse(Some("2024-05")).unwrap(),
            Period::Month(month("2024-05"))
        );
        assert!(Period::parse(Some("May")).is_err());
    }

    #[test]
    fn test_period_month_or_fallback() {
        let fallback = month("2024-07");
        assert_eq!(Period::All.month_or(fallback), fallback);
        assert_eq!(
            Period::Month(month("2024-01")).month_or(fallback),
            month("2024-01")
        );
    }
}
