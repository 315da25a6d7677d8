//! Budget periods and their calendar boundaries.

use crate::errors::{Error, Result};
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// One of the three fixed budget buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// The anchor day itself
    Day,
    /// Monday through Sunday of the anchor's ISO week
    Week,
    /// First through last day of the anchor's month
    Month,
}

impl Period {
    /// All periods in display order.
    pub const ALL: [Self; 3] = [Self::Day, Self::Week, Self::Month];

    /// Storage and display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Inclusive `[start, end]` range of this period around `anchor`.
    #[must_use]
    pub fn bounds(self, anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Self::Day => (anchor, anchor),
            Self::Week => {
                let monday =
                    anchor - Days::new(u64::from(anchor.weekday().num_days_from_monday()));
                let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
                (monday, sunday)
            }
            Self::Month => {
                let first = anchor - Days::new(u64::from(anchor.day0()));
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(NaiveDate::MAX);
                (first, last)
            }
        }
    }

    /// Whether `date` falls inside this period around `anchor`.
    #[must_use]
    pub fn contains(self, anchor: NaiveDate, date: NaiveDate) -> bool {
        let (start, end) = self.bounds(anchor);
        start <= date && date <= end
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(Error::invalid_state(format!(
                "unsupported budget period '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("day".parse::<Period>().unwrap(), Period::Day);
        assert_eq!("week".parse::<Period>().unwrap(), Period::Week);
        assert_eq!("month".parse::<Period>().unwrap(), Period::Month);
        assert!(matches!(
            "quarter".parse::<Period>(),
            Err(Error::InvalidState { .. })
        ));
        assert!("Day".parse::<Period>().is_err());
    }

    #[test]
    fn test_week_bounds_cross_year() {
        // Wednesday 2025-12-31
        let (start, end) = Period::Week.bounds(date(2025, 12, 31));
        assert_eq!(start, date(2025, 12, 29));
        assert_eq!(end, date(2026, 1, 4));
    }

    #[test]
    fn test_week_bounds_on_monday_and_sunday() {
        assert_eq!(
            Period::Week.bounds(date(2024, 3, 4)),
            (date(2024, 3, 4), date(2024, 3, 10))
        );
        assert_eq!(
            Period::Week.bounds(date(2024, 3, 10)),
            (date(2024, 3, 4), date(2024, 3, 10))
        );
    }

    #[test]
    fn test_month_bounds_leap_year() {
        assert_eq!(
            Period::Month.bounds(date(2024, 2, 14)),
            (date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            Period::Month.bounds(date(2023, 2, 14)),
            (date(2023, 2, 1), date(2023, 2, 28))
        );
        assert_eq!(
            Period::Month.bounds(date(2024, 12, 31)),
            (date(2024, 12, 1), date(2024, 12, 31))
        );
    }

    #[test]
    fn test_contains() {
        let anchor = date(2024, 3, 5);
        assert!(Period::Day.contains(anchor, anchor));
        assert!(!Period::Day.contains(anchor, date(2024, 3, 4)));
        assert!(Period::Week.contains(anchor, date(2024, 3, 10)));
        assert!(!Period::Week.contains(anchor, date(2024, 3, 3)));
        assert!(Period::Month.contains(anchor, date(2024, 3, 31)));
        assert!(!Period::Month.contains(anchor, date(2024, 4, 1)));
    }
}
