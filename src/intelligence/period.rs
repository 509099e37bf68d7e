//! Analysis periods
//!
//! Every period is anchored on an explicit `today` supplied by the caller.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inclusive calendar range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AnalysisPeriod {
    /// The `days` days before `today`, through `today` itself
    pub fn trailing(today: NaiveDate, days: u32) -> Self {
        Self {
            start: days_before(today, days),
            end: today,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Items dated inside the period, oldest first
    ///
    /// Items sharing a date keep their input order.
    pub fn select<'a, T, F>(&self, items: &'a [T], date_of: F) -> Vec<&'a T>
    where
        F: Fn(&T) -> NaiveDate,
    {
        let mut selected: Vec<&T> = items.iter().filter(|item| self.contains(date_of(item))).collect();
        selected.sort_by_key(|item| date_of(item));
        selected
    }
}

/// `date` minus `days`, saturating at the earliest representable date
pub fn days_before(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn test_trailing_bounds_are_inclusive() {
        let period = AnalysisPeriod::trailing(d(31), 30);
        assert_eq!(period.start, d(1));
        assert!(period.contains(d(1)));
        assert!(period.contains(d(31)));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()));
    }

    #[test]
    fn test_select_sorts_by_date() {
        let items = vec![(d(20), "c"), (d(5), "a"), (d(10), "b"), (d(2), "out")];
        let period = AnalysisPeriod {
            start: d(3),
            end: d(25),
        };
        let picked: Vec<&str> = period.select(&items, |item| item.0).iter().map(|item| item.1).collect();
        assert_eq!(picked, vec!["a", "b", "c"]);
    }
}
