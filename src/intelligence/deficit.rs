//! Energy deficit accumulation
//!
//! Walks the daily logs of a period and sums `(BMR + activity) - eaten` over
//! the days that have food logged. A day with nothing logged is treated as a
//! day the user did not log, not a day they ate nothing.

use serde::Serialize;

use super::period::AnalysisPeriod;
use crate::models::DailyLog;
use crate::nutrition::{daily_calories, FoodCatalog};

/// One day's contribution to the deficit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyDeficit {
    pub date: chrono::NaiveDate,
    pub calories_eaten: f64,
    pub activity_calories: f64,
    pub tdee: f64,
    pub deficit: f64,
}

/// Deficit summed over a period
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeficitSummary {
    pub accumulated_deficit: f64,
    pub days_with_data: u32,
    pub days: Vec<DailyDeficit>,
}

impl DeficitSummary {
    pub fn is_empty(&self) -> bool {
        self.days_with_data == 0
    }
}

/// Accumulate the energy deficit over a period
///
/// A non-positive or non-finite BMR yields an empty summary.
pub fn accumulate_deficit<C>(
    logs: &[DailyLog],
    period: &AnalysisPeriod,
    bmr: f64,
    catalog: &C,
) -> DeficitSummary
where
    C: FoodCatalog + ?Sized,
{
    if !bmr.is_finite() || bmr <= 0.0 {
        tracing::debug!(bmr, "No usable BMR, skipping deficit accumulation");
        return DeficitSummary::default();
    }

    let mut summary = DeficitSummary::default();

    for log in period.select(logs, |log| log.date) {
        let calories_eaten = daily_calories(log, catalog);
        if calories_eaten <= 0.0 {
            continue;
        }

        let activity_calories = log.activity_calories().max(0.0);
        let tdee = bmr + activity_calories;
        let deficit = tdee - calories_eaten;

        summary.accumulated_deficit += deficit;
        summary.days_with_data += 1;
        summary.days.push(DailyDeficit {
            date: log.date,
            calories_eaten,
            activity_calories,
            tdee,
            deficit,
        });
    }

    tracing::debug!(
        days_with_data = summary.days_with_data,
        accumulated_deficit = summary.accumulated_deficit,
        "Accumulated energy deficit"
    );

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoodItem, HealthMetricsSnapshot, LogEntry, Nutrition};
    use crate::nutrition::ServingUnit;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn catalog() -> Vec<FoodItem> {
        vec![FoodItem {
            id: "meal".to_string(),
            name: "Meal".to_string(),
            nutrition: Nutrition {
                calories: 500.0,
                ..Default::default()
            },
            serving_size: Some(100.0),
            serving_unit: ServingUnit::Grams,
            deleted_at: None,
        }]
    }

    fn logged(day: u32) -> DailyLog {
        DailyLog::new(d(day)).with_entry(LogEntry::single_serving("meal"))
    }

    #[test]
    fn test_seven_days_of_500_kcal() {
        let logs: Vec<DailyLog> = (1..=7).map(logged).collect();
        let period = AnalysisPeriod::trailing(d(7), 30);
        let summary = accumulate_deficit(&logs, &period, 1600.0, catalog().as_slice());
        assert_eq!(summary.days_with_data, 7);
        assert!((summary.accumulated_deficit - 7700.0).abs() < 1e-9);
    }

    #[test]
    fn test_unlogged_days_are_skipped() {
        let logs = vec![logged(1), DailyLog::new(d(2)).with_workout_calories(400.0), logged(3)];
        let period = AnalysisPeriod::trailing(d(7), 30);
        let summary = accumulate_deficit(&logs, &period, 1600.0, catalog().as_slice());
        assert_eq!(summary.days_with_data, 2);
        assert!((summary.accumulated_deficit - 2200.0).abs() < 1e-9);
    }

    #[test]
    fn test_activity_sources() {
        let logs = vec![
            logged(1).with_health_metrics(HealthMetricsSnapshot {
                resting_energy: 1500.0,
                active_energy: 300.0,
                ..Default::default()
            }),
            logged(2).with_workout_calories(200.0),
        ];
        let period = AnalysisPeriod::trailing(d(7), 30);
        let summary = accumulate_deficit(&logs, &period, 1600.0, catalog().as_slice());
        assert_eq!(summary.days[0].tdee, 1900.0);
        assert_eq!(summary.days[1].tdee, 1800.0);
        assert!((summary.accumulated_deficit - 2700.0).abs() < 1e-9);
    }

    #[test]
    fn test_days_outside_period_ignored() {
        let logs = vec![logged(1), logged(20)];
        let period = AnalysisPeriod::trailing(d(20), 7);
        let summary = accumulate_deficit(&logs, &period, 1600.0, catalog().as_slice());
        assert_eq!(summary.days_with_data, 1);
        assert_eq!(summary.days[0].date, d(20));
    }

    #[test]
    fn test_non_positive_bmr_is_empty() {
        let logs: Vec<DailyLog> = (1..=7).map(logged).collect();
        let period = AnalysisPeriod::trailing(d(7), 30);
        for bmr in [0.0, -100.0, f64::NAN] {
            let summary = accumulate_deficit(&logs, &period, bmr, catalog().as_slice());
            assert!(summary.is_empty());
            assert_eq!(summary, DeficitSummary::default());
        }
    }
}
