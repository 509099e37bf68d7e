//! TDEE calibration
//!
//! Wearables report resting and active energy; the sum, scaled by a
//! thermic-effect-of-food multiplier, is the wearable TDEE. Independently, the
//! calories eaten and the smoothed weight trend over the same days imply an
//! observed TDEE. Comparing the two yields a suggested multiplier.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::constants::{
    CALIBRATION_HIGH_DAYS, CALIBRATION_MEDIUM_DAYS, CALIBRATION_TOLERANCE, DEFAULT_CALIBRATION_PERIOD_DAYS,
    DEFAULT_ROLLING_WINDOW_DAYS, DEFAULT_TEF_MULTIPLIER, KCAL_PER_KG, MAX_TEF_MULTIPLIER,
    MIN_CALIBRATION_DAYS, MIN_TEF_MULTIPLIER,
};
use super::period::AnalysisPeriod;
use super::round_half_up;
use super::weight::rolling_average;
use crate::config::AnalysisConfig;
use crate::models::{DailyLog, HealthMetricsSnapshot, WeighIn};
use crate::nutrition::{daily_calories, FoodCatalog};

/// Confidence in a calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalibrationConfidence {
    Low,
    Medium,
    High,
}

impl CalibrationConfidence {
    pub fn from_days(days_analyzed: u32) -> Self {
        if days_analyzed >= CALIBRATION_HIGH_DAYS {
            CalibrationConfidence::High
        } else if days_analyzed >= CALIBRATION_MEDIUM_DAYS {
            CalibrationConfidence::Medium
        } else {
            CalibrationConfidence::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CalibrationConfidence::Low => "low",
            CalibrationConfidence::Medium => "medium",
            CalibrationConfidence::High => "high",
        }
    }
}

/// Calibration settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationOptions {
    pub period_days: u32,
    pub rolling_window_days: u32,
    pub tef_multiplier: f64,
}

impl Default for CalibrationOptions {
    fn default() -> Self {
        Self {
            period_days: DEFAULT_CALIBRATION_PERIOD_DAYS,
            rolling_window_days: DEFAULT_ROLLING_WINDOW_DAYS,
            tef_multiplier: DEFAULT_TEF_MULTIPLIER,
        }
    }
}

impl From<&AnalysisConfig> for CalibrationOptions {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            period_days: config.calibration_period_days,
            rolling_window_days: config.rolling_window_days,
            tef_multiplier: config.tef_multiplier,
        }
    }
}

/// Wearable energy for one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyTdee {
    pub date: NaiveDate,
    pub resting_energy: f64,
    pub active_energy: f64,
    /// Resting plus active energy
    pub raw_tdee: f64,
    /// Raw TDEE with the TEF multiplier applied, rounded
    pub tdee: f64,
    pub calories_eaten: f64,
}

/// Wearable TDEE reconciled against the observed weight trend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TdeeCalibrationResult {
    pub period: AnalysisPeriod,
    pub days: Vec<DailyTdee>,
    pub days_analyzed: u32,
    pub avg_resting_energy: f64,
    pub avg_active_energy: f64,
    pub avg_calories_eaten: f64,
    pub raw_wearable_tdee: f64,
    pub wearable_tdee: f64,
    pub tef_multiplier: f64,
    /// Rolling average weight at the start of the period
    pub start_weight_kg: f64,
    /// Rolling average weight at the end of the period
    pub end_weight_kg: f64,
    /// Start minus end, positive when weight went down
    pub weight_lost_kg: f64,
    pub observed_tdee: f64,
    /// Multiplier that would make the wearable TDEE match the observed one
    pub suggested_tef_multiplier: f64,
    pub calibration_needed: bool,
    pub confidence: CalibrationConfidence,
}

/// Single-day TDEE from a wearable snapshot
pub fn daily_tdee(snapshot: &HealthMetricsSnapshot, tef_multiplier: f64) -> f64 {
    round_half_up((snapshot.resting_energy + snapshot.active_energy) * tef_multiplier)
}

/// Calibrate wearable TDEE against intake and weight trend
///
/// Weight change is taken from rolling averages at the period's start and
/// end rather than single weigh-ins.
///
/// Returns None when the rolling weight average cannot be computed at either
/// end of the period, or fewer than seven days have both wearable data and
/// logged food.
pub fn calibrate_tdee<C>(
    logs: &[DailyLog],
    weigh_ins: &[WeighIn],
    catalog: &C,
    today: NaiveDate,
    options: &CalibrationOptions,
) -> Option<TdeeCalibrationResult>
where
    C: FoodCatalog + ?Sized,
{
    let period = AnalysisPeriod::trailing(today, options.period_days);

    let Some(start_weight) = rolling_average(weigh_ins, period.start, options.rolling_window_days) else {
        tracing::debug!(date = %period.start, "No rolling weight at period start, calibration unavailable");
        return None;
    };
    let Some(end_weight) = rolling_average(weigh_ins, period.end, options.rolling_window_days) else {
        tracing::debug!(date = %period.end, "No rolling weight at period end, calibration unavailable");
        return None;
    };

    let days: Vec<DailyTdee> = period
        .select(logs, |log| log.date)
        .into_iter()
        .filter_map(|log| {
            let snapshot = log.health_metrics.as_ref()?;
            if !snapshot.resting_energy.is_finite() || snapshot.resting_energy <= 0.0 {
                return None;
            }
            let calories_eaten = daily_calories(log, catalog);
            if calories_eaten <= 0.0 {
                return None;
            }
            let active_energy = snapshot.active_energy.max(0.0);
            let raw_tdee = snapshot.resting_energy + active_energy;
            Some(DailyTdee {
                date: log.date,
                resting_energy: snapshot.resting_energy,
                active_energy,
                raw_tdee,
                tdee: round_half_up(raw_tdee * options.tef_multiplier),
                calories_eaten,
            })
        })
        .collect();

    let days_analyzed = days.len() as u32;
    if days_analyzed < MIN_CALIBRATION_DAYS {
        tracing::debug!(days_analyzed, "Too few qualifying days for calibration");
        return None;
    }

    let count = f64::from(days_analyzed);
    let mean = |f: fn(&DailyTdee) -> f64| days.iter().map(f).sum::<f64>() / count;

    let avg_resting_energy = mean(|day| day.resting_energy);
    let avg_active_energy = mean(|day| day.active_energy);
    let avg_calories_eaten = mean(|day| day.calories_eaten);
    let raw_wearable_tdee = mean(|day| day.raw_tdee);
    let wearable_tdee = round_half_up(mean(|day| day.tdee));

    let weight_lost_kg = start_weight - end_weight;
    let observed_tdee = round_half_up(avg_calories_eaten + KCAL_PER_KG * weight_lost_kg / count);

    let suggested_tef_multiplier = round_to_hundredths(
        (observed_tdee / raw_wearable_tdee).clamp(MIN_TEF_MULTIPLIER, MAX_TEF_MULTIPLIER),
    )
    .clamp(MIN_TEF_MULTIPLIER, MAX_TEF_MULTIPLIER);

    let calibration_needed = if observed_tdee > 0.0 {
        (wearable_tdee - observed_tdee).abs() / observed_tdee > CALIBRATION_TOLERANCE
    } else {
        true
    };

    let confidence = CalibrationConfidence::from_days(days_analyzed);

    tracing::debug!(
        days_analyzed,
        wearable_tdee,
        observed_tdee,
        suggested_tef_multiplier,
        calibration_needed,
        "Calibrated TDEE"
    );

    Some(TdeeCalibrationResult {
        period,
        days,
        days_analyzed,
        avg_resting_energy,
        avg_active_energy,
        avg_calories_eaten,
        raw_wearable_tdee,
        wearable_tdee,
        tef_multiplier: options.tef_multiplier,
        start_weight_kg: start_weight,
        end_weight_kg: end_weight,
        weight_lost_kg,
        observed_tdee,
        suggested_tef_multiplier,
        calibration_needed,
        confidence,
    })
}

fn round_to_hundredths(value: f64) -> f64 {
    round_half_up(value * 100.0) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoodItem, LogEntry, Nutrition};
    use crate::nutrition::ServingUnit;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
    }

    fn catalog() -> Vec<FoodItem> {
        vec![FoodItem {
            id: "day".to_string(),
            name: "Day of food".to_string(),
            nutrition: Nutrition {
                calories: 2000.0,
                ..Default::default()
            },
            serving_size: None,
            serving_unit: ServingUnit::Grams,
            deleted_at: None,
        }]
    }

    fn wearable_day(day: u32, resting: f64, active: f64) -> DailyLog {
        DailyLog::new(d(day))
            .with_entry(LogEntry::single_serving("day"))
            .with_health_metrics(HealthMetricsSnapshot {
                resting_energy: resting,
                active_energy: active,
                ..Default::default()
            })
    }

    /// Weigh-ins around both ends of a period ending on the 29th
    fn weigh_ins(start_kg: f64, end_kg: f64) -> Vec<WeighIn> {
        vec![
            WeighIn::new(d(10), start_kg),
            WeighIn::new(d(14), start_kg),
            WeighIn::new(d(25), end_kg),
            WeighIn::new(d(29), end_kg),
        ]
    }

    #[test]
    fn test_daily_tdee() {
        let snapshot = HealthMetricsSnapshot {
            resting_energy: 1600.0,
            active_energy: 400.0,
            ..Default::default()
        };
        assert_eq!(daily_tdee(&snapshot, 1.10), 2200.0);
        assert_eq!(daily_tdee(&snapshot, 1.0), 2000.0);
    }

    #[test]
    fn test_calibration_matches_when_stable() {
        let logs: Vec<DailyLog> = (15..=28).map(|day| wearable_day(day, 1500.0, 318.0)).collect();
        let result = calibrate_tdee(
            &logs,
            &weigh_ins(80.0, 80.0),
            catalog().as_slice(),
            d(29),
            &CalibrationOptions::default(),
        )
        .unwrap();

        assert_eq!(result.days_analyzed, 14);
        assert_eq!(result.observed_tdee, 2000.0);
        assert_eq!(result.raw_wearable_tdee, 1818.0);
        assert_eq!(result.wearable_tdee, 2000.0);
        assert!((result.suggested_tef_multiplier - 1.10).abs() < 1e-9);
        assert!(!result.calibration_needed);
        assert_eq!(result.confidence, CalibrationConfidence::High);
    }

    #[test]
    fn test_weight_loss_raises_observed_tdee() {
        // 1 kg lost over 10 qualifying days adds 770 kcal/day
        let logs: Vec<DailyLog> = (16..=25).map(|day| wearable_day(day, 1500.0, 300.0)).collect();
        let result = calibrate_tdee(
            &logs,
            &weigh_ins(81.0, 80.0),
            catalog().as_slice(),
            d(29),
            &CalibrationOptions::default(),
        )
        .unwrap();

        assert!((result.weight_lost_kg - 1.0).abs() < 1e-9);
        assert_eq!(result.observed_tdee, 2770.0);
        assert_eq!(result.suggested_tef_multiplier, 1.25);
        assert!(result.calibration_needed);
        assert_eq!(result.confidence, CalibrationConfidence::Medium);
    }

    #[test]
    fn test_multiplier_clamped_low() {
        // Large gain makes observed TDEE far below wearable TDEE
        let logs: Vec<DailyLog> = (15..=28).map(|day| wearable_day(day, 1800.0, 600.0)).collect();
        let result = calibrate_tdee(
            &logs,
            &weigh_ins(80.0, 85.0),
            catalog().as_slice(),
            d(29),
            &CalibrationOptions::default(),
        )
        .unwrap();
        assert!(result.observed_tdee < 0.0);
        assert_eq!(result.suggested_tef_multiplier, 1.0);
        assert!(result.calibration_needed);
    }

    #[test]
    fn test_multiplier_always_within_bounds() {
        for end_kg in [60.0, 75.0, 79.5, 80.0, 80.5, 90.0, 120.0] {
            let logs: Vec<DailyLog> = (15..=28).map(|day| wearable_day(day, 1500.0, 300.0)).collect();
            if let Some(result) = calibrate_tdee(
                &logs,
                &weigh_ins(80.0, end_kg),
                catalog().as_slice(),
                d(29),
                &CalibrationOptions::default(),
            ) {
                assert!(result.suggested_tef_multiplier >= MIN_TEF_MULTIPLIER);
                assert!(result.suggested_tef_multiplier <= MAX_TEF_MULTIPLIER);
            }
        }
    }

    #[test]
    fn test_too_few_days_is_unavailable() {
        let logs: Vec<DailyLog> = (20..=25).map(|day| wearable_day(day, 1500.0, 300.0)).collect();
        let result = calibrate_tdee(
            &logs,
            &weigh_ins(80.0, 80.0),
            catalog().as_slice(),
            d(29),
            &CalibrationOptions::default(),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_missing_rolling_average_is_unavailable() {
        let logs: Vec<DailyLog> = (15..=28).map(|day| wearable_day(day, 1500.0, 300.0)).collect();
        let only_end = vec![WeighIn::new(d(25), 80.0), WeighIn::new(d(29), 80.0)];
        let result = calibrate_tdee(
            &logs,
            &only_end,
            catalog().as_slice(),
            d(29),
            &CalibrationOptions::default(),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_days_without_food_or_wearable_do_not_qualify() {
        let mut logs: Vec<DailyLog> = (15..=21).map(|day| wearable_day(day, 1500.0, 300.0)).collect();
        logs.push(DailyLog::new(d(22)).with_health_metrics(HealthMetricsSnapshot {
            resting_energy: 1500.0,
            ..Default::default()
        }));
        logs.push(DailyLog::new(d(23)).with_entry(LogEntry::single_serving("day")));

        let result = calibrate_tdee(
            &logs,
            &weigh_ins(80.0, 80.0),
            catalog().as_slice(),
            d(29),
            &CalibrationOptions::default(),
        )
        .unwrap();
        assert_eq!(result.days_analyzed, 7);
        assert_eq!(result.confidence, CalibrationConfidence::Low);
    }
}
