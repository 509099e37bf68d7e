//! Weight trend helpers

use chrono::NaiveDate;

use super::constants::MIN_ROLLING_SAMPLES;
use super::period::AnalysisPeriod;
use crate::models::WeighIn;

/// Mean weight over `[target - window_days, target]`
///
/// Returns None when fewer than two weigh-ins fall inside the window.
pub fn rolling_average(weigh_ins: &[WeighIn], target: NaiveDate, window_days: u32) -> Option<f64> {
    let window = AnalysisPeriod::trailing(target, window_days);
    let samples: Vec<f64> = weigh_ins
        .iter()
        .filter(|w| window.contains(w.date) && w.weight_kg.is_finite())
        .map(|w| w.weight_kg)
        .collect();

    if samples.len() < MIN_ROLLING_SAMPLES {
        return None;
    }

    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// First and last weigh-in of a period, oldest first
pub fn period_endpoints(weigh_ins: &[WeighIn], period: &AnalysisPeriod) -> Option<(WeighIn, WeighIn)> {
    let in_period = period.select(weigh_ins, |w| w.date);
    match (in_period.first(), in_period.last()) {
        (Some(first), Some(last)) if in_period.len() >= 2 => Some((**first, **last)),
        _ => None,
    }
}
