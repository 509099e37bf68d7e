//! Metabolic adaptation detection
//!
//! BMR is expected to fall by roughly 7 kcal/day per kilogram lost. A drop
//! well beyond that, between the oldest and newest BMR-bearing scans of a
//! period, is flagged as adaptation.

use serde::{Deserialize, Serialize};

use super::constants::{
    ADAPTATION_MARGIN, BMR_DROP_PER_KG, METABOLIC_LOSS_THRESHOLD_KG, STABLE_BMR_TOLERANCE,
    UNEXPECTED_DROP_TOLERANCE,
};
use super::period::AnalysisPeriod;
use super::round_half_up;
use crate::models::BodyCompositionScan;

/// Metabolic state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetabolicStatus {
    Healthy,
    Adapting,
    InsufficientData,
}

impl MetabolicStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetabolicStatus::Healthy => "healthy",
            MetabolicStatus::Adapting => "adapting",
            MetabolicStatus::InsufficientData => "insufficient-data",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "healthy" => Some(MetabolicStatus::Healthy),
            "adapting" => Some(MetabolicStatus::Adapting),
            "insufficient-data" => Some(MetabolicStatus::InsufficientData),
            _ => None,
        }
    }
}

/// BMR drift between two scans
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetabolicAnalysis {
    pub bmr_start: Option<f64>,
    pub bmr_end: Option<f64>,
    /// Newest minus oldest BMR
    pub bmr_change: Option<f64>,
    /// BMR change explained by the weight lost
    pub expected_bmr_change: Option<f64>,
    /// How much larger the actual change is than the expected one
    pub unexpected_bmr_drop: Option<f64>,
    /// Weight lost between the two BMR-bearing scans
    pub weight_lost_kg: Option<f64>,
    pub status: MetabolicStatus,
}

impl MetabolicAnalysis {
    pub fn insufficient() -> Self {
        Self {
            bmr_start: None,
            bmr_end: None,
            bmr_change: None,
            expected_bmr_change: None,
            unexpected_bmr_drop: None,
            weight_lost_kg: None,
            status: MetabolicStatus::InsufficientData,
        }
    }

    pub fn has_data(&self) -> bool {
        self.bmr_change.is_some()
    }
}

/// BMR change expected for a given weight loss
pub fn expected_bmr_change(weight_lost_kg: f64) -> f64 {
    -round_half_up(weight_lost_kg * BMR_DROP_PER_KG)
}

/// Classify a BMR change against the weight lost
pub fn classify_bmr_change(bmr_change: f64, weight_lost_kg: f64) -> MetabolicStatus {
    let expected = expected_bmr_change(weight_lost_kg);

    if weight_lost_kg > METABOLIC_LOSS_THRESHOLD_KG {
        let unexpected_drop = bmr_change.abs() - expected.abs();
        if unexpected_drop >= UNEXPECTED_DROP_TOLERANCE && bmr_change < expected - ADAPTATION_MARGIN {
            return MetabolicStatus::Adapting;
        }
        return MetabolicStatus::Healthy;
    }

    if bmr_change.abs() <= STABLE_BMR_TOLERANCE {
        MetabolicStatus::Healthy
    } else if bmr_change < -ADAPTATION_MARGIN {
        MetabolicStatus::Adapting
    } else {
        MetabolicStatus::Healthy
    }
}

/// Detect metabolic adaptation over a period
///
/// BMR endpoints come from the oldest and newest scans that carry a BMR. The
/// weight lost spans every scan in the period, with or without BMR.
pub fn detect_adaptation(scans: &[BodyCompositionScan], period: &AnalysisPeriod) -> MetabolicAnalysis {
    let in_period = period.select(scans, |scan| scan.date);
    let with_bmr: Vec<f64> = in_period.iter().filter_map(|scan| scan.usable_bmr()).collect();

    let (Some(&bmr_start), Some(&bmr_end)) = (with_bmr.first(), with_bmr.last()) else {
        return MetabolicAnalysis::insufficient();
    };
    let (Some(oldest), Some(newest)) = (in_period.first(), in_period.last()) else {
        return MetabolicAnalysis::insufficient();
    };
    if with_bmr.len() < 2 {
        return MetabolicAnalysis::insufficient();
    }

    let weight_lost = oldest.weight_kg - newest.weight_kg;
    let bmr_change = bmr_end - bmr_start;
    let expected = expected_bmr_change(weight_lost);
    let status = classify_bmr_change(bmr_change, weight_lost);

    tracing::debug!(bmr_change, expected, weight_lost, status = status.as_str(), "Evaluated BMR drift");

    MetabolicAnalysis {
        bmr_start: Some(bmr_start),
        bmr_end: Some(bmr_end),
        bmr_change: Some(bmr_change),
        expected_bmr_change: Some(expected),
        unexpected_bmr_drop: Some(bmr_change.abs() - expected.abs()),
        weight_lost_kg: Some(weight_lost),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, day).unwrap()
    }

    fn period() -> AnalysisPeriod {
        AnalysisPeriod::trailing(d(30), 30)
    }

    fn scan(day: u32, weight: f64, bmr: Option<f64>) -> BodyCompositionScan {
        let mut scan = BodyCompositionScan::new(d(day), weight, 25.0, 40.0);
        scan.bmr = bmr;
        scan
    }

    #[test]
    fn test_adaptation_beyond_expected_drop() {
        let scans = vec![scan(1, 80.0, Some(1700.0)), scan(20, 78.0, Some(1580.0))];
        let analysis = detect_adaptation(&scans, &period());
        assert_eq!(analysis.bmr_change, Some(-120.0));
        assert_eq!(analysis.expected_bmr_change, Some(-14.0));
        assert_eq!(analysis.unexpected_bmr_drop, Some(106.0));
        assert_eq!(analysis.status, MetabolicStatus::Adapting);
    }

    #[test]
    fn test_expected_drop_is_healthy() {
        let scans = vec![scan(1, 80.0, Some(1700.0)), scan(20, 76.0, Some(1670.0))];
        let analysis = detect_adaptation(&scans, &period());
        assert_eq!(analysis.expected_bmr_change, Some(-28.0));
        assert_eq!(analysis.status, MetabolicStatus::Healthy);
    }

    #[test]
    fn test_drop_within_margin_is_healthy() {
        // 40 kcal beyond expected, but not 50 below it
        assert_eq!(classify_bmr_change(-54.0, 2.0), MetabolicStatus::Healthy);
        assert_eq!(classify_bmr_change(-65.0, 2.0), MetabolicStatus::Adapting);
    }

    #[test]
    fn test_stable_weight_thresholds() {
        assert_eq!(classify_bmr_change(-30.0, 0.0), MetabolicStatus::Healthy);
        assert_eq!(classify_bmr_change(-45.0, 0.1), MetabolicStatus::Healthy);
        assert_eq!(classify_bmr_change(-51.0, 0.0), MetabolicStatus::Adapting);
        assert_eq!(classify_bmr_change(80.0, -1.0), MetabolicStatus::Healthy);
    }

    #[test]
    fn test_scans_without_bmr_are_skipped() {
        let scans = vec![
            scan(1, 80.0, Some(1700.0)),
            scan(10, 79.0, None),
            scan(20, 78.0, Some(1690.0)),
            scan(25, 77.5, None),
        ];
        let analysis = detect_adaptation(&scans, &period());
        assert_eq!(analysis.bmr_end, Some(1690.0));
        assert_eq!(analysis.weight_lost_kg, Some(2.5));
        assert_eq!(analysis.expected_bmr_change, Some(-18.0));
        assert_eq!(analysis.status, MetabolicStatus::Healthy);
    }

    #[test]
    fn test_weight_lost_spans_scans_without_bmr() {
        // Only 0.1 kg separates the BMR scans, 2.1 kg separates the period ends
        let scans = vec![
            scan(1, 82.0, None),
            scan(5, 80.0, Some(1700.0)),
            scan(20, 79.9, Some(1640.0)),
        ];
        let analysis = detect_adaptation(&scans, &period());
        assert_eq!(analysis.bmr_start, Some(1700.0));
        assert_eq!(analysis.bmr_change, Some(-60.0));
        assert!((analysis.weight_lost_kg.unwrap() - 2.1).abs() < 1e-9);
        assert_eq!(analysis.expected_bmr_change, Some(-15.0));
        assert_eq!(analysis.unexpected_bmr_drop, Some(45.0));
        assert_eq!(analysis.status, MetabolicStatus::Healthy);
    }

    #[test]
    fn test_expected_change_rounds_half_up() {
        assert_eq!(expected_bmr_change(-1.5), 10.0);
        assert_eq!(expected_bmr_change(1.5), -11.0);
    }

    #[test]
    fn test_needs_two_bmr_scans() {
        let scans = vec![scan(1, 80.0, Some(1700.0)), scan(20, 78.0, None)];
        assert_eq!(detect_adaptation(&scans, &period()), MetabolicAnalysis::insufficient());
    }
}
