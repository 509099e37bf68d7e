//! Response evaluation
//!
//! Compares the weight change the accumulated deficit predicts with the change
//! actually seen between the first and last weigh-in of the period.

use serde::{Deserialize, Serialize};

use super::constants::{KCAL_PER_KG, MIN_EXPECTED_LOSS_KG, RESPONSE_NORMAL_MAX, RESPONSE_NORMAL_MIN};
use super::period::AnalysisPeriod;
use super::round_half_up;
use super::weight::period_endpoints;
use crate::models::WeighIn;

/// How the body responded to the deficit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseStatus {
    Normal,
    Slow,
    Fast,
    InsufficientData,
}

impl ResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::Normal => "normal",
            ResponseStatus::Slow => "slow",
            ResponseStatus::Fast => "fast",
            ResponseStatus::InsufficientData => "insufficient-data",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "normal" => Some(ResponseStatus::Normal),
            "slow" => Some(ResponseStatus::Slow),
            "fast" => Some(ResponseStatus::Fast),
            "insufficient-data" => Some(ResponseStatus::InsufficientData),
            _ => None,
        }
    }

    /// Band a response score falls in
    pub fn from_score(score: i64) -> Self {
        if score < RESPONSE_NORMAL_MIN {
            ResponseStatus::Slow
        } else if score > RESPONSE_NORMAL_MAX {
            ResponseStatus::Fast
        } else {
            ResponseStatus::Normal
        }
    }
}

/// Expected vs. actual weight change
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResponseAnalysis {
    /// Weight loss the deficit predicts, never negative
    pub expected_weight_loss_kg: f64,
    /// First minus last weigh-in, when the period has two
    pub actual_weight_loss_kg: Option<f64>,
    /// Actual over expected, as a rounded percentage
    pub response_score: Option<i64>,
    pub status: ResponseStatus,
}

impl ResponseAnalysis {
    pub fn insufficient() -> Self {
        Self {
            expected_weight_loss_kg: 0.0,
            actual_weight_loss_kg: None,
            response_score: None,
            status: ResponseStatus::InsufficientData,
        }
    }

    pub fn has_data(&self) -> bool {
        self.response_score.is_some()
    }
}

/// Weight loss a deficit should produce
pub fn expected_weight_loss(accumulated_deficit: f64) -> f64 {
    (accumulated_deficit / KCAL_PER_KG).max(0.0)
}

/// Evaluate the response to an accumulated deficit over a period
///
/// Actual loss is the first weigh-in in the period minus the last one, not a
/// rolling average. A score needs an expected loss above 0.1 kg and two
/// weigh-ins in the period.
pub fn evaluate_response(
    accumulated_deficit: f64,
    weigh_ins: &[WeighIn],
    period: &AnalysisPeriod,
) -> ResponseAnalysis {
    let expected = expected_weight_loss(accumulated_deficit);
    let actual = period_endpoints(weigh_ins, period).map(|(first, last)| first.weight_kg - last.weight_kg);

    let mut analysis = ResponseAnalysis {
        expected_weight_loss_kg: expected,
        actual_weight_loss_kg: actual,
        response_score: None,
        status: ResponseStatus::InsufficientData,
    };

    let Some(actual) = actual else {
        return analysis;
    };
    if expected <= MIN_EXPECTED_LOSS_KG {
        return analysis;
    }

    let score = round_half_up(actual / expected * 100.0) as i64;
    analysis.response_score = Some(score);
    analysis.status = ResponseStatus::from_score(score);

    tracing::debug!(expected, actual, score, status = analysis.status.as_str(), "Evaluated response");

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, day).unwrap()
    }

    fn period() -> AnalysisPeriod {
        AnalysisPeriod::trailing(d(30), 30)
    }

    #[test]
    fn test_expected_weight_loss() {
        assert!((expected_weight_loss(7700.0) - 1.0).abs() < 1e-9);
        assert_eq!(expected_weight_loss(-3000.0), 0.0);
    }

    #[test]
    fn test_normal_response() {
        let weigh_ins = vec![WeighIn::new(d(1), 80.0), WeighIn::new(d(28), 79.1)];
        let analysis = evaluate_response(7700.0, &weigh_ins, &period());
        assert!((analysis.actual_weight_loss_kg.unwrap() - 0.9).abs() < 1e-9);
        assert_eq!(analysis.response_score, Some(90));
        assert_eq!(analysis.status, ResponseStatus::Normal);
    }

    #[test]
    fn test_slow_and_fast_bands() {
        let slow = vec![WeighIn::new(d(1), 80.0), WeighIn::new(d(28), 79.5)];
        assert_eq!(evaluate_response(7700.0, &slow, &period()).status, ResponseStatus::Slow);

        let fast = vec![WeighIn::new(d(1), 80.0), WeighIn::new(d(28), 78.5)];
        let analysis = evaluate_response(7700.0, &fast, &period());
        assert_eq!(analysis.response_score, Some(150));
        assert_eq!(analysis.status, ResponseStatus::Fast);
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(ResponseStatus::from_score(80), ResponseStatus::Normal);
        assert_eq!(ResponseStatus::from_score(120), ResponseStatus::Normal);
        assert_eq!(ResponseStatus::from_score(79), ResponseStatus::Slow);
        assert_eq!(ResponseStatus::from_score(121), ResponseStatus::Fast);
    }

    #[test]
    fn test_single_weigh_in_is_insufficient() {
        let weigh_ins = vec![WeighIn::new(d(28), 79.1)];
        let analysis = evaluate_response(7700.0, &weigh_ins, &period());
        assert_eq!(analysis.response_score, None);
        assert_eq!(analysis.status, ResponseStatus::InsufficientData);
    }

    #[test]
    fn test_small_expected_loss_is_insufficient() {
        let weigh_ins = vec![WeighIn::new(d(1), 80.0), WeighIn::new(d(28), 79.9)];
        let analysis = evaluate_response(500.0, &weigh_ins, &period());
        assert_eq!(analysis.status, ResponseStatus::InsufficientData);
        assert!(analysis.actual_weight_loss_kg.is_some());
        assert!(!analysis.has_data());
    }

    #[test]
    fn test_status_names() {
        assert_eq!(ResponseStatus::from_str("insufficient_data"), Some(ResponseStatus::InsufficientData));
        assert_eq!(
            serde_json::to_string(&ResponseStatus::InsufficientData).unwrap(),
            "\"insufficient-data\""
        );
    }
}
