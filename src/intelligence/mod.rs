//! Body intelligence engine
//!
//! Pure analyses over a user's logged food, wearable activity, weigh-ins and
//! body-composition scans. Nothing here reads the clock or keeps state: the
//! reference date is always passed in, and the same inputs always produce the
//! same report.

pub mod confidence;
pub mod constants;
pub mod deficit;
pub mod interpret;
pub mod metabolic;
pub mod period;
pub mod quality;
pub mod response;
pub mod tdee;
pub mod weight;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{BodyCompositionScan, DailyLog, WeighIn};
use crate::nutrition::FoodCatalog;

pub use confidence::{rate_confidence, ConfidenceLevel, ConfidenceRating};
pub use deficit::{accumulate_deficit, DailyDeficit, DeficitSummary};
pub use interpret::{
    interpret_calibration, interpret_confidence, interpret_metabolic, interpret_named,
    interpret_quality, interpret_response, StatusInterpretation,
};
pub use metabolic::{detect_adaptation, MetabolicAnalysis, MetabolicStatus};
pub use period::AnalysisPeriod;
pub use quality::{evaluate_quality, CompositionDeltas, QualityAnalysis, QualityStatus, WeightTrend};
pub use response::{evaluate_response, expected_weight_loss, ResponseAnalysis, ResponseStatus};
pub use tdee::{
    calibrate_tdee, daily_tdee, CalibrationConfidence, CalibrationOptions, DailyTdee,
    TdeeCalibrationResult,
};
pub use weight::rolling_average;

/// Round to the nearest integer, with halves going toward positive infinity
///
/// `-10.5` becomes `-10`, where `f64::round` would give `-11`.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Everything derived from one period of history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyIntelligenceReport {
    pub period: AnalysisPeriod,
    pub accumulated_deficit: f64,
    pub days_with_data: u32,
    pub response: ResponseAnalysis,
    pub quality: QualityAnalysis,
    pub metabolic: MetabolicAnalysis,
    pub confidence: ConfidenceRating,
    pub has_response_data: bool,
    pub has_composition_data: bool,
    pub has_metabolic_data: bool,
}

impl BodyIntelligenceReport {
    /// The report for a period with nothing to analyze
    pub fn insufficient(period: AnalysisPeriod) -> Self {
        Self {
            period,
            accumulated_deficit: 0.0,
            days_with_data: 0,
            response: ResponseAnalysis::insufficient(),
            quality: QualityAnalysis::insufficient(),
            metabolic: MetabolicAnalysis::insufficient(),
            confidence: rate_confidence(0),
            has_response_data: false,
            has_composition_data: false,
            has_metabolic_data: false,
        }
    }

    pub fn has_enough_data(&self) -> bool {
        self.confidence.has_enough_data
    }
}

/// Source series for a report
#[derive(Debug)]
pub struct AnalysisInput<'a, C: ?Sized> {
    pub logs: &'a [DailyLog],
    pub weigh_ins: &'a [WeighIn],
    pub scans: &'a [BodyCompositionScan],
    pub catalog: &'a C,
    pub bmr: f64,
}

/// Build the body intelligence report for the `period_days` ending on `today`
///
/// With no usable BMR or no day with logged food, the insufficient-data
/// report is returned and none of the sub-analyses run.
pub fn analyze_body_intelligence<C>(
    input: &AnalysisInput<'_, C>,
    today: NaiveDate,
    period_days: u32,
) -> BodyIntelligenceReport
where
    C: FoodCatalog + ?Sized,
{
    let period = AnalysisPeriod::trailing(today, period_days);

    let deficit = accumulate_deficit(input.logs, &period, input.bmr, input.catalog);
    if deficit.is_empty() {
        tracing::debug!(start = %period.start, end = %period.end, "No days with data in period");
        return BodyIntelligenceReport::insufficient(period);
    }

    let response = evaluate_response(deficit.accumulated_deficit, input.weigh_ins, &period);
    let quality = evaluate_quality(input.scans, &period);
    let metabolic = detect_adaptation(input.scans, &period);
    let confidence = rate_confidence(deficit.days_with_data);

    tracing::info!(
        days_with_data = deficit.days_with_data,
        response = response.status.as_str(),
        quality = quality.status.as_str(),
        metabolic = metabolic.status.as_str(),
        confidence = confidence.level.as_str(),
        "Built body intelligence report"
    );

    BodyIntelligenceReport {
        period,
        accumulated_deficit: deficit.accumulated_deficit,
        days_with_data: deficit.days_with_data,
        has_response_data: response.has_data(),
        has_composition_data: quality.has_data(),
        has_metabolic_data: metabolic.has_data(),
        response,
        quality,
        metabolic,
        confidence,
    }
}
