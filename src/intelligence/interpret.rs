//! Human-readable interpretations of analysis states
//!
//! Fixed label and message per state, ready for display.

use serde::Serialize;

use super::confidence::ConfidenceLevel;
use super::metabolic::MetabolicStatus;
use super::quality::QualityStatus;
use super::response::ResponseStatus;
use super::tdee::TdeeCalibrationResult;
use crate::error::{EngineError, EngineResult};

/// Display text for a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusInterpretation {
    pub label: &'static str,
    pub message: &'static str,
}

const fn text(label: &'static str, message: &'static str) -> StatusInterpretation {
    StatusInterpretation { label, message }
}

pub fn interpret_response(status: ResponseStatus) -> StatusInterpretation {
    match status {
        ResponseStatus::Normal => text(
            "On track",
            "Your weight is changing about as much as your logged deficit predicts.",
        ),
        ResponseStatus::Slow => text(
            "Slower than expected",
            "You have lost less than your deficit predicts. Logging may be missing some food, \
             or water retention may be hiding fat loss.",
        ),
        ResponseStatus::Fast => text(
            "Faster than expected",
            "You have lost more than your deficit predicts. Part of it is likely water, \
             or activity is being under-counted.",
        ),
        ResponseStatus::InsufficientData => text(
            "Not enough data",
            "Log food consistently and weigh in at least twice in the period to see your response.",
        ),
    }
}

pub fn interpret_quality(status: QualityStatus) -> StatusInterpretation {
    match status {
        QualityStatus::Excellent => text(
            "Excellent",
            "The change in your weight is coming from the right place: fat down, muscle kept or gained.",
        ),
        QualityStatus::Good => text(
            "Good",
            "Most of the change is in the right direction, with some muscle or water mixed in.",
        ),
        QualityStatus::Concerning => text(
            "Needs attention",
            "Too much of the change is muscle or water. Consider more protein and resistance training.",
        ),
        QualityStatus::InsufficientData => text(
            "Not enough scans",
            "Two body-composition scans in the period are needed to judge the quality of the change.",
        ),
    }
}

pub fn interpret_metabolic(status: MetabolicStatus) -> StatusInterpretation {
    match status {
        MetabolicStatus::Healthy => text(
            "Metabolism steady",
            "Your BMR is changing in line with your weight.",
        ),
        MetabolicStatus::Adapting => text(
            "Metabolic adaptation",
            "Your BMR has dropped more than your weight loss explains. A diet break or a smaller \
             deficit may help.",
        ),
        MetabolicStatus::InsufficientData => text(
            "Not enough BMR readings",
            "Two scans reporting BMR in the period are needed to check for adaptation.",
        ),
    }
}

pub fn interpret_confidence(level: ConfidenceLevel) -> StatusInterpretation {
    let label = match level {
        ConfidenceLevel::VeryLow => "Very low confidence",
        ConfidenceLevel::Low => "Low confidence",
        ConfidenceLevel::Medium => "Medium confidence",
        ConfidenceLevel::High => "High confidence",
    };
    text(label, level.message())
}

/// Interpretation of a calibration outcome, including an unavailable one
pub fn interpret_calibration(result: Option<&TdeeCalibrationResult>) -> StatusInterpretation {
    match result {
        None => text(
            "Calibration unavailable",
            "At least 7 days with both wearable data and logged food, plus regular weigh-ins at \
             the start and end of the period, are needed.",
        ),
        Some(result) if result.calibration_needed => text(
            "Calibration suggested",
            "Your wearable's energy estimate differs from what your intake and weight trend imply \
             by more than 10%.",
        ),
        Some(_) => text(
            "Wearable accurate",
            "Your wearable's energy estimate agrees with your intake and weight trend.",
        ),
    }
}

/// Interpret a status given by name, e.g. `("quality", "excellent")`
pub fn interpret_named(kind: &str, status: &str) -> EngineResult<StatusInterpretation> {
    let unknown = || EngineError::UnknownStatus(format!("{}:{}", kind, status));

    match kind.to_lowercase().as_str() {
        "response" => ResponseStatus::from_str(status).map(interpret_response).ok_or_else(unknown),
        "quality" => QualityStatus::from_str(status).map(interpret_quality).ok_or_else(unknown),
        "metabolic" => MetabolicStatus::from_str(status).map(interpret_metabolic).ok_or_else(unknown),
        "confidence" => ConfidenceLevel::from_str(status).map(interpret_confidence).ok_or_else(unknown),
        _ => Err(unknown()),
    }
}
