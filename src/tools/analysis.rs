//! Analysis Tools
//!
//! Request handlers that turn caller-supplied history into engine calls.

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::error::{parse_date, EngineError, EngineResult};
use crate::intelligence::{
    self, AnalysisInput, BodyIntelligenceReport, CalibrationOptions, StatusInterpretation,
    TdeeCalibrationResult,
};
use crate::models::{HealthMetricsSnapshot, History, Nutrition, WeighIn};
use crate::nutrition::{self, EntryUnit};

/// Response for serving_multiplier
#[derive(Debug, Serialize)]
pub struct ServingMultiplierResponse {
    pub quantity: f64,
    pub unit: EntryUnit,
    pub serving_size_grams: f64,
    pub multiplier: f64,
}

/// Response for daily_consumption
#[derive(Debug, Serialize)]
pub struct DailyConsumptionResponse {
    pub date: String,
    pub logged: bool,
    pub nutrition: Nutrition,
    pub entries_counted: usize,
    pub entries_skipped: usize,
}

/// Response for rolling_weight_average
#[derive(Debug, Serialize)]
pub struct RollingWeightResponse {
    pub date: String,
    pub window_days: u32,
    pub samples: usize,
    pub average_kg: Option<f64>,
}

/// Interpretations shown alongside a report
#[derive(Debug, Serialize)]
pub struct ReportInterpretations {
    pub response: StatusInterpretation,
    pub quality: StatusInterpretation,
    pub metabolic: StatusInterpretation,
    pub confidence: StatusInterpretation,
}

/// Response for body_intelligence_report
#[derive(Debug, Serialize)]
pub struct BodyIntelligenceResponse {
    pub report: BodyIntelligenceReport,
    pub interpretations: ReportInterpretations,
}

/// Response for tdee_calibration
#[derive(Debug, Serialize)]
pub struct TdeeCalibrationResponse {
    pub available: bool,
    pub calibration: Option<TdeeCalibrationResult>,
    pub interpretation: StatusInterpretation,
}

/// Response for daily_tdee
#[derive(Debug, Serialize)]
pub struct DailyTdeeResponse {
    pub resting_energy: f64,
    pub active_energy: f64,
    pub tef_multiplier: f64,
    pub tdee: f64,
}

/// Parse a history payload
pub fn parse_history(value: serde_json::Value) -> EngineResult<History> {
    Ok(serde_json::from_value(value)?)
}

/// Parse a list of weigh-ins
pub fn parse_weigh_ins(value: serde_json::Value) -> EngineResult<Vec<WeighIn>> {
    Ok(serde_json::from_value(value)?)
}

fn validate_bmr(bmr: f64) -> EngineResult<f64> {
    if !bmr.is_finite() || bmr < 0.0 {
        return Err(EngineError::InvalidBmr(bmr));
    }
    Ok(bmr)
}

fn validate_tef(tef_multiplier: Option<f64>, config: &AnalysisConfig) -> EngineResult<f64> {
    let candidate = AnalysisConfig {
        tef_multiplier: tef_multiplier.unwrap_or(config.tef_multiplier),
        ..*config
    };
    candidate.validate()?;
    Ok(candidate.tef_multiplier)
}

fn period_days(key: &str, requested: Option<u32>, default: u32) -> EngineResult<u32> {
    match requested {
        Some(0) => Err(EngineError::InvalidConfig {
            key: key.to_string(),
            message: "must be at least 1 day".to_string(),
        }),
        Some(days) => Ok(days),
        None => Ok(default),
    }
}

// ============================================================================
// Tools
// ============================================================================

/// Normalize a logged quantity against a serving size
pub fn serving_multiplier(
    quantity: f64,
    unit: &str,
    serving_size_grams: Option<f64>,
) -> Result<ServingMultiplierResponse, String> {
    let unit = EntryUnit::from_str(unit)
        .ok_or_else(|| EngineError::UnknownUnit(unit.to_string()).to_string())?;
    let serving_size = serving_size_grams
        .filter(|size| size.is_finite() && *size > 0.0)
        .unwrap_or(nutrition::DEFAULT_SERVING_GRAMS);

    Ok(ServingMultiplierResponse {
        quantity,
        unit,
        serving_size_grams: serving_size,
        multiplier: nutrition::serving_multiplier(quantity, unit, Some(serving_size)),
    })
}

/// Total nutrition eaten on a date
pub fn daily_consumption(history: &History, date: &str) -> Result<DailyConsumptionResponse, String> {
    let date = parse_date(date).map_err(|e| e.to_string())?;
    let catalog = history.catalog();

    let mut response = DailyConsumptionResponse {
        date: date.to_string(),
        logged: false,
        nutrition: Nutrition::zero(),
        entries_counted: 0,
        entries_skipped: 0,
    };

    for log in history.daily_logs.iter().filter(|log| log.date == date) {
        let totals = nutrition::aggregate_day(log, &catalog);
        response.logged = true;
        response.nutrition = response.nutrition + totals.nutrition;
        response.entries_counted += totals.entries_counted;
        response.entries_skipped += totals.entries_skipped;
    }

    Ok(response)
}

/// Rolling average weight ending on a date
pub fn rolling_weight_average(
    weigh_ins: &[WeighIn],
    date: &str,
    window_days: Option<u32>,
    config: &AnalysisConfig,
) -> Result<RollingWeightResponse, String> {
    let date = parse_date(date).map_err(|e| e.to_string())?;
    let window_days =
        period_days("window_days", window_days, config.rolling_window_days).map_err(|e| e.to_string())?;
    let window = intelligence::AnalysisPeriod::trailing(date, window_days);

    Ok(RollingWeightResponse {
        date: date.to_string(),
        window_days,
        samples: weigh_ins.iter().filter(|w| window.contains(w.date)).count(),
        average_kg: intelligence::rolling_average(weigh_ins, date, window_days),
    })
}

/// Build the body intelligence report
pub fn body_intelligence_report(
    history: &History,
    today: &str,
    bmr: f64,
    requested_period_days: Option<u32>,
    config: &AnalysisConfig,
) -> Result<BodyIntelligenceResponse, String> {
    let today = parse_date(today).map_err(|e| e.to_string())?;
    let bmr = validate_bmr(bmr).map_err(|e| e.to_string())?;
    let days =
        period_days("period_days", requested_period_days, config.period_days).map_err(|e| e.to_string())?;

    let catalog = history.catalog();
    let input = AnalysisInput {
        logs: &history.daily_logs,
        weigh_ins: &history.weigh_ins,
        scans: &history.scans,
        catalog: &catalog,
        bmr,
    };

    let report = intelligence::analyze_body_intelligence(&input, today, days);
    let interpretations = ReportInterpretations {
        response: intelligence::interpret_response(report.response.status),
        quality: intelligence::interpret_quality(report.quality.status),
        metabolic: intelligence::interpret_metabolic(report.metabolic.status),
        confidence: intelligence::interpret_confidence(report.confidence.level),
    };

    Ok(BodyIntelligenceResponse { report, interpretations })
}

/// Calibrate wearable TDEE against intake and weight trend
pub fn tdee_calibration(
    history: &History,
    today: &str,
    requested_period_days: Option<u32>,
    tef_multiplier: Option<f64>,
    config: &AnalysisConfig,
) -> Result<TdeeCalibrationResponse, String> {
    let today = parse_date(today).map_err(|e| e.to_string())?;
    let options = CalibrationOptions {
        period_days: period_days("period_days", requested_period_days, config.calibration_period_days)
            .map_err(|e| e.to_string())?,
        rolling_window_days: config.rolling_window_days,
        tef_multiplier: validate_tef(tef_multiplier, config).map_err(|e| e.to_string())?,
    };

    let catalog = history.catalog();
    let calibration =
        intelligence::calibrate_tdee(&history.daily_logs, &history.weigh_ins, &catalog, today, &options);

    Ok(TdeeCalibrationResponse {
        available: calibration.is_some(),
        interpretation: intelligence::interpret_calibration(calibration.as_ref()),
        calibration,
    })
}

/// Single-day TDEE from wearable energy readings
pub fn daily_tdee(
    resting_energy: f64,
    active_energy: f64,
    tef_multiplier: Option<f64>,
    config: &AnalysisConfig,
) -> Result<DailyTdeeResponse, String> {
    let tef_multiplier = validate_tef(tef_multiplier, config).map_err(|e| e.to_string())?;
    let snapshot = HealthMetricsSnapshot {
        resting_energy,
        active_energy,
        ..Default::default()
    };

    Ok(DailyTdeeResponse {
        resting_energy,
        active_energy,
        tef_multiplier,
        tdee: intelligence::daily_tdee(&snapshot, tef_multiplier),
    })
}

/// Display text for a named status
pub fn interpret_status(kind: &str, status: &str) -> Result<StatusInterpretation, String> {
    intelligence::interpret_named(kind, status).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn history() -> History {
        let mut logs = Vec::new();
        for day in 1..=7 {
            logs.push(json!({
                "date": format!("2025-04-{:02}", day),
                "entries": ["lunch", {"item_id": "rice", "quantity": 100, "unit": "g"}]
            }));
        }
        parse_history(json!({
            "foods": [
                {"id": "lunch", "name": "Lunch", "calories": 370},
                {"id": "rice", "name": "Rice", "calories": 260, "serving_size": 200, "serving_unit": "g"}
            ],
            "daily_logs": logs,
            "weigh_ins": [
                {"date": "2025-04-01", "weight_kg": 80.0},
                {"date": "2025-04-07", "weight_kg": 79.1}
            ],
            "scans": []
        }))
        .unwrap()
    }

    #[test]
    fn test_serving_multiplier_tool() {
        let response = serving_multiplier(8.0, "oz", Some(226.8)).unwrap();
        assert!((response.multiplier - 1.0).abs() < 1e-9);
        assert!(serving_multiplier(1.0, "cup", None).is_err());

        let response = serving_multiplier(50.0, "g", None).unwrap();
        assert_eq!(response.serving_size_grams, 100.0);
    }

    #[test]
    fn test_daily_consumption_tool() {
        let response = daily_consumption(&history(), "2025-04-03").unwrap();
        assert!(response.logged);
        assert!((response.nutrition.calories - 500.0).abs() < 1e-9);
        assert_eq!(response.entries_counted, 2);

        let response = daily_consumption(&history(), "2025-05-01").unwrap();
        assert!(!response.logged);
        assert_eq!(response.nutrition.calories, 0.0);

        assert!(daily_consumption(&history(), "yesterday").is_err());
    }

    #[test]
    fn test_report_tool() {
        let config = AnalysisConfig::default();
        let response = body_intelligence_report(&history(), "2025-04-07", 1600.0, None, &config).unwrap();
        assert!((response.report.accumulated_deficit - 7700.0).abs() < 1e-6);
        assert_eq!(response.report.response.response_score, Some(90));
        assert_eq!(response.interpretations.response.label, "On track");
        assert_eq!(response.interpretations.quality.label, "Not enough scans");
    }

    #[test]
    fn test_report_tool_rejects_negative_bmr() {
        let config = AnalysisConfig::default();
        let err = body_intelligence_report(&history(), "2025-04-07", -5.0, None, &config).unwrap_err();
        assert!(err.contains("BMR"));
        assert!(body_intelligence_report(&history(), "2025-04-07", 1600.0, Some(0), &config).is_err());
    }

    #[test]
    fn test_calibration_tool_unavailable() {
        let config = AnalysisConfig::default();
        let response = tdee_calibration(&history(), "2025-04-07", None, None, &config).unwrap();
        assert!(!response.available);
        assert!(response.calibration.is_none());
        assert_eq!(response.interpretation.label, "Calibration unavailable");
        assert!(tdee_calibration(&history(), "2025-04-07", None, Some(2.0), &config).is_err());
    }

    #[test]
    fn test_daily_tdee_tool() {
        let config = AnalysisConfig::default();
        let response = daily_tdee(1600.0, 400.0, None, &config).unwrap();
        assert_eq!(response.tdee, 2200.0);
        let response = daily_tdee(1600.0, 400.0, Some(1.0), &config).unwrap();
        assert_eq!(response.tdee, 2000.0);
    }

    #[test]
    fn test_rolling_weight_tool() {
        let weigh_ins = history().weigh_ins;
        let config = AnalysisConfig::default();
        let response = rolling_weight_average(&weigh_ins, "2025-04-07", None, &config).unwrap();
        assert_eq!(response.samples, 2);
        assert!((response.average_kg.unwrap() - 79.55).abs() < 1e-9);

        let response = rolling_weight_average(&weigh_ins, "2025-04-07", Some(3), &config).unwrap();
        assert_eq!(response.average_kg, None);
    }

    #[test]
    fn test_parse_history_errors() {
        assert!(matches!(
            parse_history(json!({"weigh_ins": [{"date": "nope", "weight_kg": 1}]})),
            Err(EngineError::InvalidHistory(_))
        ));
        assert_eq!(parse_history(json!({})).unwrap(), History::default());
    }
}
