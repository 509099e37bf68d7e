//! Composition quality evaluation
//!
//! Attributes the weight change between the oldest and newest scan of a
//! period to fat, muscle and water. The weight trend is resolved once into
//! losing, gaining or stable, and each regime is judged by its own rules.
//!
//! All deltas are "lost" deltas: oldest minus newest, positive when the
//! quantity went down.

use serde::{Deserialize, Serialize};

use super::constants::{
    COMPOSITION_NOISE_FLOOR_KG, GAIN_EXCELLENT_EFFICIENCY, GAIN_GOOD_EFFICIENCY,
    LOSS_EXCELLENT_EFFICIENCY, LOSS_GOOD_EFFICIENCY, WEIGHT_NOISE_FLOOR_KG,
};
use super::period::AnalysisPeriod;
use super::round_half_up;
use crate::models::BodyCompositionScan;

/// Quality of a weight change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QualityStatus {
    Excellent,
    Good,
    Concerning,
    InsufficientData,
}

impl QualityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityStatus::Excellent => "excellent",
            QualityStatus::Good => "good",
            QualityStatus::Concerning => "concerning",
            QualityStatus::InsufficientData => "insufficient-data",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "excellent" => Some(QualityStatus::Excellent),
            "good" => Some(QualityStatus::Good),
            "concerning" => Some(QualityStatus::Concerning),
            "insufficient-data" => Some(QualityStatus::InsufficientData),
            _ => None,
        }
    }
}

/// Direction of the weight change between two scans
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "trend", rename_all = "kebab-case")]
pub enum WeightTrend {
    Losing { lost_kg: f64 },
    Gaining { gained_kg: f64 },
    Stable,
}

impl WeightTrend {
    pub fn classify(total_weight_lost: f64) -> Self {
        if total_weight_lost > WEIGHT_NOISE_FLOOR_KG {
            WeightTrend::Losing {
                lost_kg: total_weight_lost,
            }
        } else if total_weight_lost < -WEIGHT_NOISE_FLOOR_KG {
            WeightTrend::Gaining {
                gained_kg: -total_weight_lost,
            }
        } else {
            WeightTrend::Stable
        }
    }
}

/// Changes between the oldest and newest scan
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompositionDeltas {
    pub total_weight_lost_kg: f64,
    /// Present only when both scans carry fat mass
    pub fat_lost_kg: Option<f64>,
    pub muscle_lost_kg: f64,
    /// Present only when both scans carry water weight
    pub water_change_kg: Option<f64>,
}

impl CompositionDeltas {
    pub fn between(oldest: &BodyCompositionScan, newest: &BodyCompositionScan) -> Self {
        Self {
            total_weight_lost_kg: oldest.weight_kg - newest.weight_kg,
            fat_lost_kg: difference(oldest.fat_mass_kg, newest.fat_mass_kg),
            muscle_lost_kg: oldest.muscle_mass_kg - newest.muscle_mass_kg,
            water_change_kg: difference(oldest.water_weight_kg, newest.water_weight_kg),
        }
    }
}

fn difference(oldest: Option<f64>, newest: Option<f64>) -> Option<f64> {
    match (oldest, newest) {
        (Some(a), Some(b)) => Some(a - b),
        _ => None,
    }
}

/// Result of the composition analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityAnalysis {
    pub deltas: Option<CompositionDeltas>,
    pub trend: Option<WeightTrend>,
    /// Share of the weight change that went where it should, 0-100
    pub fat_loss_efficiency: u8,
    pub status: QualityStatus,
}

impl QualityAnalysis {
    pub fn insufficient() -> Self {
        Self {
            deltas: None,
            trend: None,
            fat_loss_efficiency: 0,
            status: QualityStatus::InsufficientData,
        }
    }

    pub fn has_data(&self) -> bool {
        self.deltas.is_some()
    }
}

/// Evaluate composition quality from the scans in a period
pub fn evaluate_quality(scans: &[BodyCompositionScan], period: &AnalysisPeriod) -> QualityAnalysis {
    let in_period = period.select(scans, |scan| scan.date);
    let (Some(oldest), Some(newest)) = (in_period.first(), in_period.last()) else {
        return QualityAnalysis::insufficient();
    };
    if in_period.len() < 2 {
        return QualityAnalysis::insufficient();
    }

    let deltas = CompositionDeltas::between(oldest, newest);
    let trend = WeightTrend::classify(deltas.total_weight_lost_kg);

    let (fat_loss_efficiency, status) = match trend {
        WeightTrend::Losing { lost_kg } => judge_loss(&deltas, lost_kg),
        WeightTrend::Gaining { gained_kg } => judge_gain(&deltas, gained_kg),
        WeightTrend::Stable => judge_stable(&deltas),
    };

    tracing::debug!(
        total_weight_lost = deltas.total_weight_lost_kg,
        fat_loss_efficiency,
        status = status.as_str(),
        "Evaluated composition quality"
    );

    QualityAnalysis {
        deltas: Some(deltas),
        trend: Some(trend),
        fat_loss_efficiency,
        status,
    }
}

/// Status for a weight loss, by the share of it that came from fat
pub fn loss_status(efficiency: u8) -> QualityStatus {
    if efficiency >= LOSS_EXCELLENT_EFFICIENCY {
        QualityStatus::Excellent
    } else if efficiency >= LOSS_GOOD_EFFICIENCY {
        QualityStatus::Good
    } else {
        QualityStatus::Concerning
    }
}

/// Status for a weight gain, by the share of it that was muscle
pub fn gain_status(efficiency: u8) -> QualityStatus {
    if efficiency >= GAIN_EXCELLENT_EFFICIENCY {
        QualityStatus::Excellent
    } else if efficiency >= GAIN_GOOD_EFFICIENCY {
        QualityStatus::Good
    } else {
        QualityStatus::Concerning
    }
}

fn judge_loss(deltas: &CompositionDeltas, lost_kg: f64) -> (u8, QualityStatus) {
    let fat_lost = deltas.fat_lost_kg.unwrap_or(0.0);
    if fat_lost <= 0.0 {
        // Weight came off muscle or water
        return (0, QualityStatus::Concerning);
    }

    let efficiency = percentage(fat_lost, lost_kg);
    (efficiency, loss_status(efficiency))
}

fn judge_gain(deltas: &CompositionDeltas, gained_kg: f64) -> (u8, QualityStatus) {
    let fat_lost = deltas.fat_lost_kg.unwrap_or(0.0);
    let muscle_gained = -deltas.muscle_lost_kg;

    if muscle_gained <= 0.0 {
        return (0, QualityStatus::Concerning);
    }
    if fat_lost > 0.0 {
        // Recomposition while gaining
        return (100, QualityStatus::Excellent);
    }

    let efficiency = percentage(muscle_gained, gained_kg);
    (efficiency, gain_status(efficiency))
}

fn judge_stable(deltas: &CompositionDeltas) -> (u8, QualityStatus) {
    let fat_lost = deltas.fat_lost_kg.unwrap_or(0.0);
    let muscle_lost = deltas.muscle_lost_kg;

    if fat_lost > COMPOSITION_NOISE_FLOOR_KG && muscle_lost <= 0.0 {
        return (100, QualityStatus::Excellent);
    }
    if fat_lost > 0.0 && fat_lost > muscle_lost {
        let efficiency = percentage(fat_lost, fat_lost + muscle_lost.max(0.0));
        return (efficiency, QualityStatus::Good);
    }
    if fat_lost.abs() < COMPOSITION_NOISE_FLOOR_KG && muscle_lost.abs() < COMPOSITION_NOISE_FLOOR_KG {
        // Maintaining
        return (0, QualityStatus::Good);
    }

    (0, QualityStatus::Concerning)
}

/// `part / whole` as a rounded percentage clamped to 0-100
fn percentage(part: f64, whole: f64) -> u8 {
    if whole <= 0.0 || !part.is_finite() || !whole.is_finite() {
        return 0;
    }
    round_half_up(part / whole * 100.0).clamp(0.0, 100.0) as u8
}
