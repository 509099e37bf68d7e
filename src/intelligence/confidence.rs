//! Data confidence rating

use serde::{Deserialize, Serialize};

use super::constants::{CONFIDENCE_HIGH_DAYS, CONFIDENCE_LOW_DAYS, CONFIDENCE_MEDIUM_DAYS};

/// Confidence tier, driven only by the number of days with data
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfidenceLevel {
    VeryLow,
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn from_days(days_with_data: u32) -> Self {
        if days_with_data >= CONFIDENCE_HIGH_DAYS {
            ConfidenceLevel::High
        } else if days_with_data >= CONFIDENCE_MEDIUM_DAYS {
            ConfidenceLevel::Medium
        } else if days_with_data >= CONFIDENCE_LOW_DAYS {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::VeryLow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::VeryLow => "very-low",
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "very-low" => Some(ConfidenceLevel::VeryLow),
            "low" => Some(ConfidenceLevel::Low),
            "medium" => Some(ConfidenceLevel::Medium),
            "high" => Some(ConfidenceLevel::High),
            _ => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ConfidenceLevel::VeryLow => {
                "Not enough data yet. Log your food for at least 3 days to start seeing trends."
            }
            ConfidenceLevel::Low => {
                "Early estimate. Keep logging daily for a full week before drawing conclusions."
            }
            ConfidenceLevel::Medium => {
                "Reasonable estimate from a week or more of logging. Accuracy improves after two weeks."
            }
            ConfidenceLevel::High => "Reliable estimate based on two or more weeks of consistent logging.",
        }
    }

    pub fn has_enough_data(&self) -> bool {
        matches!(self, ConfidenceLevel::Medium | ConfidenceLevel::High)
    }
}

/// Confidence tier with its advisory message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceRating {
    pub level: ConfidenceLevel,
    pub message: String,
    pub has_enough_data: bool,
}

/// Rate confidence from the number of days with data
pub fn rate_confidence(days_with_data: u32) -> ConfidenceRating {
    let level = ConfidenceLevel::from_days(days_with_data);
    ConfidenceRating {
        level,
        message: level.message().to_string(),
        has_enough_data: level.has_enough_data(),
    }
}
