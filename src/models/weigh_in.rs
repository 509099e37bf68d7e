//! Weigh-in model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A body weight reading, always stored in kilograms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeighIn {
    pub date: NaiveDate,
    #[serde(alias = "weight")]
    pub weight_kg: f64,
}

impl WeighIn {
    pub fn new(date: NaiveDate, weight_kg: f64) -> Self {
        Self { date, weight_kg }
    }
}
