//! Food Item model
//!
//! A catalog entry with per-serving nutritional information.

use serde::{Deserialize, Serialize};

use super::Nutrition;
use crate::nutrition::ServingUnit;

/// A food item with nutritional information
///
/// Logs reference items by id. Editing an item that has already been logged
/// against would change past totals, so callers keep logged items immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Nutrition per serving
    #[serde(flatten)]
    pub nutrition: Nutrition,
    /// Serving size in `serving_unit`, 100 g when absent
    #[serde(default)]
    pub serving_size: Option<f64>,
    #[serde(default)]
    pub serving_unit: ServingUnit,
    /// Soft-delete marker
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl FoodItem {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Serving size converted to grams, if declared
    pub fn serving_size_grams(&self) -> Option<f64> {
        self.serving_size.map(|size| self.serving_unit.to_grams(size))
    }
}
