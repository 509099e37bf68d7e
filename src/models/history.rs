//! History bundle
//!
//! Everything the engine reads for one user, in the shape the persistence
//! layer hands it over.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{BodyCompositionScan, DailyLog, FoodItem, WeighIn};

/// All source series for an analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct History {
    pub foods: Vec<FoodItem>,
    pub daily_logs: Vec<DailyLog>,
    pub weigh_ins: Vec<WeighIn>,
    pub scans: Vec<BodyCompositionScan>,
}

impl History {
    /// Index the food catalog by id
    pub fn catalog(&self) -> HashMap<&str, &FoodItem> {
        self.foods.iter().map(|item| (item.id.as_str(), item)).collect()
    }
}
