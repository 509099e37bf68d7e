//! Body composition scan model
//!
//! Readings taken from a body-composition scan report. Every optional metric
//! is independently nullable: a scan with a BMR value may still lack fat mass.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A body composition scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyCompositionScan {
    pub date: NaiveDate,
    #[serde(alias = "weight")]
    pub weight_kg: f64,
    pub body_fat_percent: f64,
    #[serde(alias = "muscle_mass")]
    pub muscle_mass_kg: f64,
    #[serde(default, alias = "skeletal_muscle_mass")]
    pub skeletal_muscle_mass_kg: f64,
    /// Basal metabolic rate, kcal/day
    #[serde(default)]
    pub bmr: Option<f64>,
    #[serde(default, alias = "fat_mass")]
    pub fat_mass_kg: Option<f64>,
    #[serde(default)]
    pub visceral_fat_grade: Option<f64>,
    #[serde(default, alias = "water_weight")]
    pub water_weight_kg: Option<f64>,
    #[serde(default, alias = "trunk_fat_mass")]
    pub trunk_fat_mass_kg: Option<f64>,
    #[serde(default)]
    pub body_age: Option<u32>,
    #[serde(default, alias = "protein_mass")]
    pub protein_mass_kg: Option<f64>,
    #[serde(default, alias = "bone_mass")]
    pub bone_mass_kg: Option<f64>,
}

impl BodyCompositionScan {
    /// A scan with only the always-present readings filled in
    pub fn new(date: NaiveDate, weight_kg: f64, body_fat_percent: f64, muscle_mass_kg: f64) -> Self {
        Self {
            date,
            weight_kg,
            body_fat_percent,
            muscle_mass_kg,
            skeletal_muscle_mass_kg: 0.0,
            bmr: None,
            fat_mass_kg: None,
            visceral_fat_grade: None,
            water_weight_kg: None,
            trunk_fat_mass_kg: None,
            body_age: None,
            protein_mass_kg: None,
            bone_mass_kg: None,
        }
    }

    pub fn with_fat_mass(mut self, fat_mass_kg: f64) -> Self {
        self.fat_mass_kg = Some(fat_mass_kg);
        self
    }

    pub fn with_bmr(mut self, bmr: f64) -> Self {
        self.bmr = Some(bmr);
        self
    }

    pub fn with_water_weight(mut self, water_weight_kg: f64) -> Self {
        self.water_weight_kg = Some(water_weight_kg);
        self
    }

    /// BMR if the scan carries a usable one
    pub fn usable_bmr(&self) -> Option<f64> {
        self.bmr.filter(|bmr| bmr.is_finite() && *bmr > 0.0)
    }
}
