//! Nutrition calculation module
//!
//! Handles serving normalization and daily nutrition aggregation.

pub mod aggregate;
pub mod converter;
pub mod units;

pub use aggregate::{aggregate_day, daily_calories, entry_nutrition, DailyConsumption, FoodCatalog};
pub use converter::serving_multiplier;
pub use units::{EntryUnit, ServingUnit, DEFAULT_SERVING_GRAMS, G_PER_OZ};
