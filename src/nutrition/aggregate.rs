//! Daily consumption aggregation
//!
//! Sums normalized nutrition for every entry in a day's log.

use std::collections::HashMap;

use serde::Serialize;

use super::converter::serving_multiplier;
use crate::models::{DailyLog, FoodItem, LogEntry, Nutrition};

/// Lookup of food items by id
pub trait FoodCatalog {
    fn find(&self, item_id: &str) -> Option<&FoodItem>;
}

impl FoodCatalog for HashMap<String, FoodItem> {
    fn find(&self, item_id: &str) -> Option<&FoodItem> {
        self.get(item_id)
    }
}

impl<'a> FoodCatalog for HashMap<&'a str, &'a FoodItem> {
    fn find(&self, item_id: &str) -> Option<&FoodItem> {
        self.get(item_id).copied()
    }
}

impl FoodCatalog for [FoodItem] {
    fn find(&self, item_id: &str) -> Option<&FoodItem> {
        self.iter().find(|item| item.id == item_id)
    }
}

/// Totals for one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DailyConsumption {
    pub nutrition: Nutrition,
    /// Entries that contributed to the totals
    pub entries_counted: usize,
    /// Entries referencing a missing or deleted item, or with an unusable quantity
    pub entries_skipped: usize,
}

impl DailyConsumption {
    pub fn calories(&self) -> f64 {
        self.nutrition.calories
    }
}

/// Nutrition contributed by a single entry, None when it cannot be counted
pub fn entry_nutrition<C>(entry: &LogEntry, catalog: &C) -> Option<Nutrition>
where
    C: FoodCatalog + ?Sized,
{
    let item = catalog.find(&entry.item_id).filter(|item| !item.is_deleted());
    let Some(item) = item else {
        tracing::debug!(item_id = %entry.item_id, "Skipping entry for missing or deleted food item");
        return None;
    };

    if !entry.quantity.is_finite() || entry.quantity < 0.0 {
        tracing::warn!(
            "Skipping entry for '{}' with unusable quantity {}",
            entry.item_id,
            entry.quantity
        );
        return None;
    }

    let multiplier = serving_multiplier(entry.quantity, entry.unit, item.serving_size_grams());
    Some(item.nutrition.scale(multiplier))
}

/// Aggregate all entries of a day's log
pub fn aggregate_day<C>(log: &DailyLog, catalog: &C) -> DailyConsumption
where
    C: FoodCatalog + ?Sized,
{
    log.entries
        .iter()
        .fold(DailyConsumption::default(), |mut acc, entry| {
            match entry_nutrition(entry, catalog) {
                Some(nutrition) => {
                    acc.nutrition = acc.nutrition + nutrition;
                    acc.entries_counted += 1;
                }
                None => acc.entries_skipped += 1,
            }
            acc
        })
}

/// Calories eaten on a day
pub fn daily_calories<C>(log: &DailyLog, catalog: &C) -> f64
where
    C: FoodCatalog + ?Sized,
{
    aggregate_day(log, catalog).calories()
}
