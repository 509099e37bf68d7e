//! Serving normalization
//!
//! Turns a logged quantity and unit into the multiplier applied to a food
//! item's per-serving nutrition.

use super::units::{EntryUnit, DEFAULT_SERVING_GRAMS};

/// Calculate the nutrition multiplier for a logged quantity
///
/// # Arguments
/// * `quantity` - The amount logged (e.g., 150.0)
/// * `unit` - The unit it was logged in
/// * `serving_size_grams` - Grams in one serving of the food, 100 when absent
///
/// `serving` returns the quantity unchanged. `g` and `ml` divide by the serving
/// size; millilitres are taken as grams 1:1, which is not exact for anything
/// but water. `oz` is converted to grams first.
pub fn serving_multiplier(quantity: f64, unit: EntryUnit, serving_size_grams: Option<f64>) -> f64 {
    let serving_grams = serving_size_grams
        .filter(|size| size.is_finite() && *size > 0.0)
        .unwrap_or(DEFAULT_SERVING_GRAMS);

    match unit.grams_per_unit() {
        None => quantity,
        Some(grams_per_unit) => quantity * grams_per_unit / serving_grams,
    }
}
