//! Unit types and conversion constants
//!
//! Units a food entry can be logged in, and units a food item's serving size
//! can be expressed in.

use serde::{Deserialize, Serialize};

/// Grams per ounce, as used for logged quantities
pub const G_PER_OZ: f64 = 28.35;

/// Serving size assumed when a food item does not declare one
pub const DEFAULT_SERVING_GRAMS: f64 = 100.0;

/// Unit of a logged quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntryUnit {
    /// Quantity is a number of servings
    #[default]
    #[serde(rename = "serving", alias = "servings")]
    Serving,
    #[serde(rename = "g", alias = "gram", alias = "grams")]
    Grams,
    /// Treated as grams 1:1
    #[serde(rename = "ml", alias = "milliliter", alias = "milliliters", alias = "millilitre", alias = "millilitres")]
    Millilitres,
    #[serde(rename = "oz", alias = "ounce", alias = "ounces")]
    Ounces,
}

impl EntryUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryUnit::Serving => "serving",
            EntryUnit::Grams => "g",
            EntryUnit::Millilitres => "ml",
            EntryUnit::Ounces => "oz",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        match lower.trim() {
            "serving" | "servings" => Some(EntryUnit::Serving),
            "g" | "gram" | "grams" => Some(EntryUnit::Grams),
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Some(EntryUnit::Millilitres)
            }
            "oz" | "ounce" | "ounces" => Some(EntryUnit::Ounces),
            _ => None,
        }
    }

    /// Grams represented by one unit, or None for servings
    pub fn grams_per_unit(&self) -> Option<f64> {
        match self {
            EntryUnit::Serving => None,
            EntryUnit::Grams | EntryUnit::Millilitres => Some(1.0),
            EntryUnit::Ounces => Some(G_PER_OZ),
        }
    }
}

/// Unit a food item's serving size is declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ServingUnit {
    #[default]
    #[serde(rename = "g", alias = "gram", alias = "grams")]
    Grams,
    #[serde(rename = "ml", alias = "milliliter", alias = "milliliters", alias = "millilitre", alias = "millilitres")]
    Millilitres,
    #[serde(rename = "oz", alias = "ounce", alias = "ounces")]
    Ounces,
}

impl ServingUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServingUnit::Grams => "g",
            ServingUnit::Millilitres => "ml",
            ServingUnit::Ounces => "oz",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match EntryUnit::from_str(s)? {
            EntryUnit::Serving => None,
            EntryUnit::Grams => Some(ServingUnit::Grams),
            EntryUnit::Millilitres => Some(ServingUnit::Millilitres),
            EntryUnit::Ounces => Some(ServingUnit::Ounces),
        }
    }

    /// Convert a serving size in this unit to grams (ml counted 1:1)
    pub fn to_grams(&self, size: f64) -> f64 {
        match self {
            ServingUnit::Grams | ServingUnit::Millilitres => size,
            ServingUnit::Ounces => size * G_PER_OZ,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_unit_from_str() {
        assert_eq!(EntryUnit::from_str("serving"), Some(EntryUnit::Serving));
        assert_eq!(EntryUnit::from_str("Servings"), Some(EntryUnit::Serving));
        assert_eq!(EntryUnit::from_str("g"), Some(EntryUnit::Grams));
        assert_eq!(EntryUnit::from_str(" ML "), Some(EntryUnit::Millilitres));
        assert_eq!(EntryUnit::from_str("oz"), Some(EntryUnit::Ounces));
        assert_eq!(EntryUnit::from_str("cup"), None);
    }

    #[test]
    fn test_entry_unit_serde_names() {
        let unit: EntryUnit = serde_json::from_str("\"ml\"").unwrap();
        assert_eq!(unit, EntryUnit::Millilitres);
        let unit: EntryUnit = serde_json::from_str("\"grams\"").unwrap();
        assert_eq!(unit, EntryUnit::Grams);
        assert_eq!(serde_json::to_string(&EntryUnit::Serving).unwrap(), "\"serving\"");
    }

    #[test]
    fn test_serving_unit_to_grams() {
        assert_eq!(ServingUnit::Grams.to_grams(100.0), 100.0);
        assert_eq!(ServingUnit::Millilitres.to_grams(250.0), 250.0);
        assert!((ServingUnit::Ounces.to_grams(2.0) - 56.7).abs() < 1e-9);
        assert_eq!(ServingUnit::from_str("serving"), None);
    }
}
