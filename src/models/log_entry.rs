//! Log entry model
//!
//! A logged quantity of a food item. Older logs store a bare item id; those are
//! normalized to one serving when deserialized so nothing downstream has to
//! care which shape an entry came in.

use serde::{Deserialize, Serialize};

use crate::nutrition::EntryUnit;

/// A food entry within a daily log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LogEntryRecord")]
pub struct LogEntry {
    pub item_id: String,
    pub quantity: f64,
    pub unit: EntryUnit,
}

impl LogEntry {
    pub fn new(item_id: impl Into<String>, quantity: f64, unit: EntryUnit) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
            unit,
        }
    }

    /// One serving of an item, the meaning of a legacy bare-id entry
    pub fn single_serving(item_id: impl Into<String>) -> Self {
        Self::new(item_id, 1.0, EntryUnit::Serving)
    }
}

/// Stored shapes of a log entry
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LogEntryRecord {
    /// Legacy entry: just the food item id
    Legacy(String),
    Detailed {
        #[serde(alias = "food_item_id", alias = "foodItemId", alias = "itemId")]
        item_id: String,
        #[serde(default = "default_quantity")]
        quantity: f64,
        #[serde(default)]
        unit: EntryUnit,
    },
}

fn default_quantity() -> f64 {
    1.0
}

impl From<LogEntryRecord> for LogEntry {
    fn from(record: LogEntryRecord) -> Self {
        match record {
            LogEntryRecord::Legacy(item_id) => LogEntry::single_serving(item_id),
            LogEntryRecord::Detailed {
                item_id,
                quantity,
                unit,
            } => LogEntry::new(item_id, quantity, unit),
        }
    }
}
