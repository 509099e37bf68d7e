//! Data models
//!
//! Source records supplied by the caller. Derived reports live with the
//! engine in `intelligence`.

mod daily_log;
mod food_item;
mod history;
mod log_entry;
mod nutrition;
mod scan;
mod weigh_in;

pub use daily_log::{DailyLog, HealthMetricsSnapshot};
pub use food_item::FoodItem;
pub use history::History;
pub use log_entry::{LogEntry, LogEntryRecord};
pub use nutrition::Nutrition;
pub use scan::BodyCompositionScan;
pub use weigh_in::WeighIn;
