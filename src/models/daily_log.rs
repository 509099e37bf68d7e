//! Daily log model
//!
//! One log per calendar date: the food entries eaten that day plus whatever
//! activity data is available for it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::LogEntry;

/// Wearable activity data imported for a day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthMetricsSnapshot {
    /// Resting energy burned, kcal
    pub resting_energy: f64,
    /// Active energy burned, kcal
    pub active_energy: f64,
    pub steps: u32,
    pub exercise_minutes: f64,
    pub stand_hours: f64,
}

/// A day's food log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub date: NaiveDate,
    #[serde(default)]
    pub entries: Vec<LogEntry>,
    #[serde(default)]
    pub health_metrics: Option<HealthMetricsSnapshot>,
    /// Manually entered workout calories, used when no wearable data exists
    #[serde(default)]
    pub workout_calories: Option<f64>,
}

impl DailyLog {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            entries: Vec::new(),
            health_metrics: None,
            workout_calories: None,
        }
    }

    pub fn with_entry(mut self, entry: LogEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn with_health_metrics(mut self, snapshot: HealthMetricsSnapshot) -> Self {
        self.health_metrics = Some(snapshot);
        self
    }

    pub fn with_workout_calories(mut self, calories: f64) -> Self {
        self.workout_calories = Some(calories);
        self
    }

    /// Activity energy for the day: wearable active energy when a snapshot
    /// exists, otherwise manual workout calories, otherwise zero
    pub fn activity_calories(&self) -> f64 {
        match (&self.health_metrics, self.workout_calories) {
            (Some(snapshot), _) => snapshot.active_energy,
            (None, Some(workout)) => workout,
            (None, None) => 0.0,
        }
    }
}
