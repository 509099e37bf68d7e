//! Engine Status Tool
//!
//! Provides runtime status information about the body intelligence service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::config::AnalysisConfig;

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build number written by build.rs, 0 outside a cargo build
pub fn build_number() -> u64 {
    option_env!("BODYINTEL_BUILD_NUMBER")
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

/// Build timestamp written by build.rs
pub fn build_timestamp() -> &'static str {
    option_env!("BODYINTEL_BUILD_TIMESTAMP").unwrap_or("unknown")
}

/// Print the startup banner and the analysis defaults to stderr
pub fn print_startup_banner(config: &AnalysisConfig) {
    eprintln!("===============================================");
    eprintln!("  Body Intelligence Engine {} (build {})", VERSION, build_number());
    eprintln!("  Compiled: {}", build_timestamp());
    eprintln!(
        "  Period {}d | Rolling window {}d | Calibration {}d | TEF x{:.2}",
        config.period_days, config.rolling_window_days, config.calibration_period_days, config.tef_multiplier
    );
    eprintln!("===============================================");
}

/// Usage guide for AI assistants calling the analysis tools
pub const ENGINE_INSTRUCTIONS: &str = r#"
# Body Intelligence Engine Instructions

The engine is stateless. Every analysis tool takes the user's history as JSON
and an explicit `today` date (YYYY-MM-DD). Nothing is stored between calls.

## History Shape

```json
{
  "foods": [
    {"id": "oats", "name": "Oats", "calories": 389, "protein": 16.9,
     "carbs": 66.3, "fat": 6.9, "fiber": 10.6, "sugar": 0.9,
     "serving_size": 100, "serving_unit": "g"}
  ],
  "daily_logs": [
    {"date": "2025-04-01",
     "entries": ["oats", {"item_id": "oats", "quantity": 50, "unit": "g"}],
     "health_metrics": {"resting_energy": 1650, "active_energy": 420, "steps": 9000},
     "workout_calories": 300}
  ],
  "weigh_ins": [{"date": "2025-04-01", "weight_kg": 82.4}],
  "scans": [
    {"date": "2025-04-01", "weight_kg": 82.4, "body_fat_percent": 24.1,
     "muscle_mass_kg": 35.2, "fat_mass_kg": 19.9, "bmr": 1720}
  ]
}
```

- Food nutrition is per serving. `serving_unit` is `g`, `ml` or `oz`.
- A plain string entry means one serving of that food.
- Entry units: `serving`, `g`, `ml`, `oz`.
- Deleted foods (`deleted_at` set) and unknown ids contribute nothing.
- Activity calories come from `health_metrics.active_energy` when the
  snapshot is present, otherwise from `workout_calories`.

## Getting the Current Date

Always pass the real current date as `today`. Do not guess it. Periods are
the `period_days` days before `today`, through `today` itself.

## Tools

| Tool | Purpose |
|------|---------|
| `body_intelligence_report` | Deficit, weight response, loss quality, metabolic adaptation, confidence |
| `tdee_calibration` | Compare wearable TDEE with intake plus weight trend |
| `daily_consumption` | Total nutrition for one logged day |
| `rolling_weight_average` | Mean weight over a trailing window |
| `serving_multiplier` | Convert a quantity into servings |
| `daily_tdee` | Single-day TDEE from resting and active energy |
| `interpret_status` | Label and message for a status value |

## Reading a Report

- `response.status`: `normal`, `slow`, `fast` or `insufficient-data`.
  Score 100 means weight moved exactly as the deficit predicts.
- `quality.status`: `excellent`, `good`, `concerning` or `insufficient-data`.
  Needs two scans in the period.
- `metabolic.status`: `healthy`, `adapting` or `insufficient-data`.
  Needs two scans with BMR in the period.
- `confidence.level`: `very-low`, `low`, `medium`, `high`.
  Fewer than 7 logged days is not enough to act on.

Each section degrades to `insufficient-data` on its own. A report with no
logged days at all is still valid, with every section insufficient.

## Calibration

`tdee_calibration` needs at least 7 days that have both a wearable snapshot
and logged food, plus two weigh-ins around each end of the period. When
`calibration_needed` is true, suggest the `suggested_tef_multiplier` to the
user rather than applying it silently.
"#;

/// Runtime status of the engine service
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Analysis defaults in effect
    pub config: AnalysisConfig,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    config: AnalysisConfig,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            start_time: Instant::now(),
            config,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> EngineStatus {
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        EngineStatus {
            build_number: build_number(),
            build_timestamp: build_timestamp(),
            version: VERSION,
            config: self.config,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
