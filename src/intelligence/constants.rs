//! Physiological constants and thresholds used by the analyses

// ============================================================================
// Energy balance
// ============================================================================

/// Energy content of one kilogram of body weight change, kcal
pub const KCAL_PER_KG: f64 = 7700.0;

/// Expected weight change below this is too small to score a response against
pub const MIN_EXPECTED_LOSS_KG: f64 = 0.1;

/// Response scores inside this band are a normal response
pub const RESPONSE_NORMAL_MIN: i64 = 80;
pub const RESPONSE_NORMAL_MAX: i64 = 120;

// ============================================================================
// Composition quality
// ============================================================================

/// Weight changes within this band count as stable
pub const WEIGHT_NOISE_FLOOR_KG: f64 = 0.1;

/// Composition changes below this are negligible
pub const COMPOSITION_NOISE_FLOOR_KG: f64 = 0.1;

/// Fat share of weight lost needed for each quality tier, percent
pub const LOSS_EXCELLENT_EFFICIENCY: u8 = 80;
pub const LOSS_GOOD_EFFICIENCY: u8 = 60;

/// Muscle share of weight gained needed for each quality tier, percent
pub const GAIN_EXCELLENT_EFFICIENCY: u8 = 70;
pub const GAIN_GOOD_EFFICIENCY: u8 = 50;

// ============================================================================
// Metabolic adaptation
// ============================================================================

/// Expected BMR drop per kilogram lost, kcal/day
pub const BMR_DROP_PER_KG: f64 = 7.0;

/// Weight loss needed before BMR drift is judged against the expected drop
pub const METABOLIC_LOSS_THRESHOLD_KG: f64 = 0.2;

/// BMR drop beyond the expected one that is still within measurement noise
pub const UNEXPECTED_DROP_TOLERANCE: f64 = 30.0;

/// Margin below the expected BMR that signals adaptation
pub const ADAPTATION_MARGIN: f64 = 50.0;

/// BMR drift tolerated while weight is not dropping
pub const STABLE_BMR_TOLERANCE: f64 = 30.0;

// ============================================================================
// Confidence
// ============================================================================

pub const CONFIDENCE_LOW_DAYS: u32 = 3;
pub const CONFIDENCE_MEDIUM_DAYS: u32 = 7;
pub const CONFIDENCE_HIGH_DAYS: u32 = 14;

// ============================================================================
// Weight averaging and TDEE calibration
// ============================================================================

/// Samples needed inside a window before a rolling average is reported
pub const MIN_ROLLING_SAMPLES: usize = 2;

pub const DEFAULT_PERIOD_DAYS: u32 = 30;
pub const DEFAULT_ROLLING_WINDOW_DAYS: u32 = 7;
pub const DEFAULT_CALIBRATION_PERIOD_DAYS: u32 = 14;

/// Thermic effect of food applied to wearable energy
pub const DEFAULT_TEF_MULTIPLIER: f64 = 1.10;
pub const MIN_TEF_MULTIPLIER: f64 = 1.0;
pub const MAX_TEF_MULTIPLIER: f64 = 1.25;

/// Qualifying days needed for an observed TDEE
pub const MIN_CALIBRATION_DAYS: u32 = 7;
pub const CALIBRATION_MEDIUM_DAYS: u32 = 10;
pub const CALIBRATION_HIGH_DAYS: u32 = 14;

/// Relative gap between wearable and observed TDEE that calls for recalibration
pub const CALIBRATION_TOLERANCE: f64 = 0.10;
