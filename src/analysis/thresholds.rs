//! Fixed cut-offs used by the analysis stages.
//!
//! Percent-valued thresholds are expressed in percent (`30.0` means 30 %);
//! ratios are plain fractions.

// --- Series ---

/// Smallest series the pipeline will analyze.
pub const MIN_SAMPLES: usize = 2;

// --- Trend ---

/// `|slope|` at or below this is a flat trend.
pub const STABLE_SLOPE: f64 = 0.01;
/// Residual std-dev over `|mean|`, in percent, above which the trend is "volatile".
pub const VOLATILE_RESIDUAL_PCT: f64 = 30.0;
pub const STRONG_R_SQUARED: f64 = 0.6;
/// `|slope|` must exceed this fraction of `|mean|` for a strong trend.
pub const STRONG_SLOPE_RATIO: f64 = 0.1;
pub const MODERATE_R_SQUARED: f64 = 0.3;
pub const MODERATE_SLOPE_RATIO: f64 = 0.05;

// --- Trend segments ---

pub const SEGMENT_MIN_SERIES: usize = 3;
pub const SEGMENT_MIN_SIZE: usize = 3;
pub const SEGMENT_MAX_SIZE: usize = 12;
/// Trailing chunks shorter than this are dropped.
pub const SEGMENT_MIN_TAIL: usize = 2;
pub const SEGMENT_HIGH_PCT: f64 = 20.0;
pub const SEGMENT_MEDIUM_PCT: f64 = 10.0;
pub const SEGMENT_LOW_PCT: f64 = 3.0;

// --- Seasonality ---

/// Two full yearly cycles of monthly data.
pub const SEASONALITY_MIN_SAMPLES: usize = 24;
pub const MONTHS_PER_YEAR: usize = 12;
/// Dispersion of month-of-year averages over their mean.
pub const SEASONAL_STRENGTH: f64 = 0.15;

// --- Volatility ---

pub const VOLATILITY_HIGH_CV: f64 = 25.0;
pub const VOLATILITY_MEDIUM_CV: f64 = 10.0;
/// Series shorter than this are not split into halves.
pub const HALF_SPLIT_MIN_SAMPLES: usize = 6;
pub const PERIOD_MIN_SAMPLES: usize = 2;

// --- Outliers ---

pub const IQR_MULTIPLIER: f64 = 1.5;
/// Point-to-point change, in percent, that flags an anomaly.
pub const ANOMALY_JUMP_PCT: f64 = 50.0;
pub const MAX_REPORTED_OUTLIERS: usize = 5;

// --- Insights ---

pub const SPAN_YEARS_MONTHS: i32 = 24;
pub const SPAN_MONTHS_MONTHS: i32 = 6;
/// Growth is only annualized over at least a year of data.
pub const GROWTH_MIN_MONTHS: i32 = 12;
pub const GROWTH_NOTABLE_PCT: f64 = 3.0;
pub const HIGH_STABILITY_CV: f64 = 5.0;
pub const NOTABLE_VOLATILITY_CV: f64 = 20.0;
pub const SUBSTANTIAL_CHANGE_PCT: f64 = 30.0;
pub const SUBSTANTIAL_CHANGE_MIN_MONTHS: i32 = 12;
