//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced in-memory by the analysis pipeline
//! - exported to JSON
//! - handed to whatever layer turns them into prose or chart labels

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Input file format for a series.
///
/// `Auto` picks by file extension (`.json` is JSON, anything else CSV).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Auto,
    Csv,
    Json,
}

/// One observation of an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub date: NaiveDate,
    pub value: f64,
}

impl Sample {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Descriptive snapshot of a whole series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicStats {
    pub count: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_value: f64,
    pub end_value: f64,
    pub min_value: f64,
    /// Date of the first array position holding the minimum.
    pub min_date: NaiveDate,
    pub max_value: f64,
    /// Date of the first array position holding the maximum.
    pub max_date: NaiveDate,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// `std_dev / mean × 100`; 0 when the mean is exactly 0.
    pub coefficient_of_variation: f64,
    pub net_change: f64,
    /// `net_change / |start_value| × 100`; 0 when the start value is exactly 0.
    pub percentage_change: f64,
    pub time_span_days: i64,
    pub time_span_months: i32,
}

/// Overall direction of the fitted trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
    Volatile,
    /// Reserved; no detector produces it yet.
    Cyclical,
}

impl TrendDirection {
    pub fn label(self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
            TrendDirection::Volatile => "volatile",
            TrendDirection::Cyclical => "cyclical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStrength {
    Strong,
    Moderate,
    Weak,
}

impl TrendStrength {
    pub fn label(self) -> &'static str {
        match self {
            TrendStrength::Strong => "strong",
            TrendStrength::Moderate => "moderate",
            TrendStrength::Weak => "weak",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Significance {
    High,
    Medium,
    Low,
}

impl Significance {
    pub fn label(self) -> &'static str {
        match self {
            Significance::High => "high",
            Significance::Medium => "medium",
            Significance::Low => "low",
        }
    }
}

/// A contiguous chunk of the series described on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSegment {
    /// `"MMM YYYY - MMM YYYY"`.
    pub period: String,
    pub trend: String,
    /// Percent change first → last within the chunk.
    ///
    /// `None` when the chunk starts at exactly 0 and ends elsewhere, where the
    /// relative change is undefined.
    pub change_pct: Option<f64>,
    pub significance: Significance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub direction: TrendDirection,
    pub strength: TrendStrength,
    /// R² of the linear fit, in `[0, 1]`.
    pub confidence: f64,
    pub segments: Vec<TrendSegment>,
}

impl TrendReport {
    /// Report used when there is nothing to fit.
    pub fn trivial() -> Self {
        Self {
            direction: TrendDirection::Stable,
            strength: TrendStrength::Weak,
            confidence: 0.0,
            segments: Vec::new(),
        }
    }
}

/// Kind of recurring calendar pattern.
///
/// Only `Monthly` is produced today; the others are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalPattern {
    Quarterly,
    Annual,
    Monthly,
}

impl SeasonalPattern {
    pub fn label(self) -> &'static str {
        match self {
            SeasonalPattern::Quarterly => "quarterly",
            SeasonalPattern::Annual => "annual",
            SeasonalPattern::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityReport {
    pub has_seasonality: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<SeasonalPattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityLevel {
    High,
    Medium,
    Low,
}

impl VolatilityLevel {
    pub fn label(self) -> &'static str {
        match self {
            VolatilityLevel::High => "high",
            VolatilityLevel::Medium => "medium",
            VolatilityLevel::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityPeriod {
    pub period: String,
    /// Coefficient of variation of the period, in percent.
    pub volatility: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityReport {
    pub level: VolatilityLevel,
    /// Overall coefficient of variation, in percent.
    pub coefficient: f64,
    pub periods: Vec<VolatilityPeriod>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierKind {
    Peak,
    Trough,
    Anomaly,
}

impl OutlierKind {
    pub fn label(self) -> &'static str {
        match self {
            OutlierKind::Peak => "peak",
            OutlierKind::Trough => "trough",
            OutlierKind::Anomaly => "anomaly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlier {
    pub date: NaiveDate,
    pub value: f64,
    pub kind: OutlierKind,
    pub significance: f64,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    /// Most significant flags first, at most five.
    pub outliers: Vec<Outlier>,
    /// True when any flag was raised, including ones cut from `outliers`.
    pub has_significant_outliers: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightSet {
    pub correlation: Vec<String>,
    pub economic_context: Vec<String>,
}

/// Everything the pipeline knows about one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesAnalysis {
    pub basic_stats: BasicStats,
    pub trend: TrendReport,
    pub seasonality: SeasonalityReport,
    pub volatility: VolatilityReport,
    pub outliers: OutlierReport,
    pub insights: InsightSet,
}

/// A saved analysis file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisFile {
    pub tool: String,
    pub indicator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub sample_count: usize,
    pub analysis: SeriesAnalysis,
}
