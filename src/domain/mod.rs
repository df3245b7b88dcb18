//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the input observation (`Sample`)
//! - the per-stage reports (`BasicStats`, `TrendReport`, `SeasonalityReport`, ...)
//! - the aggregate result (`SeriesAnalysis`) and its export wrapper (`AnalysisFile`)

pub mod types;

pub use types::*;
