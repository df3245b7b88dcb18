//! Input/output helpers.
//!
//! - series ingest + validation (`ingest`)
//! - analysis JSON export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
