//! `series-insights` library crate.
//!
//! The binary (`insight`) is a thin wrapper around this library so that:
//!
//! - the analysis pipeline is testable without spawning processes
//! - callers such as HTTP handlers or prompt builders can use `analysis::analyze` directly
//! - loaders, formatting and the CLI stay out of the statistics code

pub mod analysis;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod report;
