//! Mathematical utilities: descriptive statistics and least squares.

pub mod descriptive;
pub mod ols;

pub use descriptive::*;
pub use ols::*;
