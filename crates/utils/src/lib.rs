//! # tablecheck-utils
//!
//! Numeric cell parsing and summary statistics shared by the analysis pipeline.

pub mod numeric;
pub mod stats;

pub use numeric::{parse_numeric, parse_numeric_str, NumericParser};
pub use stats::{mean, population_std, round_to, summarize, Summary};
