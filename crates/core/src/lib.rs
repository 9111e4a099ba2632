//! # tablecheck-core
//!
//! Core types for tablecheck.
//!
//! This crate provides:
//! - The document model (fields, tags, table grids)
//! - Table identity (`TableIndex`)
//! - Analyzer and fetch configuration
//! - Error types

/// Analyzer and fetch configuration.
pub mod config;
/// Document model.
pub mod document;
/// Error types and result aliases.
pub mod error;
/// Page geometry.
pub mod geometry;
/// Cell and field values.
pub mod value;

pub use config::{AnalyzerConfig, AppConfig, FetchConfig, MatchMetric, OrdinalScope};
pub use document::{Document, Field, Page, TableIndex, Tag};
pub use error::{TableCheckError, TableCheckResult};
pub use geometry::BoundingBox;
pub use value::{CellValue, Grid};
