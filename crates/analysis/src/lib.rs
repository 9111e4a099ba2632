//! # tablecheck-analysis
//!
//! Associates extracted document fields with detected tables and summarises
//! the numeric content of every table that some field falls into.
//!
//! Pipeline: [`indexer`] → [`matcher`] → [`aggregator`] → [`report`], driven
//! by [`TableAnalyzer`].

pub mod aggregator;
pub mod analyzer;
pub mod indexer;
pub mod matcher;
pub mod report;

pub use aggregator::{collect_table, collect_tables_values, extract_numeric_values, TableOutcome};
pub use analyzer::{analyze, TableAnalyzer};
pub use indexer::{index_tables, TableMap};
pub use matcher::{
    match_field, match_fields, matcher_for, FieldOutcome, IouMatcher, MatchSummary,
    OverlapMatcher, TagMatcher,
};
pub use report::{AnalysisReport, TableStatRow, TableStatistics, UnmatchedFields};
