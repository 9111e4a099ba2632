//! Numeric extraction from referenced tables.

use crate::indexer::TableMap;
use indexmap::{IndexMap, IndexSet};
use tablecheck_core::{Field, Grid, TableIndex};
use tablecheck_utils::parse_numeric;

/// Result of collecting one table's values.
#[derive(Debug, Clone, PartialEq)]
pub enum TableOutcome {
    Values(Vec<f64>),
    /// Nothing in the table parsed as a number.
    Empty,
}

/// Every parseable cell, row-major, skipping the given column positions.
pub fn extract_numeric_values(grid: &Grid, ignored_columns: &[usize]) -> Vec<f64> {
    let mut values = Vec::new();
    for row in grid {
        for (col, cell) in row.iter().enumerate() {
            if ignored_columns.contains(&col) {
                continue;
            }
            if let Some(value) = parse_numeric(cell) {
                values.push(value);
            }
        }
    }
    values
}

/// Collect a table's values from the grid of its first tag.
pub fn collect_table(table: &Field, ignored_columns: &[usize]) -> TableOutcome {
    let values = table
        .first_tag()
        .and_then(|tag| tag.df.as_ref())
        .map(|grid| extract_numeric_values(grid, ignored_columns))
        .unwrap_or_default();

    if values.is_empty() {
        TableOutcome::Empty
    } else {
        TableOutcome::Values(values)
    }
}

/// Values for every referenced table that yields at least one number,
/// in reference order.
pub fn collect_tables_values(
    referenced: &IndexSet<TableIndex>,
    tables: &TableMap<'_>,
    ignored_columns: &[usize],
) -> IndexMap<TableIndex, Vec<f64>> {
    let mut table_values = IndexMap::with_capacity(referenced.len());

    for idx in referenced {
        let Some(table) = tables.get(idx) else {
            continue;
        };
        match collect_table(table, ignored_columns) {
            TableOutcome::Values(values) => {
                table_values.insert(*idx, values);
            }
            TableOutcome::Empty => {
                tracing::warn!("Couldn't parse any value for table, idx: {}", idx);
            }
        }
    }

    table_values
}
