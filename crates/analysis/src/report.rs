//! The two tabular outputs of an analysis run.

use arrow::array::{
    Array, ArrayRef, Float64Array, ListBuilder, StringArray, StringBuilder, UInt32Array, UInt32Builder,
    UInt64Array,
};
use arrow::datatypes::{DataType, Field as ArrowField, Schema};
use arrow::record_batch::RecordBatch;
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;
use tablecheck_core::{CellValue, TableCheckError, TableCheckResult, TableIndex};
use tablecheck_utils::summarize;

/// Statistics for one aggregated table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableStatRow {
    pub mean: f64,
    pub std: f64,
    #[serde(rename = "page number")]
    pub page_number: u32,
    #[serde(rename = "table index")]
    pub table_index: usize,
}

/// Per-table statistics, in aggregation order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct TableStatistics {
    pub rows: Vec<TableStatRow>,
}

impl TableStatistics {
    /// Build one row per table from its parsed values.
    ///
    /// Tables with no values are left out.
    pub fn from_table_values(table_values: &IndexMap<TableIndex, Vec<f64>>) -> Self {
        let rows = table_values
            .iter()
            .filter_map(|(idx, values)| {
                let summary = summarize(values)?;
                Some(TableStatRow {
                    mean: summary.mean,
                    std: summary.std,
                    page_number: idx.page_number,
                    table_index: idx.ordinal,
                })
            })
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Columns `mean, std, page number, table index`.
    pub fn to_record_batch(&self) -> TableCheckResult<RecordBatch> {
        let schema = Arc::new(Schema::new(vec![
            ArrowField::new("mean", DataType::Float64, false),
            ArrowField::new("std", DataType::Float64, false),
            ArrowField::new("page number", DataType::UInt32, false),
            ArrowField::new("table index", DataType::UInt64, false),
        ]));

        let columns: Vec<ArrayRef> = vec![
            Arc::new(Float64Array::from_iter_values(self.rows.iter().map(|r| r.mean))),
            Arc::new(Float64Array::from_iter_values(self.rows.iter().map(|r| r.std))),
            Arc::new(UInt32Array::from_iter_values(
                self.rows.iter().map(|r| r.page_number),
            )),
            Arc::new(UInt64Array::from_iter_values(
                self.rows.iter().map(|r| r.table_index as u64),
            )),
        ];

        RecordBatch::try_new(schema, columns).map_err(|e| TableCheckError::Report(e.to_string()))
    }
}

/// Field instances that fell outside every table, grouped by category.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct UnmatchedFields {
    pub entries: IndexMap<String, Vec<(u32, CellValue)>>,
}

impl UnmatchedFields {
    /// Append one instance under its category, keeping insertion order.
    pub fn record(&mut self, category: &str, page_number: u32, value: CellValue) {
        if let Some(entries) = self.entries.get_mut(category) {
            entries.push((page_number, value));
        } else {
            self.entries
                .insert(category.to_string(), vec![(page_number, value)]);
        }
    }

    pub fn get(&self, category: &str) -> Option<&[(u32, CellValue)]> {
        self.entries.get(category).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of categories with at least one unmatched instance.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Columns `python_name, page, field_value`; one row per category with
    /// list-valued `page` and `field_value` cells aligned by position.
    pub fn to_record_batch(&self) -> TableCheckResult<RecordBatch> {
        let mut pages = ListBuilder::new(UInt32Builder::new());
        let mut values = ListBuilder::new(StringBuilder::new());

        for entries in self.entries.values() {
            for (page, value) in entries {
                pages.values().append_value(*page);
                values.values().append_value(value.to_string());
            }
            pages.append(true);
            values.append(true);
        }

        let names = StringArray::from_iter_values(self.entries.keys());
        let pages = pages.finish();
        let values = values.finish();

        let schema = Arc::new(Schema::new(vec![
            ArrowField::new("python_name", DataType::Utf8, false),
            ArrowField::new("page", pages.data_type().clone(), false),
            ArrowField::new("field_value", values.data_type().clone(), false),
        ]));

        let columns: Vec<ArrayRef> = vec![Arc::new(names), Arc::new(pages), Arc::new(values)];
        RecordBatch::try_new(schema, columns).map_err(|e| TableCheckError::Report(e.to_string()))
    }
}

/// Both reports of one run.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AnalysisReport {
    pub table_statistics: TableStatistics,
    pub unmatched_fields: UnmatchedFields,
}
