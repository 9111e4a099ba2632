//! Field-to-table association.
//!
//! Each tagged field is compared against the indexed tables in index order
//! using only the first tag on either side. The first table whose similarity
//! reaches the threshold wins; later tables are never consulted even if they
//! would score higher.

use crate::indexer::TableMap;
use crate::report::UnmatchedFields;
use indexmap::IndexSet;
use tablecheck_core::{CellValue, Document, Field, MatchMetric, TableIndex, Tag};

/// Similarity capability between a field tag and a table tag.
pub trait TagMatcher {
    /// Score in `[0, 1]`.
    fn similarity(&self, field: &Tag, table: &Tag) -> f64;

    /// A score equal to the threshold counts as a match.
    fn matches(&self, field: &Tag, table: &Tag, threshold: f64) -> bool {
        self.similarity(field, table) >= threshold
    }
}

/// Share of the field's box that lies inside the table's box.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapMatcher;

impl TagMatcher for OverlapMatcher {
    fn similarity(&self, field: &Tag, table: &Tag) -> f64 {
        if field.page_number() != table.page_number() {
            return 0.0;
        }
        field.bbox.intersection_over_self(&table.bbox)
    }
}

/// Intersection over union of the two boxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct IouMatcher;

impl TagMatcher for IouMatcher {
    fn similarity(&self, field: &Tag, table: &Tag) -> f64 {
        if field.page_number() != table.page_number() {
            return 0.0;
        }
        field.bbox.intersection_over_union(&table.bbox)
    }
}

/// Matcher implementing the configured metric.
pub fn matcher_for(metric: MatchMetric) -> Box<dyn TagMatcher> {
    match metric {
        MatchMetric::Overlap => Box::new(OverlapMatcher),
        MatchMetric::Iou => Box::new(IouMatcher),
    }
}

/// Result of evaluating one field instance.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome {
    /// The field has no tags and is not evaluated.
    Untagged,
    /// The first matching table.
    Matched(TableIndex),
    /// No table matched; page of the field's first tag and its value.
    Unmatched { page_number: u32, value: CellValue },
}

/// Evaluate a single field against the indexed tables.
pub fn match_field(
    field: &Field,
    tables: &TableMap<'_>,
    matcher: &dyn TagMatcher,
    threshold: f64,
) -> FieldOutcome {
    let Some(field_tag) = field.first_tag() else {
        return FieldOutcome::Untagged;
    };

    let hit = tables.iter().find_map(|(idx, table)| {
        let table_tag = table.first_tag()?;
        matcher
            .matches(field_tag, table_tag, threshold)
            .then_some(*idx)
    });

    match hit {
        Some(idx) => FieldOutcome::Matched(idx),
        None => FieldOutcome::Unmatched {
            page_number: field_tag.page_number(),
            value: field.value.clone(),
        },
    }
}

/// Referenced tables and unmatched fields for a whole document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchSummary {
    /// Tables matched by at least one field, in first-reference order.
    pub referenced: IndexSet<TableIndex>,
    pub unmatched: UnmatchedFields,
}

/// Evaluate every category in document order, the table category included.
///
/// A tagged table scores against its own tag, so it is referenced by itself
/// unless an earlier table already absorbs it.
pub fn match_fields(
    document: &Document,
    tables: &TableMap<'_>,
    matcher: &dyn TagMatcher,
    threshold: f64,
) -> MatchSummary {
    let mut summary = MatchSummary::default();

    for (category, fields) in &document.x {
        for field in fields {
            match match_field(field, tables, matcher, threshold) {
                FieldOutcome::Untagged => {}
                FieldOutcome::Matched(idx) => {
                    summary.referenced.insert(idx);
                }
                FieldOutcome::Unmatched { page_number, value } => {
                    tracing::warn!(
                        "The field under '{}' python name with '{}' value on page {} is not in any table",
                        category,
                        value,
                        page_number
                    );
                    summary.unmatched.record(category, page_number, value);
                }
            }
        }
    }

    summary
}
