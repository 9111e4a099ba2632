//! Assigns stable `(page, ordinal)` identities to tagged tables.

use indexmap::IndexMap;
use std::collections::HashMap;
use tablecheck_core::{Field, OrdinalScope, TableIndex};

/// Tagged tables keyed by their index, in document order.
pub type TableMap<'a> = IndexMap<TableIndex, &'a Field>;

/// Index every table that carries at least one tag.
///
/// Tables are visited in the order given. The page number comes from each
/// table's first tag; the ordinal either restarts per page or counts across
/// the whole document depending on `scope`. Untagged tables are skipped.
pub fn index_tables<'a>(document_id: &str, tables: &'a [Field], scope: OrdinalScope) -> TableMap<'a> {
    let mut indexed = TableMap::with_capacity(tables.len());
    let mut per_page: HashMap<u32, usize> = HashMap::new();
    let mut next_global = 0usize;

    for table in tables {
        let Some(tag) = table.first_tag() else {
            tracing::warn!("Table has no tags for {}", document_id);
            continue;
        };
        let page_number = tag.page_number();

        let ordinal = match scope {
            OrdinalScope::PerPage => {
                let counter = per_page.entry(page_number).or_insert(0);
                let ordinal = *counter;
                *counter += 1;
                ordinal
            }
            OrdinalScope::Global => {
                let ordinal = next_global;
                next_global += 1;
                ordinal
            }
        };

        indexed.insert(TableIndex::new(page_number, ordinal), table);
    }

    tracing::debug!("Indexed {} of {} tables for {}", indexed.len(), tables.len(), document_id);
    indexed
}
