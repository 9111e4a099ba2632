//! Orchestrates indexing, matching, aggregation and reporting for one document.

use crate::aggregator::collect_tables_values;
use crate::indexer::{index_tables, TableMap};
use crate::matcher::{match_fields, matcher_for, TagMatcher};
use crate::report::{AnalysisReport, TableStatistics, UnmatchedFields};
use indexmap::{IndexMap, IndexSet};
use tablecheck_core::{
    AnalyzerConfig, Document, Field, TableCheckError, TableCheckResult, TableIndex,
};

/// Stateful analyzer mirroring the two-step check-then-report flow.
///
/// [`TableAnalyzer::check_fields`] replaces all state from the previous run, so
/// one instance can be reused sequentially across documents.
pub struct TableAnalyzer {
    config: AnalyzerConfig,
    matcher: Box<dyn TagMatcher>,
    /// Referenced tables from the last checked document, in reference order.
    tagged_tables: Option<IndexMap<TableIndex, Field>>,
    fields_outside_of_tables: UnmatchedFields,
}

impl TableAnalyzer {
    /// Create an analyzer using the matcher named by `config.match_metric`.
    pub fn new(config: AnalyzerConfig) -> TableCheckResult<Self> {
        let matcher = matcher_for(config.match_metric);
        Self::with_matcher(config, matcher)
    }

    /// Create an analyzer with a custom similarity capability.
    pub fn with_matcher(
        config: AnalyzerConfig,
        matcher: Box<dyn TagMatcher>,
    ) -> TableCheckResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            matcher,
            tagged_tables: None,
            fields_outside_of_tables: UnmatchedFields::default(),
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Index the document's tables and match every tagged field against them.
    ///
    /// Returns the fields that fell outside all tables. Fails when the
    /// document is XBRL or has no table category at all.
    pub fn check_fields(&mut self, document: &Document) -> TableCheckResult<UnmatchedFields> {
        self.tagged_tables = None;
        self.fields_outside_of_tables = UnmatchedFields::default();

        if document.is_xbrl {
            return Err(TableCheckError::UnsupportedFormat(document.id.clone()));
        }

        let tables = document.category(&self.config.table_category_name)?;
        let indexed = index_tables(&document.id, tables, self.config.ordinal_scope);
        let summary = match_fields(
            document,
            &indexed,
            self.matcher.as_ref(),
            self.config.similarity_threshold,
        );

        tracing::info!(
            "Document {}: {} tables indexed, {} referenced, {} categories outside tables",
            document.id,
            indexed.len(),
            summary.referenced.len(),
            summary.unmatched.len()
        );

        let tagged_tables = summary
            .referenced
            .iter()
            .filter_map(|idx| indexed.get(idx).map(|table| (*idx, (*table).clone())))
            .collect();
        self.tagged_tables = Some(tagged_tables);
        self.fields_outside_of_tables = summary.unmatched;

        Ok(self.fields_outside_of_tables.clone())
    }

    /// Mean and standard deviation of every referenced table with numeric content.
    pub fn table_results(&self) -> TableCheckResult<TableStatistics> {
        let tagged_tables = self.tagged_tables.as_ref().ok_or(TableCheckError::NotChecked)?;

        let tables: TableMap<'_> = tagged_tables.iter().map(|(idx, table)| (*idx, table)).collect();
        let referenced: IndexSet<TableIndex> = tagged_tables.keys().copied().collect();
        let table_values =
            collect_tables_values(&referenced, &tables, &self.config.ignored_columns);

        Ok(TableStatistics::from_table_values(&table_values))
    }

    /// Run both steps and bundle the reports.
    pub fn analyze(&mut self, document: &Document) -> TableCheckResult<AnalysisReport> {
        let unmatched_fields = self.check_fields(document)?;
        let table_statistics = self.table_results()?;
        Ok(AnalysisReport {
            table_statistics,
            unmatched_fields,
        })
    }
}

/// One-shot analysis of a document.
pub fn analyze(document: &Document, config: &AnalyzerConfig) -> TableCheckResult<AnalysisReport> {
    TableAnalyzer::new(config.clone())?.analyze(document)
}
