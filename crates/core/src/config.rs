//! Analyzer and fetch configuration.
//!
//! Both structures deserialize from YAML; every key is optional and falls back
//! to the defaults below.

use crate::error::{TableCheckError, TableCheckResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default category holding the detected tables.
pub const DEFAULT_TABLE_CATEGORY: &str = "tables__table";

/// Default minimum similarity for a field tag to fall inside a table tag.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.5;

/// Default request timeout for the document service.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How table ordinals are numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrdinalScope {
    /// Ordinals restart at zero on every page.
    #[default]
    PerPage,
    /// Ordinals keep counting across the whole document.
    Global,
}

/// Similarity measure used to decide whether a field lies in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMetric {
    /// Share of the field's box covered by the table's box.
    #[default]
    Overlap,
    /// Intersection over union of the two boxes.
    Iou,
}

/// Options for a table analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub table_category_name: String,
    pub similarity_threshold: f64,
    pub ordinal_scope: OrdinalScope,
    pub match_metric: MatchMetric,
    /// Column positions skipped when collecting numeric cell values.
    pub ignored_columns: Vec<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            table_category_name: DEFAULT_TABLE_CATEGORY.to_string(),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            ordinal_scope: OrdinalScope::default(),
            match_metric: MatchMetric::default(),
            ignored_columns: Vec::new(),
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> TableCheckResult<()> {
        if self.table_category_name.trim().is_empty() {
            return Err(TableCheckError::config("table category name is empty"));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(TableCheckError::config(format!(
                "similarity threshold {} is outside [0, 1]",
                self.similarity_threshold
            )));
        }
        Ok(())
    }
}

/// Connection settings for the document service, passed explicitly per client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub api_host: String,
    pub auth_token: String,
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_host: String::new(),
            auth_token: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl FetchConfig {
    pub fn new(api_host: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            api_host: api_host.into(),
            auth_token: auth_token.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> TableCheckResult<()> {
        if self.api_host.trim().is_empty() {
            return Err(TableCheckError::config("API host is required"));
        }
        if self.auth_token.trim().is_empty() {
            return Err(TableCheckError::config("auth token is required"));
        }
        Ok(())
    }
}

/// Top-level configuration file layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalyzerConfig,
    pub api: FetchConfig,
}

impl AppConfig {
    pub fn from_yaml_str(yaml: &str) -> TableCheckResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.analysis.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> TableCheckResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}
