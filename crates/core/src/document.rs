//! In-memory document model as delivered by the document service.
//!
//! A document groups its extracted entities by category ("python name"). Every
//! entity is a [`Field`]; entities under the table category are tables whose
//! tags carry the detected cell grid.

use crate::error::{TableCheckError, TableCheckResult};
use crate::geometry::BoundingBox;
use crate::value::{CellValue, Grid};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A page reference carried by a tag.
///
/// The service also sends the page size; only the number takes part in
/// matching, so the other keys are ignored on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Page {
    pub page_number: u32,
}

impl Page {
    pub fn new(page_number: u32) -> Self {
        Self { page_number }
    }
}

/// A region annotation linking an extracted value to a location on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub page: Page,
    #[serde(flatten)]
    pub bbox: BoundingBox,
    /// Cell contents, present on table tags only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub df: Option<Grid>,
}

impl Tag {
    pub fn new(page_number: u32, bbox: BoundingBox) -> Self {
        Self {
            page: Page::new(page_number),
            bbox,
            df: None,
        }
    }

    /// Attach a cell grid, turning this into a table tag.
    #[must_use]
    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.df = Some(grid);
        self
    }

    pub fn page_number(&self) -> u32 {
        self.page.page_number
    }
}

/// An extracted entity: a named field value or a detected table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub value: CellValue,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Field {
    pub fn new(value: impl Into<CellValue>, tags: Vec<Tag>) -> Self {
        Self {
            value: value.into(),
            tags,
        }
    }

    /// The only tag that takes part in matching and aggregation.
    pub fn first_tag(&self) -> Option<&Tag> {
        self.tags.first()
    }
}

/// A fetched document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub is_xbrl: bool,
    /// Category name to instances, in document order.
    #[serde(default)]
    pub x: IndexMap<String, Vec<Field>>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Append an instance under `category`, creating the category if needed.
    pub fn push(&mut self, category: impl Into<String>, field: Field) {
        self.x.entry(category.into()).or_default().push(field);
    }

    /// Look up a category, failing when the key does not exist at all.
    pub fn category(&self, name: &str) -> TableCheckResult<&[Field]> {
        self.x
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| TableCheckError::missing_category(name, &self.id))
    }

    pub fn from_json_str(json: &str) -> TableCheckResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> TableCheckResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

/// Stable identity of a tagged table: page number plus ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableIndex {
    pub page_number: u32,
    pub ordinal: usize,
}

impl TableIndex {
    pub fn new(page_number: u32, ordinal: usize) -> Self {
        Self {
            page_number,
            ordinal,
        }
    }
}

impl fmt::Display for TableIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.page_number, self.ordinal)
    }
}
