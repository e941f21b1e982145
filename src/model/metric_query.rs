//! Metric queries - the declarative request compiled into SQL.

use serde::{Deserialize, Serialize};

use super::field::FieldId;
use super::filter::FilterGroup;

/// Sort direction for a sort entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A sort entry: a selected field and a direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortField {
    pub field_id: FieldId,
    pub direction: SortDirection,
}

impl SortField {
    pub fn ascending(field_id: impl Into<FieldId>) -> Self {
        Self {
            field_id: field_id.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field_id: impl Into<FieldId>) -> Self {
        Self {
            field_id: field_id.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// The declarative request: chosen dimensions, measures, filters, sorts, and
/// a row limit, scoped to one explore.
///
/// Filter groups apply in logical AND across the list; each group joins its
/// own filters with its own operator. A compilable query selects at least one
/// field and carries a positive limit; a missing `limit` on the wire
/// deserializes to 0 and is rejected at compile time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use = "builders have no effect until compiled"]
pub struct MetricQuery {
    /// Selected dimensions, by field id
    #[serde(default)]
    pub dimensions: Vec<FieldId>,

    /// Selected measures, by field id
    #[serde(default)]
    pub measures: Vec<FieldId>,

    /// Filter groups, ANDed together
    #[serde(default)]
    pub filters: Vec<FilterGroup>,

    /// Sort entries, applied in the order given
    #[serde(default)]
    pub sorts: Vec<SortField>,

    /// Row limit; must be positive to compile
    #[serde(default)]
    pub limit: u64,
}

impl MetricQuery {
    /// Create an empty query; select fields and set a limit before compiling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a dimension.
    pub fn with_dimension(mut self, field_id: impl Into<FieldId>) -> Self {
        self.dimensions.push(field_id.into());
        self
    }

    /// Select a measure.
    pub fn with_measure(mut self, field_id: impl Into<FieldId>) -> Self {
        self.measures.push(field_id.into());
        self
    }

    /// Add a filter group (ANDed with the others).
    pub fn with_filter(mut self, group: FilterGroup) -> Self {
        self.filters.push(group);
        self
    }

    /// Add a sort entry.
    pub fn with_sort(mut self, sort: SortField) -> Self {
        self.sorts.push(sort);
        self
    }

    /// Set the row limit.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }
}
