//! Filter algebra - type-specific operators grouped per dimension.
//!
//! Only string and number dimensions are filterable; timestamp, date, and
//! boolean dimensions are excluded from filtering in this model. A filter
//! group binds one filterable dimension to an AND/OR connective and an
//! ordered list of type-matching filters.

use serde::{Deserialize, Serialize};

use super::field::Dimension;
use super::types::DimensionType;

/// Filter operators over a string dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operator", rename_all = "camelCase")]
pub enum StringFilter {
    /// `sql IN (v1, v2, ...)`; empty values never match
    Equals { values: Vec<String> },
    /// `sql NOT IN (v1, v2, ...)`; empty values always match
    NotEquals { values: Vec<String> },
    /// `sql LIKE 'value%'`, with LIKE wildcards in the value escaped
    StartsWith { value: String },
    /// `sql IS NULL`
    IsNull,
    /// `sql IS NOT NULL`
    NotNull,
}

/// Filter operators over a number dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operator", rename_all = "camelCase")]
pub enum NumberFilter {
    /// `sql IN (v1, v2, ...)`; empty values never match
    Equals { values: Vec<f64> },
    /// `sql NOT IN (v1, v2, ...)`; empty values always match
    NotEquals { values: Vec<f64> },
    /// `sql > value`
    GreaterThan { value: f64 },
    /// `sql < value`
    LessThan { value: f64 },
    /// `sql IS NULL`
    IsNull,
    /// `sql IS NOT NULL`
    NotNull,
}

/// Connective joining the filters of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterGroupOperator {
    And,
    Or,
}

/// Filters over one string dimension, joined by the group operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFilterGroup {
    pub dimension: Dimension,
    pub operator: FilterGroupOperator,
    pub filters: Vec<StringFilter>,
}

/// Filters over one number dimension, joined by the group operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberFilterGroup {
    pub dimension: Dimension,
    pub operator: FilterGroupOperator,
    pub filters: Vec<NumberFilter>,
}

impl StringFilterGroup {
    pub fn new(dimension: Dimension, operator: FilterGroupOperator) -> Self {
        Self {
            dimension,
            operator,
            filters: Vec::new(),
        }
    }

    /// Append a filter to the group.
    pub fn with_filter(mut self, filter: StringFilter) -> Self {
        self.filters.push(filter);
        self
    }
}

impl NumberFilterGroup {
    pub fn new(dimension: Dimension, operator: FilterGroupOperator) -> Self {
        Self {
            dimension,
            operator,
            filters: Vec::new(),
        }
    }

    /// Append a filter to the group.
    pub fn with_filter(mut self, filter: NumberFilter) -> Self {
        self.filters.push(filter);
        self
    }
}

/// A filter group over one filterable dimension.
///
/// Groups at the top level of a metric query are always joined with AND;
/// the group's own operator joins the filters inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterGroup {
    String(StringFilterGroup),
    Number(NumberFilterGroup),
}

impl FilterGroup {
    /// The dimension this group filters.
    pub fn dimension(&self) -> &Dimension {
        match self {
            FilterGroup::String(g) => &g.dimension,
            FilterGroup::Number(g) => &g.dimension,
        }
    }

    /// The connective joining the group's filters.
    pub fn operator(&self) -> FilterGroupOperator {
        match self {
            FilterGroup::String(g) => g.operator,
            FilterGroup::Number(g) => g.operator,
        }
    }

    /// True when the group holds no filters and contributes no clause.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterGroup::String(g) => g.filters.is_empty(),
            FilterGroup::Number(g) => g.filters.is_empty(),
        }
    }
}

/// The filterable subset of dimension types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterableType {
    String,
    Number,
}

/// A dimension narrowed to its filterable subtype.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterableDimension {
    pub dimension: Dimension,
    pub filterable_type: FilterableType,
}

impl FilterableDimension {
    /// Narrow a dimension to its filterable subtype.
    ///
    /// Total over all dimension types: timestamp, date, and boolean return
    /// `None`, which is an expected outcome rather than an error.
    pub fn narrow(dimension: &Dimension) -> Option<FilterableDimension> {
        let filterable_type = match dimension.dimension_type {
            DimensionType::String => FilterableType::String,
            DimensionType::Number => FilterableType::Number,
            DimensionType::Timestamp | DimensionType::Date | DimensionType::Boolean => return None,
        };
        Some(FilterableDimension {
            dimension: dimension.clone(),
            filterable_type,
        })
    }
}

/// Filter a dimension list to the filterable subset, preserving input order.
pub fn filterable_dimensions(dimensions: &[Dimension]) -> Vec<FilterableDimension> {
    dimensions
        .iter()
        .filter_map(FilterableDimension::narrow)
        .collect()
}
