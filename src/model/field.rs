//! Field definitions - dimensions, measures, and their identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::{DimensionType, MeasureType};

/// The string id addressing a field within an explore: `"{table}_{name}"`.
///
/// Derived deterministically from the owning table and field name, so it is
/// injective as long as `(table, name)` pairs are unique across the explore.
/// Explore construction rejects collisions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// Compute the id for a field owned by `table`.
    pub fn new(table: &str, name: &str) -> Self {
        Self(format!("{}_{}", table, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FieldId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A groupable, potentially filterable attribute of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    /// Field name, unique within the owning table
    pub name: String,

    /// Name of the owning table
    pub table: String,

    /// Value type; only string and number dimensions are filterable
    #[serde(rename = "type")]
    pub dimension_type: DimensionType,

    /// Templated SQL fragment; `${TABLE}` resolves to the owning table alias
    pub sql: String,

    /// Optional display label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Optional description for documentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An aggregate computed over a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    /// Field name, unique within the owning table
    pub name: String,

    /// Name of the owning table
    pub table: String,

    /// Aggregate applied to the rendered SQL fragment
    #[serde(rename = "type")]
    pub measure_type: MeasureType,

    /// Templated SQL fragment; `${TABLE}` resolves to the owning table alias
    pub sql: String,

    /// Optional display label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Optional description for documentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Dimension {
    /// Create a new dimension.
    pub fn new(
        table: impl Into<String>,
        name: impl Into<String>,
        dimension_type: DimensionType,
        sql: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            dimension_type,
            sql: sql.into(),
            label: None,
            description: None,
        }
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The id addressing this dimension within its explore.
    pub fn field_id(&self) -> FieldId {
        FieldId::new(&self.table, &self.name)
    }
}

impl Measure {
    /// Create a new measure.
    pub fn new(
        table: impl Into<String>,
        name: impl Into<String>,
        measure_type: MeasureType,
        sql: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            measure_type,
            sql: sql.into(),
            label: None,
            description: None,
        }
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The id addressing this measure within its explore.
    pub fn field_id(&self) -> FieldId {
        FieldId::new(&self.table, &self.name)
    }
}

/// A field of an explore: a dimension or a measure.
///
/// Classification is an exhaustive match over the two variants, so adding a
/// field kind is a compile-checked decision everywhere fields are consumed.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Dimension(Dimension),
    Measure(Measure),
}

impl Field {
    /// The id addressing this field within its explore.
    pub fn field_id(&self) -> FieldId {
        match self {
            Field::Dimension(d) => d.field_id(),
            Field::Measure(m) => m.field_id(),
        }
    }

    /// Name of the owning table.
    pub fn table(&self) -> &str {
        match self {
            Field::Dimension(d) => &d.table,
            Field::Measure(m) => &m.table,
        }
    }

    /// Field name within the owning table.
    pub fn name(&self) -> &str {
        match self {
            Field::Dimension(d) => &d.name,
            Field::Measure(m) => &m.name,
        }
    }

    /// Templated SQL fragment.
    pub fn sql(&self) -> &str {
        match self {
            Field::Dimension(d) => &d.sql,
            Field::Measure(m) => &m.sql,
        }
    }

    /// True for dimensions, false for measures.
    pub fn is_dimension(&self) -> bool {
        match self {
            Field::Dimension(_) => true,
            Field::Measure(_) => false,
        }
    }

    /// Borrow the dimension, if this field is one.
    pub fn as_dimension(&self) -> Option<&Dimension> {
        match self {
            Field::Dimension(d) => Some(d),
            Field::Measure(_) => None,
        }
    }

    /// Borrow the measure, if this field is one.
    pub fn as_measure(&self) -> Option<&Measure> {
        match self {
            Field::Dimension(_) => None,
            Field::Measure(m) => Some(m),
        }
    }
}

impl From<Dimension> for Field {
    fn from(d: Dimension) -> Self {
        Field::Dimension(d)
    }
}

impl From<Measure> for Field {
    fn from(m: Measure) -> Self {
        Field::Measure(m)
    }
}
