//! Table definitions - a warehouse relation and the fields it owns.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::field::{Dimension, Field, Measure};
use super::types::{DimensionType, MeasureType};

/// A named unit corresponding to a warehouse relation.
///
/// Owns its dimensions and measures, keyed by field name. Field names are
/// unique within a table by construction of the maps; uniqueness of the
/// derived field ids across a whole explore is checked when the explore is
/// built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Logical name used in the model (e.g. "orders")
    pub name: String,

    /// Physical relation in the warehouse (e.g. "jaffle.orders"), emitted
    /// as written
    pub sql_table: String,

    /// Dimensions owned by this table, keyed by field name
    pub dimensions: HashMap<String, Dimension>,

    /// Measures owned by this table, keyed by field name
    pub measures: HashMap<String, Measure>,
}

impl Table {
    /// Create a new table with no fields.
    pub fn new(name: impl Into<String>, sql_table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_table: sql_table.into(),
            dimensions: HashMap::new(),
            measures: HashMap::new(),
        }
    }

    /// Add a dimension owned by this table.
    pub fn with_dimension(
        mut self,
        name: impl Into<String>,
        dimension_type: DimensionType,
        sql: impl Into<String>,
    ) -> Self {
        let name = name.into();
        self.dimensions.insert(
            name.clone(),
            Dimension::new(self.name.clone(), name, dimension_type, sql),
        );
        self
    }

    /// Add a measure owned by this table.
    pub fn with_measure(
        mut self,
        name: impl Into<String>,
        measure_type: MeasureType,
        sql: impl Into<String>,
    ) -> Self {
        let name = name.into();
        self.measures.insert(
            name.clone(),
            Measure::new(self.name.clone(), name, measure_type, sql),
        );
        self
    }

    /// Get a dimension by name.
    pub fn get_dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.get(name)
    }

    /// Get a measure by name.
    pub fn get_measure(&self, name: &str) -> Option<&Measure> {
        self.measures.get(name)
    }

    /// All fields owned by this table, dimensions then measures.
    pub fn fields(&self) -> Vec<Field> {
        self.dimensions
            .values()
            .cloned()
            .map(Field::Dimension)
            .chain(self.measures.values().cloned().map(Field::Measure))
            .collect()
    }
}
