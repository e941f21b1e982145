//! Explore definitions - the join graph and its flat field namespace.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::field::{Dimension, Field, FieldId, Measure};
use super::table::Table;
use crate::compile::CompileResult;
use crate::validation;

/// A declared join from the base table to another table.
///
/// `sql_on` is a templated condition; `${table_name}` placeholders resolve to
/// the aliases of tables in the explore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExploreJoin {
    /// Name of the joined table; must key into the explore's `tables`
    pub table: String,

    /// Templated join condition (e.g. `${orders}.customer_id = ${customers}.id`)
    pub sql_on: String,
}

impl ExploreJoin {
    pub fn new(table: impl Into<String>, sql_on: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            sql_on: sql_on.into(),
        }
    }
}

/// A named, queryable join graph: one base table plus declared joins.
///
/// The fields of all tables form one flat namespace addressed by [`FieldId`].
/// An explore assembled with [`Explore::new`] / [`Explore::with_join`] must be
/// finished with [`Explore::validated`]; explores arriving through serde must
/// be passed through [`validation::validate_explore`] before compilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explore {
    /// Explore name (the addressable unit queries are scoped to)
    pub name: String,

    /// Optional display label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Name of the base table; always present in the FROM clause
    pub base_table: String,

    /// Declared joins, in declaration order
    pub joined_tables: Vec<ExploreJoin>,

    /// All tables of the explore, keyed by table name; includes the base
    /// table and every joined table
    pub tables: HashMap<String, Table>,
}

impl Explore {
    /// Start assembling an explore rooted at a base table.
    pub fn new(name: impl Into<String>, base_table: Table) -> Self {
        let base_name = base_table.name.clone();
        let mut tables = HashMap::new();
        tables.insert(base_name.clone(), base_table);
        Self {
            name: name.into(),
            label: None,
            base_table: base_name,
            joined_tables: Vec::new(),
            tables,
        }
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Declare a LEFT JOIN to `table` with a templated ON condition.
    pub fn with_join(mut self, table: Table, sql_on: impl Into<String>) -> Self {
        self.joined_tables
            .push(ExploreJoin::new(table.name.clone(), sql_on));
        self.tables.insert(table.name.clone(), table);
        self
    }

    /// Validate structure and field-id uniqueness, returning the explore.
    pub fn validated(self) -> CompileResult<Self> {
        validation::validate_explore(&self)?;
        Ok(self)
    }

    /// Get a table by name.
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// All fields across all tables, as one flat collection.
    ///
    /// Collection order is unspecified; fields are addressed by id, not
    /// position.
    pub fn fields(&self) -> Vec<Field> {
        self.tables.values().flat_map(Table::fields).collect()
    }

    /// All dimensions across all tables.
    pub fn dimensions(&self) -> Vec<Dimension> {
        self.tables
            .values()
            .flat_map(|t| t.dimensions.values().cloned())
            .collect()
    }

    /// All measures across all tables.
    pub fn measures(&self) -> Vec<Measure> {
        self.tables
            .values()
            .flat_map(|t| t.measures.values().cloned())
            .collect()
    }

    /// Resolve a field id to the field it addresses.
    pub fn find_field(&self, field_id: &FieldId) -> Option<Field> {
        self.find_dimension(field_id)
            .cloned()
            .map(Field::Dimension)
            .or_else(|| self.find_measure(field_id).cloned().map(Field::Measure))
    }

    /// Resolve a field id to a dimension.
    pub fn find_dimension(&self, field_id: &FieldId) -> Option<&Dimension> {
        self.tables
            .values()
            .flat_map(|t| t.dimensions.values())
            .find(|d| &d.field_id() == field_id)
    }

    /// Resolve a field id to a measure.
    pub fn find_measure(&self, field_id: &FieldId) -> Option<&Measure> {
        self.tables
            .values()
            .flat_map(|t| t.measures.values())
            .find(|m| &m.field_id() == field_id)
    }
}
