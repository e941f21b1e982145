//! Structural validation of explores.
//!
//! Runs at construction time (or after deserialization), before any query is
//! compiled against the explore. Checks are fail-fast: the first violation is
//! returned. Tables are scanned in sorted-name order so the reported
//! violation is deterministic regardless of map iteration order.

use std::collections::HashSet;

use crate::compile::{CompileError, CompileResult};
use crate::model::explore::Explore;
use crate::model::field::FieldId;
use crate::sql::template::table_references;

/// Validate an explore's structure and field-id uniqueness.
pub fn validate_explore(explore: &Explore) -> CompileResult<()> {
    validate_table_references(explore)?;
    validate_field_ownership(explore)?;
    validate_join_templates(explore)?;
    validate_unique_field_ids(explore)?;
    Ok(())
}

fn invalid(explore: &Explore, message: String) -> CompileError {
    CompileError::InvalidExplore {
        explore: explore.name.clone(),
        message,
    }
}

fn sorted_table_names(explore: &Explore) -> Vec<&String> {
    let mut names: Vec<&String> = explore.tables.keys().collect();
    names.sort();
    names
}

/// The base table and every joined table must key into `tables`.
fn validate_table_references(explore: &Explore) -> CompileResult<()> {
    if !explore.tables.contains_key(&explore.base_table) {
        return Err(invalid(
            explore,
            format!(
                "base table '{}' is not defined in tables",
                explore.base_table
            ),
        ));
    }

    for join in &explore.joined_tables {
        if !explore.tables.contains_key(&join.table) {
            return Err(invalid(
                explore,
                format!("joined table '{}' is not defined in tables", join.table),
            ));
        }
    }

    Ok(())
}

/// Every field must agree with the table that owns it: the map key equals the
/// field's `name`, and the field's `table` attribute equals the table's key.
fn validate_field_ownership(explore: &Explore) -> CompileResult<()> {
    for table_name in sorted_table_names(explore) {
        let table = &explore.tables[table_name];

        if &table.name != table_name {
            return Err(invalid(
                explore,
                format!(
                    "table keyed '{}' declares name '{}'",
                    table_name, table.name
                ),
            ));
        }

        let mut dimension_names: Vec<&String> = table.dimensions.keys().collect();
        dimension_names.sort();
        for name in dimension_names {
            let dimension = &table.dimensions[name];
            if &dimension.name != name {
                return Err(invalid(
                    explore,
                    format!(
                        "dimension keyed '{}' in table '{}' declares name '{}'",
                        name, table_name, dimension.name
                    ),
                ));
            }
            if &dimension.table != table_name {
                return Err(invalid(
                    explore,
                    format!(
                        "dimension '{}' in table '{}' declares table '{}'",
                        name, table_name, dimension.table
                    ),
                ));
            }
        }

        let mut measure_names: Vec<&String> = table.measures.keys().collect();
        measure_names.sort();
        for name in measure_names {
            let measure = &table.measures[name];
            if &measure.name != name {
                return Err(invalid(
                    explore,
                    format!(
                        "measure keyed '{}' in table '{}' declares name '{}'",
                        name, table_name, measure.name
                    ),
                ));
            }
            if &measure.table != table_name {
                return Err(invalid(
                    explore,
                    format!(
                        "measure '{}' in table '{}' declares table '{}'",
                        name, table_name, measure.table
                    ),
                ));
            }
        }
    }

    Ok(())
}

/// Every `${...}` placeholder in a join condition must name a table of the
/// explore.
fn validate_join_templates(explore: &Explore) -> CompileResult<()> {
    for join in &explore.joined_tables {
        for referenced in table_references(&join.sql_on) {
            if !explore.tables.contains_key(&referenced) {
                return Err(invalid(
                    explore,
                    format!(
                        "join '{}' references unknown table '{}' in sqlOn",
                        join.table, referenced
                    ),
                ));
            }
        }
    }

    Ok(())
}

/// Field ids must be unique across the whole explore.
///
/// Ids derive from `(table, name)`, so distinct pairs can still collide
/// (e.g. `orders` + `x_y` and `orders_x` + `y`). The scan visits tables and
/// field names in sorted order and fails on the first collision.
fn validate_unique_field_ids(explore: &Explore) -> CompileResult<()> {
    let mut seen: HashSet<FieldId> = HashSet::new();

    for table_name in sorted_table_names(explore) {
        let table = &explore.tables[table_name];

        let mut field_names: Vec<&String> = table
            .dimensions
            .keys()
            .chain(table.measures.keys())
            .collect();
        field_names.sort();

        for name in field_names {
            let field_id = FieldId::new(table_name, name);
            if !seen.insert(field_id.clone()) {
                return Err(CompileError::DuplicateFieldId {
                    field_id,
                    table: table_name.clone(),
                    name: name.clone(),
                });
            }
        }
    }

    Ok(())
}
