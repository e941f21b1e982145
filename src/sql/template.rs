//! Substitution of `${...}` placeholders in model-owned SQL fragments.
//!
//! Dimension and measure `sql` fragments reference their owning table as
//! `${TABLE}`; join conditions reference any table in the explore as
//! `${table_name}`. Both are replaced with dialect-quoted aliases before the
//! fragment is embedded in a query.

use super::dialect::{Dialect, SqlDialect};
use regex::Regex;
use std::sync::LazyLock;

/// Pattern for the owning-table placeholder (e.g. `${TABLE}.status`).
static TABLE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{TABLE\}").unwrap());

/// Pattern for named table references (e.g. `${orders}.customer_id`).
static TABLE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// Replace every `${TABLE}` in a field's SQL fragment with the quoted alias
/// of its owning table.
///
/// The placeholder is case-sensitive; `${table}` is a named reference to a
/// table literally called `table` and is left for [`substitute_table_references`].
pub fn substitute_table(sql: &str, alias: &str, dialect: Dialect) -> String {
    let quoted = dialect.quote_identifier(alias);
    TABLE_PLACEHOLDER
        .replace_all(sql, regex::NoExpand(&quoted))
        .into_owned()
}

/// Replace every `${table_name}` reference in a join condition with the
/// quoted alias of that table.
pub fn substitute_table_references(sql: &str, dialect: Dialect) -> String {
    TABLE_REFERENCE
        .replace_all(sql, |caps: &regex::Captures| {
            dialect.quote_identifier(&caps[1])
        })
        .into_owned()
}

/// List the table names referenced by `${...}` placeholders, in order of
/// first appearance, without duplicates.
pub fn table_references(sql: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in TABLE_REFERENCE.captures_iter(sql) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}
