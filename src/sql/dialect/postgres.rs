//! PostgreSQL SQL dialect.
//!
//! PostgreSQL features relevant here:
//! - ANSI identifier quoting (`"`)
//! - Lowercase case folding for unquoted identifiers
//! - Native boolean literals in predicates
//! - GROUP BY accepts output column aliases
//! - LIMIT pagination

use super::helpers;
use super::SqlDialect;

/// PostgreSQL SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_single(s)
    }

    // Uses default true/false predicates, alias grouping, and LIMIT emission.
}
