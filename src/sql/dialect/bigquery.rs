//! BigQuery SQL dialect.
//!
//! BigQuery features relevant here:
//! - Backtick identifier quoting
//! - Backslash is an escape character inside string literals, so literals
//!   must double it
//! - No `ESCAPE` clause on LIKE; backslash already escapes `%`/`_` in
//!   patterns
//! - GROUP BY accepts output column aliases
//! - LIMIT pagination

use super::helpers;
use super::SqlDialect;

/// BigQuery SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct BigQuery;

impl SqlDialect for BigQuery {
    fn name(&self) -> &'static str {
        "bigquery"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_backslash(s)
    }

    fn supports_like_escape(&self) -> bool {
        false
    }

    // Uses default true/false predicates, alias grouping, and LIMIT emission.
}
