//! Generic ANSI-flavored dialect - the compiler's default target.
//!
//! This is the "generic ANSI-SQL-capable warehouse" the metric-query
//! compiler assumes: LIMIT pagination, TRUE/FALSE predicates, and bare
//! identifiers. Identifiers stay unquoted because everything the compiler
//! emits through `Token::Ident` is machine-derived (`{table}_{name}` field
//! ids and table aliases taken from validated model names).

use super::helpers;
use super::SqlDialect;

/// Generic ANSI dialect (default).
#[derive(Debug, Clone, Copy)]
pub struct Ansi;

impl SqlDialect for Ansi {
    fn name(&self) -> &'static str {
        "ansi"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        ident.to_string()
    }

    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_single(s)
    }

    // Uses default true/false predicates, alias grouping, and LIMIT emission.
}
