//! SQL Dialect definitions and formatting rules.
//!
//! This module provides a trait-based abstraction for the dialect
//! differences that matter to the metric-query compiler:
//!
//! - Identifier quoting: bare (generic ANSI), `"` (Postgres),
//!   `` ` `` (BigQuery), `[]` (T-SQL)
//! - String literal escaping: `''` doubling everywhere, plus backslash
//!   doubling on BigQuery
//! - Constant predicates: `TRUE`/`FALSE` vs `1 = 1`/`1 = 0` (T-SQL has no
//!   standalone boolean literals in a WHERE clause)
//! - GROUP BY policy: by select alias vs. by repeated expression
//! - Row limits: `LIMIT n` vs `OFFSET 0 ROWS FETCH NEXT n ROWS ONLY`
//! - LIKE escaping: `ESCAPE '\'` specifier everywhere except BigQuery,
//!   where backslash is the built-in LIKE escape
//!
//! # Usage
//!
//! ```ignore
//! use avocet::dialect::{Dialect, SqlDialect};
//!
//! let dialect = Dialect::Postgres;
//! let quoted = dialect.quote_identifier("orders_status");  // "orders_status"
//! ```

mod ansi;
mod bigquery;
pub mod helpers;
mod postgres;
mod tsql;

pub use ansi::Ansi;
pub use bigquery::BigQuery;
pub use postgres::Postgres;
pub use tsql::TSql;

use super::token::TokenStream;

/// SQL dialect trait - defines how SQL constructs are rendered.
///
/// Implementations handle dialect-specific syntax differences.
/// The default implementations follow ANSI SQL where possible.
pub trait SqlDialect: std::fmt::Debug {
    /// Dialect name for display/diagnostics.
    fn name(&self) -> &'static str;

    // =========================================================================
    // Identifier and Literal Quoting
    // =========================================================================

    /// Quote a generated identifier (field id, table alias).
    ///
    /// - Ansi: bare (generated identifiers are already safe)
    /// - Postgres: `"identifier"`
    /// - BigQuery: `` `identifier` ``
    /// - T-SQL: `[identifier]`
    fn quote_identifier(&self, ident: &str) -> String;

    /// Quote a string literal.
    ///
    /// All dialects use single quotes with `''` for escaping.
    /// Override where the engine treats backslash as an escape character
    /// (BigQuery) or wants a Unicode prefix (T-SQL N'...').
    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_single(s)
    }

    // =========================================================================
    // Constant Predicates
    // =========================================================================

    /// A predicate satisfied by every row.
    ///
    /// Emitted when a `NOT IN` filter has an empty value list.
    fn true_predicate(&self) -> &'static str {
        "TRUE"
    }

    /// A predicate satisfied by no row.
    ///
    /// Emitted when an `IN` filter has an empty value list.
    fn false_predicate(&self) -> &'static str {
        "FALSE"
    }

    // =========================================================================
    // Clause Policies
    // =========================================================================

    /// Whether GROUP BY may reference select-list aliases.
    ///
    /// When false the compiler repeats each dimension's rendered expression.
    fn group_by_aliases(&self) -> bool {
        true
    }

    /// Emit the row-limit clause.
    ///
    /// - Ansi/Postgres/BigQuery: `LIMIT n` (default)
    /// - T-SQL: `OFFSET 0 ROWS FETCH NEXT n ROWS ONLY` (override)
    fn emit_limit(&self, limit: u64) -> TokenStream {
        helpers::emit_limit_standard(limit)
    }

    /// Whether this dialect requires ORDER BY when using OFFSET/FETCH.
    ///
    /// T-SQL rejects OFFSET FETCH without an ORDER BY clause.
    fn requires_order_by_for_fetch(&self) -> bool {
        false
    }

    /// Whether the engine accepts a `LIKE ... ESCAPE 'c'` specifier.
    ///
    /// GoogleSQL has no ESCAPE clause; its LIKE escapes wildcards with a
    /// backslash natively, so BigQuery gets the escaped pattern bare.
    fn supports_like_escape(&self) -> bool {
        true
    }
}

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Generic ANSI-capable target; the compiler's default.
    #[default]
    Ansi,
    Postgres,
    BigQuery,
    TSql,
}

impl Dialect {
    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::Ansi => &Ansi,
            Dialect::Postgres => &Postgres,
            Dialect::BigQuery => &BigQuery,
            Dialect::TSql => &TSql,
        }
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        self.dialect().quote_string(s)
    }

    fn true_predicate(&self) -> &'static str {
        self.dialect().true_predicate()
    }

    fn false_predicate(&self) -> &'static str {
        self.dialect().false_predicate()
    }

    fn group_by_aliases(&self) -> bool {
        self.dialect().group_by_aliases()
    }

    fn emit_limit(&self, limit: u64) -> TokenStream {
        self.dialect().emit_limit(limit)
    }

    fn requires_order_by_for_fetch(&self) -> bool {
        self.dialect().requires_order_by_for_fetch()
    }

    fn supports_like_escape(&self) -> bool {
        self.dialect().supports_like_escape()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    /// Parse a dialect name as it appears in configuration.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ansi" => Ok(Dialect::Ansi),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "bigquery" => Ok(Dialect::BigQuery),
            "tsql" | "mssql" | "sqlserver" => Ok(Dialect::TSql),
            other => Err(format!("unknown sql dialect '{}'", other)),
        }
    }
}
