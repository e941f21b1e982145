//! T-SQL (SQL Server / Azure SQL) dialect.
//!
//! T-SQL has significant differences from ANSI:
//! - Square bracket identifier quoting (`[name]`)
//! - No standalone boolean literals in predicates (use `1 = 1` / `1 = 0`)
//! - GROUP BY cannot reference select aliases (repeat the expression)
//! - OFFSET FETCH for pagination (requires ORDER BY)
//! - N'...' prefix for Unicode strings

use super::helpers;
use super::SqlDialect;
use crate::sql::token::TokenStream;

/// T-SQL (SQL Server) dialect.
#[derive(Debug, Clone, Copy)]
pub struct TSql;

impl SqlDialect for TSql {
    fn name(&self) -> &'static str {
        "tsql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_bracket(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        // T-SQL uses N'...' for Unicode strings
        // For safety, always use N prefix for non-ASCII
        if !s.is_ascii() {
            helpers::quote_string_unicode(s)
        } else {
            helpers::quote_string_single(s)
        }
    }

    fn true_predicate(&self) -> &'static str {
        "1 = 1"
    }

    fn false_predicate(&self) -> &'static str {
        "1 = 0"
    }

    fn group_by_aliases(&self) -> bool {
        // T-SQL resolves GROUP BY before the select list
        false
    }

    fn emit_limit(&self, limit: u64) -> TokenStream {
        helpers::emit_limit_tsql(limit)
    }

    fn requires_order_by_for_fetch(&self) -> bool {
        true
    }
}
