//! Shared helper functions for SQL dialect implementations.
//!
//! This module provides reusable building blocks that dialects can compose
//! to implement the `SqlDialect` trait with minimal duplication.

use super::super::token::{Token, TokenStream};

// =============================================================================
// Identifier Quoting
// =============================================================================

/// Quote identifier with double quotes (ANSI style).
/// Used by: Postgres
pub fn quote_double(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote identifier with backticks.
/// Used by: BigQuery
pub fn quote_backtick(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// Quote identifier with square brackets.
/// Used by: T-SQL (SQL Server, Azure Synapse)
pub fn quote_bracket(ident: &str) -> String {
    format!("[{}]", ident.replace(']', "]]"))
}

// =============================================================================
// String Quoting
// =============================================================================

/// Quote string with single quotes (standard SQL).
/// Used by: all dialects except BigQuery
pub fn quote_string_single(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Quote string with N prefix for Unicode (T-SQL).
/// Used by: T-SQL for non-ASCII strings
pub fn quote_string_unicode(s: &str) -> String {
    format!("N'{}'", s.replace('\'', "''"))
}

/// Quote string for engines where backslash is an escape character inside
/// literals (BigQuery). Backslashes are doubled first so the value
/// round-trips byte-for-byte.
pub fn quote_string_backslash(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

// =============================================================================
// Row Limits
// =============================================================================

/// Emit `LIMIT n` (standard SQL).
/// Used by: Ansi, Postgres, BigQuery
pub fn emit_limit_standard(limit: u64) -> TokenStream {
    let mut ts = TokenStream::new();
    ts.push(Token::Limit).space().push(Token::LitUInt(limit));
    ts
}

/// Emit `OFFSET 0 ROWS FETCH NEXT n ROWS ONLY` (T-SQL style).
/// Note: requires an ORDER BY clause in T-SQL.
pub fn emit_limit_tsql(limit: u64) -> TokenStream {
    let mut ts = TokenStream::new();
    ts.push(Token::Offset)
        .space()
        .push(Token::LitUInt(0))
        .space()
        .push(Token::Rows)
        .space()
        .push(Token::Fetch)
        .space()
        .push(Token::Next)
        .space()
        .push(Token::LitUInt(limit))
        .space()
        .push(Token::Rows)
        .space()
        .push(Token::Only);
    ts
}
