//! SQL generation module.
//!
//! This module provides a type-safe SQL builder that generates multi-dialect SQL.
//! It includes:
//!
//! - [`query`] - SELECT query builder
//! - [`expr`] - Expression AST and builder DSL
//! - [`token`] - Token types for SQL generation
//! - [`dialect`] - SQL dialect implementations
//! - [`template`] - `${...}` placeholder substitution for model-owned fragments

pub mod dialect;
pub mod expr;
pub mod query;
pub mod template;
pub mod token;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types at the sql module level
pub use dialect::{Dialect, SqlDialect};
pub use expr::{
    avg, count, count_distinct, ident, like_prefix, lit_float, lit_int, lit_str, max, min, raw_sql,
    sum, BinaryOperator, Expr, ExprExt, Literal,
};
pub use query::{GroupByItem, Join, OrderByExpr, Query, SelectExpr, SortDir, TableRef};
pub use template::{substitute_table, substitute_table_references, table_references};
pub use token::{Token, TokenStream};
