//! # Avocet
//!
//! A semantic explore model that compiles metric queries to multi-dialect SQL.
//!
//! ## Architecture
//!
//! Avocet separates the semantic model from SQL generation:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │               Explore (Semantic Model)                   │
//! │   (tables, dimensions, measures, joins, field ids)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [validation]
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Validated Explore                       │
//! └─────────────────────────────────────────────────────────┘
//!                          │   + MetricQuery
//!                          ▼ [compile]
//! ┌─────────────────────────────────────────────────────────┐
//! │               Query AST (SELECT shape)                   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [dialect serialization]
//! ┌─────────────────────────────────────────────────────────┐
//! │                     SQL String                           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Compilation is pure: the same explore, metric query, and dialect always
//! produce byte-identical SQL.

pub mod compile;
pub mod model;
pub mod sql;
pub mod validation;

// Re-export SQL submodules at crate level for ergonomic paths
pub use sql::dialect;
pub use sql::expr;
pub use sql::query;
pub use sql::template;
pub use sql::token;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::compile::{
        compile_query, compile_sql, CompileError, CompileOptions, CompileOutput, CompileResult,
    };
    pub use crate::dialect::{Dialect, SqlDialect};
    pub use crate::expr::{
        // Constructors
        avg,
        count,
        count_distinct,
        ident,
        like_prefix,
        lit_float,
        lit_int,
        lit_str,
        max,
        min,
        raw_sql,
        sum,
        // Types
        BinaryOperator,
        Expr,
        ExprExt,
        Literal,
    };
    pub use crate::model::{
        Dimension, DimensionType, Explore, ExploreJoin, Field, FieldId, FilterGroup,
        FilterGroupOperator, Measure, MeasureType, MetricQuery, NumberFilter, NumberFilterGroup,
        SortDirection, SortField, StringFilter, StringFilterGroup, Table,
    };
    pub use crate::query::{GroupByItem, Join, OrderByExpr, Query, SelectExpr, SortDir, TableRef};
    pub use crate::token::{Token, TokenStream};
}

// Also export at crate root for convenience
pub use compile::{compile_query, compile_sql, CompileError, CompileOptions, CompileOutput};
pub use dialect::Dialect;
pub use model::{Explore, MetricQuery, Table};
pub use query::{OrderByExpr, Query, SelectExpr, TableRef};
pub use token::{Token, TokenStream};
