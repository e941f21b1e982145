//! Compilation of metric queries to SQL.
//!
//! This module provides the high-level API for compiling a metric query
//! against an explore:
//!
//! ```text
//! Explore + MetricQuery → resolve fields → resolve joins → Query AST → SQL
//! ```
//!
//! Compilation is a pure function over immutable inputs: no I/O, no shared
//! state, and the same explore, query, and options always produce
//! byte-identical SQL.
//!
//! # Example
//!
//! ```ignore
//! use avocet::compile::{compile_query, CompileOptions};
//! use avocet::model::{Explore, MetricQuery, SortField, Table};
//! use avocet::model::types::{DimensionType, MeasureType};
//! use avocet::sql::Dialect;
//!
//! let orders = Table::new("orders", "jaffle.orders")
//!     .with_dimension("status", DimensionType::String, "${TABLE}.status")
//!     .with_measure("total", MeasureType::Sum, "${TABLE}.amount");
//! let explore = Explore::new("orders", orders).validated()?;
//!
//! let query = MetricQuery::new()
//!     .with_dimension("orders_status")
//!     .with_measure("orders_total")
//!     .with_sort(SortField::descending("orders_status"))
//!     .with_limit(10);
//!
//! let options = CompileOptions::default().with_dialect(Dialect::Postgres);
//! let output = compile_query(&explore, &query, options)?;
//! println!("{}", output.sql);
//! ```

use std::collections::HashSet;

use crate::model::explore::{Explore, ExploreJoin};
use crate::model::field::{Dimension, Field, FieldId, Measure};
use crate::model::filter::{
    FilterGroup, FilterGroupOperator, FilterableDimension, FilterableType, NumberFilter,
    StringFilter,
};
use crate::model::metric_query::{MetricQuery, SortDirection};
use crate::model::types::MeasureType;
use crate::sql::expr::{
    avg, count, count_distinct, ident, like_prefix, lit_float, lit_str, max, min, raw_sql, sum,
    Expr, ExprExt,
};
use crate::sql::query::{GroupByItem, OrderByExpr, Query, SelectExpr, TableRef};
use crate::sql::template::{substitute_table, substitute_table_references};
use crate::sql::Dialect;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while validating or compiling a metric query.
///
/// All of these describe a malformed request or a malformed model; none are
/// transient. Compilation either produces the full SQL or fails with one of
/// these - there is no partial output.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error("Field '{field_id}' does not exist in explore '{explore}'")]
    UnknownField { field_id: FieldId, explore: String },

    #[error(
        "Field '{field_id}' requires table '{table}', which is neither the base table nor joined in explore '{explore}'"
    )]
    MissingJoin {
        field_id: FieldId,
        table: String,
        explore: String,
    },

    #[error("Duplicate field id '{field_id}' computed for field '{name}' of table '{table}'")]
    DuplicateFieldId {
        field_id: FieldId,
        table: String,
        name: String,
    },

    #[error("Query selects no dimensions and no measures")]
    EmptyQuery,

    #[error("Sort field '{field_id}' is not among the selected dimensions or measures")]
    InvalidSort { field_id: FieldId },

    #[error("Limit must be greater than zero, got {limit}")]
    InvalidLimit { limit: u64 },

    #[error("Unsupported field type tag '{tag}'")]
    UnsupportedFieldType { tag: String },

    #[error("Invalid explore '{explore}': {message}")]
    InvalidExplore { explore: String, message: String },

    #[error("Invalid filter on '{field_id}': {message}")]
    InvalidFilter { field_id: FieldId, message: String },
}

pub type CompileResult<T> = Result<T, CompileError>;

// ============================================================================
// Options
// ============================================================================

/// Options for compilation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    /// SQL dialect to generate. Defaults to the generic ANSI dialect.
    pub dialect: Dialect,
}

impl CompileOptions {
    /// Set the SQL dialect.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Result of compiling a metric query to SQL.
#[derive(Debug, Clone)]
pub struct CompileOutput {
    /// The generated SQL string.
    pub sql: String,

    /// The SQL query AST (for further manipulation if needed).
    pub query: Query,

    /// The dialect used for generation.
    pub dialect: Dialect,
}

// ============================================================================
// Compilation Functions
// ============================================================================

/// Compile a metric query against an explore.
///
/// # Arguments
///
/// * `explore` - The explore the query is scoped to
/// * `metric_query` - The declarative query (dimensions, measures, filters,
///   sorts, limit)
/// * `options` - Compilation options (dialect)
///
/// # Returns
///
/// A `CompileOutput` containing the SQL string and query AST.
pub fn compile_query(
    explore: &Explore,
    metric_query: &MetricQuery,
    options: CompileOptions,
) -> CompileResult<CompileOutput> {
    let dialect = options.dialect;

    // Step 1: Resolve every referenced field against the explore
    let dimensions = resolve_dimensions(explore, &metric_query.dimensions)?;
    let measures = resolve_measures(explore, &metric_query.measures)?;
    let filter_dimensions = resolve_filter_dimensions(explore, &metric_query.filters)?;
    let sort_fields = resolve_sort_fields(explore, metric_query)?;

    // Step 2: Resolve the joins the query actually needs
    let referenced = referenced_tables(&dimensions, &measures, &filter_dimensions, &sort_fields);
    let joins = resolve_joins(explore, &referenced)?;

    // Step 3: SELECT list - dimensions first, then measures
    if dimensions.is_empty() && measures.is_empty() {
        return Err(CompileError::EmptyQuery);
    }
    let mut select = Vec::new();
    for dimension in &dimensions {
        select.push(
            SelectExpr::new(dimension_expr(dimension, dialect))
                .with_alias(dimension.field_id().as_str()),
        );
    }
    for measure in &measures {
        select.push(
            SelectExpr::new(measure_expr(measure, dialect)).with_alias(measure.field_id().as_str()),
        );
    }

    // Step 4: FROM the base table, LEFT JOIN each referenced join in
    // declared order
    let base = lookup_table(explore, &explore.base_table)?;
    let mut query = Query::new()
        .select(select)
        .from(TableRef::new(&base.sql_table, &base.name));
    for join in joins {
        let table = lookup_table(explore, &join.table)?;
        let on = raw_sql(&substitute_table_references(&join.sql_on, dialect));
        query = query.left_join(TableRef::new(&table.sql_table, &table.name), on);
    }

    // Step 5: WHERE - one parenthesized clause per non-empty group, ANDed
    for (group, dimension) in metric_query.filters.iter().zip(&filter_dimensions) {
        if let Some(clause) = filter_group_expr(group, dimension, dialect) {
            query = query.filter(clause);
        }
    }

    // Step 6: GROUP BY every selected dimension, only when a measure is
    // selected. Dimension-only queries list rows without implicit grouping.
    if !measures.is_empty() && !dimensions.is_empty() {
        let group_by = dimensions
            .iter()
            .map(|d| GroupByItem::new(dimension_expr(d, dialect), d.field_id().as_str()))
            .collect();
        query = query.group_by(group_by);
    }

    // Step 7: ORDER BY selected output columns, in the order given
    let selected: HashSet<&FieldId> = metric_query
        .dimensions
        .iter()
        .chain(&metric_query.measures)
        .collect();
    let mut order_by = Vec::new();
    for sort in &metric_query.sorts {
        if !selected.contains(&sort.field_id) {
            return Err(CompileError::InvalidSort {
                field_id: sort.field_id.clone(),
            });
        }
        let target = ident(sort.field_id.as_str());
        order_by.push(match sort.direction {
            SortDirection::Ascending => OrderByExpr::asc(target),
            SortDirection::Descending => OrderByExpr::desc(target),
        });
    }
    if !order_by.is_empty() {
        query = query.order_by(order_by);
    }

    // Step 8: LIMIT, required and positive
    if metric_query.limit == 0 {
        return Err(CompileError::InvalidLimit {
            limit: metric_query.limit,
        });
    }
    query = query.limit(metric_query.limit);

    let sql = query.to_sql(dialect);

    Ok(CompileOutput {
        sql,
        query,
        dialect,
    })
}

/// Compile a metric query and return just the SQL string.
pub fn compile_sql(
    explore: &Explore,
    metric_query: &MetricQuery,
    options: CompileOptions,
) -> CompileResult<String> {
    compile_query(explore, metric_query, options).map(|output| output.sql)
}

// ============================================================================
// Field Resolution
// ============================================================================

fn unknown_field(explore: &Explore, field_id: &FieldId) -> CompileError {
    CompileError::UnknownField {
        field_id: field_id.clone(),
        explore: explore.name.clone(),
    }
}

fn resolve_dimensions<'a>(
    explore: &'a Explore,
    ids: &[FieldId],
) -> CompileResult<Vec<&'a Dimension>> {
    ids.iter()
        .map(|id| {
            explore
                .find_dimension(id)
                .ok_or_else(|| unknown_field(explore, id))
        })
        .collect()
}

fn resolve_measures<'a>(explore: &'a Explore, ids: &[FieldId]) -> CompileResult<Vec<&'a Measure>> {
    ids.iter()
        .map(|id| {
            explore
                .find_measure(id)
                .ok_or_else(|| unknown_field(explore, id))
        })
        .collect()
}

/// Resolve each filter group's dimension against the explore and check that
/// the group's branch matches the dimension's type.
fn resolve_filter_dimensions<'a>(
    explore: &'a Explore,
    filters: &[FilterGroup],
) -> CompileResult<Vec<&'a Dimension>> {
    filters
        .iter()
        .map(|group| {
            let field_id = group.dimension().field_id();
            let dimension = explore
                .find_dimension(&field_id)
                .ok_or_else(|| unknown_field(explore, &field_id))?;
            check_filter_group_type(group, dimension)?;
            Ok(dimension)
        })
        .collect()
}

fn check_filter_group_type(group: &FilterGroup, dimension: &Dimension) -> CompileResult<()> {
    let narrowed =
        FilterableDimension::narrow(dimension).ok_or_else(|| CompileError::InvalidFilter {
            field_id: dimension.field_id(),
            message: format!(
                "dimension of type {} is not filterable",
                dimension.dimension_type
            ),
        })?;

    let kind = match group {
        FilterGroup::String(_) => FilterableType::String,
        FilterGroup::Number(_) => FilterableType::Number,
    };
    if narrowed.filterable_type != kind {
        return Err(CompileError::InvalidFilter {
            field_id: dimension.field_id(),
            message: format!(
                "a {} filter group cannot bind a dimension of type {}",
                match kind {
                    FilterableType::String => "string",
                    FilterableType::Number => "number",
                },
                dimension.dimension_type
            ),
        });
    }
    Ok(())
}

/// Check every sort field exists in the explore. Whether it is also selected
/// is enforced later, when ORDER BY is built.
fn resolve_sort_fields(explore: &Explore, metric_query: &MetricQuery) -> CompileResult<Vec<Field>> {
    metric_query
        .sorts
        .iter()
        .map(|sort| {
            explore
                .find_field(&sort.field_id)
                .ok_or_else(|| unknown_field(explore, &sort.field_id))
        })
        .collect()
}

// ============================================================================
// Join Resolution
// ============================================================================

/// Tables referenced by the query, in first-reference order, each paired
/// with the field that first referenced it (for error reporting).
fn referenced_tables(
    dimensions: &[&Dimension],
    measures: &[&Measure],
    filter_dimensions: &[&Dimension],
    sort_fields: &[Field],
) -> Vec<(String, FieldId)> {
    let mut tables: Vec<(String, FieldId)> = Vec::new();
    {
        let mut mark = |table: &str, field_id: FieldId| {
            if !tables.iter().any(|(t, _)| t == table) {
                tables.push((table.to_string(), field_id));
            }
        };
        for dimension in dimensions {
            mark(&dimension.table, dimension.field_id());
        }
        for measure in measures {
            mark(&measure.table, measure.field_id());
        }
        for dimension in filter_dimensions {
            mark(&dimension.table, dimension.field_id());
        }
        for field in sort_fields {
            mark(field.table(), field.field_id());
        }
    }
    tables
}

/// Pick the declared joins the query needs: one for each referenced table,
/// in declared order, skipping tables nothing references. A referenced table
/// that is neither the base table nor declared as a join fails compilation.
fn resolve_joins<'a>(
    explore: &'a Explore,
    referenced: &[(String, FieldId)],
) -> CompileResult<Vec<&'a ExploreJoin>> {
    for (table, field_id) in referenced {
        let is_base = table == &explore.base_table;
        let is_joined = explore.joined_tables.iter().any(|j| &j.table == table);
        if !is_base && !is_joined {
            return Err(CompileError::MissingJoin {
                field_id: field_id.clone(),
                table: table.clone(),
                explore: explore.name.clone(),
            });
        }
    }

    Ok(explore
        .joined_tables
        .iter()
        .filter(|join| referenced.iter().any(|(table, _)| table == &join.table))
        .collect())
}

fn lookup_table<'a>(explore: &'a Explore, name: &str) -> CompileResult<&'a crate::model::Table> {
    explore
        .get_table(name)
        .ok_or_else(|| CompileError::InvalidExplore {
            explore: explore.name.clone(),
            message: format!("table '{}' is not defined in tables", name),
        })
}

// ============================================================================
// Clause Rendering
// ============================================================================

/// A dimension's SQL fragment with `${TABLE}` resolved to its owning alias.
fn dimension_expr(dimension: &Dimension, dialect: Dialect) -> Expr {
    raw_sql(&substitute_table(
        &dimension.sql,
        &dimension.table,
        dialect,
    ))
}

/// A measure's rendered SQL fragment wrapped in its aggregate.
fn measure_expr(measure: &Measure, dialect: Dialect) -> Expr {
    let inner = raw_sql(&substitute_table(&measure.sql, &measure.table, dialect));
    match measure.measure_type {
        MeasureType::Average => avg(inner),
        MeasureType::Sum => sum(inner),
        MeasureType::Min => min(inner),
        MeasureType::Max => max(inner),
        MeasureType::Count => count(inner),
        MeasureType::CountDistinct => count_distinct(inner),
    }
}

/// Render one filter group as a parenthesized condition, or `None` when the
/// group holds no filters and contributes no clause.
fn filter_group_expr(
    group: &FilterGroup,
    dimension: &Dimension,
    dialect: Dialect,
) -> Option<Expr> {
    let target = raw_sql(&substitute_table(
        &dimension.sql,
        &dimension.table,
        dialect,
    ));

    let clauses: Vec<Expr> = match group {
        FilterGroup::String(g) => g
            .filters
            .iter()
            .map(|filter| string_filter_expr(&target, filter))
            .collect(),
        FilterGroup::Number(g) => g
            .filters
            .iter()
            .map(|filter| number_filter_expr(&target, filter))
            .collect(),
    };

    let connective = group.operator();
    clauses
        .into_iter()
        .reduce(|acc, clause| match connective {
            FilterGroupOperator::And => acc.and(clause),
            FilterGroupOperator::Or => acc.or(clause),
        })
        .map(ExprExt::paren)
}

fn string_filter_expr(target: &Expr, filter: &StringFilter) -> Expr {
    match filter {
        StringFilter::Equals { values } => target
            .clone()
            .in_list(values.iter().map(|v| lit_str(v)).collect()),
        StringFilter::NotEquals { values } => target
            .clone()
            .not_in_list(values.iter().map(|v| lit_str(v)).collect()),
        StringFilter::StartsWith { value } => like_prefix(target.clone(), value),
        StringFilter::IsNull => target.clone().is_null(),
        StringFilter::NotNull => target.clone().is_not_null(),
    }
}

fn number_filter_expr(target: &Expr, filter: &NumberFilter) -> Expr {
    match filter {
        NumberFilter::Equals { values } => target
            .clone()
            .in_list(values.iter().map(|v| lit_float(*v)).collect()),
        NumberFilter::NotEquals { values } => target
            .clone()
            .not_in_list(values.iter().map(|v| lit_float(*v)).collect()),
        NumberFilter::GreaterThan { value } => target.clone().gt(*value),
        NumberFilter::LessThan { value } => target.clone().lt(*value),
        NumberFilter::IsNull => target.clone().is_null(),
        NumberFilter::NotNull => target.clone().is_not_null(),
    }
}

// ============================================================================
// Tests
// ============================================================================
