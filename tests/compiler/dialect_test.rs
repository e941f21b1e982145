//! Integration tests for dialect-specific SQL generation.
//!
//! One semantic query, four targets: identifier quoting, string escaping,
//! constant predicates, GROUP BY policy, and row-limit emission all vary by
//! dialect while the query semantics stay fixed.

use avocet::compile::{compile_sql, CompileOptions};
use avocet::model::{
    Dimension, DimensionType, Explore, FilterGroup, FilterGroupOperator, MeasureType, MetricQuery,
    SortField, StringFilter, StringFilterGroup, Table,
};
use avocet::sql::Dialect;

fn jaffle_explore() -> Explore {
    let orders = Table::new("orders", "jaffle.orders")
        .with_dimension("status", DimensionType::String, "${TABLE}.status")
        .with_measure("total", MeasureType::Sum, "${TABLE}.amount");
    let customers = Table::new("customers", "jaffle.customers").with_dimension(
        "country",
        DimensionType::String,
        "${TABLE}.country",
    );

    Explore::new("orders", orders)
        .with_join(customers, "${orders}.customer_id = ${customers}.id")
        .validated()
        .unwrap()
}

fn status_dimension() -> Dimension {
    Dimension::new("orders", "status", DimensionType::String, "${TABLE}.status")
}

fn status_equals(values: &[&str]) -> FilterGroup {
    FilterGroup::String(
        StringFilterGroup::new(status_dimension(), FilterGroupOperator::And).with_filter(
            StringFilter::Equals {
                values: values.iter().map(|v| v.to_string()).collect(),
            },
        ),
    )
}

fn rollup() -> MetricQuery {
    MetricQuery::new()
        .with_dimension("orders_status")
        .with_measure("orders_total")
        .with_sort(SortField::descending("orders_total"))
        .with_limit(10)
}

fn compile_for(dialect: Dialect, query: &MetricQuery) -> String {
    compile_sql(
        &jaffle_explore(),
        query,
        CompileOptions::default().with_dialect(dialect),
    )
    .unwrap()
}

#[test]
fn test_identifier_quoting() {
    let query = rollup();

    let ansi = compile_for(Dialect::Ansi, &query);
    assert!(ansi.contains("orders.status AS orders_status"), "got: {}", ansi);

    let postgres = compile_for(Dialect::Postgres, &query);
    assert!(
        postgres.contains("\"orders\".status AS \"orders_status\""),
        "got: {}",
        postgres
    );
    assert!(postgres.contains("FROM jaffle.orders AS \"orders\""), "got: {}", postgres);

    let bigquery = compile_for(Dialect::BigQuery, &query);
    assert!(
        bigquery.contains("`orders`.status AS `orders_status`"),
        "got: {}",
        bigquery
    );

    let tsql = compile_for(Dialect::TSql, &query);
    assert!(
        tsql.contains("[orders].status AS [orders_status]"),
        "got: {}",
        tsql
    );
}

#[test]
fn test_join_condition_placeholders_quote_per_dialect() {
    let query = MetricQuery::new()
        .with_dimension("orders_status")
        .with_dimension("customers_country")
        .with_limit(10);

    let postgres = compile_for(Dialect::Postgres, &query);
    assert!(
        postgres.contains("ON (\"orders\".customer_id = \"customers\".id)"),
        "got: {}",
        postgres
    );

    let tsql = compile_for(Dialect::TSql, &query);
    assert!(
        tsql.contains("ON ([orders].customer_id = [customers].id)"),
        "got: {}",
        tsql
    );
}

#[test]
fn test_group_by_policy() {
    let query = rollup();

    // Alias-grouping targets reference the output column.
    let ansi = compile_for(Dialect::Ansi, &query);
    assert!(ansi.contains("GROUP BY orders_status"), "got: {}", ansi);

    let bigquery = compile_for(Dialect::BigQuery, &query);
    assert!(bigquery.contains("GROUP BY `orders_status`"), "got: {}", bigquery);

    // T-SQL resolves GROUP BY before the select list, so the dimension
    // expression is repeated instead.
    let tsql = compile_for(Dialect::TSql, &query);
    assert!(tsql.contains("GROUP BY [orders].status"), "got: {}", tsql);
    assert!(!tsql.contains("GROUP BY [orders_status]"), "got: {}", tsql);
}

#[test]
fn test_limit_emission() {
    let query = rollup();

    assert!(compile_for(Dialect::Ansi, &query).ends_with("LIMIT 10"));
    assert!(compile_for(Dialect::Postgres, &query).ends_with("LIMIT 10"));
    assert!(compile_for(Dialect::BigQuery, &query).ends_with("LIMIT 10"));
    assert!(
        compile_for(Dialect::TSql, &query).ends_with("OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY")
    );
}

#[test]
fn test_limit_above_i64_range_stays_unsigned() {
    // limit is u64 on the wire; values past i64::MAX must not wrap into a
    // negative literal.
    let query = rollup().with_limit(u64::MAX);

    let ansi = compile_for(Dialect::Ansi, &query);
    assert!(ansi.ends_with("LIMIT 18446744073709551615"), "got: {}", ansi);
    assert!(!ansi.contains("LIMIT -"), "got: {}", ansi);

    let tsql = compile_for(Dialect::TSql, &query);
    assert!(
        tsql.ends_with("FETCH NEXT 18446744073709551615 ROWS ONLY"),
        "got: {}",
        tsql
    );
}

#[test]
fn test_tsql_fetch_requires_order_by_placeholder() {
    let unsorted = MetricQuery::new()
        .with_dimension("orders_status")
        .with_measure("orders_total")
        .with_limit(10);

    let tsql = compile_for(Dialect::TSql, &unsorted);
    assert!(tsql.contains("ORDER BY (SELECT NULL)"), "got: {}", tsql);

    // With an explicit sort the placeholder must not appear.
    let sorted = unsorted.clone().with_sort(SortField::ascending("orders_status"));
    let tsql = compile_for(Dialect::TSql, &sorted);
    assert!(!tsql.contains("(SELECT NULL)"), "got: {}", tsql);
    assert!(tsql.contains("ORDER BY [orders_status] ASC"), "got: {}", tsql);

    // LIMIT dialects never need the placeholder.
    let ansi = compile_for(Dialect::Ansi, &unsorted);
    assert!(!ansi.contains("(SELECT NULL)"), "got: {}", ansi);
}

#[test]
fn test_constant_predicates() {
    let never = MetricQuery::new()
        .with_dimension("orders_status")
        .with_filter(status_equals(&[]))
        .with_limit(10);

    assert!(compile_for(Dialect::Ansi, &never).contains("WHERE (FALSE)"));
    assert!(compile_for(Dialect::Postgres, &never).contains("WHERE (FALSE)"));
    assert!(compile_for(Dialect::TSql, &never).contains("WHERE (1 = 0)"));

    let always = MetricQuery::new()
        .with_dimension("orders_status")
        .with_filter(FilterGroup::String(
            StringFilterGroup::new(status_dimension(), FilterGroupOperator::And)
                .with_filter(StringFilter::NotEquals { values: vec![] }),
        ))
        .with_limit(10);

    assert!(compile_for(Dialect::Ansi, &always).contains("WHERE (TRUE)"));
    assert!(compile_for(Dialect::TSql, &always).contains("WHERE (1 = 1)"));
}

#[test]
fn test_string_literal_escaping() {
    let query = MetricQuery::new()
        .with_dimension("orders_status")
        .with_filter(status_equals(&["O'Brien"]))
        .with_limit(10);

    // Quote doubling everywhere; BigQuery escapes with a backslash instead.
    assert!(
        compile_for(Dialect::Ansi, &query).contains("IN ('O''Brien')"),
        "ansi"
    );
    assert!(
        compile_for(Dialect::TSql, &query).contains("IN ('O''Brien')"),
        "tsql"
    );
    assert!(
        compile_for(Dialect::BigQuery, &query).contains("IN ('O\\'Brien')"),
        "bigquery"
    );
}

#[test]
fn test_like_escape_specifier_per_dialect() {
    let query = MetricQuery::new()
        .with_dimension("orders_status")
        .with_filter(FilterGroup::String(
            StringFilterGroup::new(status_dimension(), FilterGroupOperator::And).with_filter(
                StringFilter::StartsWith {
                    value: "50%_off".into(),
                },
            ),
        ))
        .with_limit(10);

    let ansi = compile_for(Dialect::Ansi, &query);
    assert!(
        ansi.contains("LIKE '50\\%\\_off%' ESCAPE '\\'"),
        "got: {}",
        ansi
    );

    let tsql = compile_for(Dialect::TSql, &query);
    assert!(
        tsql.contains("LIKE '50\\%\\_off%' ESCAPE '\\'"),
        "got: {}",
        tsql
    );

    // GoogleSQL has no ESCAPE clause; the backslash escapes survive inside
    // the pattern literal instead.
    let bigquery = compile_for(Dialect::BigQuery, &query);
    assert!(
        bigquery.contains("LIKE '50\\\\%\\\\_off%'"),
        "got: {}",
        bigquery
    );
    assert!(!bigquery.contains("ESCAPE"), "got: {}", bigquery);
}

#[test]
fn test_tsql_unicode_strings_get_n_prefix() {
    let query = MetricQuery::new()
        .with_dimension("orders_status")
        .with_filter(status_equals(&["café"]))
        .with_limit(10);

    let tsql = compile_for(Dialect::TSql, &query);
    assert!(tsql.contains("IN (N'café')"), "got: {}", tsql);

    // ASCII values stay unprefixed.
    let ascii = MetricQuery::new()
        .with_dimension("orders_status")
        .with_filter(status_equals(&["paid"]))
        .with_limit(10);
    let tsql = compile_for(Dialect::TSql, &ascii);
    assert!(tsql.contains("IN ('paid')"), "got: {}", tsql);
}

#[test]
fn test_semantics_stable_across_dialects() {
    // Clause skeleton is dialect-independent: same clauses, same order.
    let query = rollup().with_filter(status_equals(&["paid"]));

    for dialect in [
        Dialect::Ansi,
        Dialect::Postgres,
        Dialect::BigQuery,
        Dialect::TSql,
    ] {
        let sql = compile_for(dialect, &query);
        let select_at = sql.find("SELECT").unwrap();
        let from_at = sql.find("FROM").unwrap();
        let where_at = sql.find("WHERE").unwrap();
        let group_at = sql.find("GROUP BY").unwrap();
        let order_at = sql.find("ORDER BY").unwrap();
        assert!(
            select_at < from_at && from_at < where_at && where_at < group_at && group_at < order_at,
            "clause order broken for {:?}: {}",
            dialect,
            sql
        );
        assert!(!sql.contains("customers"), "unreferenced join leaked: {}", sql);
    }
}

#[test]
fn test_dialect_names_parse_from_config() {
    assert_eq!("ansi".parse::<Dialect>(), Ok(Dialect::Ansi));
    assert_eq!("postgresql".parse::<Dialect>(), Ok(Dialect::Postgres));
    assert_eq!("bigquery".parse::<Dialect>(), Ok(Dialect::BigQuery));
    assert_eq!("mssql".parse::<Dialect>(), Ok(Dialect::TSql));
    assert!("oracle".parse::<Dialect>().is_err());
}
