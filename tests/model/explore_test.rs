//! Integration tests for explore documents.
//!
//! These tests drive the deserialize-then-validate path a service exposes:
//! an explore arrives as JSON, is validated, and is then ready for metric
//! queries.

use avocet::model::{DimensionType, Explore, FieldId, MeasureType, Table};
use avocet::CompileError;

fn jaffle_explore_json() -> &'static str {
    r#"{
        "name": "orders",
        "baseTable": "orders",
        "joinedTables": [
            {"table": "customers", "sqlOn": "${orders}.customer_id = ${customers}.id"}
        ],
        "tables": {
            "orders": {
                "name": "orders",
                "sqlTable": "jaffle.orders",
                "dimensions": {
                    "status": {"name": "status", "table": "orders", "type": "string", "sql": "${TABLE}.status"},
                    "amount": {"name": "amount", "table": "orders", "type": "number", "sql": "${TABLE}.amount"}
                },
                "measures": {
                    "total": {"name": "total", "table": "orders", "type": "sum", "sql": "${TABLE}.amount"}
                }
            },
            "customers": {
                "name": "customers",
                "sqlTable": "jaffle.customers",
                "dimensions": {
                    "country": {"name": "country", "table": "customers", "type": "string", "sql": "${TABLE}.country"}
                },
                "measures": {}
            }
        }
    }"#
}

#[test]
fn test_document_parses_and_validates() {
    let explore: Explore = serde_json::from_str(jaffle_explore_json()).unwrap();
    let explore = explore.validated().unwrap();

    assert_eq!(explore.name, "orders");
    assert_eq!(explore.base_table, "orders");
    assert_eq!(explore.joined_tables[0].table, "customers");
    assert_eq!(explore.fields().len(), 4);
}

#[test]
fn test_builder_assembly_matches_wire_document() {
    let orders = Table::new("orders", "jaffle.orders")
        .with_dimension("status", DimensionType::String, "${TABLE}.status")
        .with_dimension("amount", DimensionType::Number, "${TABLE}.amount")
        .with_measure("total", MeasureType::Sum, "${TABLE}.amount");
    let customers = Table::new("customers", "jaffle.customers").with_dimension(
        "country",
        DimensionType::String,
        "${TABLE}.country",
    );
    let built =
        Explore::new("orders", orders).with_join(customers, "${orders}.customer_id = ${customers}.id");

    let parsed: Explore = serde_json::from_str(jaffle_explore_json()).unwrap();
    assert_eq!(built, parsed);
}

#[test]
fn test_field_ids_resolve_across_tables() {
    let explore: Explore = serde_json::from_str(jaffle_explore_json()).unwrap();

    let status = explore.find_dimension(&FieldId::new("orders", "status")).unwrap();
    assert_eq!(status.dimension_type, DimensionType::String);

    let country = explore
        .find_dimension(&FieldId::new("customers", "country"))
        .unwrap();
    assert_eq!(country.table, "customers");

    let total = explore.find_measure(&FieldId::new("orders", "total")).unwrap();
    assert_eq!(total.measure_type, MeasureType::Sum);

    // A measure id is not a dimension id, and vice versa.
    assert!(explore.find_dimension(&FieldId::new("orders", "total")).is_none());
    assert!(explore.find_measure(&FieldId::new("orders", "status")).is_none());
}

#[test]
fn test_base_table_must_be_defined() {
    let explore: Explore = serde_json::from_str(
        r#"{
            "name": "orders",
            "baseTable": "missing",
            "joinedTables": [],
            "tables": {
                "orders": {"name": "orders", "sqlTable": "jaffle.orders", "dimensions": {}, "measures": {}}
            }
        }"#,
    )
    .unwrap();

    let err = explore.validated().unwrap_err();
    match err {
        CompileError::InvalidExplore { explore, message } => {
            assert_eq!(explore, "orders");
            assert!(message.contains("base table 'missing'"), "got: {}", message);
        }
        other => panic!("expected InvalidExplore, got {:?}", other),
    }
}

#[test]
fn test_joined_table_must_be_defined() {
    let explore: Explore = serde_json::from_str(
        r#"{
            "name": "orders",
            "baseTable": "orders",
            "joinedTables": [
                {"table": "payments", "sqlOn": "${orders}.id = ${payments}.order_id"}
            ],
            "tables": {
                "orders": {"name": "orders", "sqlTable": "jaffle.orders", "dimensions": {}, "measures": {}}
            }
        }"#,
    )
    .unwrap();

    let err = explore.validated().unwrap_err();
    assert!(err.to_string().contains("joined table 'payments'"), "got: {}", err);
}

#[test]
fn test_join_condition_may_only_reference_known_tables() {
    let mut explore: Explore = serde_json::from_str(jaffle_explore_json()).unwrap();
    explore.joined_tables[0].sql_on = "${orders}.customer_id = ${customer}.id".to_string();

    let err = explore.validated().unwrap_err();
    assert!(err.to_string().contains("unknown table 'customer'"), "got: {}", err);
}

#[test]
fn test_field_declaring_foreign_table_is_rejected() {
    let explore: Explore = serde_json::from_str(
        r#"{
            "name": "orders",
            "baseTable": "orders",
            "joinedTables": [],
            "tables": {
                "orders": {
                    "name": "orders",
                    "sqlTable": "jaffle.orders",
                    "dimensions": {
                        "city": {"name": "city", "table": "customers", "type": "string", "sql": "${TABLE}.city"}
                    },
                    "measures": {}
                }
            }
        }"#,
    )
    .unwrap();

    let err = explore.validated().unwrap_err();
    assert!(err.to_string().contains("declares table 'customers'"), "got: {}", err);
}

#[test]
fn test_colliding_field_ids_are_rejected() {
    // "a" + "b_c" and "a_b" + "c" both derive the id "a_b_c".
    let base = Table::new("a", "db.a").with_dimension("b_c", DimensionType::String, "${TABLE}.b_c");
    let joined = Table::new("a_b", "db.a_b").with_dimension("c", DimensionType::String, "${TABLE}.c");

    let err = Explore::new("orders", base)
        .with_join(joined, "${a}.id = ${a_b}.id")
        .validated()
        .unwrap_err();

    match err {
        CompileError::DuplicateFieldId { field_id, .. } => {
            assert_eq!(field_id.as_str(), "a_b_c");
        }
        other => panic!("expected DuplicateFieldId, got {:?}", other),
    }
}

#[test]
fn test_serialization_roundtrip_preserves_structure() {
    let explore: Explore = serde_json::from_str(jaffle_explore_json()).unwrap();
    let value = serde_json::to_value(&explore).unwrap();

    assert_eq!(value["baseTable"], "orders");
    assert_eq!(
        value["joinedTables"][0]["sqlOn"],
        "${orders}.customer_id = ${customers}.id"
    );
    assert_eq!(value["tables"]["customers"]["sqlTable"], "jaffle.customers");
    // Unset label is omitted, not serialized as null.
    assert!(value.get("label").is_none());

    let back: Explore = serde_json::from_value(value).unwrap();
    assert_eq!(back, explore);
}
