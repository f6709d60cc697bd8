//! End-to-end GraphQL tests over an in-memory catalog.

use std::sync::Arc;

use benchgraph_api::{build_schema, CatalogSchema};
use benchgraph_graph::MemoryStore;
use serde_json::{json, Value};

fn schema() -> CatalogSchema {
    build_schema(Arc::new(MemoryStore::new()))
}

async fn execute(schema: &CatalogSchema, query: &str) -> Value {
    let response = schema.execute(query).await;
    assert!(response.errors.is_empty(), "errors: {:?}", response.errors);
    response.data.into_json().unwrap()
}

async fn create_drive(schema: &CatalogSchema, name: &str, capacity: f64) -> i64 {
    let data = execute(
        schema,
        &format!(
            r#"mutation {{ createDriverMeta(name: "{name}", model: "M1", vendor: "V1",
                capacity: {capacity:.1}) {{ id }} }}"#
        ),
    )
    .await;
    data["createDriverMeta"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_drive_filtered_by_capacity() {
    let schema = schema();
    let id = create_drive(&schema, "D1", 500.0).await;

    let hit = execute(&schema, "{ driverMeta(capacity: 500.0) { id name createdAt } }").await;
    let drives = hit["driverMeta"].as_array().unwrap();
    assert_eq!(drives.len(), 1);
    assert_eq!(drives[0]["id"], id);
    assert_eq!(drives[0]["name"], "D1");
    assert!(drives[0]["createdAt"].is_i64());

    let miss = execute(&schema, "{ driverMeta(capacity: 250.0) { id } }").await;
    assert_eq!(miss, json!({ "driverMeta": [] }));
}

#[tokio::test]
async fn test_controller_visible_only_under_its_drive() {
    let schema = schema();
    let d1 = create_drive(&schema, "D1", 500.0).await;
    let d2 = create_drive(&schema, "D2", 1000.0).await;

    let created = execute(
        &schema,
        &format!(
            r#"mutation {{ createControllerMeta(driverId: {d1}, model: "Phoenix",
                vendor: "Samsung", description: "8-channel") {{ id model }} }}"#
        ),
    )
    .await;
    assert_eq!(created["createControllerMeta"]["model"], "Phoenix");

    let data = execute(
        &schema,
        "{ driverMeta { name controllerMeta { model vendor description } } }",
    )
    .await;
    let drives = data["driverMeta"].as_array().unwrap();
    assert_eq!(drives.len(), 2);
    for drive in drives {
        let controllers = drive["controllerMeta"].as_array().unwrap();
        match drive["name"].as_str().unwrap() {
            "D1" => assert_eq!(
                controllers.as_slice(),
                [json!({ "model": "Phoenix", "vendor": "Samsung", "description": "8-channel" })]
            ),
            _ => assert!(controllers.is_empty()),
        }
    }

    let under_d2 = execute(
        &schema,
        &format!("{{ controllerMeta(linkedId: {d2}) {{ id }} }}"),
    )
    .await;
    assert_eq!(under_d2, json!({ "controllerMeta": [] }));
}

#[tokio::test]
async fn test_nested_traversal_from_controller_back_to_drive() {
    let schema = schema();
    let d1 = create_drive(&schema, "D1", 500.0).await;
    execute(
        &schema,
        &format!(
            r#"mutation {{ createControllerMeta(driverId: {d1}, model: "Phoenix",
                vendor: "Samsung", description: "8-channel") {{ id }} }}"#
        ),
    )
    .await;

    let data = execute(&schema, "{ controllerMeta { driverMeta { id name } } }").await;
    assert_eq!(data["controllerMeta"][0]["driverMeta"][0]["id"], d1);
    assert_eq!(data["controllerMeta"][0]["driverMeta"][0]["name"], "D1");
}

#[tokio::test]
async fn test_benchmark_rerun_keeps_one_record() {
    let schema = schema();
    let d1 = create_drive(&schema, "D1", 500.0).await;

    for (value, description) in [(1000, "first"), (2000, "second")] {
        execute(
            &schema,
            &format!(
                r#"mutation {{ createAsSsdBenchmark(driverId: {d1}, name: "B1",
                    description: "{description}",
                    records: [{{ type: READ, name: SEQ, unit: IOPS, value: {value} }}])
                    {{ id name }} }}"#
            ),
        )
        .await;
    }

    let data = execute(
        &schema,
        r#"{ driverMeta(name: "D1") { asSsdBenchmark {
                name description
                recordValue(type: READ, name: SEQ) { type name unit value }
            } } }"#,
    )
    .await;
    let runs = data["driverMeta"][0]["asSsdBenchmark"].as_array().unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0]["name"], "B1");
    assert_eq!(runs[0]["description"], "second");

    let records = runs[0]["recordValue"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0],
        json!({ "type": "READ", "name": "SEQ", "unit": "IOPS", "value": 2000.0 })
    );
}

#[tokio::test]
async fn test_name_filter_is_case_sensitive_containment() {
    let schema = schema();
    create_drive(&schema, "samsung 970", 1000.0).await;

    let upper = execute(&schema, r#"{ driverMeta(name: "Sam") { id } }"#).await;
    assert_eq!(upper, json!({ "driverMeta": [] }));

    let lower = execute(&schema, r#"{ driverMeta(name: "sam") { id } }"#).await;
    assert_eq!(lower["driverMeta"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_explicit_linked_id_overrides_parent() {
    let schema = schema();
    let d1 = create_drive(&schema, "D1", 500.0).await;
    let d2 = create_drive(&schema, "D2", 1000.0).await;
    for drive in [d1, d2] {
        execute(
            &schema,
            &format!(
                r#"mutation {{ createControllerMeta(driverId: {drive}, model: "C{drive}",
                    vendor: "V", description: "d") {{ id }} }}"#
            ),
        )
        .await;
    }

    let data = execute(
        &schema,
        &format!(r#"{{ driverMeta(name: "D1") {{ controllerMeta(linkedId: {d2}) {{ model }} }} }}"#),
    )
    .await;
    let controllers = data["driverMeta"][0]["controllerMeta"].as_array().unwrap();
    assert_eq!(controllers.len(), 1);
    assert_eq!(controllers[0]["model"], format!("C{d2}"));
}

#[tokio::test]
async fn test_benchmark_on_missing_drive_is_an_error() {
    let schema = schema();
    let response = schema
        .execute(
            r#"mutation { createAsSsdBenchmark(driverId: 42, name: "B1", description: "x",
                records: []) { id } }"#,
        )
        .await;
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("not found"));

    let data = execute(&schema, "{ driverMeta { id } }").await;
    assert_eq!(data, json!({ "driverMeta": [] }));
}

#[tokio::test]
async fn test_controller_on_missing_drive_is_an_error() {
    let schema = schema();
    let response = schema
        .execute(
            r#"mutation { createControllerMeta(driverId: 42, model: "Phoenix",
                vendor: "Samsung", description: "8-channel") { id } }"#,
        )
        .await;
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("not found"));

    let data = execute(&schema, "{ controllerMeta { id } }").await;
    assert_eq!(data, json!({ "controllerMeta": [] }));
}

#[tokio::test]
async fn test_controller_without_drive_is_created_unlinked() {
    let schema = schema();
    let d1 = create_drive(&schema, "D1", 500.0).await;

    let created = execute(
        &schema,
        r#"mutation { createControllerMeta(model: "Phoenix", vendor: "Samsung",
            description: "8-channel") { id createdAt } }"#,
    )
    .await;
    let id = created["createControllerMeta"]["id"].as_i64().unwrap();
    assert!(created["createControllerMeta"]["createdAt"].is_i64());

    let all = execute(&schema, "{ controllerMeta { id } }").await;
    assert_eq!(all, json!({ "controllerMeta": [{ "id": id }] }));

    let under_d1 = execute(
        &schema,
        &format!("{{ controllerMeta(linkedId: {d1}) {{ id }} }}"),
    )
    .await;
    assert_eq!(under_d1, json!({ "controllerMeta": [] }));
}

#[tokio::test]
async fn test_unknown_enum_value_rejected() {
    let schema = schema();
    let response = schema
        .execute(
            r#"{ driverMeta { asSsdBenchmark { recordValue(type: BOGUS) { id } } } }"#,
        )
        .await;
    assert!(!response.errors.is_empty());
}
