//! Flat REST insert kept for clients that predate the GraphQL schema.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use benchgraph_core::LegacyDrivePayload;
use benchgraph_graph::LegacyDriveSink;

use crate::error::Result;

pub const ADD_DRIVER_META_PATH: &str = "/api/v1/add-driver-meta";

pub fn router(sink: Arc<dyn LegacyDriveSink>) -> Router {
    Router::new()
        .route(ADD_DRIVER_META_PATH, post(add_driver_meta))
        .with_state(sink)
}

/// Store the payload as a drive node and echo the stored properties back as
/// `{"data": [{"m": {...}}]}`.
pub async fn add_driver_meta(
    State(sink): State<Arc<dyn LegacyDriveSink>>,
    Json(payload): Json<LegacyDrivePayload>,
) -> Result<Json<Value>> {
    let rows = sink.insert_legacy_drive(&payload).await?;
    for row in &rows {
        tracing::info!(name = %row.name, model = %row.model, vendor = %row.vendor, "Legacy drive stored");
    }
    let data: Vec<Value> = rows.into_iter().map(|m| json!({ "m": m })).collect();
    Ok(Json(json!({ "data": data })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchgraph_core::DriveFilter;
    use benchgraph_graph::{CatalogStore, MemoryStore};

    fn payload() -> LegacyDrivePayload {
        LegacyDrivePayload {
            name: "T7".to_string(),
            model: "MU-PC500".to_string(),
            vendor: "Samsung".to_string(),
            capacity: 500,
            interface: "typec".to_string(),
            date: "2020-01-01".to_string(),
            description: None,
            price: Some(599),
        }
    }

    #[tokio::test]
    async fn test_add_driver_meta_echoes_stored_node() {
        let store = Arc::new(MemoryStore::new());
        let sink: Arc<dyn LegacyDriveSink> = store.clone();
        let Json(body) = add_driver_meta(State(sink), Json(payload()))
            .await
            .unwrap();

        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["m"]["interface"], "typec");
        assert_eq!(data[0]["m"]["price"], 599);
        assert!(data[0]["m"].get("description").is_none());

        let drives = store
            .drives(&DriveFilter {
                name: Some("T7".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(drives.len(), 1);
        assert_eq!(drives[0].capacity, Some(500.0));
    }
}
