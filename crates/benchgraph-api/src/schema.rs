//! GraphQL schema over the drive catalog.
//!
//! Object types keep the wire names existing clients query by
//! (`DriverMeta`, `ControllerMeta`, `ASSSDBenchMark`, `RecordValue`).
//! Nested list fields scope their results to the parent node unless the
//! caller passes an explicit `linkedId`.

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, Object, Schema};

use benchgraph_core::{
    resolve_link, BenchmarkRun, BenchmarkRunFilter, Controller, ControllerFilter, Drive,
    DriveFilter, MeasuredValue, MeasuredValueFilter, NewBenchmarkRun, NewController, NewDrive,
    NewMeasuredValue, NodeId, RecordName, RecordType, RecordUnit,
};
use benchgraph_graph::{CatalogStore, GraphError};

pub type CatalogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema around a shared store handle.
pub fn build_schema(store: Arc<dyn CatalogStore>) -> CatalogSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish()
}

fn store<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<dyn CatalogStore>> {
    ctx.data::<Arc<dyn CatalogStore>>()
}

fn store_error(e: GraphError) -> async_graphql::Error {
    tracing::warn!(error = %e, "Catalog store request failed");
    async_graphql::Error::new(e.to_string())
}

// ── Shared Resolvers ─────────────────────────────────────────────

async fn resolve_drives(
    ctx: &Context<'_>,
    filter: DriveFilter,
    parent: Option<NodeId>,
) -> async_graphql::Result<Vec<DriverMeta>> {
    let filter = DriveFilter {
        linked_id: resolve_link(filter.linked_id, parent),
        ..filter
    };
    let drives = store(ctx)?.drives(&filter).await.map_err(store_error)?;
    Ok(drives.into_iter().map(DriverMeta).collect())
}

async fn resolve_controllers(
    ctx: &Context<'_>,
    filter: ControllerFilter,
    parent: Option<NodeId>,
) -> async_graphql::Result<Vec<ControllerMeta>> {
    let filter = ControllerFilter {
        linked_id: resolve_link(filter.linked_id, parent),
        ..filter
    };
    let controllers = store(ctx)?
        .controllers(&filter)
        .await
        .map_err(store_error)?;
    Ok(controllers.into_iter().map(ControllerMeta).collect())
}

// ── Object Types ─────────────────────────────────────────────────

/// A storage drive.
pub struct DriverMeta(pub Drive);

#[Object]
impl DriverMeta {
    async fn id(&self) -> NodeId {
        self.0.id
    }

    async fn name(&self) -> Option<String> {
        self.0.name.clone()
    }

    async fn model(&self) -> Option<String> {
        self.0.model.clone()
    }

    async fn vendor(&self) -> Option<String> {
        self.0.vendor.clone()
    }

    /// Capacity in the catalog's unit (GB).
    async fn capacity(&self) -> Option<f64> {
        self.0.capacity
    }

    /// Server timestamp in epoch milliseconds.
    async fn created_at(&self) -> Option<i64> {
        self.0.created_at
    }

    #[allow(clippy::too_many_arguments)]
    async fn controller_meta(
        &self,
        ctx: &Context<'_>,
        id: Option<NodeId>,
        model: Option<String>,
        vendor: Option<String>,
        description: Option<String>,
        created_at: Option<i64>,
        linked_id: Option<NodeId>,
    ) -> async_graphql::Result<Vec<ControllerMeta>> {
        let filter = ControllerFilter {
            id,
            model,
            vendor,
            description,
            created_at,
            linked_id,
        };
        resolve_controllers(ctx, filter, Some(self.0.id)).await
    }

    /// Benchmark runs recorded against this drive.
    async fn as_ssd_benchmark(
        &self,
        ctx: &Context<'_>,
        id: Option<NodeId>,
        name: Option<String>,
        description: Option<String>,
        created_at: Option<i64>,
    ) -> async_graphql::Result<Vec<AsSsdBenchmark>> {
        let filter = BenchmarkRunFilter {
            id,
            name,
            description,
            created_at,
            linked_id: Some(self.0.id),
        };
        let runs = store(ctx)?
            .benchmark_runs(&filter)
            .await
            .map_err(store_error)?;
        Ok(runs.into_iter().map(AsSsdBenchmark).collect())
    }
}

/// A drive controller.
pub struct ControllerMeta(pub Controller);

#[Object]
impl ControllerMeta {
    async fn id(&self) -> NodeId {
        self.0.id
    }

    async fn model(&self) -> Option<String> {
        self.0.model.clone()
    }

    async fn vendor(&self) -> Option<String> {
        self.0.vendor.clone()
    }

    async fn description(&self) -> Option<String> {
        self.0.description.clone()
    }

    async fn created_at(&self) -> Option<i64> {
        self.0.created_at
    }

    #[allow(clippy::too_many_arguments)]
    async fn driver_meta(
        &self,
        ctx: &Context<'_>,
        id: Option<NodeId>,
        name: Option<String>,
        model: Option<String>,
        vendor: Option<String>,
        capacity: Option<f64>,
        created_at: Option<i64>,
        linked_id: Option<NodeId>,
    ) -> async_graphql::Result<Vec<DriverMeta>> {
        let filter = DriveFilter {
            id,
            name,
            model,
            vendor,
            capacity,
            created_at,
            linked_id,
        };
        resolve_drives(ctx, filter, Some(self.0.id)).await
    }
}

/// A named benchmark run.
pub struct AsSsdBenchmark(pub BenchmarkRun);

#[Object(name = "ASSSDBenchMark")]
impl AsSsdBenchmark {
    async fn id(&self) -> NodeId {
        self.0.id
    }

    async fn name(&self) -> String {
        self.0.name.clone()
    }

    async fn description(&self) -> Option<String> {
        self.0.description.clone()
    }

    async fn created_at(&self) -> Option<i64> {
        self.0.created_at
    }

    #[allow(clippy::too_many_arguments)]
    async fn record_value(
        &self,
        ctx: &Context<'_>,
        id: Option<NodeId>,
        #[graphql(name = "type")] record_type: Option<RecordType>,
        unit: Option<RecordUnit>,
        name: Option<RecordName>,
        value: Option<f64>,
        created_at: Option<i64>,
    ) -> async_graphql::Result<Vec<RecordValue>> {
        let filter = MeasuredValueFilter {
            id,
            record_type,
            unit,
            name,
            value,
            created_at,
            linked_id: Some(self.0.id),
        };
        let values = store(ctx)?
            .measured_values(&filter)
            .await
            .map_err(store_error)?;
        Ok(values.into_iter().map(RecordValue).collect())
    }
}

/// One measurement inside a benchmark run.
pub struct RecordValue(pub MeasuredValue);

#[Object]
impl RecordValue {
    async fn id(&self) -> NodeId {
        self.0.id
    }

    #[graphql(name = "type")]
    async fn record_type(&self) -> RecordType {
        self.0.record_type
    }

    async fn name(&self) -> RecordName {
        self.0.name
    }

    async fn unit(&self) -> RecordUnit {
        self.0.unit
    }

    async fn value(&self) -> f64 {
        self.0.value
    }

    async fn created_at(&self) -> Option<i64> {
        self.0.created_at
    }
}

// ── Roots ────────────────────────────────────────────────────────

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Drives matching every supplied argument.
    #[allow(clippy::too_many_arguments)]
    async fn driver_meta(
        &self,
        ctx: &Context<'_>,
        id: Option<NodeId>,
        name: Option<String>,
        model: Option<String>,
        vendor: Option<String>,
        capacity: Option<f64>,
        created_at: Option<i64>,
        linked_id: Option<NodeId>,
    ) -> async_graphql::Result<Vec<DriverMeta>> {
        let filter = DriveFilter {
            id,
            name,
            model,
            vendor,
            capacity,
            created_at,
            linked_id,
        };
        tracing::debug!(?filter, "Resolving driverMeta");
        resolve_drives(ctx, filter, None).await
    }

    /// Controllers matching every supplied argument.
    #[allow(clippy::too_many_arguments)]
    async fn controller_meta(
        &self,
        ctx: &Context<'_>,
        id: Option<NodeId>,
        model: Option<String>,
        vendor: Option<String>,
        description: Option<String>,
        created_at: Option<i64>,
        linked_id: Option<NodeId>,
    ) -> async_graphql::Result<Vec<ControllerMeta>> {
        let filter = ControllerFilter {
            id,
            model,
            vendor,
            description,
            created_at,
            linked_id,
        };
        tracing::debug!(?filter, "Resolving controllerMeta");
        resolve_controllers(ctx, filter, None).await
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_driver_meta(
        &self,
        ctx: &Context<'_>,
        name: String,
        model: String,
        vendor: String,
        capacity: f64,
    ) -> async_graphql::Result<DriverMeta> {
        let drive = NewDrive {
            name,
            model,
            vendor,
            capacity,
        };
        let created = store(ctx)?
            .create_drive(&drive)
            .await
            .map_err(store_error)?;
        Ok(DriverMeta(created))
    }

    /// Create a controller, linked from `driverId` when given.
    async fn create_controller_meta(
        &self,
        ctx: &Context<'_>,
        driver_id: Option<NodeId>,
        model: String,
        vendor: String,
        description: String,
    ) -> async_graphql::Result<ControllerMeta> {
        let controller = NewController {
            drive_id: driver_id,
            model,
            vendor,
            description,
        };
        let created = store(ctx)?
            .create_controller(&controller)
            .await
            .map_err(store_error)?;
        Ok(ControllerMeta(created))
    }

    /// Merge a benchmark run by name onto a drive together with its records.
    /// Records are merged on `(type, name)`.
    async fn create_as_ssd_benchmark(
        &self,
        ctx: &Context<'_>,
        driver_id: NodeId,
        name: String,
        description: String,
        records: Vec<NewMeasuredValue>,
    ) -> async_graphql::Result<AsSsdBenchmark> {
        let run = NewBenchmarkRun {
            drive_id: driver_id,
            name,
            description,
            records,
        };
        let merged = store(ctx)?
            .create_benchmark_run(&run)
            .await
            .map_err(store_error)?;
        Ok(AsSsdBenchmark(merged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchgraph_graph::MemoryStore;

    #[test]
    fn test_sdl_keeps_wire_names() {
        let schema = build_schema(Arc::new(MemoryStore::new()));
        let sdl = schema.sdl();
        assert!(sdl.contains("type DriverMeta"));
        assert!(sdl.contains("type ControllerMeta"));
        assert!(sdl.contains("type ASSSDBenchMark"));
        assert!(sdl.contains("type RecordValue"));
        assert!(sdl.contains("input RecordValueInput"));
        assert!(sdl.contains("SEQ_LATENCY"));
        assert!(sdl.contains("createAsSsdBenchmark"));
    }
}
