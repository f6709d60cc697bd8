//! Store seams used by the API layer.
//!
//! The API holds an `Arc<dyn CatalogStore>` built once at startup; tests
//! substitute [`crate::memory::MemoryStore`].

use async_trait::async_trait;

use benchgraph_core::{
    BenchmarkRun, BenchmarkRunFilter, Controller, ControllerFilter, Drive, DriveFilter,
    LegacyDrivePayload, MeasuredValue, MeasuredValueFilter, NewBenchmarkRun, NewController,
    NewDrive,
};

use crate::client::{GraphClient, GraphError};

/// Typed reads and writes over the drive catalog.
///
/// Implementations perform no retries and no local recovery: store errors
/// are returned unchanged. Reads return an empty list, not an error, when
/// nothing matches.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn verify_connectivity(&self) -> Result<(), GraphError>;

    async fn drives(&self, filter: &DriveFilter) -> Result<Vec<Drive>, GraphError>;
    async fn controllers(&self, filter: &ControllerFilter) -> Result<Vec<Controller>, GraphError>;
    async fn benchmark_runs(
        &self,
        filter: &BenchmarkRunFilter,
    ) -> Result<Vec<BenchmarkRun>, GraphError>;
    async fn measured_values(
        &self,
        filter: &MeasuredValueFilter,
    ) -> Result<Vec<MeasuredValue>, GraphError>;

    async fn create_drive(&self, drive: &NewDrive) -> Result<Drive, GraphError>;
    async fn create_controller(&self, controller: &NewController)
        -> Result<Controller, GraphError>;
    async fn create_benchmark_run(&self, run: &NewBenchmarkRun)
        -> Result<BenchmarkRun, GraphError>;
}

/// The legacy flat insert, behind its own seam so it can be dropped without
/// touching [`CatalogStore`].
#[async_trait]
pub trait LegacyDriveSink: Send + Sync {
    async fn insert_legacy_drive(
        &self,
        payload: &LegacyDrivePayload,
    ) -> Result<Vec<LegacyDrivePayload>, GraphError>;
}

#[async_trait]
impl CatalogStore for GraphClient {
    async fn verify_connectivity(&self) -> Result<(), GraphError> {
        GraphClient::verify_connectivity(self).await
    }

    async fn drives(&self, filter: &DriveFilter) -> Result<Vec<Drive>, GraphError> {
        self.find_drives(filter).await
    }

    async fn controllers(&self, filter: &ControllerFilter) -> Result<Vec<Controller>, GraphError> {
        self.find_controllers(filter).await
    }

    async fn benchmark_runs(
        &self,
        filter: &BenchmarkRunFilter,
    ) -> Result<Vec<BenchmarkRun>, GraphError> {
        self.find_benchmark_runs(filter).await
    }

    async fn measured_values(
        &self,
        filter: &MeasuredValueFilter,
    ) -> Result<Vec<MeasuredValue>, GraphError> {
        self.find_measured_values(filter).await
    }

    async fn create_drive(&self, drive: &NewDrive) -> Result<Drive, GraphError> {
        GraphClient::create_drive(self, drive).await
    }

    async fn create_controller(
        &self,
        controller: &NewController,
    ) -> Result<Controller, GraphError> {
        GraphClient::create_controller(self, controller).await
    }

    async fn create_benchmark_run(
        &self,
        run: &NewBenchmarkRun,
    ) -> Result<BenchmarkRun, GraphError> {
        GraphClient::create_benchmark_run(self, run).await
    }
}

#[async_trait]
impl LegacyDriveSink for GraphClient {
    async fn insert_legacy_drive(
        &self,
        payload: &LegacyDrivePayload,
    ) -> Result<Vec<LegacyDrivePayload>, GraphError> {
        GraphClient::insert_legacy_drive(self, payload).await
    }
}
