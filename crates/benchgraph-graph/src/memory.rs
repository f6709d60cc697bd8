//! In-memory implementation of the store seams.
//!
//! Follows the graph store's semantics closely enough to exercise resolvers
//! and mutations without a database: sequential ids starting at 0,
//! insertion-ordered results, undirected adjacency for linked reads, and the
//! same merge keys. Every mutation validates before it writes, so a failed
//! call leaves the store untouched.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use benchgraph_core::{
    BenchmarkRun, BenchmarkRunFilter, Controller, ControllerFilter, Drive, DriveFilter, Label,
    LegacyDrivePayload, MeasuredValue, MeasuredValueFilter, NewBenchmarkRun, NewController,
    NewDrive, NodeId, Relationship,
};

use crate::client::GraphError;
use crate::store::{CatalogStore, LegacyDriveSink};

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: NodeId,
    drives: Vec<Drive>,
    controllers: Vec<Controller>,
    runs: Vec<BenchmarkRun>,
    values: Vec<MeasuredValue>,
    edges: Vec<(NodeId, Relationship, NodeId)>,
}

impl Inner {
    fn allocate(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.edges
            .iter()
            .any(|&(from, _, to)| (from == a && to == b) || (from == b && to == a))
    }

    fn in_scope(&self, id: NodeId, linked_id: Option<NodeId>) -> bool {
        linked_id.map_or(true, |linked| self.adjacent(id, linked))
    }

    fn has_drive(&self, id: NodeId) -> bool {
        self.drives.iter().any(|d| d.id == id)
    }

    fn merge_edge(&mut self, from: NodeId, rel: Relationship, to: NodeId) {
        if !self.edges.contains(&(from, rel, to)) {
            self.edges.push((from, rel, to));
        }
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn drive_not_found(id: NodeId) -> GraphError {
    GraphError::NotFound {
        label: Label::Drive.to_string(),
        id,
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of relationships of `rel` currently stored.
    pub async fn relationship_count(&self, rel: Relationship) -> usize {
        let inner = self.inner.read().await;
        inner.edges.iter().filter(|(_, r, _)| *r == rel).count()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn verify_connectivity(&self) -> Result<(), GraphError> {
        Ok(())
    }

    async fn drives(&self, filter: &DriveFilter) -> Result<Vec<Drive>, GraphError> {
        let inner = self.inner.read().await;
        Ok(inner
            .drives
            .iter()
            .filter(|d| filter.matches(d) && inner.in_scope(d.id, filter.linked_id))
            .cloned()
            .collect())
    }

    async fn controllers(&self, filter: &ControllerFilter) -> Result<Vec<Controller>, GraphError> {
        let inner = self.inner.read().await;
        Ok(inner
            .controllers
            .iter()
            .filter(|c| filter.matches(c) && inner.in_scope(c.id, filter.linked_id))
            .cloned()
            .collect())
    }

    async fn benchmark_runs(
        &self,
        filter: &BenchmarkRunFilter,
    ) -> Result<Vec<BenchmarkRun>, GraphError> {
        let inner = self.inner.read().await;
        Ok(inner
            .runs
            .iter()
            .filter(|r| filter.matches(r) && inner.in_scope(r.id, filter.linked_id))
            .cloned()
            .collect())
    }

    async fn measured_values(
        &self,
        filter: &MeasuredValueFilter,
    ) -> Result<Vec<MeasuredValue>, GraphError> {
        let inner = self.inner.read().await;
        Ok(inner
            .values
            .iter()
            .filter(|v| filter.matches(v) && inner.in_scope(v.id, filter.linked_id))
            .cloned()
            .collect())
    }

    async fn create_drive(&self, drive: &NewDrive) -> Result<Drive, GraphError> {
        let mut inner = self.inner.write().await;
        let created = Drive {
            id: inner.allocate(),
            name: Some(drive.name.clone()),
            model: Some(drive.model.clone()),
            vendor: Some(drive.vendor.clone()),
            capacity: Some(drive.capacity),
            created_at: Some(now_millis()),
        };
        inner.drives.push(created.clone());
        Ok(created)
    }

    async fn create_controller(
        &self,
        controller: &NewController,
    ) -> Result<Controller, GraphError> {
        let mut inner = self.inner.write().await;
        if let Some(drive_id) = controller.drive_id {
            if !inner.has_drive(drive_id) {
                return Err(drive_not_found(drive_id));
            }
        }

        let created = Controller {
            id: inner.allocate(),
            model: Some(controller.model.clone()),
            vendor: Some(controller.vendor.clone()),
            description: Some(controller.description.clone()),
            created_at: Some(now_millis()),
        };
        inner.controllers.push(created.clone());
        if let Some(drive_id) = controller.drive_id {
            inner
                .edges
                .push((drive_id, Relationship::Controller, created.id));
        }
        Ok(created)
    }

    async fn create_benchmark_run(
        &self,
        run: &NewBenchmarkRun,
    ) -> Result<BenchmarkRun, GraphError> {
        let mut inner = self.inner.write().await;
        if !inner.has_drive(run.drive_id) {
            return Err(drive_not_found(run.drive_id));
        }
        let now = now_millis();

        let merged = match inner.runs.iter().position(|r| r.name == run.name) {
            Some(i) => {
                inner.runs[i].description = Some(run.description.clone());
                inner.runs[i].clone()
            }
            None => {
                let created = BenchmarkRun {
                    id: inner.allocate(),
                    name: run.name.clone(),
                    description: Some(run.description.clone()),
                    created_at: Some(now),
                };
                inner.runs.push(created.clone());
                created
            }
        };

        for record in &run.records {
            let existing = inner
                .values
                .iter()
                .position(|v| v.record_type == record.record_type && v.name == record.name);
            let value_id = match existing {
                Some(i) => {
                    let value = &mut inner.values[i];
                    value.value = record.value;
                    value.unit = record.unit;
                    value.created_at = Some(now);
                    value.id
                }
                None => {
                    let id = inner.allocate();
                    inner.values.push(MeasuredValue {
                        id,
                        record_type: record.record_type,
                        name: record.name,
                        unit: record.unit,
                        value: record.value,
                        created_at: Some(now),
                    });
                    id
                }
            };
            inner.merge_edge(merged.id, Relationship::MeasuredValue, value_id);
        }

        inner.merge_edge(run.drive_id, Relationship::BenchmarkRun, merged.id);
        Ok(merged)
    }
}

#[async_trait]
impl LegacyDriveSink for MemoryStore {
    async fn insert_legacy_drive(
        &self,
        payload: &LegacyDrivePayload,
    ) -> Result<Vec<LegacyDrivePayload>, GraphError> {
        let mut inner = self.inner.write().await;
        let id = inner.allocate();
        inner.drives.push(Drive {
            id,
            name: Some(payload.name.clone()),
            model: Some(payload.model.clone()),
            vendor: Some(payload.vendor.clone()),
            capacity: Some(payload.capacity as f64),
            created_at: None,
        });
        Ok(vec![payload.clone()])
    }
}
