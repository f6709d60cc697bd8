//! Write operations for the catalog graph.
//!
//! Each operation runs in its own write transaction. Drives and controllers
//! are always inserted; benchmark runs and measured values are merged on
//! their keys (`name`, and `(type, name)` respectively). `created_at` is
//! always taken from the server clock.

use neo4rs::Txn;

use benchgraph_core::{
    BenchmarkRun, Controller, Drive, Label, NewBenchmarkRun, NewController, NewDrive,
    NewMeasuredValue, NodeId, Relationship,
};

use crate::client::{finish_txn, txn_one, GraphClient, GraphError};
use crate::cypher::Statement;
use crate::decode::{decode_row, FromNodeRow};

// ── Statement Builders ───────────────────────────────────────────

pub fn create_drive_statement(drive: &NewDrive) -> Statement {
    Statement::new(format!(
        "CREATE (m:`{label}` {{name: $name, model: $model, vendor: $vendor,
                              capacity: $capacity, created_at: timestamp()}})
         RETURN id(m) AS id, m",
        label = Label::Drive
    ))
    .param("name", drive.name.clone())
    .param("model", drive.model.clone())
    .param("vendor", drive.vendor.clone())
    .param("capacity", drive.capacity)
}

pub fn create_controller_statement(controller: &NewController) -> Statement {
    let props = "{model: $model, vendor: $vendor, description: $description, \
                 created_at: timestamp()}";
    let stmt = match controller.drive_id {
        Some(drive_id) => Statement::new(format!(
            "MATCH (n:`{drive}`) WHERE id(n) = $driver_id
             CREATE (n)-[:{rel}]->(m:`{label}` {props})
             RETURN id(m) AS id, m",
            drive = Label::Drive,
            rel = Relationship::Controller,
            label = Label::Controller,
        ))
        .param("driver_id", drive_id),
        None => Statement::new(format!(
            "CREATE (m:`{label}` {props})
             RETURN id(m) AS id, m",
            label = Label::Controller,
        )),
    };
    stmt.param("model", controller.model.clone())
        .param("vendor", controller.vendor.clone())
        .param("description", controller.description.clone())
}

pub fn merge_benchmark_run_statement(name: &str, description: &str) -> Statement {
    Statement::new(format!(
        "MERGE (m:`{label}` {{name: $name}})
           ON CREATE SET m.description = $description, m.created_at = timestamp()
           ON MATCH SET m.description = $description
         RETURN id(m) AS id, m",
        label = Label::BenchmarkRun
    ))
    .param("name", name)
    .param("description", description)
}

pub fn merge_measured_value_statement(record: &NewMeasuredValue) -> Statement {
    Statement::new(format!(
        "MERGE (m:`{label}` {{type: $record_type, name: $record_name}})
           ON CREATE SET m.value = $value, m.unit = $record_unit, m.created_at = timestamp()
           ON MATCH SET m.value = $value, m.unit = $record_unit, m.created_at = timestamp()
         RETURN id(m) AS id, m",
        label = Label::MeasuredValue
    ))
    .param("record_type", record.record_type.as_str())
    .param("record_name", record.name.as_str())
    .param("record_unit", record.unit.as_str())
    .param("value", record.value)
}

/// Idempotently link two existing nodes. Yields no row when either is missing.
pub fn merge_link_statement(rel: Relationship, from_id: NodeId, to_id: NodeId) -> Statement {
    let (from, to) = rel.endpoints();
    Statement::new(format!(
        "MATCH (a:`{from}`), (b:`{to}`)
         WHERE id(a) = $from_id AND id(b) = $to_id
         MERGE (a)-[r:{rel}]->(b)
         RETURN type(r) AS rel"
    ))
    .param("from_id", from_id)
    .param("to_id", to_id)
}

// ── Mutations ────────────────────────────────────────────────────

impl GraphClient {
    /// Insert a new drive. Never deduplicates.
    pub async fn create_drive(&self, drive: &NewDrive) -> Result<Drive, GraphError> {
        let mut txn = self.start_txn().await?;
        let result = create_one(&mut txn, create_drive_statement(drive), None).await;
        let created: Drive = finish_txn(txn, result).await?;
        tracing::info!(id = created.id, name = %drive.name, "Created drive");
        Ok(created)
    }

    /// Insert a new controller, linked from `drive_id` when one is given.
    pub async fn create_controller(
        &self,
        controller: &NewController,
    ) -> Result<Controller, GraphError> {
        let mut txn = self.start_txn().await?;
        let result = create_one(
            &mut txn,
            create_controller_statement(controller),
            controller.drive_id.map(|id| (Label::Drive, id)),
        )
        .await;
        let created: Controller = finish_txn(txn, result).await?;
        tracing::info!(id = created.id, drive_id = ?controller.drive_id, "Created controller");
        Ok(created)
    }

    /// Merge a benchmark run and its records onto a drive, all in one transaction.
    pub async fn create_benchmark_run(
        &self,
        run: &NewBenchmarkRun,
    ) -> Result<BenchmarkRun, GraphError> {
        let mut txn = self.start_txn().await?;
        let result = merge_benchmark_run(&mut txn, run).await;
        let merged = finish_txn(txn, result).await?;
        tracing::info!(
            id = merged.id,
            name = %merged.name,
            drive_id = run.drive_id,
            records = run.records.len(),
            "Merged benchmark run"
        );
        Ok(merged)
    }
}

/// Run a single create statement that must return exactly the new node.
async fn create_one<T: FromNodeRow>(
    txn: &mut Txn,
    stmt: Statement,
    parent: Option<(Label, NodeId)>,
) -> Result<T, GraphError> {
    match txn_one(txn, stmt).await? {
        Some(row) => decode_row(&row),
        None => Err(missing_row_error(parent)),
    }
}

/// With a parent, no row means its `MATCH` found nothing. Without one, a
/// bare `CREATE` always yields a row, so an empty result is a driver fault.
fn missing_row_error(parent: Option<(Label, NodeId)>) -> GraphError {
    match parent {
        Some((label, id)) => GraphError::NotFound {
            label: label.to_string(),
            id,
        },
        None => GraphError::Serialization("CREATE returned no row".to_string()),
    }
}

async fn merge_benchmark_run(
    txn: &mut Txn,
    run: &NewBenchmarkRun,
) -> Result<BenchmarkRun, GraphError> {
    let row = txn_one(txn, merge_benchmark_run_statement(&run.name, &run.description))
        .await?
        .ok_or_else(|| GraphError::Serialization("MERGE returned no row".to_string()))?;
    let merged: BenchmarkRun = decode_row(&row)?;

    for record in &run.records {
        let row = txn_one(txn, merge_measured_value_statement(record))
            .await?
            .ok_or_else(|| GraphError::Serialization("MERGE returned no row".to_string()))?;
        let value_id: i64 = row
            .get("id")
            .map_err(|e| GraphError::Serialization(format!("Failed to read node id: {e}")))?;
        link(txn, Relationship::MeasuredValue, merged.id, value_id).await?;
    }

    link(txn, Relationship::BenchmarkRun, run.drive_id, merged.id).await?;
    Ok(merged)
}

async fn link(
    txn: &mut Txn,
    rel: Relationship,
    from_id: NodeId,
    to_id: NodeId,
) -> Result<(), GraphError> {
    match txn_one(txn, merge_link_statement(rel, from_id, to_id)).await? {
        Some(_) => Ok(()),
        None => Err(GraphError::NotFound {
            label: rel.endpoints().0.to_string(),
            id: from_id,
        }),
    }
}
