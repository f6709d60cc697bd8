//! Mapping of `(id, node)` result rows back into domain values.

use neo4rs::{Node, Row};

use benchgraph_core::{
    BenchmarkRun, CatalogError, Controller, Drive, Label, LegacyDrivePayload, MeasuredValue,
    NodeId,
};

use crate::client::GraphError;

/// A domain value that can be rebuilt from a node row.
pub trait FromNodeRow: Sized {
    fn from_node(id: NodeId, node: &Node) -> Result<Self, GraphError>;
}

/// Decode a `RETURN id(m) AS id, m` row.
pub fn decode_row<T: FromNodeRow>(row: &Row) -> Result<T, GraphError> {
    let id: i64 = row
        .get("id")
        .map_err(|e| GraphError::Serialization(format!("Failed to read node id: {e}")))?;
    let node: Node = row
        .get("m")
        .map_err(|e| GraphError::Serialization(format!("Failed to deserialize node: {e}")))?;
    T::from_node(id, &node)
}

pub fn decode_rows<T: FromNodeRow>(rows: &[Row]) -> Result<Vec<T>, GraphError> {
    rows.iter().map(decode_row).collect()
}

fn text(node: &Node, key: &str) -> Option<String> {
    node.get::<String>(key).ok()
}

fn int(node: &Node, key: &str) -> Option<i64> {
    node.get::<i64>(key).ok()
}

/// Numbers written by the legacy endpoint are integers; typed writes are floats.
fn number(node: &Node, key: &str) -> Option<f64> {
    node.get::<f64>(key)
        .ok()
        .or_else(|| int(node, key).map(|v| v as f64))
}

fn required<T>(
    value: Option<T>,
    label: Label,
    property: &'static str,
    id: NodeId,
) -> Result<T, CatalogError> {
    value.ok_or(CatalogError::MissingProperty {
        label: label.as_str(),
        property,
        id,
    })
}

impl FromNodeRow for Drive {
    fn from_node(id: NodeId, node: &Node) -> Result<Self, GraphError> {
        Ok(Drive {
            id,
            name: text(node, "name"),
            model: text(node, "model"),
            vendor: text(node, "vendor"),
            capacity: number(node, "capacity"),
            created_at: int(node, "created_at"),
        })
    }
}

impl FromNodeRow for Controller {
    fn from_node(id: NodeId, node: &Node) -> Result<Self, GraphError> {
        Ok(Controller {
            id,
            model: text(node, "model"),
            vendor: text(node, "vendor"),
            description: text(node, "description"),
            created_at: int(node, "created_at"),
        })
    }
}

impl FromNodeRow for BenchmarkRun {
    fn from_node(id: NodeId, node: &Node) -> Result<Self, GraphError> {
        Ok(BenchmarkRun {
            id,
            name: required(text(node, "name"), Label::BenchmarkRun, "name", id)?,
            description: text(node, "description"),
            created_at: int(node, "created_at"),
        })
    }
}

impl FromNodeRow for MeasuredValue {
    fn from_node(id: NodeId, node: &Node) -> Result<Self, GraphError> {
        let label = Label::MeasuredValue;
        Ok(MeasuredValue {
            id,
            record_type: required(text(node, "type"), label, "type", id)?.parse()?,
            name: required(text(node, "name"), label, "name", id)?.parse()?,
            unit: required(text(node, "unit"), label, "unit", id)?.parse()?,
            value: required(number(node, "value"), label, "value", id)?,
            created_at: int(node, "created_at"),
        })
    }
}

impl FromNodeRow for LegacyDrivePayload {
    fn from_node(id: NodeId, node: &Node) -> Result<Self, GraphError> {
        let label = Label::Drive;
        Ok(LegacyDrivePayload {
            name: required(text(node, "name"), label, "name", id)?,
            model: required(text(node, "model"), label, "model", id)?,
            vendor: required(text(node, "vendor"), label, "vendor", id)?,
            capacity: required(int(node, "capacity"), label, "capacity", id)?,
            interface: required(text(node, "interface"), label, "interface", id)?,
            date: required(text(node, "date"), label, "date", id)?,
            description: text(node, "description"),
            price: int(node, "price"),
        })
    }
}
