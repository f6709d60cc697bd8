//! Legacy flat drive insert.
//!
//! Kept apart from the typed mutations: it writes the payload as-is, with no
//! created_at, no relationships and no dedup.

use benchgraph_core::{Label, LegacyDrivePayload};

use crate::client::{finish_txn, txn_rows, GraphClient, GraphError};
use crate::cypher::Statement;
use crate::decode::decode_rows;

pub fn insert_legacy_drive_statement(payload: &LegacyDrivePayload) -> Statement {
    Statement::new(format!(
        "CREATE (m:`{label}` {{
           name: $name, model: $model, vendor: $vendor, capacity: $capacity,
           interface: $interface, date: $date,
           description: $description, price: $price}})
         RETURN id(m) AS id, m",
        label = Label::Drive
    ))
    .param("name", payload.name.clone())
    .param("model", payload.model.clone())
    .param("vendor", payload.vendor.clone())
    .param("capacity", payload.capacity)
    .param("interface", payload.interface.clone())
    .param("date", payload.date.clone())
    .param("description", payload.description.clone())
    .param("price", payload.price)
}

impl GraphClient {
    /// Insert a flat drive record and return the rows the store sent back.
    pub async fn insert_legacy_drive(
        &self,
        payload: &LegacyDrivePayload,
    ) -> Result<Vec<LegacyDrivePayload>, GraphError> {
        let mut txn = self.start_txn().await?;
        let result = txn_rows(&mut txn, insert_legacy_drive_statement(payload)).await;
        let rows = finish_txn(txn, result).await?;

        let inserted = decode_rows(&rows)?;
        tracing::info!(name = %payload.name, rows = rows.len(), "Inserted legacy drive record");
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cypher::Param;

    #[test]
    fn absent_optionals_bind_null() {
        let stmt = insert_legacy_drive_statement(&LegacyDrivePayload {
            name: "970".into(),
            model: "EVO Plus".into(),
            vendor: "Samsung".into(),
            capacity: 500,
            interface: "nvme".into(),
            date: "2019-01".into(),
            description: None,
            price: None,
        });
        assert_eq!(stmt.get("capacity"), Some(&Param::Int(500)));
        assert_eq!(stmt.get("price"), Some(&Param::Null));
        assert_eq!(stmt.get("description"), Some(&Param::Null));
        assert!(!stmt.text().contains("created_at"));
        assert!(!stmt.text().contains("MERGE"));
    }
}
