//! Filtered resolvers: read statements for each entity kind.
//!
//! Reads are single `MATCH` statements with no write clauses; each call
//! borrows a pooled connection for the duration of the statement.

use benchgraph_core::{
    BenchmarkRun, BenchmarkRunFilter, Controller, ControllerFilter, Drive, DriveFilter, Label,
    MeasuredValue, MeasuredValueFilter,
};

use crate::client::{GraphClient, GraphError};
use crate::cypher::{FilteredMatch, Statement};
use crate::decode::decode_rows;

// ── Statement Builders ───────────────────────────────────────────

pub fn drives_statement(filter: &DriveFilter) -> Statement {
    FilteredMatch::new(Label::Drive, filter.linked_id)
        .id(filter.id)
        .contains("name", filter.name.clone())
        .contains("model", filter.model.clone())
        .contains("vendor", filter.vendor.clone())
        .equals("capacity", filter.capacity)
        .equals("created_at", filter.created_at)
        .build()
}

pub fn controllers_statement(filter: &ControllerFilter) -> Statement {
    FilteredMatch::new(Label::Controller, filter.linked_id)
        .id(filter.id)
        .contains("model", filter.model.clone())
        .contains("vendor", filter.vendor.clone())
        .contains("description", filter.description.clone())
        .equals("created_at", filter.created_at)
        .build()
}

pub fn benchmark_runs_statement(filter: &BenchmarkRunFilter) -> Statement {
    FilteredMatch::new(Label::BenchmarkRun, filter.linked_id)
        .id(filter.id)
        .contains("name", filter.name.clone())
        .contains("description", filter.description.clone())
        .equals("created_at", filter.created_at)
        .build()
}

pub fn measured_values_statement(filter: &MeasuredValueFilter) -> Statement {
    FilteredMatch::new(Label::MeasuredValue, filter.linked_id)
        .id(filter.id)
        .equals_as("type", "record_type", filter.record_type.map(|t| t.as_str()))
        .equals_as("unit", "record_unit", filter.unit.map(|u| u.as_str()))
        .equals_as("name", "record_name", filter.name.map(|n| n.as_str()))
        .equals("value", filter.value)
        .equals("created_at", filter.created_at)
        .build()
}

// ── Resolvers ────────────────────────────────────────────────────

impl GraphClient {
    pub async fn find_drives(&self, filter: &DriveFilter) -> Result<Vec<Drive>, GraphError> {
        let rows = self.query_rows(drives_statement(filter)).await?;
        let drives = decode_rows(&rows)?;
        tracing::debug!(?filter, count = rows.len(), "Resolved drives");
        Ok(drives)
    }

    pub async fn find_controllers(
        &self,
        filter: &ControllerFilter,
    ) -> Result<Vec<Controller>, GraphError> {
        let rows = self.query_rows(controllers_statement(filter)).await?;
        let controllers = decode_rows(&rows)?;
        tracing::debug!(?filter, count = rows.len(), "Resolved controllers");
        Ok(controllers)
    }

    pub async fn find_benchmark_runs(
        &self,
        filter: &BenchmarkRunFilter,
    ) -> Result<Vec<BenchmarkRun>, GraphError> {
        let rows = self.query_rows(benchmark_runs_statement(filter)).await?;
        let runs = decode_rows(&rows)?;
        tracing::debug!(?filter, count = rows.len(), "Resolved benchmark runs");
        Ok(runs)
    }

    pub async fn find_measured_values(
        &self,
        filter: &MeasuredValueFilter,
    ) -> Result<Vec<MeasuredValue>, GraphError> {
        let rows = self.query_rows(measured_values_statement(filter)).await?;
        let values = decode_rows(&rows)?;
        tracing::debug!(?filter, count = rows.len(), "Resolved measured values");
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cypher::Param;
    use benchgraph_core::{RecordName, RecordType};

    #[test]
    fn drive_statement_binds_every_filter() {
        let stmt = drives_statement(&DriveFilter {
            capacity: Some(500.0),
            ..Default::default()
        });

        for key in ["id", "name", "model", "vendor", "capacity", "created_at"] {
            assert!(stmt.get(key).is_some(), "missing param {key}");
        }
        assert_eq!(stmt.get("capacity"), Some(&Param::Float(500.0)));
        assert!(stmt.get("name").unwrap().is_null());
        assert!(stmt.text().contains("(m.capacity = $capacity OR $capacity IS NULL)"));
        assert!(stmt.text().contains("(m.vendor CONTAINS $vendor OR $vendor IS NULL)"));
    }

    #[test]
    fn controller_statement_is_linked_when_scoped() {
        let stmt = controllers_statement(&ControllerFilter {
            linked_id: Some(12),
            ..Default::default()
        });
        assert!(stmt.text().contains("-[r]-(n)"));
        assert_eq!(stmt.get("linked_id"), Some(&Param::Int(12)));
    }

    #[test]
    fn measured_value_enums_use_canonical_strings() {
        let stmt = measured_values_statement(&MeasuredValueFilter {
            record_type: Some(RecordType::Mix),
            name: Some(RecordName::RandLatency),
            linked_id: Some(3),
            ..Default::default()
        });
        assert_eq!(stmt.get("record_type"), Some(&Param::Text("MIX".into())));
        assert_eq!(
            stmt.get("record_name"),
            Some(&Param::Text("RAND_LATENCY".into()))
        );
        assert_eq!(stmt.get("record_unit"), Some(&Param::Null));
    }

    #[test]
    fn benchmark_run_statement_matches_its_label() {
        let stmt = benchmark_runs_statement(&BenchmarkRunFilter::default());
        assert!(stmt.text().starts_with("MATCH (m:`ASSSDBenchMark`)\n"));
        assert!(stmt.text().ends_with("RETURN DISTINCT id(m) AS id, m"));
    }
}
