//! benchgraph-core: Shared domain types for the benchgraph drive catalog.
//!
//! This crate provides the foundational types used across all benchgraph components:
//! - Entity types (Drive, Controller, BenchmarkRun, MeasuredValue) stored as graph nodes
//! - Record enums with their canonical store representation
//! - Per-kind filters and the link precedence rule used by resolvers
//! - Create inputs consumed by the mutation handlers
//! - Common error types

pub mod error;
pub mod filter;
pub mod types;

pub use error::CatalogError;
pub use filter::{
    resolve_link, BenchmarkRunFilter, ControllerFilter, DriveFilter, MeasuredValueFilter,
};
pub use types::{
    BenchmarkRun, Controller, Drive, Label, LegacyDrivePayload, MeasuredValue, NewBenchmarkRun,
    NewController, NewDrive, NewMeasuredValue, NodeId, RecordName, RecordType, RecordUnit,
    Relationship,
};
