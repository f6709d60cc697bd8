//! benchgraph-graph: Neo4j client for the drive catalog.
//!
//! This crate is the single access point for the catalog graph. All reads
//! (filtered resolvers) and writes (create/merge mutations) flow through it
//! as parameterized Cypher, and both are exposed to the API layer through
//! the [`CatalogStore`] seam.

pub mod client;
pub mod cypher;
pub mod decode;
pub mod legacy;
pub mod memory;
pub mod mutations;
pub mod queries;
pub mod store;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use memory::MemoryStore;
pub use store::{CatalogStore, LegacyDriveSink};
