//! benchgraph-api: GraphQL and legacy REST front end for the drive catalog.
//!
//! The binary wires a [`benchgraph_graph::GraphClient`] into [`server::router`];
//! tests build the same router and schema over
//! [`benchgraph_graph::MemoryStore`].

pub mod config;
pub mod error;
pub mod legacy;
pub mod schema;
pub mod server;

pub use error::{ApiError, Result};
pub use schema::{build_schema, CatalogSchema};
