//! Neo4j connection management and shared graph client.

use neo4rs::{ConfigBuilder, Graph, Row, Txn};

use benchgraph_core::CatalogError;

use crate::cypher::Statement;

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("Neo4j query error: {0}")]
    Query(#[from] neo4rs::Error),

    #[error("Node not found: {label} with id {id}")]
    NotFound { label: String, id: i64 },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Decode error: {0}")]
    Decode(#[from] CatalogError),
}

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub fetch_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "neo4j".to_string(),
            database: "neo4j".to_string(),
            max_connections: 16,
            fetch_size: 256,
        }
    }
}

/// Thread-safe Neo4j graph client with connection pooling.
///
/// One client is created at process start and shared by every request.
/// Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Connect to Neo4j with the given configuration.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db(config.database.as_str())
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        tracing::info!(uri = %config.uri, database = %config.database, "Connected to Neo4j");
        Ok(Self { graph })
    }

    /// Round-trip a trivial statement to prove the server is reachable and
    /// the credentials are accepted.
    pub async fn verify_connectivity(&self) -> Result<(), GraphError> {
        self.graph
            .run(neo4rs::query("RETURN 1"))
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))
    }

    /// Get a reference to the underlying neo4rs Graph for direct operations.
    pub fn inner(&self) -> &Graph {
        &self.graph
    }

    /// Execute a statement outside an explicit transaction and collect all rows.
    pub async fn query_rows(&self, stmt: Statement) -> Result<Vec<Row>, GraphError> {
        let mut stream = self.graph.execute(stmt.into_query()).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Begin a transaction.
    pub async fn start_txn(&self) -> Result<Txn, GraphError> {
        Ok(self.graph.start_txn().await?)
    }
}

/// Execute a statement inside `txn` and collect all rows.
pub(crate) async fn txn_rows(txn: &mut Txn, stmt: Statement) -> Result<Vec<Row>, GraphError> {
    let mut stream = txn.execute(stmt.into_query()).await?;
    let mut rows = Vec::new();
    while let Some(row) = stream.next(txn.handle()).await? {
        rows.push(row);
    }
    Ok(rows)
}

/// Execute a statement inside `txn` and return its first row, if any.
pub(crate) async fn txn_one(txn: &mut Txn, stmt: Statement) -> Result<Option<Row>, GraphError> {
    Ok(txn_rows(txn, stmt).await?.into_iter().next())
}

/// Commit on success, roll back on failure. The operation error wins over a
/// rollback error.
pub(crate) async fn finish_txn<T>(txn: Txn, result: Result<T, GraphError>) -> Result<T, GraphError> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = txn.rollback().await {
                tracing::warn!(error = %rollback, "Transaction rollback failed");
            }
            Err(e)
        }
    }
}
