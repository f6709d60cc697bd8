//! CLI entry point for the benchgraph API server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use benchgraph_graph::GraphClient;

use benchgraph_api::config::AppConfig;
use benchgraph_api::server;

#[derive(Parser)]
#[command(name = "benchgraph-api")]
#[command(about = "GraphQL catalog of drives, controllers and benchmark results")]
struct Cli {
    /// Config file prefix (default: benchgraph).
    #[arg(short, long, default_value = "benchgraph")]
    config: String,

    /// Two-line file holding the Neo4j user and password.
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// Override the listen address (e.g., 127.0.0.1:8000).
    #[arg(short, long)]
    bind: Option<String>,

    /// Human-readable log lines instead of JSON.
    #[arg(long)]
    plain_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.plain_logs {
        fmt().with_env_filter(filter).init();
    } else {
        fmt().with_env_filter(filter).json().init();
    }

    let mut config = AppConfig::load(&cli.config)?;
    if let Some(path) = &cli.credentials {
        config = config.with_credentials_file(path)?;
    }
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    let graph = GraphClient::connect(&config.graph_config()).await?;
    graph
        .verify_connectivity()
        .await
        .context("Neo4j connectivity check failed")?;
    tracing::info!("Neo4j connectivity verified");

    let graph = Arc::new(graph);
    let app = server::router(graph.clone(), graph.clone());

    let listener = TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;
    tracing::info!(addr = %listener.local_addr()?, "Listening");

    server::serve(listener, app).await?;

    drop(graph);
    tracing::info!("Neo4j client closed, shutdown complete");
    Ok(())
}
