//! Configuration for the benchgraph API server.
//!
//! Layers, lowest to highest precedence: built-in defaults, the optional
//! `<prefix>.toml` file, `BENCHGRAPH__` environment variables (for example
//! `BENCHGRAPH__NEO4J__URI`), then a credentials file when one is given.

use std::path::Path;

use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;

use benchgraph_graph::GraphConfig;

use crate::error::{ApiError, Result};

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub neo4j: Neo4jSettings,

    #[serde(default)]
    pub server: ServerSettings,
}

/// `[neo4j]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jSettings {
    #[serde(default = "default_uri")]
    pub uri: String,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default)]
    pub password: String,

    #[serde(default = "default_database")]
    pub database: String,

    /// Connection pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Rows pulled per round trip.
    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Socket address the HTTP listener binds to.
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_database() -> String {
    "neo4j".to_string()
}

fn default_max_connections() -> u32 {
    16
}

fn default_fetch_size() -> usize {
    256
}

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

impl Default for Neo4jSettings {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: default_user(),
            password: String::new(),
            database: default_database(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl AppConfig {
    /// Load from `<file_prefix>.toml` (if present) and the environment.
    pub fn load(file_prefix: &str) -> Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("BENCHGRAPH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Override the Neo4j user and password from a credentials file.
    pub fn with_credentials_file(mut self, path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let (user, password) = parse_credentials(&contents)?;
        self.neo4j.user = user;
        self.neo4j.password = password;
        tracing::info!(path = %path.display(), "Loaded Neo4j credentials file");
        Ok(self)
    }

    pub fn graph_config(&self) -> GraphConfig {
        GraphConfig {
            uri: self.neo4j.uri.clone(),
            user: self.neo4j.user.clone(),
            password: self.neo4j.password.clone(),
            database: self.neo4j.database.clone(),
            max_connections: self.neo4j.max_connections,
            fetch_size: self.neo4j.fetch_size,
        }
    }
}

/// Parse a two-line credentials file: user on the first line, password on
/// the second. The user is trimmed; the password keeps everything but its
/// line ending.
pub fn parse_credentials(contents: &str) -> Result<(String, String)> {
    let mut lines = contents.lines();
    let user = lines.next().map(str::trim).filter(|l| !l.is_empty());
    let password = lines.next();
    match (user, password) {
        (Some(user), Some(password)) => Ok((user.to_string(), password.to_string())),
        _ => Err(ApiError::Config(
            "credentials file must contain a user line and a password line".to_string(),
        )),
    }
}
