//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default MongoDB connection string
pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/product-listing";

/// Default base URL of the catalog API, as seen by clients
pub const DEFAULT_API_URL: &str = "http://localhost:5001/api/v1";

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_mongodb_uri() -> Option<String> {
    Some(DEFAULT_MONGODB_URI.to_string())
}

fn default_database() -> String {
    "product-listing".to_string()
}

fn default_data_file() -> PathBuf {
    PathBuf::from(crate::storage::file::DEFAULT_DATA_FILE)
}

fn default_environment() -> String {
    "development".to_string()
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// MongoDB connection string; `None` runs file-backed only
    #[serde(default = "default_mongodb_uri")]
    pub mongodb_uri: Option<String>,

    /// Database used when the URI does not name one
    #[serde(default = "default_database")]
    pub database: String,

    /// JSON file used when no database is reachable
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Free-form environment name (development, production, test)
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            mongodb_uri: default_mongodb_uri(),
            database: default_database(),
            data_file: default_data_file(),
            environment: default_environment(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load configuration from the process environment
    ///
    /// Reads `HOST`, `PORT`, `MONGODB_URI`, `CATALOG_DATABASE`,
    /// `CATALOG_DATA_FILE` and `CATALOG_ENV`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("Invalid PORT value '{}'", port))?;
        }
        if let Some(uri) = lookup("MONGODB_URI") {
            // An empty URI disables the database
            config.mongodb_uri = Some(uri).filter(|u| !u.trim().is_empty());
        }
        if let Some(database) = lookup("CATALOG_DATABASE") {
            config.database = database;
        }
        if let Some(path) = lookup("CATALOG_DATA_FILE") {
            config.data_file = PathBuf::from(path);
        }
        if let Some(env) = lookup("CATALOG_ENV") {
            config.environment = env;
        }

        Ok(config)
    }

    /// Socket address string to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL including the `/api/v1` prefix
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `CATALOG_API_URL`, or the default local server
    pub fn from_env() -> Self {
        std::env::var("CATALOG_API_URL")
            .map(Self::new)
            .unwrap_or_default()
    }
}
