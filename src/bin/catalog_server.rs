//! Catalog API server
//!
//! Configuration comes from a YAML file (`--config`) or the environment.
//! The storage backend is chosen once at startup: MongoDB when reachable,
//! otherwise the JSON data file.

use anyhow::{Context, Result};
use catalog::prelude::*;
use catalog::storage;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "catalog-server", about = "Serve the product catalog API")]
struct Args {
    /// YAML configuration file; the environment is used when absent
    #[arg(short, long)]
    config: Option<String>,

    /// JSON array of products that replaces the catalog before serving
    #[arg(long)]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ServerConfig::from_yaml_file(path)?,
        None => ServerConfig::from_env()?,
    };

    let backend = storage::connect(&config).await;

    if let Some(seed) = &args.seed {
        let raw = tokio::fs::read_to_string(seed)
            .await
            .with_context(|| format!("Failed to read seed file {}", seed.display()))?;
        let products: Vec<Product> = serde_json::from_str(&raw)
            .with_context(|| format!("Seed file {} is not a product array", seed.display()))?;

        ProductRepository::new(backend.clone())
            .replace_all(products)
            .await
            .context("Failed to seed catalog")?;
    }

    ServerBuilder::new()
        .with_config(config)
        .with_shared_backend(backend)
        .serve()
        .await
}
