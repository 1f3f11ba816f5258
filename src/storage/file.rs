//! JSON file storage backend
//!
//! The catalog is a single pretty-printed JSON array of products. A missing or
//! unreadable file is an empty catalog; write failures are returned to the caller.

use crate::core::{Product, StorageBackend};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default location of the catalog file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "data/products.json";

/// File-backed product storage
#[derive(Clone, Debug)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
        }
        Ok(())
    }
}

impl Default for FileBackend {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn read_all(&self) -> Result<Vec<Product>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    path = %self.path.display(),
                    "catalog file missing, treating as empty"
                );
                return Ok(Vec::new());
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to read catalog file"
                );
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str(&content) {
            Ok(products) => Ok(products),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "catalog file is not a product array"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn write_all(&self, products: Vec<Product>) -> Result<()> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(&products)?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        tracing::debug!(
            path = %self.path.display(),
            count = products.len(),
            "catalog file written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: f64) -> Product {
        Product::new(name, "desc", price, "img.jpg", "misc")
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("nope.json"));

        assert!(backend.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, "{ not json").unwrap();

        let backend = FileBackend::new(path);
        assert!(backend.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_creates_directory_and_pretty_prints() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("products.json");
        let backend = FileBackend::new(&path);

        backend
            .write_all(vec![product("Lamp", 20.0), product("Desk", 120.0)])
            .await
            .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("[\n"));
        assert!(raw.contains("\"_id\""));

        let names: Vec<String> = backend
            .read_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Lamp", "Desk"]);
    }

    #[tokio::test]
    async fn test_write_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the write fail
        let path = dir.path().join("products.json");
        std::fs::create_dir(&path).unwrap();

        let backend = FileBackend::new(path);
        assert!(backend.write_all(vec![product("x", 1.0)]).await.is_err());
    }
}
