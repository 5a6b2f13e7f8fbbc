//! Data sources that deliver employee snapshots

use crate::error::{OrgChartError, Result};
use crate::types::Snapshot;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Delivers complete snapshots. Retry and caching are the source's concern.
#[async_trait]
pub trait HierarchyDataSource: Send + Sync {
    /// Fetch the current snapshot
    async fn fetch(&self) -> Result<Snapshot>;
}

/// Reads a snapshot from a JSON file on every fetch.
///
/// The file holds `{"employees": [...], "hierarchy": [...] | null}`.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HierarchyDataSource for JsonFileSource {
    async fn fetch(&self) -> Result<Snapshot> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(OrgChartError::SnapshotNotFound {
                    path: self.path.clone(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        debug!(
            path = %self.path.display(),
            employees = snapshot.employees.len(),
            supplied_hierarchy = snapshot.hierarchy.is_some(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }
}

/// Serves a held snapshot; replace it to simulate a new fetch result.
#[derive(Debug, Default)]
pub struct InMemorySource {
    snapshot: std::sync::RwLock<Snapshot>,
}

impl InMemorySource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot: std::sync::RwLock::new(snapshot),
        }
    }

    /// Swap in the snapshot returned by subsequent fetches
    pub fn replace(&self, snapshot: Snapshot) -> Result<()> {
        let mut guard = self
            .snapshot
            .write()
            .map_err(|e| OrgChartError::source_error(format!("snapshot lock poisoned: {}", e)))?;
        *guard = snapshot;
        Ok(())
    }
}

#[async_trait]
impl HierarchyDataSource for InMemorySource {
    async fn fetch(&self) -> Result<Snapshot> {
        self.snapshot
            .read()
            .map(|guard| guard.clone())
            .map_err(|e| OrgChartError::source_error(format!("snapshot lock poisoned: {}", e)))
    }
}
