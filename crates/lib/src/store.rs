//! # Resource Store
//!
//! The bounded, disk-synchronized mapping of resources available for context
//! injection. The resource directory is the single source of truth; the
//! in-memory state is a cache rebuilt by full resync and replaced in one
//! atomic swap. A single mutex serializes every mutation, including the
//! check-then-act sequence in [`ResourceStore::add`], so the capacity bound
//! holds under concurrent requests.

use crate::constants::MAX_RESOURCES;
use crate::extract::{extract_text, DocumentFormat};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Errors reported by store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid file name: '{0}'")]
    InvalidFileName(String),
    #[error("Unsupported file type: '{0}'")]
    UnsupportedExtension(String),
    #[error("Maximum {0} resources allowed. Delete one via the file system or clear all.")]
    CapacityExceeded(usize),
}

/// One ingested document and its extracted plain text.
#[derive(Debug, Clone)]
pub struct Resource {
    pub file_name: String,
    pub text: String,
}

impl Resource {
    /// Character length of the extracted text, used for reporting only.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A `{name, size}` view of one resource, as returned by [`ResourceStore::list`].
#[derive(Debug, Clone, Serialize)]
pub struct ResourceSummary {
    pub name: String,
    pub size: usize,
}

/// The bounded, disk-backed resource store.
#[derive(Debug)]
pub struct ResourceStore {
    dir: PathBuf,
    resources: Mutex<Vec<Resource>>,
}

impl ResourceStore {
    /// Creates a store over `dir`. The directory is not touched until the
    /// first sync.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            resources: Mutex::new(Vec::new()),
        }
    }

    /// Rebuilds the in-memory state from the resource directory and returns
    /// the number of resources loaded.
    pub async fn sync_from_disk(&self) -> Result<usize, StoreError> {
        let mut resources = self.resources.lock().await;
        *resources = self.rebuild()?;
        Ok(resources.len())
    }

    /// Returns a `{name, size}` summary of every resource, lazily resyncing
    /// from disk when the store is empty.
    pub async fn list(&self) -> Result<Vec<ResourceSummary>, StoreError> {
        let mut resources = self.resources.lock().await;
        if resources.is_empty() {
            *resources = self.rebuild()?;
        }
        Ok(resources
            .iter()
            .map(|r| ResourceSummary {
                name: r.file_name.clone(),
                size: r.len(),
            })
            .collect())
    }

    /// Returns a clone of the current resource list for pipeline use, with
    /// the same lazy resync as [`ResourceStore::list`].
    pub async fn snapshot(&self) -> Result<Vec<Resource>, StoreError> {
        let mut resources = self.resources.lock().await;
        if resources.is_empty() {
            *resources = self.rebuild()?;
        }
        Ok(resources.clone())
    }

    /// Persists an uploaded file and resyncs, enforcing the allowed
    /// extensions and the capacity bound.
    ///
    /// The count check, the write, and the resync run as one critical
    /// section, so concurrent uploads cannot push the store past
    /// `MAX_RESOURCES`.
    pub async fn add(&self, file_name: &str, bytes: &[u8]) -> Result<usize, StoreError> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name.contains("..") {
            return Err(StoreError::InvalidFileName(file_name.to_string()));
        }
        if DocumentFormat::for_file_name(file_name).is_none() {
            return Err(StoreError::UnsupportedExtension(file_name.to_string()));
        }

        let mut resources = self.resources.lock().await;
        *resources = self.rebuild()?;
        if resources.len() >= MAX_RESOURCES {
            return Err(StoreError::CapacityExceeded(MAX_RESOURCES));
        }

        std::fs::write(self.dir.join(file_name), bytes)?;
        *resources = self.rebuild()?;
        info!("Stored '{file_name}', {} resources loaded", resources.len());
        Ok(resources.len())
    }

    /// Deletes every file in the resource directory (best effort, per-file
    /// failures are logged), then empties the in-memory state
    /// unconditionally.
    pub async fn clear_all(&self) {
        let mut resources = self.resources.lock().await;
        match std::fs::read_dir(&self.dir) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.is_file() {
                        if let Err(e) = std::fs::remove_file(&path) {
                            warn!("Error deleting {}: {e}", path.display());
                        }
                    }
                }
            }
            Err(e) => warn!("Could not list resource directory for clearing: {e}"),
        }
        resources.clear();
        info!("All resources cleared");
    }

    /// Builds a fresh resource list from the directory contents.
    ///
    /// Selection order is directory listing order, capped at
    /// `MAX_RESOURCES`. Extraction failures are absorbed: the resource is
    /// recorded with empty text so a malformed file is not resource loss.
    fn rebuild(&self) -> Result<Vec<Resource>, StoreError> {
        info!("Syncing resources from {}", self.dir.display());
        let mut rebuilt = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            if rebuilt.len() >= MAX_RESOURCES {
                break;
            }
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable directory entry: {e}");
                    continue;
                }
            };
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let Some(format) = DocumentFormat::for_file_name(&file_name) else {
                continue;
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let text = match extract_text(&path, format) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Extraction failed for '{file_name}', recording empty text: {e}");
                    String::new()
                }
            };
            info!("Loaded {file_name} ({} chars)", text.chars().count());
            rebuilt.push(Resource { file_name, text });
        }
        Ok(rebuilt)
    }
}
