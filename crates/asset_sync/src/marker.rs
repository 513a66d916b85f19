//! Persisted "assets already downloaded" flag.
//!
//! The flag is a small TOML file under the storage root. It is written only
//! after a sync reports success, so a failed or interrupted run leaves the
//! assets eligible for a full re-run.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{SyncError, SyncResult};

#[cfg(test)]
#[path = "marker_tests.rs"]
mod tests;

/// Default file name of the completion marker.
pub const DEFAULT_MARKER_FILENAME: &str = ".asset-sync-state.toml";

/// Contents of the marker file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerState {
    pub assets_downloaded: bool,
    pub completed_at: DateTime<Utc>,
}

/// Reads and writes the completion marker file.
#[derive(Debug, Clone)]
pub struct CompletionMarker {
    path: PathBuf,
}

impl CompletionMarker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Marker stored as [`DEFAULT_MARKER_FILENAME`] directly under `root`.
    pub fn for_storage_root(root: &Path) -> Self {
        Self::new(root.join(DEFAULT_MARKER_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the marker state, or `None` if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::CompletionMarker` if the file exists but cannot be
    /// read or parsed.
    pub async fn read(&self) -> SyncResult<Option<MarkerState>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.error(format!("Failed to read marker: {}", e))),
        };

        let state = toml::from_str(&content)
            .map_err(|e| self.error(format!("Failed to parse marker: {}", e)))?;
        Ok(Some(state))
    }

    /// Returns `true` if a previous sync completed.
    ///
    /// An unreadable or corrupt marker counts as not complete.
    pub async fn is_complete(&self) -> bool {
        match self.read().await {
            Ok(state) => state.is_some_and(|s| s.assets_downloaded),
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Ignoring unreadable completion marker");
                false
            }
        }
    }

    /// Records a completed sync, creating parent directories as needed.
    pub async fn mark_complete(&self) -> SyncResult<MarkerState> {
        let state = MarkerState {
            assets_downloaded: true,
            completed_at: Utc::now(),
        };

        let content = toml::to_string_pretty(&state)
            .map_err(|e| self.error(format!("Failed to serialize marker: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.error(format!("Failed to create directory: {}", e)))?;
        }

        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| self.error(format!("Failed to write marker: {}", e)))?;

        info!(path = ?self.path, "Marked assets as downloaded");
        Ok(state)
    }

    /// Removes the marker so the next bootstrap runs a full sync.
    ///
    /// Removing a marker that does not exist is not an error.
    pub async fn clear(&self) -> SyncResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = ?self.path, "Cleared completion marker");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.error(format!("Failed to remove marker: {}", e))),
        }
    }

    fn error(&self, message: String) -> SyncError {
        SyncError::CompletionMarker {
            path: self.path.clone(),
            message,
        }
    }
}
