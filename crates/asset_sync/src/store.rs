//! Local persistence of downloaded assets.
//!
//! All assets land flat in one directory under an application storage root,
//! named after their remote file name. Nested remote directories are not
//! reproduced locally.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, error, instrument};

use crate::errors::{SyncError, SyncResult};

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

/// Writes and lists asset files.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Writes `bytes` to `file_name` inside `dir_name`.
    ///
    /// The directory and any missing parents are created first; an existing
    /// directory is not an error. An existing file of the same name is
    /// truncated and overwritten. The write is not atomic, so a crash midway
    /// may leave a truncated file behind.
    ///
    /// Returns the full path of the written file.
    ///
    /// # Errors
    ///
    /// * `SyncError::InvalidFileName` - `file_name` is empty, `.`/`..`, or
    ///   contains a path separator
    /// * `SyncError::Io` - any filesystem failure
    async fn save(&self, dir_name: &str, file_name: &str, bytes: &[u8]) -> SyncResult<PathBuf>;

    /// Lists the regular files in `dir_name`, sorted by name.
    ///
    /// A directory that does not exist yields an empty list.
    async fn list(&self, dir_name: &str) -> SyncResult<Vec<PathBuf>>;
}

/// [`AssetStore`] writing to the local filesystem under a storage root.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The storage root all asset directories live under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The full path of the asset directory `dir_name`.
    pub fn directory(&self, dir_name: &str) -> PathBuf {
        self.root.join(dir_name)
    }
}

#[async_trait]
impl AssetStore for LocalStore {
    #[instrument(skip(self, bytes), fields(byte_count = bytes.len()))]
    async fn save(&self, dir_name: &str, file_name: &str, bytes: &[u8]) -> SyncResult<PathBuf> {
        validate_file_name(file_name)?;

        let directory = self.directory(dir_name);
        tokio::fs::create_dir_all(&directory)
            .await
            .map_err(|source| {
                error!(path = ?directory, error = %source, "Failed to create asset directory");
                SyncError::Io {
                    path: directory.clone(),
                    source,
                }
            })?;

        let target = directory.join(file_name);
        tokio::fs::write(&target, bytes).await.map_err(|source| {
            error!(path = ?target, error = %source, "Failed to write asset file");
            SyncError::Io {
                path: target.clone(),
                source,
            }
        })?;

        debug!(path = ?target, "File saved successfully");
        Ok(target)
    }

    #[instrument(skip(self))]
    async fn list(&self, dir_name: &str) -> SyncResult<Vec<PathBuf>> {
        let directory = self.directory(dir_name);
        let io_error = |source| SyncError::Io {
            path: directory.clone(),
            source,
        };

        let mut reader = match tokio::fs::read_dir(&directory).await {
            Ok(reader) => reader,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(e)),
        };

        let mut files = Vec::new();
        while let Some(entry) = reader.next_entry().await.map_err(io_error)? {
            if entry.file_type().await.map_err(io_error)?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();

        debug!(path = ?directory, file_count = files.len(), "Listed local assets");
        Ok(files)
    }
}

fn validate_file_name(file_name: &str) -> SyncResult<()> {
    let invalid = file_name.is_empty()
        || file_name == "."
        || file_name == ".."
        || file_name.contains(['/', '\\']);

    if invalid {
        return Err(SyncError::InvalidFileName(file_name.to_string()));
    }
    Ok(())
}
