//! Depth-first mirroring of a remote directory tree into the asset directory.
//!
//! The orchestrator lists a directory, then walks its entries in listing
//! order: directories are descended into, files with a download URL are
//! fetched and saved, everything else is skipped. The first failure anywhere
//! aborts the whole run. Files written before the failure stay on disk.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use github_client::{ContentsClient, EntryType, TreeEntry};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, Instrument};

use crate::errors::{SyncError, SyncResult};
use crate::fetcher::FileFetcher;
use crate::store::AssetStore;

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;

/// Counts gathered during a successful run, used for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Number of directory listings requested, the root included.
    pub directories_listed: usize,

    /// Number of files fetched and written.
    pub files_written: usize,

    /// Number of entries skipped (files without a download URL, other kinds).
    pub entries_skipped: usize,
}

/// Mirrors a remote directory subtree into a single flat asset directory.
///
/// Cloning is cheap and clones share the in-flight guard, so at most one run
/// is active across all clones.
#[derive(Clone)]
pub struct TreeSyncOrchestrator {
    contents: Arc<dyn ContentsClient>,
    fetcher: Arc<dyn FileFetcher>,
    store: Arc<dyn AssetStore>,
    asset_directory: String,
    in_flight: Arc<AtomicBool>,
}

impl TreeSyncOrchestrator {
    /// Creates a new orchestrator.
    ///
    /// # Arguments
    ///
    /// * `contents` - Client used to list remote directories
    /// * `fetcher` - Fetcher used to download file content
    /// * `store` - Store the files are written to
    /// * `asset_directory` - Name of the flat directory every file lands in
    pub fn new(
        contents: Arc<dyn ContentsClient>,
        fetcher: Arc<dyn FileFetcher>,
        store: Arc<dyn AssetStore>,
        asset_directory: impl Into<String>,
    ) -> Self {
        Self {
            contents,
            fetcher,
            store,
            asset_directory: asset_directory.into(),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn asset_directory(&self) -> &str {
        &self.asset_directory
    }

    pub fn store(&self) -> &Arc<dyn AssetStore> {
        &self.store
    }

    /// Runs the sync and reports only whether it completed.
    ///
    /// Returns `true` iff every listing succeeded and every file with a
    /// download URL was fetched and written. Error details are logged and
    /// never returned.
    pub async fn sync(&self, owner: &str, repo: &str, root_path: &str) -> bool {
        match self.run(owner, repo, root_path).await {
            Ok(summary) => {
                info!(
                    owner = owner,
                    repo = repo,
                    root_path = root_path,
                    directories_listed = summary.directories_listed,
                    files_written = summary.files_written,
                    entries_skipped = summary.entries_skipped,
                    "Asset sync completed"
                );
                true
            }
            Err(e) => {
                error!(
                    owner = owner,
                    repo = repo,
                    root_path = root_path,
                    error = %e,
                    "Error downloading assets"
                );
                false
            }
        }
    }

    /// Runs [`sync`](Self::sync) on a background tokio task.
    ///
    /// The caller's task is not blocked; await the handle to observe the
    /// outcome. A panic inside the task surfaces as a `JoinError`.
    pub fn spawn_sync(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
        root_path: impl Into<String>,
    ) -> JoinHandle<bool> {
        let orchestrator = self.clone();
        let owner = owner.into();
        let repo = repo.into();
        let root_path = root_path.into();

        tokio::spawn(
            async move { orchestrator.sync(&owner, &repo, &root_path).await }.in_current_span(),
        )
    }

    /// Runs the sync and returns the typed outcome.
    ///
    /// Entries are visited depth-first in listing order. Pending directories
    /// are kept on an explicit stack, so the depth of the remote tree does
    /// not grow the call stack. All network and filesystem operations run
    /// strictly one after another.
    ///
    /// # Errors
    ///
    /// * `SyncError::AlreadyRunning` - another run is in flight
    /// * `SyncError::Listing` - a directory listing failed
    /// * `SyncError::Fetch` - a file download failed
    /// * `SyncError::InvalidFileName` / `SyncError::Io` - a file could not be saved
    ///
    /// Nothing after the failing entry is processed, at any level.
    #[instrument(skip(self), fields(asset_directory = %self.asset_directory))]
    pub async fn run(&self, owner: &str, repo: &str, root_path: &str) -> SyncResult<SyncSummary> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        let mut summary = SyncSummary::default();
        let root_entries = self.list(owner, repo, root_path, &mut summary).await?;
        let mut pending = vec![root_entries.into_iter()];

        while let Some(frame) = pending.last_mut() {
            let Some(entry) = frame.next() else {
                pending.pop();
                continue;
            };

            match entry.entry_type {
                EntryType::Dir => {
                    let children = self.list(owner, repo, &entry.path, &mut summary).await?;
                    pending.push(children.into_iter());
                }
                EntryType::File => match entry.fetchable_download_url() {
                    Some(url) => {
                        self.download(&entry, url).await?;
                        summary.files_written += 1;
                    }
                    None => {
                        debug!(path = entry.path, "Skipping file without download URL");
                        summary.entries_skipped += 1;
                    }
                },
                EntryType::Other => {
                    debug!(path = entry.path, "Skipping unsupported entry");
                    summary.entries_skipped += 1;
                }
            }
        }

        Ok(summary)
    }

    async fn list(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        summary: &mut SyncSummary,
    ) -> SyncResult<Vec<TreeEntry>> {
        let entries = self
            .contents
            .list_directory(owner, repo, path)
            .await
            .map_err(|source| SyncError::Listing {
                path: path.to_string(),
                source,
            })?;

        summary.directories_listed += 1;
        debug!(path = path, entry_count = entries.len(), "Listed directory");
        Ok(entries)
    }

    async fn download(&self, entry: &TreeEntry, url: &str) -> SyncResult<()> {
        let bytes = self
            .fetcher
            .fetch(url)
            .await
            .map_err(|source| SyncError::Fetch {
                url: url.to_string(),
                source,
            })?;

        self.store
            .save(&self.asset_directory, &entry.name, &bytes)
            .await?;

        debug!(path = entry.path, bytes = bytes.len(), "Mirrored file");
        Ok(())
    }
}

/// Marks a run as in flight for as long as it is alive.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> SyncResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SyncError::AlreadyRunning)?;
        Ok(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
