//! # Asset Sync
//!
//! Mirrors a directory subtree of a GitHub repository onto local storage,
//! once, to bootstrap a set of assets.
//!
//! ## Overview
//!
//! The pipeline has four parts:
//! 1. Directory listings from the GitHub Contents API ([`github_client`])
//! 2. Per-file downloads from pre-resolved URLs ([`fetcher`])
//! 3. Flat local persistence under a storage root ([`store`])
//! 4. A fail-fast depth-first traversal tying them together ([`sync`])
//!
//! On top of that, [`bootstrap_assets`] gates the sync behind a persisted
//! completion marker ([`marker`]) and lists the resulting local files.
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use asset_sync::{
//!     bootstrap_assets, CompletionMarker, HttpFileFetcher, LocalStore, SyncSource,
//!     TreeSyncOrchestrator,
//! };
//! use github_client::{create_anonymous_client, GitHubClient, DEFAULT_API_BASE_URL};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = LocalStore::new("./data");
//! let orchestrator = TreeSyncOrchestrator::new(
//!     Arc::new(GitHubClient::new(create_anonymous_client(DEFAULT_API_BASE_URL)?)),
//!     Arc::new(HttpFileFetcher::default()),
//!     Arc::new(store.clone()),
//!     "emojis",
//! );
//! let marker = CompletionMarker::for_storage_root(store.root());
//! let source = SyncSource::new("SamedTemiz", "TheBanana", "emojis");
//!
//! let outcome = bootstrap_assets(&orchestrator, &marker, &source).await?;
//! println!("{} assets available", outcome.assets().len());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tracing::{error, info, instrument};

pub mod errors;
pub use errors::{FetchError, SyncError, SyncResult};

pub mod fetcher;
pub use fetcher::{FileFetcher, HttpFileFetcher};

pub mod marker;
pub use marker::{CompletionMarker, MarkerState};

pub mod store;
pub use store::{AssetStore, LocalStore};

pub mod sync;
pub use sync::{SyncSummary, TreeSyncOrchestrator};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// The remote subtree to mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSource {
    /// Repository owner (user or organization)
    pub owner: String,

    /// Repository name
    pub repository: String,

    /// Directory path within the repository; empty for the root
    pub path: String,
}

impl SyncSource {
    pub fn new(
        owner: impl Into<String>,
        repository: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repository: repository.into(),
            path: path.into(),
        }
    }
}

/// What [`bootstrap_assets`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The marker was already set; no sync ran.
    AlreadyComplete { assets: Vec<PathBuf> },

    /// A sync ran, succeeded, and the marker was set.
    Synced { assets: Vec<PathBuf> },

    /// A sync ran and failed; the marker was left unset.
    Failed,
}

impl BootstrapOutcome {
    /// The local asset files, empty when the sync failed.
    pub fn assets(&self) -> &[PathBuf] {
        match self {
            BootstrapOutcome::AlreadyComplete { assets } | BootstrapOutcome::Synced { assets } => {
                assets
            }
            BootstrapOutcome::Failed => &[],
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, BootstrapOutcome::Failed)
    }
}

/// Runs the one-time asset sync unless it already completed, then lists the
/// local assets.
///
/// The sync itself runs on a background task. The marker is written only when
/// the sync reports success; on failure nothing is listed and the next call
/// re-runs the full tree.
///
/// # Errors
///
/// Returns `SyncError::CompletionMarker` if the marker cannot be written after
/// a successful sync, or `SyncError::Io` if the asset directory cannot be
/// listed. Sync failures are reported as [`BootstrapOutcome::Failed`], not as
/// errors.
#[instrument(skip(orchestrator, marker))]
pub async fn bootstrap_assets(
    orchestrator: &TreeSyncOrchestrator,
    marker: &CompletionMarker,
    source: &SyncSource,
) -> SyncResult<BootstrapOutcome> {
    if marker.is_complete().await {
        info!(marker = ?marker.path(), "Assets already downloaded, skipping sync");
        let assets = orchestrator
            .store()
            .list(orchestrator.asset_directory())
            .await?;
        return Ok(BootstrapOutcome::AlreadyComplete { assets });
    }

    let handle = orchestrator.spawn_sync(&source.owner, &source.repository, &source.path);
    let succeeded = handle.await.unwrap_or_else(|e| {
        error!(error = %e, "Asset sync task did not complete");
        false
    });

    if !succeeded {
        return Ok(BootstrapOutcome::Failed);
    }

    marker.mark_complete().await?;
    let assets = orchestrator
        .store()
        .list(orchestrator.asset_directory())
        .await?;
    info!(asset_count = assets.len(), "Assets downloaded");

    Ok(BootstrapOutcome::Synced { assets })
}
