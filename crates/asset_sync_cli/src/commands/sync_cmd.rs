//! Asset sync command module.
//!
//! Runs the one-time asset bootstrap: if the completion marker is not set,
//! mirrors the configured repository subtree into the asset directory and
//! sets the marker on success. Afterwards the local assets are listed.

use std::{path::PathBuf, sync::Arc};

use asset_sync::{
    bootstrap_assets, BootstrapOutcome, CompletionMarker, HttpFileFetcher, LocalStore,
    TreeSyncOrchestrator,
};
use clap::Args;
use github_client::{create_anonymous_client, GitHubClient};
use tracing::{debug, info, instrument};

use crate::{config::AppConfig, errors::Error};

#[cfg(test)]
#[path = "sync_cmd_tests.rs"]
mod tests;

/// Arguments for the `sync` command.
///
/// Every source and storage flag overrides the matching configuration value.
#[derive(Args, Debug, Clone, Default)]
pub struct SyncArgs {
    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run the sync even if a previous run already completed
    #[arg(long)]
    pub force: bool,

    /// Repository owner (user or organization)
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long)]
    pub repo: Option<String>,

    /// Directory within the repository to mirror
    #[arg(long)]
    pub path: Option<String>,

    /// Base URI of the GitHub REST API
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Application storage root
    #[arg(long)]
    pub storage_root: Option<PathBuf>,
}

impl SyncArgs {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(owner) = &self.owner {
            config.source.owner = owner.clone();
        }
        if let Some(repo) = &self.repo {
            config.source.repository = repo.clone();
        }
        if let Some(path) = &self.path {
            config.source.path = path.clone();
        }
        if let Some(api_base_url) = &self.api_base_url {
            config.source.api_base_url = api_base_url.clone();
        }
        if let Some(root) = &self.storage_root {
            config.storage.root = root.clone();
        }
    }
}

/// Execute the sync command
#[instrument]
pub async fn execute(args: &SyncArgs) -> Result<BootstrapOutcome, Error> {
    let mut config = AppConfig::resolve(args.config.as_deref())?;
    args.apply_overrides(&mut config);
    debug!(config = ?config, "Resolved configuration");

    run_sync(&config, args.force).await
}

/// Runs the bootstrap for a resolved configuration.
///
/// With `force` set, the completion marker is cleared first so a full sync
/// runs regardless of earlier runs.
pub async fn run_sync(config: &AppConfig, force: bool) -> Result<BootstrapOutcome, Error> {
    let source = config.sync_source()?;
    let octocrab = create_anonymous_client(&config.source.api_base_url)?;

    let store = LocalStore::new(&config.storage.root);
    let marker = CompletionMarker::for_storage_root(store.root());
    let orchestrator = TreeSyncOrchestrator::new(
        Arc::new(GitHubClient::new(octocrab)),
        Arc::new(HttpFileFetcher::default()),
        Arc::new(store),
        config.storage.asset_directory.clone(),
    );

    if force {
        info!(marker = ?marker.path(), "Forcing a full sync");
        marker.clear().await?;
    }

    let outcome = bootstrap_assets(&orchestrator, &marker, &source).await?;
    Ok(outcome)
}
