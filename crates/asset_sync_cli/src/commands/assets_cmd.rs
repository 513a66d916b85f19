//! Local asset inspection commands: `list` and `status`.

use std::path::PathBuf;

use asset_sync::{AssetStore, CompletionMarker, LocalStore, MarkerState};
use clap::Args;
use tracing::instrument;

use crate::{config::AppConfig, errors::Error};

#[cfg(test)]
#[path = "assets_cmd_tests.rs"]
mod tests;

/// Arguments shared by the local inspection commands.
#[derive(Args, Debug, Clone, Default)]
pub struct StorageArgs {
    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Application storage root
    #[arg(long)]
    pub storage_root: Option<PathBuf>,
}

impl StorageArgs {
    fn resolve(&self) -> Result<AppConfig, Error> {
        let mut config = AppConfig::resolve(self.config.as_deref())?;
        if let Some(root) = &self.storage_root {
            config.storage.root = root.clone();
        }
        Ok(config)
    }
}

/// Lists the files currently in the asset directory.
#[instrument]
pub async fn list(args: &StorageArgs) -> Result<Vec<PathBuf>, Error> {
    let config = args.resolve()?;
    let store = LocalStore::new(&config.storage.root);
    let assets = store.list(&config.storage.asset_directory).await?;
    Ok(assets)
}

/// Reads the completion marker.
///
/// Returns the marker path and its state, `None` when no sync has completed.
#[instrument]
pub async fn status(args: &StorageArgs) -> Result<(PathBuf, Option<MarkerState>), Error> {
    let config = args.resolve()?;
    let marker = CompletionMarker::for_storage_root(&config.storage.root);
    let state = marker.read().await?;
    Ok((marker.path().to_path_buf(), state))
}
