//! Configuration management for the asset-sync CLI.
//!
//! The configuration names the remote subtree to mirror and where the local
//! assets live. It is stored in TOML format and can be loaded from a
//! specified file path or from the default location in the current directory.
//! Command-line flags override values from the file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use asset_sync::SyncSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "asset-sync.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Main configuration structure for the asset-sync CLI.
///
/// # Example TOML Configuration
///
/// ```toml
/// [source]
/// owner = "SamedTemiz"
/// repository = "TheBanana"
/// path = "emojis"
/// api_base_url = "https://api.github.com"
///
/// [storage]
/// root = "./data"
/// asset_directory = "emojis"
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote repository subtree to mirror
    #[serde(default)]
    pub source: SourceConfig,

    /// Local storage settings
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// Missing sections and fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read, or
    /// contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        Ok(config)
    }

    /// Loads the configuration the CLI should run with.
    ///
    /// An explicitly requested file must exist. Without one, the default file
    /// in the current directory is used if present, and the built-in defaults
    /// otherwise.
    pub fn resolve(config_path: Option<&Path>) -> Result<Self, Error> {
        match config_path {
            Some(path) => Self::load(path),
            None => {
                let path = get_config_path(None);
                if path.exists() {
                    Self::load(&path)
                } else {
                    debug!("No configuration file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Saves the configuration to a TOML file at the specified path.
    ///
    /// Parent directories are created if needed and an existing file is
    /// overwritten.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        debug!("Saving configuration to {:?}", path);

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create directory: {}", e)))?;
        }

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write configuration file: {}", e)))?;

        info!("Configuration saved to {:?}", path);
        Ok(())
    }

    /// Returns the remote subtree as a [`SyncSource`].
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArguments` if the owner or repository is empty.
    pub fn sync_source(&self) -> Result<SyncSource, Error> {
        if self.source.owner.trim().is_empty() {
            return Err(Error::InvalidArguments(
                "Repository owner must not be empty".to_string(),
            ));
        }
        if self.source.repository.trim().is_empty() {
            return Err(Error::InvalidArguments(
                "Repository name must not be empty".to_string(),
            ));
        }

        Ok(SyncSource::new(
            self.source.owner.clone(),
            self.source.repository.clone(),
            self.source.path.clone(),
        ))
    }
}

/// The remote repository subtree to mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub owner: String,
    pub repository: String,

    /// Directory within the repository; empty for the repository root.
    pub path: String,

    /// Base URI of the GitHub REST API.
    pub api_base_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            owner: "SamedTemiz".to_string(),
            repository: "TheBanana".to_string(),
            path: "emojis".to_string(),
            api_base_url: github_client::DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

/// Where downloaded assets are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Application storage root. The asset directory and the completion
    /// marker live directly under it.
    pub root: PathBuf,

    /// Name of the flat directory all assets are written to.
    pub asset_directory: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            asset_directory: "emojis".to_string(),
        }
    }
}

/// Resolves the path to the configuration file.
///
/// - If `config_path` is `Some(path)`, returns that path
/// - Otherwise returns `./asset-sync.toml` in the current directory
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
