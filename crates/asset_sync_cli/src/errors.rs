use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the asset-sync CLI application.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error occurred while loading or parsing configuration.
    ///
    /// This error is returned when there are issues with the configuration file,
    /// such as an invalid TOML structure or file access problems.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The GitHub client could not be created.
    #[error("GitHub client error: {0}")]
    GitHub(#[from] github_client::Error),

    /// Invalid command-line arguments were provided.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A sync-side operation failed outside the sync itself, such as writing
    /// the completion marker or listing local assets.
    #[error("Asset sync error: {0}")]
    Sync(#[from] asset_sync::SyncError),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// Configuration and argument problems exit with 2; everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::InvalidArguments(_) => 2,
            Error::GitHub(_) | Error::Sync(_) => 1,
        }
    }
}
