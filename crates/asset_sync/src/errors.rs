//! Error types for asset synchronization.
//!
//! Every variant here is diagnostic only: the public `sync` entry point
//! collapses all of them into a single `false`.

use std::path::PathBuf;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Result type alias for asset sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can abort a sync run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Another sync run is already in flight on the same orchestrator.
    #[error("A sync is already in progress")]
    AlreadyRunning,

    /// The completion marker could not be read or written.
    #[error("Completion marker error at {path:?}: {message}")]
    CompletionMarker { path: PathBuf, message: String },

    /// Downloading a file failed.
    #[error("Failed to fetch '{url}': {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    /// A remote file name cannot be used as a flat local file name.
    #[error("Invalid asset file name: '{0}'")]
    InvalidFileName(String),

    /// A local filesystem operation failed.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Listing a remote directory failed.
    #[error("Failed to list '{path}': {source}")]
    Listing {
        path: String,
        #[source]
        source: github_client::Error,
    },
}

impl SyncError {
    /// Returns the HTTP status associated with a listing or fetch failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Listing { source, .. } => source.status(),
            SyncError::Fetch {
                source: FetchError::Status { status, .. },
                ..
            } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while downloading a single file.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a success status but no content.
    #[error("Response body was empty")]
    EmptyBody,

    /// The server answered with a non-success status.
    #[error("Server responded with {status}: {message}")]
    Status { status: u16, message: String },

    /// The request could not be sent or the body could not be read.
    #[error("Transport failure: {0}")]
    Transport(String),
}
