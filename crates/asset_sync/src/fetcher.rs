//! Downloading raw file content from pre-resolved URLs.

use async_trait::async_trait;
use tracing::{debug, error, instrument};

use crate::errors::FetchError;

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod tests;

/// Fetches the raw bytes behind a file's direct-download URL.
#[async_trait]
pub trait FileFetcher: Send + Sync {
    /// Downloads the full content of `download_url` into memory.
    ///
    /// # Errors
    ///
    /// * `FetchError::Status` - the server answered with a non-success status
    /// * `FetchError::EmptyBody` - the server answered with no content
    /// * `FetchError::Transport` - the request could not be completed
    async fn fetch(&self, download_url: &str) -> Result<Vec<u8>, FetchError>;
}

/// [`FileFetcher`] backed by a `reqwest` client.
///
/// URLs are used exactly as supplied by the Contents API. The content type is
/// not validated.
#[derive(Debug, Clone, Default)]
pub struct HttpFileFetcher {
    client: reqwest::Client,
}

impl HttpFileFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FileFetcher for HttpFileFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, download_url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(download_url).send().await.map_err(|e| {
            error!(url = download_url, error = %e, "File download request failed");
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string();
            error!(
                url = download_url,
                status = status.as_u16(),
                message = message,
                "File download failed"
            );
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await.map_err(|e| {
            error!(url = download_url, error = %e, "Failed to read download body");
            FetchError::Transport(e.to_string())
        })?;

        if body.is_empty() {
            error!(url = download_url, "File download failed: response body is empty");
            return Err(FetchError::EmptyBody);
        }

        debug!(url = download_url, bytes = body.len(), "Downloaded file");
        Ok(body.to_vec())
    }
}
