//! Crate for reading repository contents through the GitHub REST API.
//!
//! This crate provides a thin client over the GitHub Contents API, used to
//! walk a directory tree in a public repository. Requests are unauthenticated.

use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::{debug, error, info, instrument};

pub mod errors;
pub use errors::Error;

pub mod contents;
pub use contents::{EntryType, TreeEntry};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Base URI of the public GitHub REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// A client for reading repository contents from the GitHub API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` around an existing `Octocrab` instance.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentsClient for GitHubClient {
    #[instrument(skip(self), fields(owner = %owner, repo = %repo, path = %path))]
    async fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<TreeEntry>, Error> {
        let route = contents_route(owner, repo, path)?;
        debug!(route = route, "Requesting directory listing");

        let entries: Vec<TreeEntry> = self
            .client
            .get(&route, None::<&()>)
            .await
            .map_err(|e| listing_error("Failed to list repository contents", e))?;

        info!(
            owner = owner,
            repo = repo,
            path = path,
            entry_count = entries.len(),
            "Retrieved directory listing"
        );

        Ok(entries)
    }
}

/// Trait for reading directory listings from a repository.
///
/// This is the seam the sync orchestrator depends on, which lets tests
/// substitute an in-memory tree for the real API.
#[async_trait]
pub trait ContentsClient: Send + Sync {
    /// Lists the entries of a directory in a repository.
    ///
    /// # Arguments
    ///
    /// * `owner` - The owner of the repository (user or organization name).
    /// * `repo` - The name of the repository.
    /// * `path` - Path of the directory relative to the repository root. An
    ///   empty string lists the repository root.
    ///
    /// # Returns
    ///
    /// The entries in the order GitHub returned them.
    ///
    /// # Errors
    ///
    /// Returns `Error::Listing` if GitHub responds with a non-success status,
    /// the body is not a JSON array of entries (for instance because `path`
    /// names a file), or the request cannot be sent. No retry is attempted.
    async fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<TreeEntry>, Error>;
}

/// Creates an unauthenticated `Octocrab` client.
///
/// # Arguments
///
/// * `base_uri` - Base URI of the GitHub REST API. Use [`DEFAULT_API_BASE_URL`]
///   for github.com, or a mock server URI in tests.
///
/// # Errors
///
/// Returns `Error::ClientInitialization` if the URI is not a valid absolute
/// URL or the client cannot be built.
///
/// # Example
///
/// ```rust,no_run
/// use github_client::{create_anonymous_client, GitHubClient, DEFAULT_API_BASE_URL};
///
/// # async fn example() -> Result<(), github_client::Error> {
/// let octocrab = create_anonymous_client(DEFAULT_API_BASE_URL)?;
/// let client = GitHubClient::new(octocrab);
/// # Ok(())
/// # }
/// ```
#[instrument]
pub fn create_anonymous_client(base_uri: &str) -> Result<Octocrab, Error> {
    let parsed = url::Url::parse(base_uri).map_err(|e| {
        error!(base_uri = base_uri, error = %e, "Invalid GitHub API base URI");
        Error::ClientInitialization(format!("Invalid base URI '{}': {}", base_uri, e))
    })?;

    Octocrab::builder()
        .base_uri(parsed.as_str())
        .and_then(|builder| builder.build())
        .map_err(|e| {
            error!(base_uri = base_uri, error = ?e, "Failed to build Octocrab client");
            Error::ClientInitialization(e.to_string())
        })
}

/// Builds the Contents API route for `path`, percent-encoding every segment.
///
/// Empty segments are dropped, so leading, trailing and doubled slashes do not
/// change the route. The repository root keeps a trailing slash.
fn contents_route(owner: &str, repo: &str, path: &str) -> Result<String, Error> {
    let mut url = url::Url::parse(DEFAULT_API_BASE_URL).map_err(|e| Error::Listing {
        status: None,
        message: format!("Failed to build contents route: {}", e),
    })?;

    {
        let mut segments = url.path_segments_mut().map_err(|_| Error::Listing {
            status: None,
            message: "Failed to build contents route: base URI cannot hold a path".to_string(),
        })?;
        segments.clear().extend(["repos", owner, repo, "contents"]);

        let mut path_segments = path.split('/').filter(|s| !s.is_empty()).peekable();
        if path_segments.peek().is_none() {
            segments.push("");
        } else {
            segments.extend(path_segments);
        }
    }

    Ok(url.path().to_string())
}

fn listing_error(message: &str, e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            let status = source.status_code.as_u16();
            error!(
                status = status,
                error_message = source.message,
                "{}. Received an error from GitHub",
                message
            );
            Error::Listing {
                status: Some(status),
                message: source.message.clone(),
            }
        }
        other => {
            let detail = other.to_string();
            error!(error_message = detail, "{}", message);
            Error::Listing {
                status: None,
                message: detail,
            }
        }
    }
}
