//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when reading repository
//! contents through the github_client crate.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::{ContentsClient, Error};
///
/// match client.list_directory("octo-org", "assets", "emojis").await {
///     Ok(entries) => println!("Found {} entries", entries.len()),
///     Err(Error::Listing { status: Some(404), .. }) => eprintln!("Path not found"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The Octocrab client could not be built.
    ///
    /// This error occurs when the configured API base URI cannot be parsed
    /// or the underlying HTTP client fails to initialize.
    #[error("Failed to initialize GitHub client: {0}")]
    ClientInitialization(String),

    /// A directory listing request failed.
    ///
    /// This error occurs when:
    /// - GitHub responds with a non-success status (`status` holds the code)
    /// - The response body is missing or is not a JSON array of entries
    /// - The request could not be sent at all (`status` is `None`)
    #[error("Failed to list repository contents (status: {status:?}): {message}")]
    Listing {
        status: Option<u16>,
        message: String,
    },
}

impl Error {
    /// Returns the HTTP status code associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Listing { status, .. } => *status,
            Error::ClientInitialization(_) => None,
        }
    }
}
