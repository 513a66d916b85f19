//! Repository contents domain types.
//!
//! This module contains types for working with GitHub repository contents,
//! including directory listings and file information.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "contents_tests.rs"]
mod tests;

/// A single entry in a GitHub repository directory listing.
///
/// Represents files, directories and anything else (symlinks, submodules)
/// returned by the GitHub Contents API. Fields the API returns beyond the ones
/// below are ignored during deserialization.
///
/// # Examples
///
/// ```rust
/// use github_client::{EntryType, TreeEntry};
///
/// let entry = TreeEntry {
///     name: "banana.png".to_string(),
///     path: "emojis/fruit/banana.png".to_string(),
///     entry_type: EntryType::File,
///     download_url: Some("https://raw.githubusercontent.com/o/r/main/emojis/fruit/banana.png".to_string()),
/// };
///
/// assert_eq!(
///     entry.fetchable_download_url(),
///     Some("https://raw.githubusercontent.com/o/r/main/emojis/fruit/banana.png")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Entry name (e.g., "fruit", "banana.png")
    pub name: String,

    /// Full path within repository (e.g., "emojis/fruit/banana.png")
    pub path: String,

    /// Entry type (file, directory, or anything else)
    #[serde(rename = "type")]
    pub entry_type: EntryType,

    /// Direct download URL for files (null for directories)
    #[serde(default)]
    pub download_url: Option<String>,
}

impl TreeEntry {
    /// Returns the download URL if this entry is a file that can be fetched.
    ///
    /// Directories, other entry types and files whose download URL is absent
    /// or empty all return `None`.
    pub fn fetchable_download_url(&self) -> Option<&str> {
        if self.entry_type != EntryType::File {
            return None;
        }

        self.download_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Type of entry in a repository directory.
///
/// Maps to GitHub's `type` field in the Contents API response. Only `"file"`
/// and `"dir"` are acted upon; every other value (`"symlink"`, `"submodule"`,
/// or anything GitHub adds later) deserializes to [`EntryType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Regular file
    File,

    /// Directory (can contain other entries)
    Dir,

    /// Any other entry kind
    #[serde(other)]
    Other,
}
