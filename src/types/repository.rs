//! Repository domain types
//!
//! A Searchfox repository name (e.g. `mozilla-central`) is a logical name. The
//! files behind it are served from a GitHub mirror, identified by an
//! owner/repository pair and a branch. These types keep the two apart.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Logical repository name as Searchfox knows it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct LogicalRepository(pub String);

impl LogicalRepository {
    pub fn new<T: Into<String>>(name: T) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LogicalRepository {
    fn default() -> Self {
        Self(DEFAULT_REPOSITORY.to_string())
    }
}

impl std::fmt::Display for LogicalRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LogicalRepository {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Repository searched when the caller does not name one
pub const DEFAULT_REPOSITORY: &str = "mozilla-central";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Branch(pub String);

impl Branch {
    pub fn new<T: Into<String>>(branch: T) -> Self {
        Self(branch.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owner/repository pair on the GitHub mirror that serves raw file content
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, PartialOrd, Ord,
)]
pub struct HostingRepository {
    pub owner: String,
    pub repository_name: String,
}

impl HostingRepository {
    pub fn new<T1: Into<String>, T2: Into<String>>(owner: T1, name: T2) -> Self {
        Self {
            owner: owner.into(),
            repository_name: name.into(),
        }
    }

    /// Returns the full name (owner/repository_name format)
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repository_name)
    }
}

impl std::fmt::Display for HostingRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repository_name)
    }
}

/// Where the files of a logical repository can be retrieved and browsed.
///
/// Derived on every call, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    pub hosting_repository: HostingRepository,
    pub branch: Branch,
    /// Searchfox base for human cross-reference, built from the logical name
    pub source_browse_base_url: String,
}

impl RepoLocation {
    /// Searchfox page showing `path` in this repository
    pub fn browse_url(&self, path: &str) -> String {
        format!("{}/{}", self.source_browse_base_url, path)
    }
}
