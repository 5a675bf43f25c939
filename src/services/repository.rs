//! Mapping from Searchfox repository names to the GitHub mirror
//!
//! Every Firefox tree is a branch of the unified `mozilla/firefox` repository.
//! `comm-central` is the one exception: it is not mirrored there and is served
//! from `mozilla/releases-comm-central` instead.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::types::{Branch, HostingRepository, RepoLocation};

/// Branch used for any repository name missing from the table
pub const DEFAULT_BRANCH: &str = "main";

const DEFAULT_HOSTING_OWNER: &str = "mozilla";
const DEFAULT_HOSTING_NAME: &str = "firefox";

const COMM_CENTRAL: &str = "comm-central";
const COMM_CENTRAL_HOSTING_NAME: &str = "releases-comm-central";

static BRANCH_TABLE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("mozilla-central", "main"),
        ("autoland", "autoland"),
        ("mozilla-beta", "beta"),
        ("mozilla-release", "release"),
        ("mozilla-esr115", "esr115"),
        ("mozilla-esr128", "esr128"),
        ("mozilla-esr140", "esr140"),
        (COMM_CENTRAL, "main"),
    ])
});

/// Resolves logical repository names to retrievable locations.
///
/// Stateless; the same input always yields the same location.
#[derive(Debug, Clone)]
pub struct RepositoryResolver {
    searchfox_base_url: String,
}

impl RepositoryResolver {
    pub fn new<T: Into<String>>(searchfox_base_url: T) -> Self {
        Self {
            searchfox_base_url: searchfox_base_url.into(),
        }
    }

    pub fn resolve(&self, repo: &str) -> RepoLocation {
        RepoLocation {
            hosting_repository: hosting_repository(repo),
            branch: branch(repo),
            source_browse_base_url: format!("{}/{}/source", self.searchfox_base_url, repo),
        }
    }
}

/// Looks up the mirror branch for a repository name, defaulting to `main`
pub fn branch(repo: &str) -> Branch {
    Branch::new(BRANCH_TABLE.get(repo).copied().unwrap_or(DEFAULT_BRANCH))
}

/// GitHub repository serving the files of `repo`
pub fn hosting_repository(repo: &str) -> HostingRepository {
    if repo == COMM_CENTRAL {
        HostingRepository::new(DEFAULT_HOSTING_OWNER, COMM_CENTRAL_HOSTING_NAME)
    } else {
        HostingRepository::new(DEFAULT_HOSTING_OWNER, DEFAULT_HOSTING_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> RepositoryResolver {
        RepositoryResolver::new("https://searchfox.org")
    }

    #[test]
    fn test_known_branches() {
        let cases = [
            ("mozilla-central", "main"),
            ("autoland", "autoland"),
            ("mozilla-beta", "beta"),
            ("mozilla-release", "release"),
            ("mozilla-esr115", "esr115"),
            ("mozilla-esr128", "esr128"),
            ("mozilla-esr140", "esr140"),
            ("comm-central", "main"),
        ];

        for (repo, expected) in cases {
            assert_eq!(branch(repo).as_str(), expected, "branch for {}", repo);
        }
    }

    #[test]
    fn test_comm_central_uses_alternate_mirror() {
        let location = resolver().resolve("comm-central");
        assert_eq!(
            location.hosting_repository.full_name(),
            "mozilla/releases-comm-central"
        );
        assert_eq!(location.branch.as_str(), "main");
    }

    #[test]
    fn test_esr_uses_default_mirror() {
        let location = resolver().resolve("mozilla-esr128");
        assert_eq!(location.hosting_repository.full_name(), "mozilla/firefox");
        assert_eq!(location.branch.as_str(), "esr128");
    }

    #[test]
    fn test_unknown_repository_falls_back() {
        let location = resolver().resolve("unknown-repo-xyz");
        assert_eq!(location.hosting_repository.full_name(), "mozilla/firefox");
        assert_eq!(location.branch.as_str(), DEFAULT_BRANCH);
    }

    #[test]
    fn test_browse_url_uses_logical_name() {
        let location = resolver().resolve("comm-central");
        assert_eq!(
            location.source_browse_base_url,
            "https://searchfox.org/comm-central/source"
        );
        assert_eq!(
            location.browse_url("mail/base/content/mailWindow.js"),
            "https://searchfox.org/comm-central/source/mail/base/content/mailWindow.js"
        );
    }
}
