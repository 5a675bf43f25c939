use anyhow::Result;

use crate::config::ServerConfig;
use crate::github::RawContentClient;
use crate::services::RepositoryResolver;
use crate::types::{FileResult, FileSource};

/// Retrieves file content for a logical repository from the GitHub mirror
#[derive(Clone)]
pub struct FileRetriever {
    resolver: RepositoryResolver,
    client: RawContentClient,
}

impl FileRetriever {
    pub fn new(resolver: RepositoryResolver, client: RawContentClient) -> Self {
        Self { resolver, client }
    }

    pub fn from_config(config: &ServerConfig, http_client: reqwest::Client) -> Self {
        Self::new(
            RepositoryResolver::new(config.searchfox_base_url.clone()),
            RawContentClient::new(http_client, config.raw_content_base_url.clone()),
        )
    }

    /// Fetches `path` from the mirror location of `repo`.
    ///
    /// A failed fetch yields `Ok` with empty content and a `note`. Only a
    /// location that cannot be turned into a URL is returned as `Err`.
    pub async fn fetch(&self, repo: &str, path: &str) -> Result<FileResult> {
        let location = self.resolver.resolve(repo);
        let url = self.client.raw_url(&location, path)?;
        let browse_url = location.browse_url(path);

        tracing::debug!(
            "Fetching {} from {}@{}: {}",
            path,
            location.hosting_repository,
            location.branch,
            url
        );

        match self.client.fetch_raw(&url).await {
            Ok(content) => Ok(FileResult {
                repo: repo.to_string(),
                path: path.to_string(),
                content,
                source: Some(FileSource::Remote),
                url: Some(url.to_string()),
                browse_url: Some(browse_url),
                note: None,
            }),
            Err(failure) => {
                if failure.is_not_found() {
                    tracing::debug!("{} not found on the mirror: {}", path, url);
                } else {
                    tracing::warn!("GitHub fetch failed for {}: {}", url, failure);
                }
                Ok(FileResult {
                    repo: repo.to_string(),
                    path: path.to_string(),
                    content: String::new(),
                    source: None,
                    url: Some(url.to_string()),
                    browse_url: Some(browse_url),
                    note: Some(format!("Error: GitHub fetch failed ({})", failure)),
                })
            }
        }
    }
}
