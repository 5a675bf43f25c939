use anyhow::{Context, Result};
use url::Url;

use super::error::FetchFailure;
use crate::types::RepoLocation;

/// Client for raw file content on the GitHub mirror
/// (`{base}/{owner}/{repo}/{branch}/{path}`).
///
/// Building a URL and fetching it are separate calls: a bad URL is a hard
/// error, a failed fetch is a [`FetchFailure`] the caller is expected to
/// recover from.
#[derive(Clone)]
pub struct RawContentClient {
    client: reqwest::Client,
    base_url: String,
}

impl RawContentClient {
    pub fn new<T: Into<String>>(client: reqwest::Client, base_url: T) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Location of `path` in the resolved mirror repository and branch
    pub fn raw_url(&self, location: &RepoLocation, path: &str) -> Result<Url> {
        let hosting = &location.hosting_repository;
        let encoded_path = path
            .trim_start_matches('/')
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        let raw = format!(
            "{}/{}/{}/{}/{}",
            self.base_url,
            urlencoding::encode(&hosting.owner),
            urlencoding::encode(&hosting.repository_name),
            urlencoding::encode(location.branch.as_str()),
            encoded_path
        );

        Url::parse(&raw).with_context(|| format!("Invalid raw content URL: {}", raw))
    }

    /// Single fetch attempt; never retried
    pub async fn fetch_raw(&self, url: &Url) -> Result<String, FetchFailure> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(FetchFailure::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::from_status(status));
        }

        response
            .text()
            .await
            .map_err(|e| FetchFailure::Body(e.to_string()))
    }
}
