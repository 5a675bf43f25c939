use anyhow::Result;

use crate::config::ServerConfig;
use crate::searchfox::{ResponseNormalizer, SearchfoxClient};
use crate::types::{SearchCodeOutput, SearchQuery};

/// Service for running code searches against Searchfox.
///
/// Issues one request per search and reshapes the payload into a bounded,
/// flat result list. Results are not ranked, cached or deduplicated.
#[derive(Clone)]
pub struct SearchService {
    searchfox_client: SearchfoxClient,
}

impl SearchService {
    pub fn new(searchfox_client: SearchfoxClient) -> Self {
        Self { searchfox_client }
    }

    pub fn from_config(config: &ServerConfig, http_client: reqwest::Client) -> Self {
        Self::new(SearchfoxClient::new(
            http_client,
            config.searchfox_base_url.clone(),
        ))
    }

    pub async fn search_code(&self, query: &SearchQuery) -> Result<SearchCodeOutput> {
        let payload = self.searchfox_client.search(query).await?;
        let search = ResponseNormalizer::new(query.limit).normalize(&payload);

        tracing::info!(
            "Search '{}' in {} returned {} results",
            query.query,
            query.repo,
            search.results.len()
        );

        Ok(SearchCodeOutput::new(query, search))
    }
}
