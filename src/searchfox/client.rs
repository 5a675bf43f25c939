use anyhow::{Context, Result, anyhow};
use reqwest::header::ACCEPT;
use url::Url;

use super::payload::SearchfoxResponse;
use crate::types::SearchQuery;

/// Client for the Searchfox `/{repo}/search` JSON endpoint
#[derive(Clone)]
pub struct SearchfoxClient {
    client: reqwest::Client,
    base_url: String,
}

impl SearchfoxClient {
    pub fn new<T: Into<String>>(client: reqwest::Client, base_url: T) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Builds `{base}/{repo}/search?q=&case=&regexp=[&path=]`.
    ///
    /// An empty path filter is left out of the query string.
    pub fn search_url(&self, query: &SearchQuery) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/{}/search",
            self.base_url,
            urlencoding::encode(query.repo.as_str())
        ))
        .with_context(|| format!("Invalid Searchfox base URL: {}", self.base_url))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("q", &query.query)
                .append_pair("case", bool_param(query.case_sensitive))
                .append_pair("regexp", bool_param(query.use_regexp));
            if let Some(path) = query.path_filter.as_deref().filter(|p| !p.is_empty()) {
                pairs.append_pair("path", path);
            }
        }

        Ok(url)
    }

    /// Runs one search request and returns the raw payload.
    ///
    /// Non-success statuses, transport failures and undecodable bodies are all
    /// errors; there is no partial result.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchfoxResponse> {
        let url = self.search_url(query)?;
        tracing::debug!("Searching Searchfox: {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown status")
            ));
        }

        let payload = response
            .json::<SearchfoxResponse>()
            .await
            .context("Failed to decode Searchfox response")?;

        tracing::debug!("Searchfox returned {} top-level keys", payload.len());
        Ok(payload)
    }
}

fn bool_param(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LogicalRepository, ResultLimit};

    fn client() -> SearchfoxClient {
        SearchfoxClient::new(reqwest::Client::new(), "https://searchfox.org")
    }

    #[test]
    fn test_search_url_defaults() {
        let url = client().search_url(&SearchQuery::new("nsIFoo")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://searchfox.org/mozilla-central/search?q=nsIFoo&case=false&regexp=false"
        );
    }

    #[test]
    fn test_search_url_with_all_options() {
        let query = SearchQuery {
            query: "Foo Bar".to_string(),
            repo: LogicalRepository::from("comm-central"),
            path_filter: Some("^mail/".to_string()),
            case_sensitive: true,
            use_regexp: true,
            limit: ResultLimit::Unbounded,
        };
        let url = client().search_url(&query).unwrap();
        assert_eq!(url.path(), "/comm-central/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "Foo Bar".to_string()),
                ("case".to_string(), "true".to_string()),
                ("regexp".to_string(), "true".to_string()),
                ("path".to_string(), "^mail/".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_url_skips_empty_path() {
        let mut query = SearchQuery::new("x");
        query.path_filter = Some(String::new());
        let url = client().search_url(&query).unwrap();
        assert!(!url.as_str().contains("path="));
    }
}
