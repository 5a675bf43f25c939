use crate::services::SearchService;
use crate::tools::error::ToolError;
use crate::types::{SearchCodeOutput, SearchQuery};

/// Search Searchfox and normalize the hits
pub async fn search_code(
    search_service: &SearchService,
    query: SearchQuery,
) -> Result<SearchCodeOutput, ToolError> {
    search_service.search_code(&query).await.map_err(|e| {
        tracing::error!("Search for '{}' in {} failed: {:#}", query.query, query.repo, e);
        ToolError::UpstreamSearchFailure(format!("{:#}", e))
    })
}
