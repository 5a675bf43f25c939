use crate::services::FileRetriever;
use crate::tools::error::ToolError;
use crate::types::{FileRequest, FileResult};

/// Fetch a file from the mirror of the requested repository.
///
/// Fetch failures come back as a degraded `FileResult`, not as an error.
pub async fn get_file(
    file_retriever: &FileRetriever,
    request: FileRequest,
) -> Result<FileResult, ToolError> {
    file_retriever
        .fetch(request.repo.as_str(), &request.path)
        .await
        .map_err(|e| ToolError::FileAccessError(format!("{:#}", e)))
}
