//! File retrieval result types

use serde::{Deserialize, Serialize};

use super::LogicalRepository;

/// A validated file retrieval request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRequest {
    pub repo: LogicalRepository,
    pub path: String,
}

/// Where returned file content came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileSource {
    Remote,
}

/// JSON document returned by the `get_file` tool.
///
/// A failed fetch still produces a `FileResult`: `content` is empty, `source`
/// is absent and `note` says what went wrong.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileResult {
    pub repo: String,
    pub path: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<FileSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "searchfoxUrl", skip_serializing_if = "Option::is_none")]
    pub browse_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl FileResult {
    pub fn is_degraded(&self) -> bool {
        self.source.is_none()
    }
}
