//! Tool argument validation and defaulting
//!
//! Required arguments (`query`, `path`) must be non-empty strings or the call
//! is rejected. Optional arguments of the wrong type are replaced by their
//! default instead of failing the call.

use std::sync::Arc;

use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};

use super::error::ToolError;
use crate::types::{
    DEFAULT_REPOSITORY, DEFAULT_SEARCH_LIMIT, FileRequest, LogicalRepository, ResultLimit,
    SearchQuery,
};

/// Tools exposed by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ToolName {
    SearchCode,
    GetFile,
}

impl ToolName {
    pub fn parse(name: &str) -> Result<Self, ToolError> {
        name.parse::<Self>()
            .map_err(|_| ToolError::UnknownOperation(name.to_string()))
    }
}

fn default_repo() -> String {
    DEFAULT_REPOSITORY.to_string()
}

fn default_false() -> bool {
    false
}

fn default_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

/// Arguments of `search_code`, used for the advertised input schema
#[allow(dead_code)]
#[derive(Debug, Clone, JsonSchema)]
pub struct SearchCodeParams {
    #[schemars(
        description = "Search query using exact literal string matching. Do NOT pass several words expecting OR logic ('profiler raptor' will not find files containing only one of them). Do NOT wrap terms in quotes; quotes are searched literally. Use a single specific term, function name or exact code snippet, run separate queries for broader searches, or enable regexp mode."
    )]
    query: String,

    #[schemars(
        description = "Repository to search in (e.g., mozilla-central, comm-central, autoland, mozilla-esr128)"
    )]
    #[schemars(default = "default_repo")]
    repo: Option<String>,

    #[schemars(
        description = "Filter results by file path using glob patterns. Matching is by substring, so a path matches if any part of it matches. Use ^ and $ to anchor at the beginning or end of the path (e.g., '^tools/profiler', 'profiler$')."
    )]
    path: Option<String>,

    #[schemars(description = "Enable case sensitive search (default: case insensitive)")]
    #[schemars(default = "default_false")]
    case: Option<bool>,

    #[schemars(description = "Treat query as regular expression pattern")]
    #[schemars(default = "default_false")]
    regexp: Option<bool>,

    #[schemars(
        description = "Maximum number of results to return. 0 or a negative value returns every result, fractional values round up."
    )]
    #[schemars(default = "default_limit")]
    limit: Option<f64>,
}

impl SearchCodeParams {
    pub fn from_arguments(arguments: &JsonObject) -> Result<SearchQuery, ToolError> {
        let query = required_string(
            arguments,
            "query",
            "Query parameter is required and must be a string",
        )?;

        Ok(SearchQuery {
            query,
            repo: repository(arguments),
            path_filter: optional_string(arguments, "path"),
            case_sensitive: optional_bool(arguments, "case").unwrap_or(false),
            use_regexp: optional_bool(arguments, "regexp").unwrap_or(false),
            limit: arguments
                .get("limit")
                .and_then(Value::as_f64)
                .map(ResultLimit::from_number)
                .unwrap_or(ResultLimit::AtMost(DEFAULT_SEARCH_LIMIT)),
        })
    }
}

/// Arguments of `get_file`, used for the advertised input schema
#[allow(dead_code)]
#[derive(Debug, Clone, JsonSchema)]
pub struct GetFileParams {
    #[schemars(description = "Repository name (e.g., mozilla-central, comm-central)")]
    #[schemars(default = "default_repo")]
    repo: Option<String>,

    #[schemars(description = "File path within the repository (e.g., 'dom/base/Document.cpp')")]
    path: String,
}

impl GetFileParams {
    pub fn from_arguments(arguments: &JsonObject) -> Result<FileRequest, ToolError> {
        let path = required_string(
            arguments,
            "path",
            "Path parameter is required and must be a string",
        )?;

        Ok(FileRequest {
            repo: repository(arguments),
            path,
        })
    }
}

/// JSON schema object advertised for a parameter struct
pub fn input_schema<T: JsonSchema>() -> Arc<JsonObject> {
    match serde_json::to_value(schemars::schema_for!(T)) {
        Ok(Value::Object(schema)) => Arc::new(schema),
        Ok(_) | Err(_) => {
            tracing::error!("Failed to generate input schema");
            Arc::new(JsonObject::new())
        }
    }
}

fn required_string(
    arguments: &JsonObject,
    key: &str,
    message: &str,
) -> Result<String, ToolError> {
    optional_string(arguments, key).ok_or_else(|| ToolError::InvalidInput(message.to_string()))
}

/// Non-empty string value of `key`, None for anything else
fn optional_string(arguments: &JsonObject, key: &str) -> Option<String> {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn optional_bool(arguments: &JsonObject, key: &str) -> Option<bool> {
    arguments.get(key).and_then(Value::as_bool)
}

fn repository(arguments: &JsonObject) -> LogicalRepository {
    optional_string(arguments, "repo")
        .map(LogicalRepository::new)
        .unwrap_or_default()
}
