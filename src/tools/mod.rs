//! MCP (Model Context Protocol) tool implementations for Searchfox
//!
//! This module exposes two tools to MCP clients:
//!
//! - `search_code`: exact-string or regexp search over a Searchfox repository,
//!   flattened into a bounded list of line hits
//! - `get_file`: raw content of a file from the GitHub mirror of a repository
//!
//! Arguments are validated before any network access. Unknown tools and
//! missing required arguments are rejected as MCP errors.

use anyhow::Result;
use rmcp::service::RequestContext;
use rmcp::{Error as McpError, RoleServer, ServerHandler, model::*};
use serde::Serialize;

use crate::config::ServerConfig;
use crate::services::{FileRetriever, SearchService};

/// Error types specific to tool operations
pub mod error;

/// Tool function implementations organized by functionality
pub mod functions;

/// Argument validation and input schemas
pub mod params;

use error::ToolError;
use params::{GetFileParams, SearchCodeParams, ToolName, input_schema};

const SEARCH_CODE_DESCRIPTION: &str = "Search for code in Mozilla repositories using Searchfox. IMPORTANT: Uses exact string matching only - no search operators, no OR logic, no phrase matching with quotes. Multiple words are treated as a single literal string.";

const GET_FILE_DESCRIPTION: &str =
    "Get the contents of a specific file from specified repository.";

/// Searchfox tools exposed through the MCP protocol
#[derive(Clone)]
pub struct SearchfoxTools {
    config: ServerConfig,
    search_service: SearchService,
    file_retriever: FileRetriever,
}

impl SearchfoxTools {
    /// Creates the tools with clients for the configured upstreams
    pub fn new(config: ServerConfig) -> Result<Self> {
        let http_client = config.http_client()?;
        Ok(Self {
            search_service: SearchService::from_config(&config, http_client.clone()),
            file_retriever: FileRetriever::from_config(&config, http_client),
            config,
        })
    }

    /// Logs the upstream configuration before serving
    pub async fn initialize(&self) -> Result<()> {
        tracing::info!("Initializing SearchfoxTools...");
        tracing::info!("Searchfox: {}", self.config.searchfox_base_url);
        tracing::info!("Raw content: {}", self.config.raw_content_base_url);
        if let Some(timeout) = self.config.request_timeout {
            tracing::info!("Request timeout: {:?}", timeout);
        }
        tracing::info!("SearchfoxTools initialization complete");
        Ok(())
    }

    pub fn search_service(&self) -> &SearchService {
        &self.search_service
    }

    pub fn file_retriever(&self) -> &FileRetriever {
        &self.file_retriever
    }

    /// Tool definitions advertised to clients
    pub fn tools() -> Vec<Tool> {
        vec![
            Tool::new(
                ToolName::SearchCode.to_string(),
                SEARCH_CODE_DESCRIPTION,
                input_schema::<SearchCodeParams>(),
            ),
            Tool::new(
                ToolName::GetFile.to_string(),
                GET_FILE_DESCRIPTION,
                input_schema::<GetFileParams>(),
            ),
        ]
    }

    /// Validates and dispatches one tool call
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ToolError> {
        let Some(arguments) = arguments else {
            return Err(ToolError::InvalidInput("Missing arguments".to_string()));
        };

        match ToolName::parse(name)? {
            ToolName::SearchCode => {
                let query = SearchCodeParams::from_arguments(&arguments)?;
                let output = functions::search::search_code(&self.search_service, query).await?;
                json_result(&output)
            }
            ToolName::GetFile => {
                let request = GetFileParams::from_arguments(&arguments)?;
                let result = functions::file::get_file(&self.file_retriever, request).await?;
                json_result(&result)
            }
        }
    }
}

/// Pretty-printed JSON text content
fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, ToolError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        ToolError::SerializationError(format!("Failed to serialize result: {}", e))
    })?;

    Ok(CallToolResult {
        content: vec![Content::text(text)],
        is_error: Some(false),
    })
}

impl ServerHandler for SearchfoxTools {
    /// Provides information about this MCP server
    fn get_info(&self) -> ServerInfo {
        let instructions = format!(
            r#"Searchfox MCP Server - {}

## Overview
Search and read Mozilla source code. Searches run on Searchfox; file contents come from the GitHub mirror of each repository.

## Available Tools

### 1. search_code
Search for code in a Searchfox repository. Matching is exact and literal: no search operators, no OR logic, no quoted phrases. Use `regexp` for patterns and `path` to filter by file path.

Examples:
```json
// Literal search in mozilla-central (default repository, 50 results)
{{"name": "search_code", "arguments": {{"query": "nsIObserverService"}}}}

// Restrict to a directory and limit results
{{"name": "search_code", "arguments": {{"query": "profiler_add_marker", "path": "^tools/profiler", "limit": 20}}}}

// Regular expression, case sensitive, in comm-central
{{"name": "search_code", "arguments": {{"query": "nsMsg[A-Z]\\w+Service", "repo": "comm-central", "regexp": true, "case": true}}}}
```

### 2. get_file
Get the contents of a file. Repositories map to branches of mozilla/firefox (mozilla-central -> main, autoland, mozilla-beta -> beta, mozilla-release -> release, mozilla-esr115/128/140); comm-central is served from mozilla/releases-comm-central. If the file cannot be fetched the result has empty content and a `note`.

Examples:
```json
{{"name": "get_file", "arguments": {{"path": "dom/base/Document.cpp"}}}}
{{"name": "get_file", "arguments": {{"repo": "mozilla-esr128", "path": "toolkit/xre/nsAppRunner.cpp"}}}}
```

## Common Workflows

1. Use search_code to locate a symbol or string, then get_file on a result path to read the surrounding code.
2. The `searchfoxUrl` field of a file result links to the same file on Searchfox for cross-reference.
"#,
            self.config.searchfox_base_url
        );

        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(instructions),
        }
    }

    async fn list_tools(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            next_cursor: None,
            tools: Self::tools(),
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!("Tool call: {}", request.name);
        self.call(&request.name, request.arguments)
            .await
            .map_err(ToolError::into_mcp_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tools_are_advertised() {
        let tools = SearchfoxTools::tools();
        let names: Vec<&str> = tools.iter().map(|tool| tool.name.as_ref()).collect();
        assert_eq!(names, vec!["search_code", "get_file"]);
        assert!(tools[0].description.contains("exact string matching"));
    }

    #[test]
    fn test_server_info_enables_tools() {
        let tools = SearchfoxTools::new(ServerConfig::default()).unwrap();
        let info = tools.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("search_code"));
    }
}
