//! Error types for the Searchfox MCP tools
//!
//! Every variant here is fatal to the tool call and reported to the MCP client
//! as an invocation error. A failed file fetch is not in this list; it comes
//! back as a normal result with a note.

use std::fmt;

use rmcp::Error as McpError;
use rmcp::model::ErrorCode;

/// Error types that can occur while handling a tool call
#[derive(Debug)]
pub enum ToolError {
    /// A required argument is missing or has the wrong type
    InvalidInput(String),

    /// The requested tool does not exist
    UnknownOperation(String),

    /// Searchfox returned an error status or could not be reached
    UpstreamSearchFailure(String),

    /// File retrieval failed outside the fetch itself
    FileAccessError(String),

    /// Error serializing response
    SerializationError(String),
}

impl ToolError {
    /// Maps the error onto the MCP error code the client sees
    pub fn into_mcp_error(self) -> McpError {
        let message = self.to_string();
        match self {
            ToolError::InvalidInput(_) => McpError::invalid_params(message, None),
            ToolError::UnknownOperation(_) => {
                McpError::new(ErrorCode::METHOD_NOT_FOUND, message, None)
            }
            ToolError::UpstreamSearchFailure(_)
            | ToolError::FileAccessError(_)
            | ToolError::SerializationError(_) => McpError::internal_error(message, None),
        }
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::InvalidInput(details) => write!(f, "{}", details),
            ToolError::UnknownOperation(name) => write!(f, "Unknown tool: {}", name),
            ToolError::UpstreamSearchFailure(details) => write!(f, "Search failed: {}", details),
            ToolError::FileAccessError(details) => {
                write!(f, "Failed to fetch file: {}", details)
            }
            ToolError::SerializationError(details) => {
                write!(f, "Serialization error: {}", details)
            }
        }
    }
}

impl std::error::Error for ToolError {}

/// Convert from ToolError to a plain String for CLI output
impl From<ToolError> for String {
    fn from(error: ToolError) -> Self {
        error.to_string()
    }
}
