//! Transport layer for the Searchfox MCP server
//!
//! The same `SearchfoxTools` service can be served over stdio (launched as a
//! subprocess by an MCP client) or over HTTP with Server-Sent Events.

/// SSE (Server-Sent Events) transport for HTTP-based MCP communication
pub mod sse_server;

/// Standard I/O transport for subprocess-based MCP communication
pub mod stdio;
