/// Upstream endpoint configuration and HTTP client construction
pub mod config;

/// Raw file content retrieval from the GitHub mirror
pub mod github;

/// Searchfox search client and payload normalization
pub mod searchfox;

/// Repository resolution, file retrieval and search services
pub mod services;

/// MCP tool implementations exposing library functionality through the protocol
pub mod tools;

/// Transport layer implementations for MCP server modes (stdio, SSE)
pub mod transport;

/// Core type definitions and domain models used throughout the library
pub mod types;
