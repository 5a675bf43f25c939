//! Core type definitions
//!
//! Strongly-typed wrappers for the repository names, search requests and tool
//! results that flow between the MCP surface and the upstream clients.

pub mod file;
pub mod repository;
pub mod search;

pub use file::*;
pub use repository::*;
pub use search::*;
