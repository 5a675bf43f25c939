//! Tool function implementations shared by the MCP server and the CLI

pub mod file;
pub mod search;
