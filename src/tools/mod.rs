//! Tools module
//!
//! Request handlers behind the MCP server and the command-line analyzer.

pub mod analysis;
pub mod status;
