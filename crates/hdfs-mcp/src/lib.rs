//! hdfs-mcp: MCP server for hdfs-mcp
//!
//! Exposes a [`hdfs_core::ToolRegistry`] over the Model Context Protocol on
//! stdio. Tool names and schemas come straight from the registry.

mod server;

pub use server::{HdfsMcpServer, ServeError};
