//! hdfs-core: Core types and traits for hdfs-mcp
//!
//! This crate provides the protocol-agnostic tool abstraction that the
//! HDFS tool handlers implement and the MCP server exposes.

pub mod error;
pub mod tool;

pub use error::Error;
pub use tool::{PropertySchema, Tool, ToolDefinition, ToolOutput, ToolParameters, ToolRegistry};
