//! Directory tools: list, create, delete, and disk usage.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use hdfs_core::{Error, PropertySchema, Tool, ToolDefinition, ToolOutput, ToolParameters};

use super::{default_path, parse_args, respond, DEFAULT_PATH};
use crate::command::CommandSpec;
use crate::context::HdfsContext;

// =============================================================================
// List Directory Tool
// =============================================================================

pub struct ListDirectoryTool {
    ctx: Arc<HdfsContext>,
}

impl ListDirectoryTool {
    pub fn new(ctx: Arc<HdfsContext>) -> Self {
        Self { ctx }
    }
}

#[derive(Deserialize)]
struct ListDirectoryArgs {
    #[serde(default = "default_path")]
    path: String,
}

#[async_trait]
impl Tool for ListDirectoryTool {
    fn name(&self) -> &str {
        "list_hdfs_directory"
    }

    fn description(&self) -> &str {
        "List files and subdirectories in an HDFS directory."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameters(
            ToolParameters::new().add_property(
                "path",
                PropertySchema::string("HDFS path, defaults to the root directory \"/\"")
                    .with_default(Value::from(DEFAULT_PATH)),
                false,
            ),
        )
    }

    async fn execute(&self, arguments: Value) -> Result<ToolOutput, Error> {
        let args: ListDirectoryArgs = parse_args(self.name(), arguments)?;
        let path = args.path;

        let result = self.ctx.run(&CommandSpec::dfs(["-ls", path.as_str()])).await;
        Ok(respond(result, "Failed to list directory", |output| {
            if output.stdout.is_empty() {
                format!("HDFS directory '{}' is empty", path)
            } else {
                format!("HDFS directory '{}' contents:\n{}", path, output.stdout)
            }
        }))
    }
}

// =============================================================================
// Create Directory Tool
// =============================================================================

pub struct CreateDirectoryTool {
    ctx: Arc<HdfsContext>,
}

impl CreateDirectoryTool {
    pub fn new(ctx: Arc<HdfsContext>) -> Self {
        Self { ctx }
    }
}

#[derive(Deserialize)]
struct CreateDirectoryArgs {
    path: String,
}

#[async_trait]
impl Tool for CreateDirectoryTool {
    fn name(&self) -> &str {
        "create_hdfs_directory"
    }

    fn description(&self) -> &str {
        "Create a directory in HDFS, including missing parents. Succeeds if it already exists."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameters(
            ToolParameters::new().add_property(
                "path",
                PropertySchema::string("HDFS directory path to create"),
                true,
            ),
        )
    }

    async fn execute(&self, arguments: Value) -> Result<ToolOutput, Error> {
        let args: CreateDirectoryArgs = parse_args(self.name(), arguments)?;

        let result = self
            .ctx
            .run(&CommandSpec::dfs(["-mkdir", "-p", args.path.as_str()]))
            .await;
        Ok(respond(result, "Failed to create directory", |_| {
            format!("Successfully created HDFS directory: {}", args.path)
        }))
    }
}

// =============================================================================
// Delete Path Tool
// =============================================================================

pub struct DeletePathTool {
    ctx: Arc<HdfsContext>,
}

impl DeletePathTool {
    pub fn new(ctx: Arc<HdfsContext>) -> Self {
        Self { ctx }
    }
}

#[derive(Deserialize)]
struct DeletePathArgs {
    path: String,
    #[serde(default)]
    recursive: bool,
}

#[async_trait]
impl Tool for DeletePathTool {
    fn name(&self) -> &str {
        "delete_hdfs_path"
    }

    fn description(&self) -> &str {
        "Delete an HDFS file or directory."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameters(
            ToolParameters::new()
                .add_property("path", PropertySchema::string("HDFS path to delete"), true)
                .add_property(
                    "recursive",
                    PropertySchema::boolean("Whether to recursively delete a directory")
                        .with_default(Value::Bool(false)),
                    false,
                ),
        )
    }

    async fn execute(&self, arguments: Value) -> Result<ToolOutput, Error> {
        let args: DeletePathArgs = parse_args(self.name(), arguments)?;

        let mut options = vec!["-rm"];
        if args.recursive {
            options.push("-r");
        }
        options.push(args.path.as_str());

        let result = self.ctx.run(&CommandSpec::dfs(options)).await;
        Ok(respond(result, "Failed to delete path", |_| {
            format!("Successfully deleted HDFS path: {}", args.path)
        }))
    }
}

// =============================================================================
// Disk Usage Tool
// =============================================================================

pub struct DiskUsageTool {
    ctx: Arc<HdfsContext>,
}

impl DiskUsageTool {
    pub fn new(ctx: Arc<HdfsContext>) -> Self {
        Self { ctx }
    }
}

#[derive(Deserialize)]
struct DiskUsageArgs {
    #[serde(default = "default_path")]
    path: String,
}

#[async_trait]
impl Tool for DiskUsageTool {
    fn name(&self) -> &str {
        "get_hdfs_disk_usage"
    }

    fn description(&self) -> &str {
        "Get disk usage for an HDFS path, with human-readable sizes."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameters(
            ToolParameters::new().add_property(
                "path",
                PropertySchema::string("HDFS path, defaults to the root directory \"/\"")
                    .with_default(Value::from(DEFAULT_PATH)),
                false,
            ),
        )
    }

    async fn execute(&self, arguments: Value) -> Result<ToolOutput, Error> {
        let args: DiskUsageArgs = parse_args(self.name(), arguments)?;

        let result = self
            .ctx
            .run(&CommandSpec::dfs(["-du", "-h", args.path.as_str()]))
            .await;
        Ok(respond(result, "Failed to get disk usage", |output| {
            format!("Path '{}' disk usage:\n{}", args.path, output.stdout)
        }))
    }
}
