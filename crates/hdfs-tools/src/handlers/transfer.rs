//! Transfer tools: upload, download, copy, and move.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use hdfs_core::{Error, PropertySchema, Tool, ToolDefinition, ToolOutput, ToolParameters};

use super::{parse_args, respond};
use crate::command::CommandSpec;
use crate::context::HdfsContext;
use crate::executor::CommandError;

// =============================================================================
// Upload Tool
// =============================================================================

pub struct UploadTool {
    ctx: Arc<HdfsContext>,
}

impl UploadTool {
    pub fn new(ctx: Arc<HdfsContext>) -> Self {
        Self { ctx }
    }
}

#[derive(Deserialize)]
struct UploadArgs {
    local_path: String,
    hdfs_path: String,
}

#[async_trait]
impl Tool for UploadTool {
    fn name(&self) -> &str {
        "upload_to_hdfs"
    }

    fn description(&self) -> &str {
        "Upload a local file to HDFS."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameters(
            ToolParameters::new()
                .add_property("local_path", PropertySchema::string("Local file path"), true)
                .add_property("hdfs_path", PropertySchema::string("HDFS target path"), true),
        )
    }

    async fn execute(&self, arguments: Value) -> Result<ToolOutput, Error> {
        let args: UploadArgs = parse_args(self.name(), arguments)?;

        // Checked locally so a missing source never reaches the client.
        let result = if matches!(tokio::fs::try_exists(&args.local_path).await, Ok(true)) {
            self.ctx
                .run(&CommandSpec::dfs([
                    "-put",
                    args.local_path.as_str(),
                    args.hdfs_path.as_str(),
                ]))
                .await
        } else {
            tracing::warn!(local_path = %args.local_path, "Upload source does not exist");
            Err(CommandError::validation(format!(
                "Local file does not exist: {}",
                args.local_path
            )))
        };

        Ok(respond(result, "Failed to upload file", |_| {
            format!(
                "Successfully uploaded file '{}' to HDFS '{}'",
                args.local_path, args.hdfs_path
            )
        }))
    }
}

// =============================================================================
// Download Tool
// =============================================================================

pub struct DownloadTool {
    ctx: Arc<HdfsContext>,
}

impl DownloadTool {
    pub fn new(ctx: Arc<HdfsContext>) -> Self {
        Self { ctx }
    }
}

#[derive(Deserialize)]
struct DownloadArgs {
    hdfs_path: String,
    local_path: String,
}

#[async_trait]
impl Tool for DownloadTool {
    fn name(&self) -> &str {
        "download_from_hdfs"
    }

    fn description(&self) -> &str {
        "Download a file from HDFS to the local filesystem."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameters(
            ToolParameters::new()
                .add_property("hdfs_path", PropertySchema::string("HDFS file path"), true)
                .add_property("local_path", PropertySchema::string("Local target path"), true),
        )
    }

    async fn execute(&self, arguments: Value) -> Result<ToolOutput, Error> {
        let args: DownloadArgs = parse_args(self.name(), arguments)?;

        // The cluster path is the source, not the trailing local destination.
        let spec = CommandSpec::new(
            "dfs",
            ["-get", args.hdfs_path.as_str(), args.local_path.as_str()],
        )
        .with_path_index(1);

        let result = self.ctx.run(&spec).await;
        Ok(respond(result, "Failed to download file", |_| {
            format!(
                "Successfully downloaded file '{}' to local '{}'",
                args.hdfs_path, args.local_path
            )
        }))
    }
}

// =============================================================================
// Copy Tool
// =============================================================================

pub struct CopyTool {
    ctx: Arc<HdfsContext>,
}

impl CopyTool {
    pub fn new(ctx: Arc<HdfsContext>) -> Self {
        Self { ctx }
    }
}

#[derive(Deserialize)]
struct SourceDestArgs {
    source_path: String,
    dest_path: String,
}

fn source_dest_parameters() -> ToolParameters {
    ToolParameters::new()
        .add_property("source_path", PropertySchema::string("Source HDFS path"), true)
        .add_property("dest_path", PropertySchema::string("Destination HDFS path"), true)
}

#[async_trait]
impl Tool for CopyTool {
    fn name(&self) -> &str {
        "copy_within_hdfs"
    }

    fn description(&self) -> &str {
        "Copy a file or directory within HDFS."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description())
            .with_parameters(source_dest_parameters())
    }

    async fn execute(&self, arguments: Value) -> Result<ToolOutput, Error> {
        let args: SourceDestArgs = parse_args(self.name(), arguments)?;

        let result = self
            .ctx
            .run(&CommandSpec::dfs([
                "-cp",
                args.source_path.as_str(),
                args.dest_path.as_str(),
            ]))
            .await;
        Ok(respond(result, "Failed to copy", |_| {
            format!(
                "Successfully copied '{}' to '{}'",
                args.source_path, args.dest_path
            )
        }))
    }
}

// =============================================================================
// Move Tool
// =============================================================================

pub struct MoveTool {
    ctx: Arc<HdfsContext>,
}

impl MoveTool {
    pub fn new(ctx: Arc<HdfsContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Tool for MoveTool {
    fn name(&self) -> &str {
        "move_within_hdfs"
    }

    fn description(&self) -> &str {
        "Move or rename a file or directory within HDFS."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description())
            .with_parameters(source_dest_parameters())
    }

    async fn execute(&self, arguments: Value) -> Result<ToolOutput, Error> {
        let args: SourceDestArgs = parse_args(self.name(), arguments)?;

        let result = self
            .ctx
            .run(&CommandSpec::dfs([
                "-mv",
                args.source_path.as_str(),
                args.dest_path.as_str(),
            ]))
            .await;
        Ok(respond(result, "Failed to move", |_| {
            format!(
                "Successfully moved '{}' to '{}'",
                args.source_path, args.dest_path
            )
        }))
    }
}
