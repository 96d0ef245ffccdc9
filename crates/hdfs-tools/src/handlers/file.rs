//! File tools: read contents and stat.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use hdfs_core::{Error, PropertySchema, Tool, ToolDefinition, ToolOutput, ToolParameters};

use super::{parse_args, respond};
use crate::command::CommandSpec;
use crate::context::HdfsContext;

/// `-stat` format: type, owner, group, size, modification time, name.
const STAT_FORMAT: &str = "%F %u %g %b %y %n";

// =============================================================================
// Read File Tool
// =============================================================================

pub struct ReadFileTool {
    ctx: Arc<HdfsContext>,
}

impl ReadFileTool {
    pub fn new(ctx: Arc<HdfsContext>) -> Self {
        Self { ctx }
    }
}

#[derive(Deserialize)]
struct ReadFileArgs {
    file_path: String,
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_hdfs_file"
    }

    fn description(&self) -> &str {
        "Read the contents of an HDFS file. The whole file is returned as text."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameters(
            ToolParameters::new().add_property(
                "file_path",
                PropertySchema::string("HDFS file path"),
                true,
            ),
        )
    }

    async fn execute(&self, arguments: Value) -> Result<ToolOutput, Error> {
        let args: ReadFileArgs = parse_args(self.name(), arguments)?;

        // No size guard: the client output is buffered in full.
        let result = self
            .ctx
            .run(&CommandSpec::dfs(["-cat", args.file_path.as_str()]))
            .await;
        Ok(respond(result, "Failed to read file", |output| {
            format!("File '{}' contents:\n{}", args.file_path, output.stdout)
        }))
    }
}

// =============================================================================
// File Info Tool
// =============================================================================

pub struct FileInfoTool {
    ctx: Arc<HdfsContext>,
}

impl FileInfoTool {
    pub fn new(ctx: Arc<HdfsContext>) -> Self {
        Self { ctx }
    }
}

#[derive(Deserialize)]
struct FileInfoArgs {
    path: String,
}

#[async_trait]
impl Tool for FileInfoTool {
    fn name(&self) -> &str {
        "get_hdfs_file_info"
    }

    fn description(&self) -> &str {
        "Get detailed information about an HDFS file or directory: \
         type, owner, group, size, modification time, and name."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameters(
            ToolParameters::new().add_property("path", PropertySchema::string("HDFS path"), true),
        )
    }

    async fn execute(&self, arguments: Value) -> Result<ToolOutput, Error> {
        let args: FileInfoArgs = parse_args(self.name(), arguments)?;

        let result = self
            .ctx
            .run(&CommandSpec::dfs(["-stat", STAT_FORMAT, args.path.as_str()]))
            .await;
        Ok(respond(result, "Failed to get file info", |output| {
            format!("Path '{}' information:\n{}", args.path, output.stdout)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::EndpointConfig;
    use crate::testing::FakeClient;
    use serde_json::json;

    #[tokio::test]
    async fn test_read_file() {
        let fake = FakeClient::succeeding("line one\nline two\n");
        let tool = ReadFileTool::new(fake.context(EndpointConfig::default()));

        let output = tool
            .execute(json!({ "file_path": "/logs/app.log" }))
            .await
            .unwrap();
        assert_eq!(
            output,
            ToolOutput::success("File '/logs/app.log' contents:\nline one\nline two")
        );
        assert_eq!(&fake.last_call().unwrap()[3..], &["-cat", "/logs/app.log"]);
    }

    #[tokio::test]
    async fn test_read_file_failure_label() {
        let fake = FakeClient::failing(1, "cat: `/nope': No such file or directory");
        let tool = ReadFileTool::new(fake.context(EndpointConfig::default()));

        let output = tool.execute(json!({ "file_path": "/nope" })).await.unwrap();
        assert!(output.is_error);
        assert!(output.content.starts_with("Failed to read file: Command failed with exit code 1"));
    }

    #[tokio::test]
    async fn test_file_info_passes_format_as_single_argument() {
        let fake = FakeClient::succeeding("regular file hdfs supergroup 42 2024-01-01 00:00:00 a.txt");
        let tool = FileInfoTool::new(fake.context(EndpointConfig::default()));

        let output = tool.execute(json!({ "path": "/a.txt" })).await.unwrap();
        assert_eq!(
            output.content,
            "Path '/a.txt' information:\nregular file hdfs supergroup 42 2024-01-01 00:00:00 a.txt"
        );
        assert_eq!(
            &fake.last_call().unwrap()[3..],
            &["-stat", "%F %u %g %b %y %n", "/a.txt"]
        );
    }
}
