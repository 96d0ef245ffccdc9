//! One tool per HDFS operation.
//!
//! Handlers shape their arguments into a [`CommandSpec`](crate::command::CommandSpec),
//! run it through the shared [`HdfsContext`], and turn the outcome into a
//! readable string. Failures are prefixed with an operation label so callers
//! can tell which operation failed.

mod cluster;
mod directory;
mod file;
mod transfer;

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use hdfs_core::{Error, Tool, ToolOutput};

use crate::context::HdfsContext;
use crate::executor::{CommandOutput, ExecutionResult};

pub use cluster::{ClusterStatusTool, ConfigInfoTool, ConnectionTestTool};
pub use directory::{CreateDirectoryTool, DeletePathTool, DiskUsageTool, ListDirectoryTool};
pub use file::{FileInfoTool, ReadFileTool};
pub use transfer::{CopyTool, DownloadTool, MoveTool, UploadTool};

/// Path used when a listing or usage query names none.
pub(crate) const DEFAULT_PATH: &str = "/";

pub(crate) fn default_path() -> String {
    DEFAULT_PATH.to_string()
}

/// Deserialize tool arguments; a missing argument object counts as empty.
pub(crate) fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, Error> {
    let arguments = if arguments.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        arguments
    };
    serde_json::from_value(arguments)
        .map_err(|e| Error::invalid_arguments(tool, e.to_string()))
}

/// Format a command outcome: `on_success` on exit zero, `"<label>: <error>"` otherwise.
pub(crate) fn respond(
    result: ExecutionResult,
    failure_label: &str,
    on_success: impl FnOnce(CommandOutput) -> String,
) -> ToolOutput {
    match result {
        Ok(output) => {
            if let Some(stderr) = &output.stderr {
                tracing::debug!(stderr = %stderr, "HDFS client wrote to stderr");
            }
            ToolOutput::success(on_success(output))
        }
        Err(e) => ToolOutput::error(format!("{}: {}", failure_label, e)),
    }
}

/// All HDFS tools, bound to one shared context.
pub fn create_hdfs_tools(ctx: Arc<HdfsContext>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(ListDirectoryTool::new(Arc::clone(&ctx))),
        Arc::new(ReadFileTool::new(Arc::clone(&ctx))),
        Arc::new(CreateDirectoryTool::new(Arc::clone(&ctx))),
        Arc::new(DeletePathTool::new(Arc::clone(&ctx))),
        Arc::new(UploadTool::new(Arc::clone(&ctx))),
        Arc::new(DownloadTool::new(Arc::clone(&ctx))),
        Arc::new(FileInfoTool::new(Arc::clone(&ctx))),
        Arc::new(DiskUsageTool::new(Arc::clone(&ctx))),
        Arc::new(ClusterStatusTool::new(Arc::clone(&ctx))),
        Arc::new(CopyTool::new(Arc::clone(&ctx))),
        Arc::new(MoveTool::new(Arc::clone(&ctx))),
        Arc::new(ConfigInfoTool::new(Arc::clone(&ctx))),
        Arc::new(ConnectionTestTool::new(ctx)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandSpec;
    use crate::endpoint::EndpointConfig;
    use crate::executor::CommandError;
    use crate::testing::FakeClient;
    use crate::HdfsConfig;

    #[test]
    fn test_create_hdfs_tools_names() {
        let ctx = Arc::new(HdfsContext::new(HdfsConfig::default()));
        let mut names: Vec<String> = create_hdfs_tools(ctx)
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "copy_within_hdfs",
                "create_hdfs_directory",
                "delete_hdfs_path",
                "download_from_hdfs",
                "get_hdfs_cluster_status",
                "get_hdfs_config_info",
                "get_hdfs_disk_usage",
                "get_hdfs_file_info",
                "list_hdfs_directory",
                "move_within_hdfs",
                "read_hdfs_file",
                "test_hdfs_connection",
                "upload_to_hdfs",
            ]
        );
    }

    #[test]
    fn test_definitions_match_names() {
        let ctx = Arc::new(HdfsContext::new(HdfsConfig::default()));
        for tool in create_hdfs_tools(ctx) {
            let def = tool.definition();
            assert_eq!(def.name, tool.name());
            assert!(!def.description.is_empty());
            for required in &def.parameters.required {
                assert!(def.parameters.properties.contains_key(required));
            }
        }
    }

    #[test]
    fn test_parse_args_null_is_empty_object() {
        #[derive(serde::Deserialize)]
        struct Args {
            #[serde(default = "default_path")]
            path: String,
        }
        let args: Args = parse_args("list_hdfs_directory", Value::Null).unwrap();
        assert_eq!(args.path, "/");
    }

    #[test]
    fn test_parse_args_reports_tool() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Args {
            file_path: String,
        }
        let err = parse_args::<Args>("read_hdfs_file", serde_json::json!({})).unwrap_err();
        assert!(matches!(err, Error::InvalidArguments { .. }));
        assert!(err.to_string().contains("read_hdfs_file"));
        assert!(err.to_string().contains("file_path"));
    }

    #[test]
    fn test_respond_prefixes_failures() {
        let output = respond(
            Err(CommandError::NonZeroExit {
                code: 1,
                detail: "boom".into(),
            }),
            "Failed to copy",
            |_| String::new(),
        );
        assert!(output.is_error);
        assert_eq!(output.content, "Failed to copy: Command failed with exit code 1:\nboom");
    }

    #[tokio::test]
    async fn test_end_to_end_listing() {
        let fake = FakeClient::succeeding("found 2 items");
        let ctx = fake.context(EndpointConfig::new("nn1", 8020));
        let tools = create_hdfs_tools(Arc::clone(&ctx));
        let list = tools
            .iter()
            .find(|t| t.name() == "list_hdfs_directory")
            .unwrap();

        let output = list
            .execute(serde_json::json!({ "path": "/data" }))
            .await
            .unwrap();

        assert_eq!(
            fake.last_call().unwrap(),
            vec!["dfs", "-D", "fs.defaultFS=hdfs://nn1:8020", "-ls", "/data"]
        );
        assert_eq!(output, ToolOutput::success("HDFS directory '/data' contents:\nfound 2 items"));

        // The same spec run directly yields the same argv.
        ctx.run(&CommandSpec::dfs(["-ls", "/data"])).await.unwrap();
        assert_eq!(fake.calls()[0], fake.calls()[1]);
    }
}
