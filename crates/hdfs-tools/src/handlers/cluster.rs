//! Cluster-level tools: status report, configuration, and connectivity.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use hdfs_core::{Error, Tool, ToolDefinition, ToolOutput, ToolParameters};

use super::{respond, DEFAULT_PATH};
use crate::command::CommandSpec;
use crate::context::HdfsContext;

// =============================================================================
// Cluster Status Tool
// =============================================================================

pub struct ClusterStatusTool {
    ctx: Arc<HdfsContext>,
}

impl ClusterStatusTool {
    pub fn new(ctx: Arc<HdfsContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Tool for ClusterStatusTool {
    fn name(&self) -> &str {
        "get_hdfs_cluster_status"
    }

    fn description(&self) -> &str {
        "Get the HDFS cluster status report (capacity, usage, and DataNode health)."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameters(ToolParameters::new())
    }

    async fn execute(&self, _arguments: Value) -> Result<ToolOutput, Error> {
        let result = self.ctx.run(&CommandSpec::dfsadmin(["-report"])).await;
        Ok(respond(result, "Failed to get cluster status", |output| {
            format!("HDFS cluster status report:\n{}", output.stdout)
        }))
    }
}

// =============================================================================
// Config Info Tool
// =============================================================================

/// Reports the resolved connection settings. Never spawns a process.
pub struct ConfigInfoTool {
    ctx: Arc<HdfsContext>,
}

impl ConfigInfoTool {
    pub fn new(ctx: Arc<HdfsContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Tool for ConfigInfoTool {
    fn name(&self) -> &str {
        "get_hdfs_config_info"
    }

    fn description(&self) -> &str {
        "Get the current HDFS connection configuration."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameters(ToolParameters::new())
    }

    async fn execute(&self, _arguments: Value) -> Result<ToolOutput, Error> {
        let endpoint = self.ctx.endpoint();
        Ok(ToolOutput::success(format!(
            "Current HDFS configuration:\n\
             NameNode: {}\n\
             Port: {}\n\
             HDFS URI: {}\n\
             Client: {}\n\
             Qualification: {}\n\
             Timeout: {} seconds",
            endpoint.host(),
            endpoint.port(),
            endpoint.uri(),
            self.ctx.client(),
            self.ctx.strategy(),
            self.ctx.timeout().as_secs(),
        )))
    }
}

// =============================================================================
// Connection Test Tool
// =============================================================================

pub struct ConnectionTestTool {
    ctx: Arc<HdfsContext>,
}

impl ConnectionTestTool {
    pub fn new(ctx: Arc<HdfsContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Tool for ConnectionTestTool {
    fn name(&self) -> &str {
        "test_hdfs_connection"
    }

    fn description(&self) -> &str {
        "Test the connection to the HDFS cluster by listing the root directory."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameters(ToolParameters::new())
    }

    async fn execute(&self, _arguments: Value) -> Result<ToolOutput, Error> {
        let result = self.ctx.run(&CommandSpec::dfs(["-ls", DEFAULT_PATH])).await;
        Ok(respond(result, "HDFS connection test failed", |_| {
            format!(
                "HDFS connection test succeeded! Connected to {}",
                self.ctx.endpoint().uri()
            )
        }))
    }
}
