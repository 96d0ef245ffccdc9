//! hdfs-tools: HDFS administration tools for hdfs-mcp
//!
//! Each tool wraps one invocation of the external `hdfs` client:
//! - Endpoint: the NameNode every command is pointed at
//! - Command: argument-vector construction and endpoint qualification
//! - Executor: child-process execution with a time budget
//! - Handlers: one [`hdfs_core::Tool`] per operation

pub mod command;
pub mod context;
pub mod endpoint;
pub mod executor;
pub mod handlers;

#[cfg(all(unix, any(test, feature = "testing")))]
pub mod testing;

pub use command::{CommandBuilder, CommandSpec, QualificationStrategy, DEFAULT_CLIENT};
pub use context::{HdfsConfig, HdfsContext};
pub use endpoint::{EndpointConfig, DEFAULT_NAMENODE, DEFAULT_PORT, HDFS_SCHEME};
pub use executor::{
    CommandError, CommandExecutor, CommandOutput, ErrorKind, ExecutionResult,
    DEFAULT_TIMEOUT_SECS,
};
pub use handlers::create_hdfs_tools;
