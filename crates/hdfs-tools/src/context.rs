//! Process-wide, read-only state shared by every HDFS tool.

use std::time::Duration;

use crate::command::{CommandBuilder, CommandSpec, QualificationStrategy, DEFAULT_CLIENT};
use crate::endpoint::EndpointConfig;
use crate::executor::{CommandExecutor, ExecutionResult, DEFAULT_TIMEOUT_SECS};

/// Settings needed to reach a cluster through the `hdfs` client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HdfsConfig {
    pub endpoint: EndpointConfig,
    pub client: String,
    pub timeout: Duration,
    pub strategy: QualificationStrategy,
}

impl Default for HdfsConfig {
    fn default() -> Self {
        Self::new(EndpointConfig::default())
    }
}

impl HdfsConfig {
    pub fn new(endpoint: EndpointConfig) -> Self {
        Self {
            endpoint,
            client: DEFAULT_CLIENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            strategy: QualificationStrategy::default(),
        }
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = client.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_strategy(mut self, strategy: QualificationStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Builder and executor bound to one endpoint. Shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct HdfsContext {
    endpoint: EndpointConfig,
    builder: CommandBuilder,
    executor: CommandExecutor,
}

impl HdfsContext {
    pub fn new(config: HdfsConfig) -> Self {
        let builder = CommandBuilder::new(config.client, &config.endpoint, config.strategy);
        Self {
            endpoint: config.endpoint,
            builder,
            executor: CommandExecutor::new(config.timeout),
        }
    }

    pub fn endpoint(&self) -> &EndpointConfig {
        &self.endpoint
    }

    pub fn client(&self) -> &str {
        self.builder.client()
    }

    pub fn strategy(&self) -> QualificationStrategy {
        self.builder.strategy()
    }

    pub fn timeout(&self) -> Duration {
        self.executor.timeout()
    }

    /// Build the argument vector for `spec` and run it.
    pub async fn run(&self, spec: &CommandSpec) -> ExecutionResult {
        let argv = self.builder.build(spec);
        self.executor.execute(&argv).await
    }
}
