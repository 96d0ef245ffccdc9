//! Argument-vector construction for the `hdfs` client.
//!
//! Every invocation is pointed at the configured NameNode using one of two
//! qualification strategies. A process picks exactly one; the builder never
//! mixes them per operation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::endpoint::{EndpointConfig, HDFS_SCHEME};

/// Default name of the HDFS client executable.
pub const DEFAULT_CLIENT: &str = "hdfs";

/// Generic property-override flag accepted after the subcommand.
const PROPERTY_FLAG: &str = "-D";

/// Hadoop property naming the default filesystem.
const DEFAULT_FS_PROPERTY: &str = "fs.defaultFS";

/// How the endpoint is injected into a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QualificationStrategy {
    /// Insert `-D fs.defaultFS=<uri>` right after the subcommand.
    #[default]
    PropertyInjection,
    /// Prefix the path argument with the endpoint URI.
    ///
    /// Only applies when the subcommand plus options number more than two and
    /// the path is not already `hdfs://`-qualified; shorter commands fall back
    /// to the client's own `fs.defaultFS`.
    PathRewrite,
}

impl QualificationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualificationStrategy::PropertyInjection => "property-injection",
            QualificationStrategy::PathRewrite => "path-rewrite",
        }
    }
}

impl fmt::Display for QualificationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualificationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "property-injection" | "property" => Ok(QualificationStrategy::PropertyInjection),
            "path-rewrite" | "path" => Ok(QualificationStrategy::PathRewrite),
            other => Err(format!(
                "unknown qualification strategy '{}' (expected 'property-injection' or 'path-rewrite')",
                other
            )),
        }
    }
}

/// One logical HDFS operation: subcommand, options, and which option (if any)
/// is a cluster path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub subcommand: String,
    pub options: Vec<String>,
    /// Index into `options` of the path that path-rewrite qualifies.
    pub path_index: Option<usize>,
}

impl CommandSpec {
    pub fn new<I, S>(subcommand: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subcommand: subcommand.into(),
            options: options.into_iter().map(Into::into).collect(),
            path_index: None,
        }
    }

    /// A `dfs` command whose last option is the cluster path.
    pub fn dfs<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("dfs", options).with_last_as_path()
    }

    /// A `dfsadmin` command. These carry no path argument.
    pub fn dfsadmin<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("dfsadmin", options)
    }

    pub fn with_path_index(mut self, index: usize) -> Self {
        self.path_index = (index < self.options.len()).then_some(index);
        self
    }

    pub fn with_last_as_path(mut self) -> Self {
        self.path_index = self.options.len().checked_sub(1);
        self
    }

    /// Number of arguments after the client name, before any qualification.
    pub fn arg_count(&self) -> usize {
        1 + self.options.len()
    }
}

/// Turns a [`CommandSpec`] into the literal argument vector to execute.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    client: String,
    endpoint_uri: String,
    strategy: QualificationStrategy,
}

impl CommandBuilder {
    pub fn new(
        client: impl Into<String>,
        endpoint: &EndpointConfig,
        strategy: QualificationStrategy,
    ) -> Self {
        Self {
            client: client.into(),
            endpoint_uri: endpoint.uri(),
            strategy,
        }
    }

    pub fn client(&self) -> &str {
        &self.client
    }

    pub fn strategy(&self) -> QualificationStrategy {
        self.strategy
    }

    pub fn build(&self, spec: &CommandSpec) -> Vec<String> {
        let mut argv = Vec::with_capacity(spec.arg_count() + 3);
        argv.push(self.client.clone());
        argv.push(spec.subcommand.clone());

        match self.strategy {
            QualificationStrategy::PropertyInjection => {
                argv.push(PROPERTY_FLAG.to_string());
                argv.push(format!("{}={}", DEFAULT_FS_PROPERTY, self.endpoint_uri));
                argv.extend(spec.options.iter().cloned());
            }
            QualificationStrategy::PathRewrite => {
                let rewrite = spec
                    .path_index
                    .filter(|_| spec.arg_count() > 2)
                    .filter(|&i| !spec.options[i].starts_with(HDFS_SCHEME));
                argv.extend(spec.options.iter().enumerate().map(|(i, arg)| {
                    if rewrite == Some(i) {
                        format!("{}{}", self.endpoint_uri, arg)
                    } else {
                        arg.clone()
                    }
                }));
            }
        }

        tracing::info!(command = %argv.join(" "), strategy = %self.strategy, "Executing HDFS command");
        argv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(strategy: QualificationStrategy) -> CommandBuilder {
        CommandBuilder::new("hdfs", &EndpointConfig::new("nn1", 8020), strategy)
    }

    #[test]
    fn test_property_injection_list() {
        let argv = builder(QualificationStrategy::PropertyInjection)
            .build(&CommandSpec::dfs(["-ls", "/data"]));
        assert_eq!(
            argv,
            vec!["hdfs", "dfs", "-D", "fs.defaultFS=hdfs://nn1:8020", "-ls", "/data"]
        );
    }

    #[test]
    fn test_property_injection_without_path() {
        let argv = builder(QualificationStrategy::PropertyInjection)
            .build(&CommandSpec::dfsadmin(["-report"]));
        assert_eq!(argv[2], "-D");
        assert_eq!(argv[3], "fs.defaultFS=hdfs://nn1:8020");
        assert_eq!(argv[4], "-report");
        assert_eq!(argv.len(), 5);
    }

    #[test]
    fn test_property_injection_leaves_paths_untouched() {
        let argv = builder(QualificationStrategy::PropertyInjection)
            .build(&CommandSpec::dfs(["-cp", "/a", "/b"]));
        assert_eq!(&argv[4..], &["-cp", "/a", "/b"]);
    }

    #[test]
    fn test_path_rewrite_qualifies_last_path() {
        let argv = builder(QualificationStrategy::PathRewrite)
            .build(&CommandSpec::dfs(["-rm", "-r", "/tmp/old"]));
        assert_eq!(argv, vec!["hdfs", "dfs", "-rm", "-r", "hdfs://nn1:8020/tmp/old"]);
    }

    #[test]
    fn test_path_rewrite_skips_qualified_paths() {
        let argv = builder(QualificationStrategy::PathRewrite)
            .build(&CommandSpec::dfs(["-ls", "hdfs://other:9000/x"]));
        assert_eq!(argv.last().unwrap(), "hdfs://other:9000/x");
    }

    #[test]
    fn test_path_rewrite_short_commands_bypass() {
        let argv = builder(QualificationStrategy::PathRewrite)
            .build(&CommandSpec::dfs(["-ls"]));
        assert_eq!(argv, vec!["hdfs", "dfs", "-ls"]);

        let argv = builder(QualificationStrategy::PathRewrite)
            .build(&CommandSpec::dfsadmin(["-report"]));
        assert_eq!(argv, vec!["hdfs", "dfsadmin", "-report"]);
    }

    #[test]
    fn test_path_rewrite_uses_path_index() {
        let spec = CommandSpec::new("dfs", ["-get", "/remote/file", "/tmp/local"]).with_path_index(1);
        let argv = builder(QualificationStrategy::PathRewrite).build(&spec);
        assert_eq!(
            argv,
            vec!["hdfs", "dfs", "-get", "hdfs://nn1:8020/remote/file", "/tmp/local"]
        );
    }

    #[test]
    fn test_path_index_out_of_range_is_ignored() {
        let spec = CommandSpec::new("dfs", ["-ls"]).with_path_index(5);
        assert_eq!(spec.path_index, None);
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!(
            "path-rewrite".parse::<QualificationStrategy>().unwrap(),
            QualificationStrategy::PathRewrite
        );
        assert_eq!(
            "Property_Injection".parse::<QualificationStrategy>().unwrap(),
            QualificationStrategy::PropertyInjection
        );
        assert!("bogus".parse::<QualificationStrategy>().is_err());
        assert_eq!(QualificationStrategy::default().to_string(), "property-injection");
    }
}
