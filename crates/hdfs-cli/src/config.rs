use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use hdfs_tools::{
    EndpointConfig, HdfsConfig, QualificationStrategy, DEFAULT_CLIENT, DEFAULT_NAMENODE,
    DEFAULT_PORT, DEFAULT_TIMEOUT_SECS,
};

/// Variables read without a prefix, for compatibility with existing deployments.
const LEGACY_ENV_KEYS: [&str; 2] = ["HDFS_NAMENODE", "HDFS_PORT"];

const ENV_PREFIX: &str = "HDFS_MCP_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub hdfs: HdfsSection,
    pub server: ServerSection,
}

/// Where the NameNode lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HdfsSection {
    pub namenode: String,
    pub port: u16,
}

impl Default for HdfsSection {
    fn default() -> Self {
        Self {
            namenode: DEFAULT_NAMENODE.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// How commands are run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Hadoop client executable, looked up on PATH unless absolute
    pub client: String,

    /// Per-command time budget in seconds
    pub timeout_secs: u64,

    pub strategy: QualificationStrategy,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            client: DEFAULT_CLIENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            strategy: QualificationStrategy::default(),
        }
    }
}

/// Command-line values that take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub namenode: Option<String>,
    pub port: Option<u16>,
    pub client: Option<String>,
    pub timeout_secs: Option<u64>,
    pub strategy: Option<QualificationStrategy>,
}

impl Config {
    /// Resolve configuration: defaults, then the TOML file, then the
    /// environment, then `overrides`.
    ///
    /// An explicit `path` must exist; the default path is optional.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let path = match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Configuration file not found: {}", path.display());
                }
                path.to_path_buf()
            }
            None => Self::config_path()?,
        };

        Self::figment(&path, overrides)
            .extract()
            .with_context(|| format!("Failed to load configuration from {}", path.display()))
    }

    pub fn figment(path: &Path, overrides: &Overrides) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(
                Env::raw()
                    .only(&LEGACY_ENV_KEYS)
                    .map(|key| key.as_str().replacen('_', ".", 1).into()),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        if let Some(namenode) = &overrides.namenode {
            figment = figment.merge(Serialized::default("hdfs.namenode", namenode));
        }
        if let Some(port) = overrides.port {
            figment = figment.merge(Serialized::default("hdfs.port", port));
        }
        if let Some(client) = &overrides.client {
            figment = figment.merge(Serialized::default("server.client", client));
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            figment = figment.merge(Serialized::default("server.timeout_secs", timeout_secs));
        }
        if let Some(strategy) = overrides.strategy {
            figment = figment.merge(Serialized::default("server.strategy", strategy));
        }

        figment
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("hdfs-mcp").join("config.toml"))
    }

    /// Settings for the tool context. A zero timeout falls back to the default.
    pub fn hdfs_config(&self) -> HdfsConfig {
        let timeout_secs = if self.server.timeout_secs == 0 {
            tracing::warn!(
                default = DEFAULT_TIMEOUT_SECS,
                "Timeout of 0 seconds is not usable, using the default"
            );
            DEFAULT_TIMEOUT_SECS
        } else {
            self.server.timeout_secs
        };

        HdfsConfig::new(EndpointConfig::new(&self.hdfs.namenode, self.hdfs.port))
            .with_client(&self.server.client)
            .with_timeout(Duration::from_secs(timeout_secs))
            .with_strategy(self.server.strategy)
    }
}
