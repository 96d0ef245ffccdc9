//! NameNode endpoint resolution.

use serde::Serialize;
use std::fmt;

/// URI scheme prefix for fully-qualified HDFS paths.
pub const HDFS_SCHEME: &str = "hdfs://";

pub const DEFAULT_NAMENODE: &str = "localhost";

pub const DEFAULT_PORT: u16 = 9000;

/// Host and port of the NameNode every command is pointed at.
///
/// Built once at startup and never mutated; an empty host or a zero port is
/// replaced by the built-in default so a usable endpoint always exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointConfig {
    host: String,
    port: u16,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_NAMENODE.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl EndpointConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        let host = host.into();
        let host = match host.trim() {
            "" => {
                tracing::warn!(default = DEFAULT_NAMENODE, "NameNode host is empty, using default");
                DEFAULT_NAMENODE.to_string()
            }
            trimmed => trimmed.to_string(),
        };
        let port = if port == 0 {
            tracing::warn!(default = DEFAULT_PORT, "NameNode port is zero, using default");
            DEFAULT_PORT
        } else {
            port
        };
        Self { host, port }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Canonical endpoint string, e.g. `hdfs://nn1:8020`.
    pub fn uri(&self) -> String {
        format!("{}{}:{}", HDFS_SCHEME, self.host, self.port)
    }
}

impl fmt::Display for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri())
    }
}
