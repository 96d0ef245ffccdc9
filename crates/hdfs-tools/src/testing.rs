//! Test utilities shared across the workspace.
//! Only compiled when running tests or with the `testing` feature.

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use crate::context::{HdfsConfig, HdfsContext};
use crate::endpoint::EndpointConfig;

const CALL_SEPARATOR: &str = "--end-of-call--";

/// A stand-in for the `hdfs` executable.
///
/// Writes a shell script into a temporary directory that records its
/// arguments and replies with canned stdout, stderr, and exit code.
pub struct FakeClient {
    dir: TempDir,
    script: PathBuf,
}

impl FakeClient {
    pub fn new(stdout: &str, stderr: &str, exit_code: i32) -> Self {
        let dir = tempfile::tempdir().expect("create fake client dir");
        let root = dir.path();
        std::fs::write(root.join("stdout"), stdout).expect("write fake stdout");
        std::fs::write(root.join("stderr"), stderr).expect("write fake stderr");

        let script = root.join("hdfs");
        let body = format!(
            "#!/bin/sh\n\
             {{ for arg in \"$@\"; do printf '%s\\n' \"$arg\"; done; printf '%s\\n' '{sep}'; }} >> '{root}/calls'\n\
             cat '{root}/stdout'\n\
             cat '{root}/stderr' >&2\n\
             exit {code}\n",
            sep = CALL_SEPARATOR,
            root = root.display(),
            code = exit_code,
        );
        std::fs::write(&script, body).expect("write fake client script");
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
            .expect("make fake client executable");

        Self { dir, script }
    }

    pub fn succeeding(stdout: &str) -> Self {
        Self::new(stdout, "", 0)
    }

    pub fn failing(exit_code: i32, stderr: &str) -> Self {
        Self::new("", stderr, exit_code)
    }

    /// Path to use as the client executable.
    pub fn client(&self) -> String {
        self.script.display().to_string()
    }

    pub fn config(&self, endpoint: EndpointConfig) -> HdfsConfig {
        HdfsConfig::new(endpoint).with_client(self.client())
    }

    pub fn context(&self, endpoint: EndpointConfig) -> Arc<HdfsContext> {
        Arc::new(HdfsContext::new(self.config(endpoint)))
    }

    /// Arguments of every invocation so far, excluding the executable itself.
    pub fn calls(&self) -> Vec<Vec<String>> {
        let Ok(log) = std::fs::read_to_string(self.dir.path().join("calls")) else {
            return Vec::new();
        };
        let mut calls = Vec::new();
        let mut current = Vec::new();
        for line in log.lines() {
            if line == CALL_SEPARATOR {
                calls.push(std::mem::take(&mut current));
            } else {
                current.push(line.to_string());
            }
        }
        calls
    }

    pub fn last_call(&self) -> Option<Vec<String>> {
        self.calls().pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandSpec;

    #[tokio::test]
    async fn test_fake_client_records_calls() {
        let fake = FakeClient::succeeding("found 2 items");
        let ctx = fake.context(EndpointConfig::new("nn1", 8020));

        let output = ctx.run(&CommandSpec::dfs(["-ls", "/data"])).await.unwrap();
        assert_eq!(output.stdout, "found 2 items");
        assert_eq!(
            fake.last_call().unwrap(),
            vec!["dfs", "-D", "fs.defaultFS=hdfs://nn1:8020", "-ls", "/data"]
        );
        assert_eq!(fake.calls().len(), 1);
    }

    #[test]
    fn test_no_calls_yet() {
        let fake = FakeClient::succeeding("");
        assert!(fake.calls().is_empty());
        assert!(fake.last_call().is_none());
    }
}
