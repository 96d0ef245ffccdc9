use thiserror::Error;

/// Errors that stop a tool call before it produces output.
///
/// Failures of the HDFS command itself are not errors at this level; they
/// come back as an error [`ToolOutput`](crate::ToolOutput).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl Error {
    pub fn invalid_arguments(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_arguments("read_hdfs_file", "missing field `file_path`");
        assert_eq!(
            err.to_string(),
            "Invalid arguments for read_hdfs_file: missing field `file_path`"
        );
        assert_eq!(
            Error::UnknownTool("format_namenode".into()).to_string(),
            "Unknown tool: format_namenode"
        );
    }
}
