use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hdfs_core::ToolRegistry;
use hdfs_mcp::HdfsMcpServer;
use hdfs_tools::{create_hdfs_tools, HdfsContext, QualificationStrategy};

mod config;

use config::{Config, Overrides};

/// Log level for tracing output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Most verbose
    Trace,
    /// Built commands, client stderr, and per-call results
    Debug,
    /// Startup, shutdown, and one line per executed command
    Info,
    /// Only warnings and errors
    Warn,
    /// Only errors
    Error,
}

impl LogLevel {
    fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Parser)]
#[command(name = "hdfs-mcp")]
#[command(author, version, about = "MCP server for HDFS administration", long_about = None)]
pub struct Cli {
    /// Configuration file (default: ~/.config/hdfs-mcp/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// NameNode host (overrides config and HDFS_NAMENODE)
    #[arg(long, global = true)]
    pub namenode: Option<String>,

    /// NameNode RPC port (overrides config and HDFS_PORT)
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Hadoop client executable
    #[arg(long, global = true)]
    pub client: Option<String>,

    /// Per-command timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// How commands are pointed at the NameNode (property-injection, path-rewrite)
    #[arg(long, global = true)]
    pub strategy: Option<QualificationStrategy>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_enum, default_value = "info", global = true)]
    pub log_level: LogLevel,

    /// Enable debug logging (shorthand for --log-level debug)
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Write logs to file (JSON-lines format) instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            namenode: self.namenode.clone(),
            port: self.port,
            client: self.client.clone(),
            timeout_secs: self.timeout,
            strategy: self.strategy,
        }
    }
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Serve the HDFS tools over MCP on stdio (default)
    Serve,
    /// Show the resolved configuration
    Config,
    /// Print the tool definitions as JSON
    Tools,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        LogLevel::Debug
    } else {
        cli.log_level
    };
    init_logging(log_level, cli.log_file.as_ref())?;

    let config = Config::load(cli.config.as_deref(), &cli.overrides())?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&config).await,
        Commands::Config => show_config(&config),
        Commands::Tools => list_tools(&config),
    }
}

/// Logs never go to stdout: it carries the MCP transport.
fn init_logging(level: LogLevel, log_file: Option<&PathBuf>) -> Result<()> {
    let filter = EnvFilter::new(level.as_filter());

    if let Some(log_path) = log_file {
        let file = std::fs::File::create(log_path)
            .with_context(|| format!("Failed to create log file: {:?}", log_path))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::sync::Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}

fn build_tools_registry(config: &Config) -> ToolRegistry {
    let ctx = Arc::new(HdfsContext::new(config.hdfs_config()));
    let mut registry = ToolRegistry::new();
    registry.register_all(create_hdfs_tools(ctx));
    registry
}

async fn serve(config: &Config) -> Result<()> {
    check_environment();

    let registry = build_tools_registry(config);
    info!(
        endpoint = %config.hdfs_config().endpoint,
        client = %config.server.client,
        strategy = %config.server.strategy,
        tools = registry.len(),
        "HDFS MCP server configured"
    );

    HdfsMcpServer::new(registry)
        .serve_stdio()
        .await
        .context("MCP server failed")
}

/// Warn, without failing, when the Hadoop client is probably not installed.
fn check_environment() {
    let hadoop_home = std::env::var_os("HADOOP_HOME");
    let path = std::env::var("PATH").unwrap_or_default();

    if hadoop_home.is_none() || !path.contains("hdfs") {
        warn!(
            hadoop_home_set = hadoop_home.is_some(),
            "HADOOP_HOME or the hdfs command may not be configured in the environment"
        );
    }
}

fn show_config(config: &Config) -> Result<()> {
    let hdfs = config.hdfs_config();
    println!("Configuration:");
    println!("  HDFS URI: {}", hdfs.endpoint.uri());
    println!("  Client: {}", hdfs.client);
    println!("  Timeout: {} seconds", hdfs.timeout.as_secs());
    println!("  Qualification: {}", hdfs.strategy);

    let path = Config::config_path()?;
    let status = if path.exists() { "" } else { " (not found)" };
    println!("\nDefault config file: {}{}", path.display(), status);

    println!("\n{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn list_tools(config: &Config) -> Result<()> {
    let registry = build_tools_registry(config);
    println!("{}", serde_json::to_string_pretty(&registry.definitions())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::try_parse_from(["hdfs-mcp"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level, LogLevel::Info);
        assert!(cli.overrides().namenode.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "hdfs-mcp",
            "config",
            "--namenode",
            "nn1",
            "--port",
            "8020",
            "--strategy",
            "path-rewrite",
        ])
        .unwrap();
        assert_eq!(cli.command, Some(Commands::Config));

        let overrides = cli.overrides();
        assert_eq!(overrides.namenode.as_deref(), Some("nn1"));
        assert_eq!(overrides.port, Some(8020));
        assert_eq!(overrides.strategy, Some(QualificationStrategy::PathRewrite));
    }

    #[test]
    fn test_rejects_unknown_strategy() {
        assert!(Cli::try_parse_from(["hdfs-mcp", "--strategy", "webhdfs"]).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_port() {
        assert!(Cli::try_parse_from(["hdfs-mcp", "--port", "70000"]).is_err());
    }

    #[test]
    fn test_registry_has_every_tool() {
        let registry = build_tools_registry(&Config::default());
        assert_eq!(registry.len(), 13);
        assert!(registry.get("test_hdfs_connection").is_some());
    }
}
