// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `aws-all`.
///
/// Everything after the options is the AWS CLI command to run, verbatim:
///
/// ```text
/// AWS_ALL='^dev-' aws-all s3api list-buckets
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "aws-all",
    version,
    about = "Run one AWS CLI command against every matching profile and join the results.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a TOML config file.
    ///
    /// If omitted, `aws-all.toml` in the current directory is used when it
    /// exists.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Regex selecting profiles from `aws configure list-profiles`.
    ///
    /// Overrides the `AWS_ALL` environment variable and `[config].pattern`.
    #[arg(long, value_name = "REGEX")]
    pub pattern: Option<String>,

    /// Explicit comma-separated profile list; skips profile discovery.
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub profiles: Option<Vec<String>>,

    /// External tool to invoke (default: `aws`).
    #[arg(long, value_name = "PROGRAM")]
    pub tool: Option<String>,

    /// Maximum number of profiles processed at once (default: unbounded).
    #[arg(long, value_name = "N")]
    pub max_concurrency: Option<usize>,

    /// Run every profile to completion and report all failures together
    /// instead of aborting on the first one.
    #[arg(long)]
    pub collect_all: bool,

    /// Treat command stdout that is not a JSON object as a failure.
    #[arg(long)]
    pub strict_decode: bool,

    /// Sort the report by profile name instead of completion order.
    #[arg(long)]
    pub sort: bool,

    /// Resolve profiles and print what would run, without running it.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `AWS_ALL_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// The AWS CLI command and its arguments.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
