// src/errors.rs

//! Crate-wide error types.
//!
//! - [`AwsAllError`] is what `run` returns to `main`.
//! - [`InvocationError`] describes one failed external call.
//! - [`TargetFailure`] groups every failed stage of one profile.
//! - [`RunError`] is the run-level outcome when any profile failed.

use std::fmt;

use thiserror::Error;

use crate::types::Target;

#[derive(Error, Debug)]
pub enum AwsAllError {
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Profile discovery failed: {0}")]
    Discovery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AwsAllError>;

/// Failure of a single external tool invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvocationError {
    #[error("could not launch `{tool}`: {message}")]
    Spawn { tool: String, message: String },

    #[error("exited with {}: {stderr}", describe_code(.code))]
    NonZeroExit { code: Option<i32>, stderr: String },

    #[error("stdout is not a JSON object: {0}")]
    Decode(String),

    #[error("identity response has no usable `{field}` value: {detail}")]
    Account { field: String, detail: String },

    #[error("worker crashed: {0}")]
    Crashed(String),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (killed by signal)".to_string(),
    }
}

/// Which half of a profile's work failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The account lookup (`sts get-caller-identity` by default).
    Identity,
    /// The user-supplied command.
    Command,
    /// The worker task itself (panic or abort).
    Worker,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Identity => f.write_str("identity"),
            Stage::Command => f.write_str("command"),
            Stage::Worker => f.write_str("worker"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFailure {
    pub stage: Stage,
    pub error: InvocationError,
}

/// Every failure recorded for one profile.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("profile '{target}': {}", join_stages(.failures))]
pub struct TargetFailure {
    pub target: Target,
    pub failures: Vec<StageFailure>,
}

impl TargetFailure {
    pub fn new(target: impl Into<Target>, stage: Stage, error: InvocationError) -> Self {
        Self {
            target: target.into(),
            failures: vec![StageFailure { stage, error }],
        }
    }

    /// True if any stage failed with the given stage tag.
    pub fn failed_at(&self, stage: Stage) -> bool {
        self.failures.iter().any(|f| f.stage == stage)
    }
}

fn join_stages(failures: &[StageFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} {}", f.stage, f.error))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Run-level outcome when at least one profile failed. No report is emitted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error("{}", summarize(.failures, .total))]
    TargetsFailed {
        failures: Vec<TargetFailure>,
        total: usize,
    },
}

impl RunError {
    pub fn failures(&self) -> &[TargetFailure] {
        match self {
            RunError::TargetsFailed { failures, .. } => failures,
        }
    }
}

fn summarize(failures: &[TargetFailure], total: &usize) -> String {
    let mut out = format!("{} of {total} profiles failed:", failures.len());
    for failure in failures {
        out.push_str("\n  - ");
        out.push_str(&failure.to_string());
    }
    out
}
