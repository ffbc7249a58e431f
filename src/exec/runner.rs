// src/exec/runner.rs

//! Production runner: one `aws --profile <name> ...` process per call.

use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::errors::InvocationError;
use crate::exec::backend::{CapturedOutput, CommandRunner, RunFuture};
use crate::exec::decode::{decode_output, DecodedOutput};
use crate::types::DecodeMode;

/// Runs the configured tool as a child process.
///
/// Children are spawned with `kill_on_drop(true)`, so aborting a worker
/// also kills its in-flight processes.
#[derive(Debug, Clone)]
pub struct AwsCliRunner {
    tool: String,
}

impl AwsCliRunner {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    async fn invoke(&self, target: &str, argv: &[String]) -> Result<CapturedOutput, InvocationError> {
        let args = profile_args(target, argv);
        debug!(profile = %target, tool = %self.tool, ?args, "starting process");

        let output = Command::new(&self.tool)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| InvocationError::Spawn {
                tool: self.tool.clone(),
                message: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        debug!(
            profile = %target,
            exit_code = ?output.status.code(),
            success = output.status.success(),
            stdout_bytes = output.stdout.len(),
            "process exited"
        );

        if !output.status.success() {
            warn!(profile = %target, ?args, stderr = %stderr.trim(), "process failed");
            return Err(InvocationError::NonZeroExit {
                code: output.status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(CapturedOutput { stdout, stderr })
    }
}

impl CommandRunner for AwsCliRunner {
    fn run<'a>(&'a self, target: &'a str, argv: &'a [String]) -> RunFuture<'a> {
        Box::pin(self.invoke(target, argv))
    }
}

/// The argument vector passed to the tool: `--profile <target>` followed by
/// `argv` verbatim.
pub fn profile_args(target: &str, argv: &[String]) -> Vec<String> {
    let mut args = Vec::with_capacity(argv.len() + 2);
    args.push("--profile".to_string());
    args.push(target.to_string());
    args.extend(argv.iter().cloned());
    args
}

/// Run one invocation and decode its stdout.
pub async fn run_decoded<R>(
    runner: &R,
    target: &str,
    argv: &[String],
    mode: DecodeMode,
) -> Result<DecodedOutput, InvocationError>
where
    R: CommandRunner + ?Sized,
{
    let captured = runner.run(target, argv).await?;
    decode_output(&captured.stdout, mode)
}
