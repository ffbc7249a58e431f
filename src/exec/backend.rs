// src/exec/backend.rs

//! Pluggable runner abstraction.
//!
//! Workers call a `CommandRunner` instead of spawning processes directly.
//! Production code uses [`AwsCliRunner`](super::runner::AwsCliRunner);
//! tests provide an implementation that answers from a script.

use std::future::Future;
use std::pin::Pin;

use crate::errors::InvocationError;

/// Captured streams of one successful (zero exit) invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

pub type RunFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CapturedOutput, InvocationError>> + Send + 'a>>;

/// Runs the external tool scoped to one profile.
pub trait CommandRunner: Send + Sync {
    /// Invoke the tool for `target` with `argv`.
    ///
    /// Implementations are responsible for the profile selection prefix.
    /// A non-zero exit must come back as `InvocationError::NonZeroExit`.
    fn run<'a>(&'a self, target: &'a str, argv: &'a [String]) -> RunFuture<'a>;
}
