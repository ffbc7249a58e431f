// src/exec/mod.rs

//! External command execution.
//!
//! - [`backend`] provides the `CommandRunner` trait the engine talks to,
//!   so tests can swap in a scripted fake.
//! - [`runner`] is the production implementation on top of
//!   `tokio::process::Command`.
//! - [`decode`] turns captured stdout into a `RawResult` and extracts
//!   account ids.

pub mod backend;
pub mod decode;
pub mod runner;

pub use backend::{CapturedOutput, CommandRunner, RunFuture};
pub use decode::{decode_output, parse_account, DecodedOutput};
pub use runner::{profile_args, run_decoded, AwsCliRunner};
