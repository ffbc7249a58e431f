// src/types.rs

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One execution context: an AWS CLI profile name.
pub type Target = String;

/// The user command, shared read-only by every worker.
pub type CommandSpec = Arc<[String]>;

/// Decoded stdout of one invocation.
pub type RawResult = serde_json::Map<String, serde_json::Value>;

/// The joined outcome for one profile.
///
/// Serializes as `{"Profile", "Account", "Results"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(rename = "Profile")]
    pub target: Target,

    #[serde(rename = "Account")]
    pub account_id: u64,

    #[serde(rename = "Results")]
    pub result: RawResult,

    /// Set when the command's stdout could not be decoded and `Results` was
    /// left empty (lenient decoding only).
    #[serde(skip)]
    pub decode_error: Option<String>,
}

/// Records in arrival order.
pub type Report = Vec<Record>;

/// What to do when a profile fails.
///
/// - `FailFast`: abort every outstanding worker on the first failure.
/// - `CollectAll`: let every worker finish and report all failures together.
///
/// Neither policy emits a partial report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    FailFast,
    CollectAll,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        FailurePolicy::FailFast
    }
}

/// How strictly command stdout must decode as a JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Undecodable stdout becomes an empty result and a warning.
    Lenient,
    /// Undecodable stdout fails the profile.
    Strict,
}

impl Default for DecodeMode {
    fn default() -> Self {
        DecodeMode::Lenient
    }
}
