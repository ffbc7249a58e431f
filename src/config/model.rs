// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::{DecodeMode, FailurePolicy};

pub const DEFAULT_TOOL: &str = "aws";
pub const DEFAULT_IDENTITY_COMMAND: [&str; 2] = ["sts", "get-caller-identity"];
pub const DEFAULT_ACCOUNT_FIELD: &str = "Account";

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// pattern = "^dev-"
/// max_concurrency = 8
/// failure_policy = "collect-all"
///
/// [accounts]
/// dev-a = "111111111111"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    /// Global behaviour from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// Known profile -> account id pairs from `[accounts]`.
    ///
    /// Profiles listed here skip the identity lookup.
    #[serde(default)]
    pub accounts: BTreeMap<String, String>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSection {
    /// Program to invoke for every call.
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Profile selection regex, used when neither `--pattern` nor `AWS_ALL`
    /// is set.
    #[serde(default)]
    pub pattern: Option<String>,

    /// Arguments (after `--profile <name>`) that print the caller identity.
    #[serde(default = "default_identity_command")]
    pub identity_command: Vec<String>,

    /// Field of the identity response holding the account id.
    #[serde(default = "default_account_field")]
    pub account_field: String,

    /// Upper bound on profiles in flight; `None` means one worker per
    /// profile, all at once.
    #[serde(default)]
    pub max_concurrency: Option<usize>,

    #[serde(default)]
    pub failure_policy: FailurePolicy,

    #[serde(default)]
    pub decode: DecodeMode,

    /// Sort the report by profile name.
    #[serde(default)]
    pub sort_report: bool,
}

fn default_tool() -> String {
    DEFAULT_TOOL.to_string()
}

fn default_identity_command() -> Vec<String> {
    DEFAULT_IDENTITY_COMMAND.iter().map(|s| s.to_string()).collect()
}

fn default_account_field() -> String {
    DEFAULT_ACCOUNT_FIELD.to_string()
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            pattern: None,
            identity_command: default_identity_command(),
            account_field: default_account_field(),
            max_concurrency: None,
            failure_policy: FailurePolicy::default(),
            decode: DecodeMode::default(),
            sort_report: false,
        }
    }
}

/// Validated configuration.
///
/// Only constructible through `TryFrom<RawConfigFile>` (see `validate.rs`)
/// or `Default`, so account ids are always parsed and the numeric limits
/// are in range.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub accounts: BTreeMap<String, u64>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, accounts: BTreeMap<String, u64>) -> Self {
        Self { config, accounts }
    }
}
