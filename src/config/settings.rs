// src/config/settings.rs

//! Fully resolved runtime settings.
//!
//! Precedence, highest first: CLI flags, environment, config file,
//! built-in defaults.

use std::collections::BTreeMap;
use std::sync::Arc;

use regex::Regex;

use crate::cli::CliArgs;
use crate::config::model::ConfigFile;
use crate::config::validate::{check_max_concurrency, compile_pattern};
use crate::engine::RunPlan;
use crate::errors::Result;
use crate::types::{DecodeMode, FailurePolicy};

/// Environment variable holding the profile selection regex.
pub const PATTERN_ENV: &str = "AWS_ALL";

#[derive(Debug, Clone)]
pub struct Settings {
    pub tool: String,
    pub pattern: Option<Regex>,
    pub profiles: Option<Vec<String>>,
    pub command: Vec<String>,
    pub identity_command: Vec<String>,
    pub account_field: String,
    pub known_accounts: BTreeMap<String, u64>,
    pub max_concurrency: Option<usize>,
    pub failure_policy: FailurePolicy,
    pub decode: DecodeMode,
    pub sort_report: bool,
}

impl Settings {
    /// Layer CLI arguments and the `AWS_ALL` value over a loaded config file.
    ///
    /// `env_pattern` is passed in rather than read here so callers decide
    /// where the environment comes from.
    pub fn resolve(args: &CliArgs, env_pattern: Option<String>, file: ConfigFile) -> Result<Self> {
        let ConfigFile { config, accounts } = file;

        let pattern = match args.pattern.clone().or(env_pattern).or(config.pattern) {
            Some(p) => Some(compile_pattern(&p)?),
            None => None,
        };

        let max_concurrency = match args.max_concurrency {
            Some(n) => {
                check_max_concurrency(n, "--max-concurrency")?;
                Some(n)
            }
            None => config.max_concurrency,
        };

        let failure_policy = if args.collect_all {
            FailurePolicy::CollectAll
        } else {
            config.failure_policy
        };

        let decode = if args.strict_decode {
            DecodeMode::Strict
        } else {
            config.decode
        };

        let profiles = args.profiles.as_ref().map(|list| {
            list.iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect::<Vec<_>>()
        });

        Ok(Self {
            tool: args.tool.clone().unwrap_or(config.tool),
            pattern,
            profiles,
            command: args.command.clone(),
            identity_command: config.identity_command,
            account_field: config.account_field,
            known_accounts: accounts,
            max_concurrency,
            failure_policy,
            decode,
            sort_report: args.sort || config.sort_report,
        })
    }

    /// The engine's view of these settings.
    pub fn plan(&self) -> RunPlan {
        RunPlan {
            command: Arc::from(self.command.clone()),
            identity_command: Arc::from(self.identity_command.clone()),
            account_field: self.account_field.clone(),
            known_accounts: self.known_accounts.clone(),
            max_concurrency: self.max_concurrency,
            failure_policy: self.failure_policy,
            decode: self.decode,
        }
    }
}
