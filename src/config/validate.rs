// src/config/validate.rs

use std::collections::BTreeMap;

use regex::Regex;
use tokio::sync::Semaphore;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{AwsAllError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = AwsAllError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_global_config(&raw)?;
        let accounts = parse_accounts(&raw.accounts)?;
        Ok(ConfigFile::new_unchecked(raw.config, accounts))
    }
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    let section = &cfg.config;

    if section.tool.trim().is_empty() {
        return Err(AwsAllError::Config(
            "[config].tool must not be empty".to_string(),
        ));
    }

    if section.identity_command.is_empty() {
        return Err(AwsAllError::Config(
            "[config].identity_command must contain at least one argument".to_string(),
        ));
    }

    if section.account_field.is_empty() {
        return Err(AwsAllError::Config(
            "[config].account_field must not be empty".to_string(),
        ));
    }

    if let Some(limit) = section.max_concurrency {
        check_max_concurrency(limit, "[config].max_concurrency")?;
    }

    if let Some(pattern) = &section.pattern {
        compile_pattern(pattern)?;
    }

    Ok(())
}

fn parse_accounts(raw: &BTreeMap<String, String>) -> Result<BTreeMap<String, u64>> {
    let mut accounts = BTreeMap::new();
    for (profile, id) in raw.iter() {
        let account = parse_account_id(id).ok_or_else(|| {
            AwsAllError::Config(format!(
                "[accounts].{profile} must be a numeric account id (got '{id}')"
            ))
        })?;
        accounts.insert(profile.clone(), account);
    }
    Ok(accounts)
}

/// Parse an account id made only of ASCII digits.
pub fn parse_account_id(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// A concurrency limit must be at least 1 and fit a semaphore.
pub fn check_max_concurrency(limit: usize, source: &str) -> Result<()> {
    if limit == 0 {
        return Err(AwsAllError::Config(format!("{source} must be >= 1 (got 0)")));
    }
    if limit > Semaphore::MAX_PERMITS {
        return Err(AwsAllError::Config(format!(
            "{source} must be <= {} (got {limit})",
            Semaphore::MAX_PERMITS
        )));
    }
    Ok(())
}

/// Compile a profile selection pattern, mapping regex errors to config errors.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| AwsAllError::Config(format!("invalid profile pattern '{pattern}': {e}")))
}
