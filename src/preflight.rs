// src/preflight.rs

//! Startup preconditions, checked before any worker is spawned.

use crate::config::{Settings, PATTERN_ENV};
use crate::errors::{AwsAllError, Result};

/// Check that the run can start at all:
/// - the tool resolves on `PATH` (or is an existing path),
/// - a command was given,
/// - profiles can be selected (`--profiles`, or a pattern from `--pattern`,
///   `AWS_ALL` or the config file).
pub fn check_preconditions(settings: &Settings) -> Result<()> {
    if !command_exists(&settings.tool) {
        return Err(AwsAllError::Precondition(format!(
            "`{}` not found - the AWS CLI must be installed and on PATH",
            settings.tool
        )));
    }

    if settings.command.is_empty() {
        return Err(AwsAllError::Precondition(
            "no command provided - I need to know what to run".to_string(),
        ));
    }

    let has_profiles = settings.profiles.as_ref().is_some_and(|p| !p.is_empty());
    if settings.pattern.is_none() && !has_profiles {
        return Err(AwsAllError::Precondition(format!(
            "\"{PATTERN_ENV}\" environment variable (or --pattern / [config].pattern) must be set \
             so I know which profiles to run against"
        )));
    }

    Ok(())
}

/// Check if a command exists in PATH.
pub fn command_exists(command: &str) -> bool {
    which::which(command).is_ok()
}
