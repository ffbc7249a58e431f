// src/discovery.rs

//! Profile discovery: `aws configure list-profiles` filtered by a regex.

use std::collections::HashSet;
use std::process::Stdio;

use regex::Regex;
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{AwsAllError, Result};
use crate::types::Target;

const LIST_PROFILES: [&str; 2] = ["configure", "list-profiles"];

/// List the tool's configured profiles and keep those matching `pattern`.
pub async fn discover_targets(tool: &str, pattern: &Regex) -> Result<Vec<Target>> {
    debug!(tool, args = ?LIST_PROFILES, "listing profiles");

    let output = Command::new(tool)
        .args(LIST_PROFILES)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| AwsAllError::Discovery(format!("could not run `{tool}`: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AwsAllError::Discovery(format!(
            "`{tool} {}` exited with {:?}: {}",
            LIST_PROFILES.join(" "),
            output.status.code(),
            stderr.trim()
        )));
    }

    let listing = String::from_utf8_lossy(&output.stdout);
    let targets = filter_targets(&listing, pattern);
    info!(
        matched = targets.len(),
        pattern = %pattern,
        "profiles selected"
    );
    Ok(targets)
}

/// Keep non-empty lines of `listing` that match `pattern` anywhere.
///
/// Order is preserved and duplicates are dropped.
pub fn filter_targets(listing: &str, pattern: &Regex) -> Vec<Target> {
    dedupe(
        listing
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && pattern.is_match(line)),
    )
}

/// An explicit profile list, trimmed and de-duplicated.
pub fn explicit_targets(profiles: &[String]) -> Vec<Target> {
    dedupe(
        profiles
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty()),
    )
}

fn dedupe<'a>(names: impl Iterator<Item = &'a str>) -> Vec<Target> {
    let mut seen = HashSet::new();
    names
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}
