// src/lib.rs

pub mod cli;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod preflight;
pub mod report;
pub mod types;

use std::sync::Arc;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{load_optional, Settings, PATTERN_ENV};
use crate::discovery::{discover_targets, explicit_targets};
use crate::errors::{AwsAllError, Result};
use crate::exec::{profile_args, AwsCliRunner, CommandRunner};
use crate::preflight::check_preconditions;
use crate::report::{emit_report, sort_report};
use crate::types::{Report, Target};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and layering
/// - startup preconditions
/// - profile discovery
/// - the fan-out/fan-in engine
/// - report emission on stdout
pub async fn run(args: CliArgs) -> Result<()> {
    let file = load_optional(args.config.as_deref())?;
    let env_pattern = std::env::var(PATTERN_ENV).ok();
    let settings = Settings::resolve(&args, env_pattern, file)?;

    check_preconditions(&settings)?;

    let targets = resolve_targets(&settings).await?;

    if args.dry_run {
        print_dry_run(&settings, &targets);
        return Ok(());
    }

    let runner = Arc::new(AwsCliRunner::new(settings.tool.clone()));
    let report = execute(runner, &settings, targets).await?;

    emit_report(std::io::stdout().lock(), &report)
}

/// Run the engine for `targets` and apply report ordering.
pub async fn execute<R>(runner: Arc<R>, settings: &Settings, targets: Vec<Target>) -> Result<Report>
where
    R: CommandRunner + 'static,
{
    let mut report = engine::run_all(runner, settings.plan(), targets).await?;
    if settings.sort_report {
        sort_report(&mut report);
    }
    Ok(report)
}

/// Explicit `--profiles` win; otherwise discover and filter by pattern.
pub async fn resolve_targets(settings: &Settings) -> Result<Vec<Target>> {
    if let Some(profiles) = settings.profiles.as_ref().filter(|p| !p.is_empty()) {
        let targets = explicit_targets(profiles);
        info!(profiles = targets.len(), "using explicit profile list");
        return Ok(targets);
    }

    let pattern = settings.pattern.as_ref().ok_or_else(|| {
        AwsAllError::Precondition(format!("\"{PATTERN_ENV}\" profile pattern is not set"))
    })?;
    discover_targets(&settings.tool, pattern).await
}

/// Dry-run output: the profiles and the exact argument vectors.
fn print_dry_run(settings: &Settings, targets: &[Target]) {
    println!("aws-all dry-run");
    println!("  tool = {}", settings.tool);
    println!("  failure_policy = {:?}", settings.failure_policy);
    match settings.max_concurrency {
        Some(n) => println!("  max_concurrency = {n}"),
        None => println!("  max_concurrency = unbounded"),
    }
    println!("  decode = {:?}", settings.decode);
    println!();

    println!("profiles ({}):", targets.len());
    for target in targets {
        println!("  - {target}");
        match settings.known_accounts.get(target) {
            Some(account) => println!("      identity: known account {account}"),
            None => println!(
                "      identity: {} {}",
                settings.tool,
                profile_args(target, &settings.identity_command).join(" ")
            ),
        }
        println!(
            "      command: {} {}",
            settings.tool,
            profile_args(target, &settings.command).join(" ")
        );
    }

    debug!("dry-run complete (no execution)");
}
