// src/engine/worker.rs

use tracing::{debug, warn};

use crate::engine::RunPlan;
use crate::errors::{InvocationError, Stage, StageFailure, TargetFailure};
use crate::exec::{parse_account, run_decoded, CommandRunner};
use crate::types::{DecodeMode, Record, Target};

/// Process one profile.
///
/// The identity lookup and the user command run concurrently as a pair and
/// are both awaited before anything is returned; one failing does not cancel
/// the other. Every failed stage ends up in the returned `TargetFailure`.
pub async fn process_target<R>(
    runner: &R,
    target: Target,
    plan: &RunPlan,
) -> Result<Record, TargetFailure>
where
    R: CommandRunner + ?Sized,
{
    debug!(profile = %target, "worker started");

    let identity = resolve_account(runner, &target, plan);
    let command = run_decoded(runner, &target, &plan.command, plan.decode);
    let (identity, command) = tokio::join!(identity, command);

    match (identity, command) {
        (Ok(account_id), Ok(decoded)) => {
            if let Some(reason) = &decoded.error {
                warn!(
                    profile = %target,
                    reason = %reason,
                    "command output is not a JSON object; reporting empty results"
                );
            }
            debug!(profile = %target, account_id, "worker finished");
            Ok(Record {
                target,
                account_id,
                result: decoded.result,
                decode_error: decoded.error,
            })
        }
        (identity, command) => {
            let mut failures = Vec::with_capacity(2);
            if let Err(error) = identity {
                failures.push(StageFailure {
                    stage: Stage::Identity,
                    error,
                });
            }
            if let Err(error) = command {
                failures.push(StageFailure {
                    stage: Stage::Command,
                    error,
                });
            }
            Err(TargetFailure { target, failures })
        }
    }
}

async fn resolve_account<R>(
    runner: &R,
    target: &str,
    plan: &RunPlan,
) -> Result<u64, InvocationError>
where
    R: CommandRunner + ?Sized,
{
    if let Some(&account_id) = plan.known_accounts.get(target) {
        debug!(profile = %target, account_id, "using known account id");
        return Ok(account_id);
    }

    let identity = run_decoded(runner, target, &plan.identity_command, DecodeMode::Strict).await?;
    parse_account(&identity.result, &plan.account_field)
}
