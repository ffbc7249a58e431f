// src/engine/mod.rs

//! Fan-out/fan-in engine.
//!
//! - [`worker`] joins the identity lookup and the user command for one
//!   profile into a single `Record`.
//! - [`dispatcher`] spawns one worker per profile into a `JoinSet`,
//!   optionally bounded by a semaphore.
//! - [`collector`] drains the `JoinSet` into a `Report`, applying the
//!   failure policy.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use crate::errors::RunError;
use crate::exec::CommandRunner;
use crate::types::{CommandSpec, DecodeMode, FailurePolicy, Report, Target};

pub mod collector;
pub mod dispatcher;
pub mod worker;

pub use collector::Collector;
pub use dispatcher::{Dispatcher, InFlight};
pub use worker::process_target;

/// Everything a worker needs, shared read-only across all of them.
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// The user command.
    pub command: CommandSpec,
    /// Arguments that print the caller identity.
    pub identity_command: CommandSpec,
    /// Identity response field holding the account id.
    pub account_field: String,
    /// Profiles whose account id is already known.
    pub known_accounts: BTreeMap<Target, u64>,
    pub max_concurrency: Option<usize>,
    pub failure_policy: FailurePolicy,
    pub decode: DecodeMode,
}

/// Run `plan` against every target and join the records.
///
/// Returns once every worker has finished (or, under fail-fast, once the
/// first failure has been observed and the rest aborted).
pub async fn run_all<R>(
    runner: Arc<R>,
    plan: RunPlan,
    targets: Vec<Target>,
) -> Result<Report, RunError>
where
    R: CommandRunner + 'static,
{
    info!(
        profiles = targets.len(),
        command = ?plan.command,
        policy = ?plan.failure_policy,
        max_concurrency = ?plan.max_concurrency,
        "dispatching"
    );

    let policy = plan.failure_policy;
    let dispatcher = Dispatcher::new(runner, Arc::new(plan));
    let in_flight = dispatcher.dispatch(targets);
    Collector::new(policy).collect(in_flight).await
}
