// src/engine/collector.rs

use tokio::task::JoinError;
use tracing::{debug, error, info};

use crate::engine::dispatcher::InFlight;
use crate::errors::{InvocationError, RunError, Stage, TargetFailure};
use crate::types::{FailurePolicy, Report};

/// Drains worker outcomes into a report.
#[derive(Debug, Clone, Copy)]
pub struct Collector {
    policy: FailurePolicy,
}

impl Collector {
    pub fn new(policy: FailurePolicy) -> Self {
        Self { policy }
    }

    /// Wait for workers in completion order.
    ///
    /// Records are appended as they arrive. Every spawned worker yields
    /// exactly one outcome (a panic becomes a `Stage::Worker` failure), so
    /// the loop always terminates.
    ///
    /// Under `FailFast` the first failure aborts and reaps the remaining
    /// workers before returning.
    pub async fn collect(self, mut in_flight: InFlight) -> Result<Report, RunError> {
        let total = in_flight.len();
        let mut report = Report::with_capacity(total);
        let mut failures = Vec::new();

        while let Some(joined) = in_flight.workers.join_next_with_id().await {
            let outcome = match joined {
                Ok((_id, outcome)) => outcome,
                Err(join_err) => Err(crashed(&in_flight, join_err)),
            };

            match outcome {
                Ok(record) => {
                    debug!(
                        profile = %record.target,
                        received = report.len() + 1,
                        total,
                        "record received"
                    );
                    report.push(record);
                }
                Err(failure) => {
                    error!(profile = %failure.target, error = %failure, "profile failed");
                    failures.push(failure);

                    if self.policy == FailurePolicy::FailFast {
                        let outstanding = in_flight.workers.len();
                        if outstanding > 0 {
                            info!(outstanding, "fail-fast: aborting remaining workers");
                        }
                        in_flight.workers.shutdown().await;
                        break;
                    }
                }
            }
        }

        if failures.is_empty() {
            info!(records = report.len(), "all profiles succeeded");
            Ok(report)
        } else {
            Err(RunError::TargetsFailed { failures, total })
        }
    }
}

fn crashed(in_flight: &InFlight, err: JoinError) -> TargetFailure {
    let target = in_flight
        .targets
        .get(&err.id())
        .cloned()
        .unwrap_or_else(|| "<unknown>".to_string());
    TargetFailure::new(target, Stage::Worker, InvocationError::Crashed(err.to_string()))
}
