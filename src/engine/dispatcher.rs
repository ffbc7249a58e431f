// src/engine/dispatcher.rs

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::{Id, JoinSet};
use tracing::debug;

use crate::engine::worker::process_target;
use crate::engine::RunPlan;
use crate::errors::TargetFailure;
use crate::exec::CommandRunner;
use crate::types::{Record, Target};

pub type WorkerOutcome = Result<Record, TargetFailure>;

/// Workers spawned by [`Dispatcher::dispatch`], still running.
///
/// `targets` maps each task id back to its profile so a worker that panics
/// or is aborted can still be attributed.
pub struct InFlight {
    pub workers: JoinSet<WorkerOutcome>,
    pub targets: HashMap<Id, Target>,
}

impl InFlight {
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Spawns one worker per profile.
pub struct Dispatcher<R: CommandRunner + 'static> {
    runner: Arc<R>,
    plan: Arc<RunPlan>,
}

impl<R: CommandRunner + 'static> Dispatcher<R> {
    pub fn new(runner: Arc<R>, plan: Arc<RunPlan>) -> Self {
        Self { runner, plan }
    }

    /// Spawn every worker and return immediately.
    ///
    /// With `max_concurrency` set, each worker holds a semaphore permit for
    /// its whole lifetime, so at most that many profiles (and twice as many
    /// processes) are active. Without it every worker starts at once.
    pub fn dispatch(&self, targets: Vec<Target>) -> InFlight {
        let limiter = self
            .plan
            .max_concurrency
            .map(|limit| Arc::new(Semaphore::new(limit.clamp(1, Semaphore::MAX_PERMITS))));

        let mut workers = JoinSet::new();
        let mut by_id = HashMap::with_capacity(targets.len());

        for target in targets {
            let runner = Arc::clone(&self.runner);
            let plan = Arc::clone(&self.plan);
            let limiter = limiter.clone();
            let name = target.clone();

            let handle = workers.spawn(async move {
                // The semaphore is never closed, so acquiring only waits.
                let _permit = match limiter {
                    Some(sem) => sem.acquire_owned().await.ok(),
                    None => None,
                };
                process_target(runner.as_ref(), name, &plan).await
            });

            debug!(profile = %target, task_id = %handle.id(), "worker spawned");
            by_id.insert(handle.id(), target);
        }

        InFlight {
            workers,
            targets: by_id,
        }
    }
}
