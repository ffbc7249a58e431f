#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use aws_all::config::DEFAULT_IDENTITY_COMMAND;
use aws_all::config::DEFAULT_ACCOUNT_FIELD;
use aws_all::engine::RunPlan;
use aws_all::types::{DecodeMode, FailurePolicy};

/// Builder for `RunPlan` to simplify test setup.
pub struct RunPlanBuilder {
    plan: RunPlan,
}

impl RunPlanBuilder {
    pub fn new(command: &[&str]) -> Self {
        Self {
            plan: RunPlan {
                command: to_command(command),
                identity_command: to_command(&DEFAULT_IDENTITY_COMMAND),
                account_field: DEFAULT_ACCOUNT_FIELD.to_string(),
                known_accounts: BTreeMap::new(),
                max_concurrency: None,
                failure_policy: FailurePolicy::FailFast,
                decode: DecodeMode::Lenient,
            },
        }
    }

    pub fn collect_all(mut self) -> Self {
        self.plan.failure_policy = FailurePolicy::CollectAll;
        self
    }

    pub fn fail_fast(mut self) -> Self {
        self.plan.failure_policy = FailurePolicy::FailFast;
        self
    }

    pub fn strict_decode(mut self) -> Self {
        self.plan.decode = DecodeMode::Strict;
        self
    }

    pub fn max_concurrency(mut self, limit: usize) -> Self {
        self.plan.max_concurrency = Some(limit);
        self
    }

    pub fn known_account(mut self, profile: &str, account: u64) -> Self {
        self.plan.known_accounts.insert(profile.to_string(), account);
        self
    }

    pub fn build(self) -> RunPlan {
        self.plan
    }
}

fn to_command(args: &[&str]) -> Arc<[String]> {
    args.iter().map(|s| s.to_string()).collect()
}

/// Owned profile names from string literals.
pub fn targets(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
