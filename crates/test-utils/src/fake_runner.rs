use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use aws_all::config::DEFAULT_IDENTITY_COMMAND;
use aws_all::errors::InvocationError;
use aws_all::exec::{CapturedOutput, CommandRunner, RunFuture};

/// How the fake answers one `(profile, argv)` call.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Exit 0 with this stdout.
    Stdout(String),
    /// Exit non-zero with this stderr.
    Fail { code: i32, stderr: String },
    /// Panic inside the call.
    Panic,
}

/// A fake `CommandRunner` that:
/// - answers from a per-`(profile, argv)` script
/// - fails unscripted calls with exit code 254
/// - records every call and the peak number of concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    script: HashMap<(String, Vec<String>), Scripted>,
    delay: Duration,
    delays: HashMap<String, Duration>,
    invocations: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    active: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the default identity call for `profile`.
    pub fn with_account(self, profile: &str, account: &str) -> Self {
        let stdout = format!(
            r#"{{"UserId": "AIDEXAMPLE", "Account": "{account}", "Arn": "arn:aws:iam::{account}:user/{profile}"}}"#
        );
        self.with_response(profile, &DEFAULT_IDENTITY_COMMAND, Scripted::Stdout(stdout))
    }

    pub fn with_stdout(self, profile: &str, argv: &[&str], stdout: &str) -> Self {
        self.with_response(profile, argv, Scripted::Stdout(stdout.to_string()))
    }

    pub fn with_failure(self, profile: &str, argv: &[&str], code: i32, stderr: &str) -> Self {
        self.with_response(
            profile,
            argv,
            Scripted::Fail {
                code,
                stderr: stderr.to_string(),
            },
        )
    }

    pub fn with_response(mut self, profile: &str, argv: &[&str], response: Scripted) -> Self {
        self.script.insert(key(profile, argv), response);
        self
    }

    /// Sleep this long in every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sleep this long in every call for one profile (overrides `with_delay`).
    pub fn with_profile_delay(mut self, profile: &str, delay: Duration) -> Self {
        self.delays.insert(profile.to_string(), delay);
        self
    }

    pub fn invocations(&self) -> Vec<(String, Vec<String>)> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn invocations_for(&self, profile: &str) -> Vec<Vec<String>> {
        self.invocations()
            .into_iter()
            .filter(|(p, _)| p == profile)
            .map(|(_, argv)| argv)
            .collect()
    }

    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

fn key(profile: &str, argv: &[&str]) -> (String, Vec<String>) {
    (
        profile.to_string(),
        argv.iter().map(|s| s.to_string()).collect(),
    )
}

/// Decrements the active-call gauge even if the call is aborted mid-sleep.
struct ActiveGuard(Arc<AtomicUsize>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl CommandRunner for FakeRunner {
    fn run<'a>(&'a self, target: &'a str, argv: &'a [String]) -> RunFuture<'a> {
        Box::pin(async move {
            self.invocations
                .lock()
                .unwrap()
                .push((target.to_string(), argv.to_vec()));

            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            let _guard = ActiveGuard(Arc::clone(&self.active));

            let delay = self.delays.get(target).copied().unwrap_or(self.delay);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let response = self
                .script
                .get(&(target.to_string(), argv.to_vec()))
                .cloned();

            match response {
                Some(Scripted::Stdout(stdout)) => Ok(CapturedOutput {
                    stdout,
                    stderr: String::new(),
                }),
                Some(Scripted::Fail { code, stderr }) => Err(InvocationError::NonZeroExit {
                    code: Some(code),
                    stderr,
                }),
                Some(Scripted::Panic) => panic!("scripted panic for profile {target}"),
                None => Err(InvocationError::NonZeroExit {
                    code: Some(254),
                    stderr: format!("unscripted call: {target} {argv:?}"),
                }),
            }
        })
    }
}
