// tests/failure_policy.rs

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use aws_all::engine::run_all;
use aws_all::errors::{InvocationError, RunError, Stage};
use aws_all_test_utils::builders::{targets, RunPlanBuilder};
use aws_all_test_utils::fake_runner::{FakeRunner, Scripted};
use aws_all_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

const IDENTITY: [&str; 2] = ["sts", "get-caller-identity"];

fn healthy(fake: FakeRunner, profile: &str) -> FakeRunner {
    fake.with_account(profile, "123456789012")
        .with_stdout(profile, &["s3", "ls"], r#"{"Buckets": []}"#)
}

#[tokio::test]
async fn fail_fast_aborts_run_on_single_failure() -> TestResult {
    init_tracing();

    let mut fake = FakeRunner::new()
        .with_account("broken", "123456789012")
        .with_failure("broken", &["s3", "ls"], 255, "An error occurred (AccessDenied)");
    for name in ["ok-1", "ok-2", "ok-3"] {
        fake = healthy(fake, name);
    }
    let runner = Arc::new(fake);

    let plan = RunPlanBuilder::new(&["s3", "ls"]).fail_fast().build();
    let result = with_timeout(run_all(
        runner,
        plan,
        targets(&["ok-1", "broken", "ok-2", "ok-3"]),
    ))
    .await;

    let err = match result {
        Err(err) => err,
        Ok(report) => panic!("expected the run to fail, got a report: {report:?}"),
    };

    let RunError::TargetsFailed { failures, total } = &err;
    assert_eq!(*total, 4);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].target, "broken");
    assert!(failures[0].failed_at(Stage::Command));
    assert_eq!(
        failures[0].failures[0].error,
        InvocationError::NonZeroExit {
            code: Some(255),
            stderr: "An error occurred (AccessDenied)".to_string(),
        }
    );
    assert!(err.to_string().contains("1 of 4 profiles failed"));
    Ok(())
}

#[tokio::test]
async fn fail_fast_does_not_wait_for_slow_profiles() -> TestResult {
    init_tracing();

    let fake = healthy(FakeRunner::new(), "slow")
        .with_profile_delay("slow", Duration::from_secs(30))
        .with_account("broken", "123456789012")
        .with_failure("broken", &["s3", "ls"], 1, "boom");
    let runner = Arc::new(fake);

    let plan = RunPlanBuilder::new(&["s3", "ls"]).fail_fast().build();

    // with_timeout gives up after 5 seconds; the slow profile sleeps for 30.
    let result = with_timeout(run_all(runner, plan, targets(&["slow", "broken"]))).await;

    let err = result.err().ok_or("expected failure")?;
    assert_eq!(err.failures().len(), 1);
    assert_eq!(err.failures()[0].target, "broken");
    Ok(())
}

#[tokio::test]
async fn collect_all_reports_every_failed_profile() -> TestResult {
    init_tracing();

    let fake = healthy(FakeRunner::new(), "ok")
        .with_account("bad-cmd", "123456789012")
        .with_failure("bad-cmd", &["s3", "ls"], 2, "usage error")
        .with_failure("bad-creds", &IDENTITY, 255, "Unable to locate credentials")
        .with_stdout("bad-creds", &["s3", "ls"], "{}");
    let runner = Arc::new(fake);

    let plan = RunPlanBuilder::new(&["s3", "ls"]).collect_all().build();
    let result = with_timeout(run_all(
        Arc::clone(&runner),
        plan,
        targets(&["ok", "bad-cmd", "bad-creds"]),
    ))
    .await;

    let err = result.err().ok_or("expected failure")?;
    let mut failed: Vec<_> = err.failures().iter().map(|f| f.target.clone()).collect();
    failed.sort();
    assert_eq!(failed, vec!["bad-cmd".to_string(), "bad-creds".to_string()]);

    let creds = err
        .failures()
        .iter()
        .find(|f| f.target == "bad-creds")
        .ok_or("bad-creds missing")?;
    assert!(creds.failed_at(Stage::Identity));
    assert!(!creds.failed_at(Stage::Command));

    // Every profile ran to completion.
    assert_eq!(runner.invocations().len(), 6);
    Ok(())
}

#[tokio::test]
async fn both_stages_failing_are_reported_together() -> TestResult {
    init_tracing();

    let fake = FakeRunner::new()
        .with_failure("dead", &IDENTITY, 255, "expired token")
        .with_failure("dead", &["s3", "ls"], 255, "expired token");
    let runner = Arc::new(fake);

    let plan = RunPlanBuilder::new(&["s3", "ls"]).collect_all().build();
    let err = with_timeout(run_all(runner, plan, targets(&["dead"])))
        .await
        .err()
        .ok_or("expected failure")?;

    let failure = &err.failures()[0];
    assert_eq!(failure.failures.len(), 2);
    assert!(failure.failed_at(Stage::Identity));
    assert!(failure.failed_at(Stage::Command));
    Ok(())
}

#[tokio::test]
async fn identity_failure_still_waits_for_sibling_command() -> TestResult {
    init_tracing();

    let fake = FakeRunner::new()
        .with_failure("p", &IDENTITY, 255, "no creds")
        .with_stdout("p", &["s3", "ls"], "{}")
        .with_delay(Duration::from_millis(20));
    let runner = Arc::new(fake);

    let plan = RunPlanBuilder::new(&["s3", "ls"]).build();
    let _ = with_timeout(run_all(Arc::clone(&runner), plan, targets(&["p"]))).await;

    assert_eq!(runner.invocations_for("p").len(), 2);
    Ok(())
}

#[tokio::test]
async fn panicking_worker_is_reported_not_deadlocked() -> TestResult {
    init_tracing();

    let fake = healthy(FakeRunner::new(), "ok")
        .with_account("crashy", "123456789012")
        .with_response("crashy", &["s3", "ls"], Scripted::Panic);
    let runner = Arc::new(fake);

    let plan = RunPlanBuilder::new(&["s3", "ls"]).collect_all().build();
    let err = with_timeout(run_all(runner, plan, targets(&["ok", "crashy"])))
        .await
        .err()
        .ok_or("expected failure")?;

    assert_eq!(err.failures().len(), 1);
    let failure = &err.failures()[0];
    assert_eq!(failure.target, "crashy");
    assert!(failure.failed_at(Stage::Worker));
    assert!(matches!(
        failure.failures[0].error,
        InvocationError::Crashed(_)
    ));
    Ok(())
}
