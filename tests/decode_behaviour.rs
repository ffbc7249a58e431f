// tests/decode_behaviour.rs

use std::error::Error;
use std::sync::Arc;

use serde_json::json;

use aws_all::engine::run_all;
use aws_all::errors::{InvocationError, Stage};
use aws_all::exec::{decode_output, parse_account};
use aws_all::types::{DecodeMode, RawResult};
use aws_all_test_utils::builders::{targets, RunPlanBuilder};
use aws_all_test_utils::fake_runner::FakeRunner;
use aws_all_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

const IDENTITY: [&str; 2] = ["sts", "get-caller-identity"];

#[tokio::test]
async fn lenient_decode_failure_yields_empty_results() -> TestResult {
    init_tracing();

    let fake = FakeRunner::new()
        .with_account("dev-a", "111111111111")
        .with_stdout("dev-a", &["s3", "ls"], "2024-01-01 10:00:00 my-bucket\n");
    let runner = Arc::new(fake);

    let plan = RunPlanBuilder::new(&["s3", "ls"]).build();
    let report = with_timeout(run_all(runner, plan, targets(&["dev-a"]))).await?;

    assert_eq!(report.len(), 1);
    assert_eq!(report[0].account_id, 111_111_111_111);
    assert!(report[0].result.is_empty());
    assert!(report[0].decode_error.is_some());
    Ok(())
}

#[tokio::test]
async fn strict_decode_failure_fails_the_profile() -> TestResult {
    init_tracing();

    let fake = FakeRunner::new()
        .with_account("dev-a", "111111111111")
        .with_stdout("dev-a", &["s3", "ls"], "not json");
    let runner = Arc::new(fake);

    let plan = RunPlanBuilder::new(&["s3", "ls"]).strict_decode().build();
    let err = with_timeout(run_all(runner, plan, targets(&["dev-a"])))
        .await
        .err()
        .ok_or("expected failure")?;

    let failure = &err.failures()[0];
    assert!(failure.failed_at(Stage::Command));
    assert!(matches!(
        failure.failures[0].error,
        InvocationError::Decode(_)
    ));
    Ok(())
}

#[tokio::test]
async fn non_numeric_account_fails_identity_stage() -> TestResult {
    init_tracing();

    let fake = FakeRunner::new()
        .with_stdout("dev-a", &IDENTITY, r#"{"Account": "not-a-number"}"#)
        .with_stdout("dev-a", &["s3", "ls"], "{}");
    let runner = Arc::new(fake);

    let plan = RunPlanBuilder::new(&["s3", "ls"]).build();
    let err = with_timeout(run_all(runner, plan, targets(&["dev-a"])))
        .await
        .err()
        .ok_or("expected failure")?;

    let failure = &err.failures()[0];
    assert!(failure.failed_at(Stage::Identity));
    assert!(matches!(
        failure.failures[0].error,
        InvocationError::Account { .. }
    ));
    Ok(())
}

#[test]
fn object_stdout_decodes_in_both_modes() -> TestResult {
    for mode in [DecodeMode::Lenient, DecodeMode::Strict] {
        let decoded = decode_output(r#"{"Vpcs": [{"VpcId": "vpc-1"}]}"#, mode)?;
        assert_eq!(decoded.result.get("Vpcs"), Some(&json!([{"VpcId": "vpc-1"}])));
        assert!(decoded.error.is_none());
    }
    Ok(())
}

#[test]
fn blank_stdout_is_an_empty_result_without_error() -> TestResult {
    for mode in [DecodeMode::Lenient, DecodeMode::Strict] {
        let decoded = decode_output("  \n", mode)?;
        assert!(decoded.result.is_empty());
        assert!(decoded.error.is_none());
    }
    Ok(())
}

#[test]
fn json_array_is_not_an_object() -> TestResult {
    let lenient = decode_output("[1, 2]", DecodeMode::Lenient)?;
    assert!(lenient.result.is_empty());
    assert_eq!(
        lenient.error.as_deref(),
        Some("expected a JSON object, got an array")
    );

    let strict = decode_output("[1, 2]", DecodeMode::Strict);
    assert!(matches!(strict, Err(InvocationError::Decode(_))));
    Ok(())
}

#[test]
fn account_accepts_digit_strings_and_integers() -> TestResult {
    let mut result = RawResult::new();
    result.insert("Account".to_string(), json!("012345678901"));
    assert_eq!(parse_account(&result, "Account")?, 12_345_678_901);

    result.insert("Account".to_string(), json!(222222222222u64));
    assert_eq!(parse_account(&result, "Account")?, 222_222_222_222);
    Ok(())
}

#[test]
fn account_rejects_missing_and_malformed_values() {
    let mut result = RawResult::new();
    assert!(matches!(
        parse_account(&result, "Account"),
        Err(InvocationError::Account { .. })
    ));

    result.insert("Account".to_string(), json!("12ab"));
    assert!(parse_account(&result, "Account").is_err());

    result.insert("Account".to_string(), json!(-5));
    assert!(parse_account(&result, "Account").is_err());

    result.insert("Account".to_string(), json!(null));
    assert!(parse_account(&result, "Account").is_err());
}
