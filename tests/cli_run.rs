// tests/cli_run.rs

use std::io::Write;

use clap::Parser;
use emr_relauncher::cli::CliArgs;
use emr_relauncher::config::EnvVars;
use emr_relauncher::errors::RelayError;
use emr_relauncher::outcome::Outcome;
use emr_relauncher::run_with_env;
use emr_relauncher_test_utils::builders::{
    cluster_event, JobEventBuilder, RecordBuilder, OTHER_JOB_QUEUE, PDM_JOB_QUEUE, SNS_TOPIC_ARN,
    TABLE_NAME,
};
use emr_relauncher_test_utils::capture::capture_logs;
use serde_json::{json, Value};
use tempfile::NamedTempFile;

fn env(extra: &[(&str, &str)]) -> EnvVars {
    let mut env: EnvVars = [("SNS_TOPIC", SNS_TOPIC_ARN), ("TABLE_NAME", TABLE_NAME), ("LOG_FORMAT", "text")]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    for (k, v) in extra {
        env.insert(k.to_string(), v.to_string());
    }
    env
}

fn json_file(value: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{value}").unwrap();
    file
}

fn path(file: &NamedTempFile) -> &str {
    file.path().to_str().unwrap()
}

fn args(argv: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("emr-relauncher").chain(argv.iter().copied())).unwrap()
}

fn published_to_topic() -> Outcome {
    Outcome::Published {
        topic: SNS_TOPIC_ARN.to_string(),
        message_id: None,
    }
}

#[tokio::test]
async fn relaunch_dry_run_uses_first_fixture_row_and_skips_stale_ones() {
    let (logs, _guard) = capture_logs();

    let event = json_file(&cluster_event("test_cluster_id"));
    let records = json_file(&json!([
        serde_json::to_value(RecordBuilder::new().correlation_id("first-row").build()).unwrap(),
        {"Correlation_Id": "stale-row", "DataProduct": "PDM", "Cluster_Id": "test_cluster_id"},
    ]));

    let outcome = run_with_env(
        args(&["--dry-run", "relaunch", "--event", path(&event), "--records", path(&records)]),
        &env(&[]),
    )
    .await
    .unwrap();

    assert_eq!(outcome, published_to_topic());
    let contents = logs.contents();
    assert!(contents.contains("first-row"), "logs: {contents}");
    assert!(contents.contains("skipping malformed pipeline metadata record"));
    assert!(contents.contains("dry-run: message not published"));
}

#[tokio::test]
async fn relaunch_with_no_matching_fixture_row_is_skipped() {
    let event = json_file(&cluster_event("other_cluster_id"));
    let records = json_file(&json!([
        serde_json::to_value(RecordBuilder::new().build()).unwrap()
    ]));

    let outcome = run_with_env(
        args(&["--dry-run", "relaunch", "--event", path(&event), "--records", path(&records)]),
        &env(&[]),
    )
    .await
    .unwrap();

    assert_eq!(
        outcome,
        Outcome::SkippedNoRecord {
            cluster_id: "other_cluster_id".to_string()
        }
    );
}

#[tokio::test]
async fn malformed_first_fixture_row_exits_with_validation_code() {
    let event = json_file(&cluster_event("test_cluster_id"));
    let records = json_file(&json!([
        {"Correlation_Id": "stale-row", "DataProduct": "PDM", "Cluster_Id": "test_cluster_id"},
        serde_json::to_value(RecordBuilder::new().build()).unwrap(),
    ]));

    let err = run_with_env(
        args(&["--dry-run", "relaunch", "--event", path(&event), "--records", path(&records)]),
        &env(&[]),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, RelayError::ValidationFailed(_)));
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn notify_dry_run_publishes_failed_job() {
    let event = json_file(&JobEventBuilder::new("FAILED", PDM_JOB_QUEUE).build());

    let outcome = run_with_env(args(&["--dry-run", "notify", "--event", path(&event)]), &env(&[]))
        .await
        .unwrap();

    assert_eq!(outcome, published_to_topic());
}

#[tokio::test]
async fn notify_ignored_status_completes_normally() {
    let event = json_file(&JobEventBuilder::new("RUNNABLE", OTHER_JOB_QUEUE).build());

    let outcome = run_with_env(args(&["--dry-run", "notify", "--event", path(&event)]), &env(&[]))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Ignored {
            status: "RUNNABLE".to_string()
        }
    );
}

#[tokio::test]
async fn unreadable_event_json_exits_with_validation_code() {
    let mut event = NamedTempFile::new().unwrap();
    write!(event, "{{not json").unwrap();

    let err = run_with_env(args(&["--dry-run", "notify", "--event", path(&event)]), &env(&[]))
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::ValidationFailed(_)));
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn job_event_missing_queue_exits_with_validation_code() {
    let event = json_file(&JobEventBuilder::new("FAILED", PDM_JOB_QUEUE).without("jobQueue").build());

    let err = run_with_env(args(&["--dry-run", "notify", "--event", path(&event)]), &env(&[]))
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn bad_environment_value_is_logged_and_exits_with_config_code() {
    let (logs, _guard) = capture_logs();
    let event = json_file(&JobEventBuilder::new("FAILED", PDM_JOB_QUEUE).build());

    let err = run_with_env(
        args(&["--dry-run", "notify", "--event", path(&event)]),
        &env(&[("MAX_RETRY_COUNT", "many")]),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, RelayError::ConfigError(_)));
    assert_eq!(err.exit_code(), 2);
    let contents = logs.contents();
    assert!(contents.contains("invocation cannot start"), "logs: {contents}");
    assert!(contents.contains("MAX_RETRY_COUNT"));
}

#[tokio::test]
async fn unknown_log_level_is_logged_and_exits_with_config_code() {
    let (logs, _guard) = capture_logs();
    let event = json_file(&JobEventBuilder::new("FAILED", PDM_JOB_QUEUE).build());

    let err = run_with_env(
        args(&["--dry-run", "notify", "--event", path(&event)]),
        &env(&[("LOG_LEVEL", "verbose")]),
    )
    .await
    .unwrap_err();

    assert_eq!(err.exit_code(), 2);
    assert!(logs.contents().contains("LOG_LEVEL"));
}

#[tokio::test]
async fn missing_topic_exits_with_config_code() {
    let event = json_file(&cluster_event("test_cluster_id"));
    let mut env = env(&[]);
    env.remove("SNS_TOPIC");

    let err = run_with_env(args(&["--dry-run", "relaunch", "--event", path(&event)]), &env)
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::ConfigError(_)));
    assert_eq!(err.exit_code(), 2);
}
