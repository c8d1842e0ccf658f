// tests/settings_loading.rs

use std::io::Write;

use emr_relauncher::config::{load_settings, EnvVars, LoggingSettings, NotifierSettings, RelaunchSettings};
use emr_relauncher::errors::RelayError;
use emr_relauncher::types::{LogFormat, PayloadShape};
use tempfile::NamedTempFile;

fn env(pairs: &[(&str, &str)]) -> EnvVars {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn file_settings_are_overridden_by_environment() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
sns_topic = "arn:aws:sns:eu-west-2:000000000000:from-file"
table_name = "data_pipeline_metadata"
steps_to_not_retry = ["collect_metrics"]
max_retry_count = 3
relaunch_payload_shape = "analytical"
log_format = "text"
"#
    )
    .unwrap();

    let raw = load_settings(
        Some(file.path()),
        &env(&[("SNS_TOPIC", "from-env"), ("MAX_RETRY_COUNT", "2")]),
    )
    .unwrap();
    let settings = RelaunchSettings::try_from(&raw).unwrap();

    assert_eq!(settings.sns_topic, "from-env");
    assert_eq!(settings.table_name, "data_pipeline_metadata");
    assert_eq!(settings.retry_policy.max_retry_count, 2);
    assert!(settings.retry_policy.enforce_max_retry);
    assert!(settings.retry_policy.steps_not_to_retry.contains("collect_metrics"));
    assert_eq!(settings.payload_shape, PayloadShape::Analytical);
    assert_eq!(LoggingSettings::try_from(&raw).unwrap().format, LogFormat::Text);
}

#[test]
fn environment_alone_is_enough() {
    let raw = load_settings(
        None,
        &env(&[
            ("SNS_TOPIC", "topic"),
            ("TABLE_NAME", "table"),
            ("STEPS_TO_NOT_RETRY", "collect_metrics, , export"),
            ("ENFORCE_MAX_RETRY", "false"),
        ]),
    )
    .unwrap();
    let settings = RelaunchSettings::try_from(&raw).unwrap();

    assert_eq!(settings.retry_policy.steps_not_to_retry.len(), 2);
    assert!(!settings.retry_policy.enforce_max_retry);
    assert_eq!(settings.payload_shape, PayloadShape::Minimal);
}

#[test]
fn notifier_defaults_apply_when_unset() {
    let raw = load_settings(None, &env(&[("SNS_TOPIC", "topic")])).unwrap();
    let settings = NotifierSettings::try_from(&raw).unwrap();

    assert!(settings.rules.is_high_priority("test/pdm_object_tagger"));
    assert!(!settings.rules.is_high_priority("test_queue"));
    for status in ["PENDING", "RUNNABLE", "STARTING"] {
        assert!(settings.rules.is_ignored(status));
    }
    assert!(!settings.rules.is_ignored("FAILED"));

    let logging = LoggingSettings::try_from(&raw).unwrap();
    assert_eq!(logging.environment, "NOT_SET");
    assert_eq!(logging.application, "emr_relauncher");
}

#[test]
fn missing_topic_is_a_config_error() {
    let raw = load_settings(None, &env(&[("TABLE_NAME", "table")])).unwrap();

    match RelaunchSettings::try_from(&raw) {
        Err(err @ RelayError::ConfigError(_)) => {
            assert!(err.to_string().contains("SNS_TOPIC"));
            assert_eq!(err.exit_code(), 2);
        }
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
    assert!(matches!(
        NotifierSettings::try_from(&raw),
        Err(RelayError::ConfigError(_))
    ));
}

#[test]
fn malformed_environment_values_are_rejected() {
    for (key, value) in [
        ("MAX_RETRY_COUNT", "many"),
        ("ENFORCE_MAX_RETRY", "perhaps"),
        ("RELAUNCH_PAYLOAD_SHAPE", "huge"),
        ("LOG_FORMAT", "xml"),
    ] {
        let result = load_settings(None, &env(&[(key, value)]));
        assert!(
            matches!(result, Err(RelayError::ConfigError(_))),
            "{key}={value} should be rejected"
        );
    }
}

#[test]
fn unknown_log_level_is_rejected_like_log_format() {
    let raw = load_settings(None, &env(&[("LOG_LEVEL", "verbose")])).unwrap();

    match LoggingSettings::try_from(&raw) {
        Err(err @ RelayError::ConfigError(_)) => {
            assert!(err.to_string().contains("LOG_LEVEL"));
            assert_eq!(err.exit_code(), 2);
        }
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn invalid_queue_pattern_is_a_config_error() {
    let raw = load_settings(
        None,
        &env(&[("SNS_TOPIC", "topic"), ("HIGH_PRIORITY_JOB_QUEUE", "([")]),
    )
    .unwrap();

    assert!(matches!(
        NotifierSettings::try_from(&raw),
        Err(RelayError::ConfigError(_))
    ));
}

#[test]
fn unknown_file_key_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "sns_topic = \"t\"\nretries = 4\n").unwrap();

    let result = load_settings(Some(file.path()), &EnvVars::new());

    match result {
        Err(RelayError::TomlError(e)) => assert!(e.to_string().contains("retries")),
        other => panic!("Expected TomlError, got: {:?}", other),
    }
}
