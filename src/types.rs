use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Urgency of a monitoring message, used downstream for alert routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
        };
        f.write_str(s)
    }
}

/// Category of a monitoring message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationType {
    Error,
    Warning,
    Information,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotificationType::Error => "Error",
            NotificationType::Warning => "Warning",
            NotificationType::Information => "Information",
        };
        f.write_str(s)
    }
}

/// Which relaunch payload a deployment emits.
///
/// - `Minimal`: correlation id plus the record's single `S3_Prefix`.
/// - `Analytical`: correlation id, a prefix chosen by data product, snapshot
///   type and export date.
///
/// The two shapes are never mixed within one deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadShape {
    #[default]
    Minimal,
    Analytical,
}

impl FromStr for PayloadShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minimal" => Ok(PayloadShape::Minimal),
            "analytical" => Ok(PayloadShape::Analytical),
            other => Err(format!(
                "invalid relaunch payload shape: {other} (expected \"minimal\" or \"analytical\")"
            )),
        }
    }
}

/// Log line rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line (what the function runtime ships to log search).
    #[default]
    Json,
    /// Human-readable lines for local runs.
    Text,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" | "plain" => Ok(LogFormat::Text),
            other => Err(format!(
                "invalid log format: {other} (expected \"json\" or \"text\")"
            )),
        }
    }
}
