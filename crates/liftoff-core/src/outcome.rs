//! Build outcome reported by the backend

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Final status of a build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    #[serde(alias = "success")]
    Succeeded,
    #[serde(alias = "failure")]
    Failed,
    #[serde(alias = "canceled")]
    Cancelled,
    /// Anything the backend reports that we do not recognize
    #[serde(other)]
    Unknown,
}

impl BuildStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }
}

/// Result of a build attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOutcome {
    pub status: BuildStatus,
    #[serde(default)]
    pub summary: BuildSummary,
}

impl BuildOutcome {
    pub fn new(status: BuildStatus, summary: BuildSummary) -> Self {
        Self { status, summary }
    }
}

/// Totals for a build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSummary {
    /// Where the player was written
    pub output_path: PathBuf,
    /// Total size of the output in bytes
    pub total_size: u64,
    /// Wall-clock duration reported by the backend
    pub total_time_ms: u64,
    pub total_errors: u32,
    pub total_warnings: u32,
    /// Platform the backend actually built for
    pub platform: Option<String>,
    /// Per-step breakdown, when the backend reports one
    pub steps: Vec<BuildStep>,
}

/// One step of the backend's build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildStep {
    pub name: String,
    pub duration_ms: u64,
    pub errors: u32,
    pub warnings: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_known_values() {
        let status: BuildStatus = serde_json::from_str("\"succeeded\"").unwrap();
        assert_eq!(status, BuildStatus::Succeeded);
        let status: BuildStatus = serde_json::from_str("\"canceled\"").unwrap();
        assert_eq!(status, BuildStatus::Cancelled);
    }

    #[test]
    fn test_unrecognized_status_is_unknown() {
        let status: BuildStatus = serde_json::from_str("\"exploded\"").unwrap();
        assert_eq!(status, BuildStatus::Unknown);
    }

    #[test]
    fn test_outcome_with_partial_summary() {
        let outcome: BuildOutcome = serde_json::from_str(
            r#"{"status":"failed","summary":{"output_path":"/tmp/out","total_errors":3}}"#,
        )
        .unwrap();
        assert_eq!(outcome.status, BuildStatus::Failed);
        assert_eq!(outcome.summary.output_path, PathBuf::from("/tmp/out"));
        assert_eq!(outcome.summary.total_errors, 3);
        assert!(outcome.summary.steps.is_empty());
    }

    #[test]
    fn test_outcome_without_summary() {
        let outcome: BuildOutcome = serde_json::from_str(r#"{"status":"cancelled"}"#).unwrap();
        assert_eq!(outcome.status, BuildStatus::Cancelled);
        assert_eq!(outcome.summary, BuildSummary::default());
    }
}
