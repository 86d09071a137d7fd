//! Wire format spoken with backend and extension processes
//!
//! One JSON request goes to the child's stdin and one JSON response comes back
//! on stdout. While validating, the child may also stream diagnostic events to
//! stderr, one JSON object per line.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use liftoff_core::DiagnosticEvent;

/// Actions a backend or extension process understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    ResetMeta,
    Validate,
    SetVersion,
    SetAndroidVersionCode,
    ApplyAndroidSettings,
    Build,
    CleanContent,
    BuildContent,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResetMeta => "reset-meta",
            Self::Validate => "validate",
            Self::SetVersion => "set-version",
            Self::SetAndroidVersionCode => "set-android-version-code",
            Self::ApplyAndroidSettings => "apply-android-settings",
            Self::Build => "build",
            Self::CleanContent => "clean-content",
            Self::BuildContent => "build-content",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request written to the child's stdin
#[derive(Debug, Serialize, Deserialize)]
pub struct BackendRequest {
    /// Action to perform
    pub action: Action,
    /// Project the action applies to
    pub project_path: PathBuf,
    /// Action-specific input
    pub input: serde_json::Value,
}

/// Response read from the child's stdout
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BackendResponse {
    /// Output data (on success)
    pub output: Option<serde_json::Value>,
    /// Error message (on failure)
    pub error: Option<String>,
}

/// Parse one stderr line as a diagnostic event.
///
/// Returns `None` for anything that is not a JSON event; such lines are plain
/// process chatter.
pub fn parse_diagnostic_line(line: &str) -> Option<DiagnosticEvent> {
    let line = line.trim();
    if !line.starts_with('{') {
        return None;
    }
    serde_json::from_str(line).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftoff_core::Severity;

    #[test]
    fn test_request_wire_format() {
        let request = BackendRequest {
            action: Action::SetAndroidVersionCode,
            project_path: PathBuf::from("/work/game"),
            input: serde_json::json!({ "versionCode": 1002003 }),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["action"], "set-android-version-code");
        assert_eq!(json["project_path"], "/work/game");
        assert_eq!(json["input"]["versionCode"], 1002003);
    }

    #[test]
    fn test_action_names_match_serde() {
        for action in [
            Action::ResetMeta,
            Action::Validate,
            Action::SetVersion,
            Action::SetAndroidVersionCode,
            Action::ApplyAndroidSettings,
            Action::Build,
            Action::CleanContent,
            Action::BuildContent,
        ] {
            let json = serde_json::to_value(action).unwrap();
            assert_eq!(json, action.as_str());
        }
    }

    #[test]
    fn test_response_with_error() {
        let response: BackendResponse =
            serde_json::from_str(r#"{"error": "project is locked"}"#).unwrap();
        assert!(response.output.is_none());
        assert_eq!(response.error.as_deref(), Some("project is locked"));
    }

    #[test]
    fn test_parse_diagnostic_line() {
        let event = parse_diagnostic_line(
            r#"{"message":"NullReferenceException","stack":"at Importer.Run()","severity":"exception"}"#,
        )
        .unwrap();
        assert_eq!(event.severity, Severity::Exception);
        assert_eq!(event.stack, "at Importer.Run()");

        let event = parse_diagnostic_line(r#"{"message":"ok","severity":"log"}"#).unwrap();
        assert!(event.stack.is_empty());
    }

    #[test]
    fn test_parse_diagnostic_line_ignores_chatter() {
        assert!(parse_diagnostic_line("Initialize engine version: 2022.3.10f1").is_none());
        assert!(parse_diagnostic_line("{not json").is_none());
        assert!(parse_diagnostic_line(r#"{"message":"x","severity":"fatal"}"#).is_none());
    }
}
