//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::diagnostics::MessagePattern;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "liftoff.toml";

/// Hidden configuration file name
pub const ALT_CONFIG_FILE: &str = ".liftoff.toml";

/// Default backend executable
pub const DEFAULT_BACKEND_COMMAND: &str = "liftoff-backend";

/// Default content extension executable
pub const DEFAULT_EXTENSION_COMMAND: &str = "liftoff-content";

/// Config file names to search for, in priority order
pub fn config_file_names() -> [&'static str; 2] {
    [DEFAULT_CONFIG_FILE, ALT_CONFIG_FILE]
}

/// Contents of `liftoff.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Engine backend process
    pub backend: BackendConfig,

    /// Optional content extension
    pub extension: ExtensionConfig,

    /// Diagnostic monitor tuning
    pub diagnostics: DiagnosticsConfig,

    /// Default option values; command-line options override these
    pub options: HashMap<String, String>,
}

/// How to reach the engine backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Executable name or path
    pub command: String,

    /// Extra arguments passed before the action
    pub args: Vec<String>,

    /// Working directory for the backend process
    pub working_dir: Option<PathBuf>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_BACKEND_COMMAND.to_string(),
            args: Vec::new(),
            working_dir: None,
        }
    }
}

/// Content extension lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Executable name or path, resolved on `PATH` when relative
    pub command: String,

    /// Set to false to never run the extension even if installed
    pub enabled: bool,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_EXTENSION_COMMAND.to_string(),
            enabled: true,
        }
    }
}

/// Extra messages the diagnostic monitor should tolerate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Ignore messages starting with any of these
    pub ignore_prefixes: Vec<String>,

    /// Ignore messages containing any of these
    pub ignore_contains: Vec<String>,
}

impl DiagnosticsConfig {
    pub fn patterns(&self) -> Vec<MessagePattern> {
        self.ignore_prefixes
            .iter()
            .cloned()
            .map(MessagePattern::StartsWith)
            .chain(self.ignore_contains.iter().cloned().map(MessagePattern::Contains))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.backend.command, "liftoff-backend");
        assert_eq!(config.extension.command, "liftoff-content");
        assert!(config.extension.enabled);
        assert!(config.diagnostics.patterns().is_empty());
        assert!(config.options.is_empty());
    }

    #[test]
    fn test_parse_full_file() {
        let config: FileConfig = toml::from_str(
            r#"
[backend]
command = "/opt/engine/bin/editor-backend"
args = ["-batchmode", "-nographics"]
working_dir = "game"

[extension]
enabled = false

[diagnostics]
ignore_prefixes = ["Curl error 6"]
ignore_contains = ["is missing a fallback"]

[options]
buildVersion = "none"
androidExportType = "androidAppBundle"
"#,
        )
        .unwrap();

        assert_eq!(config.backend.args, vec!["-batchmode", "-nographics"]);
        assert_eq!(config.backend.working_dir, Some(PathBuf::from("game")));
        assert!(!config.extension.enabled);
        assert_eq!(config.extension.command, DEFAULT_EXTENSION_COMMAND);
        assert_eq!(
            config.diagnostics.patterns(),
            vec![
                MessagePattern::StartsWith("Curl error 6".into()),
                MessagePattern::Contains("is missing a fallback".into()),
            ]
        );
        assert_eq!(config.options.get("buildVersion").unwrap(), "none");
    }
}
