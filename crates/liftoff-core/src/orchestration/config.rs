//! Pipeline configuration
//!
//! Knobs for a single pipeline run: CI detection, output formatting, how
//! strict validation is, and extra diagnostics the monitor should tolerate.

use serde::{Deserialize, Serialize};

use crate::config::FileConfig;
use crate::diagnostics::{AllowList, MessagePattern};
use crate::output::OutputFormat;

/// Configuration for the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Whether running in CI (auto-detected from the CI env var)
    pub ci: bool,

    /// Output format for the build summary
    pub output_format: OutputFormat,

    /// Suppress the summary on success
    pub quiet: bool,

    /// Ask the validation runner to treat warnings as failures
    pub strict_validation: bool,

    /// Reset generated meta files before validation
    pub reset_meta_files: bool,

    /// Allow-list entries on top of the headless defaults
    pub extra_allowed: Vec<MessagePattern>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let ci = std::env::var("CI").is_ok();

        Self {
            ci,
            output_format: if ci {
                OutputFormat::from_env()
            } else {
                OutputFormat::Text
            },
            quiet: false,
            strict_validation: true,
            reset_meta_files: true,
            extra_allowed: Vec::new(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("LIFTOFF_OUTPUT_FORMAT") {
            if let Some(fmt) = OutputFormat::parse(&v) {
                config.output_format = fmt;
            }
        }

        if std::env::var("LIFTOFF_JSON").is_ok() {
            config.output_format = OutputFormat::Json;
        }

        if std::env::var("LIFTOFF_QUIET").is_ok() {
            config.quiet = true;
        }

        if let Ok(v) = std::env::var("LIFTOFF_STRICT_VALIDATION") {
            config.strict_validation = parse_bool(&v).unwrap_or(config.strict_validation);
        }

        if std::env::var("LIFTOFF_SKIP_META_RESET").is_ok() {
            config.reset_meta_files = false;
        }

        config
    }

    // Builder methods

    pub fn with_ci(mut self, ci: bool) -> Self {
        self.ci = ci;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_strict_validation(mut self, strict: bool) -> Self {
        self.strict_validation = strict;
        self
    }

    pub fn with_reset_meta_files(mut self, reset: bool) -> Self {
        self.reset_meta_files = reset;
        self
    }

    pub fn with_allowed(mut self, pattern: MessagePattern) -> Self {
        self.extra_allowed.push(pattern);
        self
    }

    /// Merge settings from a `liftoff.toml`
    pub fn with_file_config(mut self, file: &FileConfig) -> Self {
        self.extra_allowed.extend(file.diagnostics.patterns());
        self
    }

    /// Headless defaults plus any configured entries
    pub fn allow_list(&self) -> AllowList {
        let mut list = AllowList::headless();
        list.extend(self.extra_allowed.iter().cloned());
        list
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::new();
        assert!(config.strict_validation);
        assert!(config.reset_meta_files);
        assert!(!config.quiet);
        assert_eq!(config.allow_list().len(), AllowList::headless().len());
    }

    #[test]
    fn test_builder() {
        let config = PipelineConfig::new()
            .with_ci(true)
            .with_output_format(OutputFormat::Json)
            .with_strict_validation(false)
            .with_reset_meta_files(false)
            .with_allowed(MessagePattern::Contains("Curl error".into()));

        assert!(config.ci);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert!(!config.strict_validation);
        assert!(!config.reset_meta_files);
        assert!(config.allow_list().allows("Curl error 6: Couldn't resolve host"));
        assert!(config.allow_list().allows("Video shaders not found. Skipping."));
    }

    #[test]
    fn test_file_config_adds_patterns() {
        let mut file = FileConfig::default();
        file.diagnostics.ignore_prefixes.push("Shader warning".into());

        let config = PipelineConfig::new().with_file_config(&file);
        assert!(config.allow_list().allows("Shader warning in 'Hidden/Blit'"));
        assert!(!config.allow_list().allows("NullReferenceException"));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
