//! Structured output for CI/CD integration
//!
//! Renders the result of a run as human-friendly text, JSON, GitHub Actions
//! workflow commands or GitLab CI variables.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::outcome::{BuildStep, BuildSummary};

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text (default for interactive)
    #[default]
    Text,
    /// JSON (default for CI)
    Json,
    /// GitHub Actions workflow commands
    GithubActions,
    /// GitLab CI variables
    GitlabCi,
}

impl OutputFormat {
    /// Detect format from environment
    pub fn from_env() -> Self {
        if std::env::var("GITHUB_ACTIONS").is_ok() {
            Self::GithubActions
        } else if std::env::var("GITLAB_CI").is_ok() {
            Self::GitlabCi
        } else if std::env::var("CI").is_ok() {
            Self::Json
        } else {
            Self::Text
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Some(Self::Text),
            "json" => Some(Self::Json),
            "github" | "github-actions" | "gha" => Some(Self::GithubActions),
            "gitlab" | "gitlab-ci" => Some(Self::GitlabCi),
            _ => None,
        }
    }
}

/// Structured output that can be rendered in multiple formats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    /// Whether the operation succeeded
    pub success: bool,

    /// Primary message
    pub message: String,

    /// Operation that was performed
    pub operation: String,

    /// Process exit code for this result
    pub exit_code: i32,

    /// Duration in milliseconds
    pub duration_ms: Option<u64>,

    /// Build totals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildOutput>,

    /// Warnings
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Errors
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,

    /// CI output variables
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, String>,
}

impl Output {
    /// Create a success output
    pub fn success(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(true, operation, message)
    }

    /// Create a failure output
    pub fn failure(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(false, operation, message)
    }

    fn with_status(success: bool, operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
            operation: operation.into(),
            exit_code: if success { 0 } else { 1 },
            duration_ms: None,
            build: None,
            warnings: Vec::new(),
            errors: Vec::new(),
            outputs: BTreeMap::new(),
        }
    }

    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = exit_code;
        self
    }

    pub fn with_duration(mut self, ms: u64) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    pub fn with_build(mut self, summary: &BuildSummary) -> Self {
        self.build = Some(BuildOutput::from(summary));
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.errors.push(error.into());
        self
    }

    pub fn with_output(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.outputs.insert(key.into(), value.into());
        self
    }

    /// Render output in the specified format
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => self.render_text(),
            OutputFormat::Json => self.render_json(),
            OutputFormat::GithubActions => self.render_github_actions(),
            OutputFormat::GitlabCi => self.render_gitlab_ci(),
        }
    }

    /// Print output to stdout
    pub fn print(&self, format: OutputFormat) {
        print!("{}", self.render(format));
    }

    /// Print output to a writer
    pub fn write_to<W: Write>(&self, writer: &mut W, format: OutputFormat) -> std::io::Result<()> {
        write!(writer, "{}", self.render(format))
    }

    fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str("###########################\n");
        out.push_str("#      Build results      #\n");
        out.push_str("###########################\n\n");

        let status = if self.success { "✓" } else { "✗" };
        out.push_str(&format!("{} {}\n", status, self.message));

        if let Some(ms) = self.duration_ms {
            out.push_str(&format!("  Duration: {}\n", format_duration(ms)));
        }

        if let Some(ref build) = self.build {
            out.push_str(&format!("  Output:   {}\n", build.output_path));
            if let Some(ref platform) = build.platform {
                out.push_str(&format!("  Platform: {}\n", platform));
            }
            out.push_str(&format!("  Size:     {}\n", format_size(build.total_size)));
            out.push_str(&format!("  Warnings: {}\n", build.total_warnings));
            out.push_str(&format!("  Errors:   {}\n", build.total_errors));

            if !build.steps.is_empty() {
                out.push_str("\nSteps:\n");
                for step in &build.steps {
                    out.push_str(&format!(
                        "  - {} ({}, {} warnings, {} errors)\n",
                        step.name,
                        format_duration(step.duration_ms),
                        step.warnings,
                        step.errors
                    ));
                }
            }
        }

        for warning in &self.warnings {
            out.push_str(&format!("⚠ {}\n", warning));
        }

        for error in &self.errors {
            out.push_str(&format!("✗ {}\n", error));
        }

        out
    }

    fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Append step outputs to a `GITHUB_OUTPUT` file
    fn write_github_outputs(&self, path: &Path) -> std::io::Result<()> {
        let mut file = std::fs::OpenOptions::new().append(true).open(path)?;
        for (key, value) in &self.outputs {
            if value.contains('\n') {
                let delimiter = "EOF";
                writeln!(file, "{}<<{}", key, delimiter)?;
                writeln!(file, "{}", value)?;
                writeln!(file, "{}", delimiter)?;
            } else {
                writeln!(file, "{}={}", key, value)?;
            }
        }
        Ok(())
    }

    fn render_github_actions(&self) -> String {
        let mut out = String::new();

        if let Ok(output_file) = std::env::var("GITHUB_OUTPUT") {
            if let Err(e) = self.write_github_outputs(Path::new(&output_file)) {
                warn!(path = %output_file, error = %e, "failed to write GITHUB_OUTPUT");
            }
        }

        for warning in &self.warnings {
            out.push_str(&format!("::warning::{}\n", warning));
        }

        for error in &self.errors {
            out.push_str(&format!("::error::{}\n", error));
        }

        out.push_str("::group::Build results\n");
        out.push_str(&self.render_text());
        out.push_str("::endgroup::\n");

        out
    }

    fn render_gitlab_ci(&self) -> String {
        let mut out = String::new();

        let dotenv_content: String = self
            .outputs
            .iter()
            .map(|(k, v)| format!("{}={}", k.to_uppercase(), v))
            .collect::<Vec<_>>()
            .join("\n");

        if !dotenv_content.is_empty() {
            out.push_str(&format!("# GitLab CI Variables\n{}\n", dotenv_content));
        }

        out.push_str("\\e[0Ksection_start:`date +%s`:build_results[collapsed=true]\\r\\e[0KBuild results\n");
        out.push_str(&self.render_text());
        out.push_str("\\e[0Ksection_end:`date +%s`:build_results\\r\\e[0K\n");

        out
    }
}

/// Build totals for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildOutput {
    pub output_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    pub total_size: u64,
    pub total_time_ms: u64,
    pub total_errors: u32,
    pub total_warnings: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<BuildStep>,
}

impl From<&BuildSummary> for BuildOutput {
    fn from(s: &BuildSummary) -> Self {
        Self {
            output_path: s.output_path.to_string_lossy().to_string(),
            platform: s.platform.clone(),
            total_size: s.total_size,
            total_time_ms: s.total_time_ms,
            total_errors: s.total_errors,
            total_warnings: s.total_warnings,
            steps: s.steps.clone(),
        }
    }
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a duration for display
pub fn format_duration(ms: u64) -> String {
    let secs = ms / 1000;
    if secs >= 3600 {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}.{:01}s", secs, (ms % 1000) / 100)
    } else {
        format!("{}ms", ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn summary() -> BuildSummary {
        BuildSummary {
            output_path: PathBuf::from("/tmp/out/Game.x86_64"),
            total_size: 1_500_000,
            total_time_ms: 95_000,
            total_errors: 0,
            total_warnings: 2,
            platform: Some("StandaloneLinux64".into()),
            steps: vec![BuildStep {
                name: "Compile scripts".into(),
                duration_ms: 12_300,
                errors: 0,
                warnings: 2,
            }],
        }
    }

    #[test]
    fn test_output_success() {
        let output = Output::success("build", "Build succeeded")
            .with_duration(1234)
            .with_output("output_path", "/tmp/out")
            .with_warning("Content build failed");

        assert!(output.success);
        assert_eq!(output.exit_code, 0);
        assert_eq!(output.duration_ms, Some(1234));
        assert_eq!(output.outputs.get("output_path"), Some(&"/tmp/out".to_string()));
        assert_eq!(output.warnings.len(), 1);
    }

    #[test]
    fn test_write_github_outputs() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("github_output");
        std::fs::write(&path, "").unwrap();

        Output::success("build", "Build succeeded")
            .with_output("output_path", "/tmp/out")
            .with_output("notes", "line one\nline two")
            .write_github_outputs(&path)
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("output_path=/tmp/out\n"));
        assert!(written.contains("notes<<EOF\nline one\nline two\nEOF\n"));
    }

    #[test]
    fn test_write_github_outputs_reports_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = Output::success("build", "Build succeeded")
            .with_output("output_path", "/tmp/out")
            .write_github_outputs(&dir.path().join("missing").join("github_output"));
        assert!(result.is_err());
    }

    #[test]
    fn test_output_failure() {
        let output = Output::failure("build", "Build failed")
            .with_exit_code(101)
            .with_error("Compilation failed");

        assert!(!output.success);
        assert_eq!(output.exit_code, 101);
        assert_eq!(output.errors.len(), 1);
    }

    #[test]
    fn test_render_text_summary() {
        let output = Output::success("build", "Build succeeded")
            .with_duration(95_000)
            .with_build(&summary());

        let text = output.render(OutputFormat::Text);
        assert!(text.contains("Build results"));
        assert!(text.contains("Output:   /tmp/out/Game.x86_64"));
        assert!(text.contains("Size:     1.4 MB"));
        assert!(text.contains("Warnings: 2"));
        assert!(text.contains("Errors:   0"));
        assert!(text.contains("Duration: 1m 35s"));
        assert!(text.contains("Compile scripts (12.3s, 2 warnings, 0 errors)"));
    }

    #[test]
    fn test_render_json() {
        let output = Output::success("build", "Build succeeded")
            .with_build(&summary())
            .with_output("output_path", "/tmp/out/Game.x86_64");

        let json = output.render(OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["build"]["total_size"], 1_500_000);
        assert_eq!(value["outputs"]["output_path"], "/tmp/out/Game.x86_64");
    }

    #[test]
    fn test_render_gitlab_variables() {
        let output = Output::success("build", "Build succeeded").with_output("exit_code", "0");
        let rendered = output.render(OutputFormat::GitlabCi);
        assert!(rendered.contains("EXIT_CODE=0"));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1500), "1.5 KB");
        assert_eq!(format_size(1_500_000), "1.4 MB");
        assert_eq!(format_size(1_500_000_000), "1.4 GB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(450), "450ms");
        assert_eq!(format_duration(12_300), "12.3s");
        assert_eq!(format_duration(95_000), "1m 35s");
        assert_eq!(format_duration(3_725_000), "1h 2m 5s");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("github"), Some(OutputFormat::GithubActions));
        assert_eq!(OutputFormat::parse("invalid"), None);
    }
}
