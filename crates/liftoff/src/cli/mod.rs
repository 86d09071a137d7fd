//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use liftoff_core::{exit_codes, LiftoffError};

use commands::{BuildCommand, PlanCommand};

/// Liftoff - Headless engine build runner for CI
#[derive(Debug, Parser)]
#[command(name = "liftoff")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Summary format (overrides LIFTOFF_OUTPUT_FORMAT and CI detection)
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to liftoff.toml (searched for upwards by default)
    #[arg(short, long, global = true, env = "LIFTOFF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// GitHub Actions outputs
    Github,
    /// GitLab CI dotenv variables
    Gitlab,
}

impl From<OutputFormat> for liftoff_core::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
            OutputFormat::Github => Self::GithubActions,
            OutputFormat::Gitlab => Self::GitlabCi,
        }
    }
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate the project and build a player
    Build(BuildCommand),

    /// Validate options and print the build request without building
    Plan(PlanCommand),
}

impl Cli {
    /// Console log level implied by -v/-q
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Execute the CLI command and return the process exit code
    pub fn execute(&self) -> anyhow::Result<i32> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Build(ref cmd) => cmd.execute(self),
            Commands::Plan(ref cmd) => cmd.execute(self),
        }
    }
}

/// Exit code for an error that escaped a command.
///
/// Pipeline errors keep their own code even when wrapped in context.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<LiftoffError>()
        .map(LiftoffError::exit_code)
        .unwrap_or(exit_codes::ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsString;
    use tempfile::TempDir;

    fn run_with_config(contents: &str) -> i32 {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("liftoff.toml");
        std::fs::write(&path, contents).unwrap();

        let args: Vec<OsString> = vec![
            "liftoff".into(),
            "--config".into(),
            path.into_os_string(),
            "plan".into(),
            "--".into(),
            "-buildTarget".into(),
            "WebGL".into(),
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.execute() {
            Ok(code) => code,
            Err(e) => exit_code_for(&e),
        }
    }

    #[test]
    fn test_unparsable_config_exits_with_config_error() {
        assert_eq!(
            run_with_config("[backend\ncommand = "),
            exit_codes::CONFIG_ERROR
        );
    }

    #[test]
    fn test_invalid_config_exits_with_config_error() {
        assert_eq!(
            run_with_config("[backend]\ncommand = \"\"\n"),
            exit_codes::CONFIG_ERROR
        );
    }

    #[test]
    fn test_other_errors_exit_with_general_error() {
        let err = anyhow::anyhow!("no such directory");
        assert_eq!(exit_code_for(&err), exit_codes::ERROR);
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_options_after_separator() {
        let cli = Cli::try_parse_from([
            "liftoff",
            "-vv",
            "build",
            "--",
            "-buildTarget",
            "Android",
            "-customBuildPath",
            "out/app.aab",
            "-buildVersion",
            "1.2.3",
        ])
        .unwrap();

        assert_eq!(cli.log_level(), "debug");
        let Commands::Build(cmd) = cli.command else {
            panic!("expected build command");
        };
        assert_eq!(cmd.options.len(), 6);
        assert_eq!(cmd.options[0], "-buildTarget");
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        let cli = Cli::try_parse_from(["liftoff", "-v", "-q", "plan"]).unwrap();
        assert_eq!(cli.log_level(), "error");
    }

    #[test]
    fn test_format_values() {
        let cli = Cli::try_parse_from(["liftoff", "--format", "github", "plan"]).unwrap();
        assert_eq!(
            liftoff_core::OutputFormat::from(cli.format.unwrap()),
            liftoff_core::OutputFormat::GithubActions
        );
    }
}
