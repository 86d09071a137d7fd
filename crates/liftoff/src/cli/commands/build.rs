//! Build command - Validate the project and build a player

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use liftoff_core::{OutputFormat, PipelineOutcome};

use super::Session;
use crate::cli::{output, Cli};

/// Validate the project and build a player
#[derive(Debug, Args)]
pub struct BuildCommand {
    /// Project directory (overridden by -projectPath)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Skip resetting generated meta files before validation
    #[arg(long)]
    pub skip_meta_reset: bool,

    /// Do not treat validation warnings as failures
    #[arg(long)]
    pub lenient: bool,

    /// Build options in `-name value` form, after `--`
    #[arg(last = true, allow_hyphen_values = true)]
    pub options: Vec<String>,
}

impl BuildCommand {
    /// Execute the build command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        info!(option_count = self.options.len(), "executing build command");
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<i32> {
        let mut session = Session::prepare(cli, &self.options, self.project.as_deref())?;
        if self.skip_meta_reset {
            session.config.reset_meta_files = false;
        }
        if self.lenient {
            session.config.strict_validation = false;
        }

        let text = session.config.output_format == OutputFormat::Text && !cli.quiet;

        if text {
            eprintln!();
            eprintln!("{}", style("Building project...").bold());
            eprintln!(
                "{}",
                output::key_value("Project", &session.project_path.display().to_string())
            );
            for (key, value) in session.options.redacted() {
                eprintln!("{}", output::key_value(&key, &value));
            }
            eprintln!();
        }

        let outcome = session
            .orchestrator()
            .run_with_output(session.options.clone())
            .await;
        let exit_code = outcome.exit_code();

        match &outcome {
            PipelineOutcome::Completed { output: summary, .. } => {
                if text {
                    for warning in &summary.warnings {
                        output::warning(warning);
                    }
                    if summary.success {
                        output::success("Build completed successfully!");
                    } else {
                        output::error(&summary.message);
                    }
                }
            }
            PipelineOutcome::Aborted { verdict } => {
                output::error(&format!(
                    "Build aborted: {} fatal diagnostic(s) during validation",
                    verdict.trigger_count
                ));
            }
            PipelineOutcome::Failed { error } => {
                output::error(&error.to_string());
            }
        }

        Ok(exit_code)
    }
}
