//! Plan command - Show the build request a build would use

use std::path::PathBuf;

use clap::Args;
use serde_json::json;
use tracing::info;

use liftoff_core::OutputFormat;

use super::Session;
use crate::cli::{output, Cli};

/// Validate options and print the build request without building
#[derive(Debug, Args)]
pub struct PlanCommand {
    /// Project directory (overridden by -projectPath)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Build options in `-name value` form, after `--`
    #[arg(last = true, allow_hyphen_values = true)]
    pub options: Vec<String>,
}

impl PlanCommand {
    /// Execute the plan command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        info!(option_count = self.options.len(), "executing plan command");
        let session = Session::prepare(cli, &self.options, self.project.as_deref())?;

        let request = match session.orchestrator().plan(session.options.clone()) {
            Ok(request) => request,
            Err(e) => {
                output::error(&e.to_string());
                return Ok(e.exit_code());
            }
        };

        let plan = json!({
            "project": session.project_path,
            "options": session.options.redacted(),
            "request": request,
        });
        println!("{}", serde_json::to_string_pretty(&plan)?);

        if session.config.output_format == OutputFormat::Text && !cli.quiet {
            output::success(&format!(
                "{} scene(s) would be built for {}",
                request.scenes().len(),
                request.target()
            ));
        }

        Ok(liftoff_core::exit_codes::SUCCESS)
    }
}
