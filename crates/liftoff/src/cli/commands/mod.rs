//! CLI commands

mod build;
mod plan;

pub use build::BuildCommand;
pub use plan::PlanCommand;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info};

use liftoff_core::config::{load_config, load_config_or_default, FileConfig};
use liftoff_core::options::PROJECT_PATH;
use liftoff_core::{
    BuildSettingsCatalog, Collaborators, ContentExtension, OptionMap, Orchestrator,
    PipelineConfig,
};

use crate::backend::{BackendProcess, ExternalBackend, ExternalContentExtension};
use crate::cli::Cli;

/// Everything a command needs to run the pipeline
pub struct Session {
    pub project_path: PathBuf,
    pub options: OptionMap,
    pub config: PipelineConfig,
    collaborators: Collaborators,
}

impl Session {
    /// Load config, merge options and wire up the process-backed collaborators
    pub fn prepare(cli: &Cli, args: &[String], project: Option<&Path>) -> anyhow::Result<Self> {
        let cwd = std::env::current_dir()?;
        let (file_config, config_path) = read_config(cli, &cwd)?;
        if let Some(path) = &config_path {
            info!(path = %path.display(), "using config file");
        }

        let options = OptionMap::from_args(args).with_defaults(&file_config.options);

        let project_path = options
            .get(PROJECT_PATH)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| project.map(Path::to_path_buf))
            .unwrap_or_else(|| cwd.clone());
        let project_path = if project_path.is_absolute() {
            project_path
        } else {
            cwd.join(project_path)
        };
        debug!(project = %project_path.display(), "resolved project path");

        let config =
            apply_cli_overrides(PipelineConfig::from_env().with_file_config(&file_config), cli);

        let backend = Arc::new(ExternalBackend::new(BackendProcess::from_config(
            &file_config.backend,
            &project_path,
        )));
        let extension = ExternalContentExtension::detect(&file_config.extension, &project_path)
            .map(|e| Arc::new(e) as Arc<dyn ContentExtension>);

        let collaborators = Collaborators {
            validator: backend.clone(),
            executor: backend.clone(),
            settings: backend.clone(),
            scenes: Arc::new(BuildSettingsCatalog::for_project(&project_path)),
            meta_reset: Some(backend),
            extension,
        };

        Ok(Self {
            project_path,
            options,
            config,
            collaborators,
        })
    }

    pub fn orchestrator(&self) -> Orchestrator {
        Orchestrator::with_config(self.collaborators.clone(), self.config.clone())
    }
}

fn read_config(cli: &Cli, cwd: &Path) -> anyhow::Result<(FileConfig, Option<PathBuf>)> {
    match &cli.config {
        Some(path) => {
            let config = load_config(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            Ok((config, Some(path.clone())))
        }
        None => Ok(load_config_or_default(cwd)?),
    }
}

/// Flags given on the command line win over the environment; absent flags keep it
fn apply_cli_overrides(mut config: PipelineConfig, cli: &Cli) -> PipelineConfig {
    if cli.quiet {
        config = config.with_quiet(true);
    }
    if let Some(format) = cli.format {
        config = config.with_output_format(format.into());
    }
    config
}
