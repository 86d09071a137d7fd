//! Build pipeline orchestration
//!
//! The orchestrator runs one build from raw options to a printed summary:
//! option validation, meta-file reset, monitored validation, request
//! assembly, platform configuration, the optional content step, the build
//! itself and finally reporting. Any fatal error skips every later stage.

mod config;

pub use config::PipelineConfig;

use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use crate::configure::PlatformConfigurator;
use crate::diagnostics::{DiagnosticMonitor, MonitorVerdict};
use crate::error::{LiftoffError, Result};
use crate::exit_codes;
use crate::extension::ExtensionInvoker;
use crate::options::OptionMap;
use crate::outcome::BuildOutcome;
use crate::output::Output;
use crate::report::ResultReporter;
use crate::request::BuildRequest;
use crate::traits::{
    BuildExecutor, ContentExtension, MetaFileReset, PlatformSettingsApplier, SceneCatalog,
    ValidationRunner,
};

/// Everything the pipeline delegates to
#[derive(Clone)]
pub struct Collaborators {
    pub validator: Arc<dyn ValidationRunner>,
    pub executor: Arc<dyn BuildExecutor>,
    pub settings: Arc<dyn PlatformSettingsApplier>,
    pub scenes: Arc<dyn SceneCatalog>,
    pub meta_reset: Option<Arc<dyn MetaFileReset>>,
    pub extension: Option<Arc<dyn ContentExtension>>,
}

/// How a pipeline run ended
#[derive(Debug)]
pub enum PipelineOutcome {
    /// The build ran; its status decides the exit code
    Completed { outcome: BuildOutcome, output: Output },
    /// A fatal diagnostic was seen during validation, nothing was built
    Aborted { verdict: MonitorVerdict },
    /// A fatal error stopped the pipeline
    Failed { error: LiftoffError },
}

impl PipelineOutcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Completed { output, .. } => output.exit_code,
            Self::Aborted { .. } => exit_codes::DIAGNOSTIC_ABORT,
            Self::Failed { error } => error.exit_code(),
        }
    }

    /// The build summary, present only when a build actually ran
    pub fn output(&self) -> Option<&Output> {
        match self {
            Self::Completed { output, .. } => Some(output),
            _ => None,
        }
    }
}

/// Runs the build pipeline
pub struct Orchestrator {
    collaborators: Collaborators,
    config: PipelineConfig,
    monitor: DiagnosticMonitor,
    reporter: ResultReporter,
}

impl Orchestrator {
    pub fn new(collaborators: Collaborators) -> Self {
        Self::with_config(collaborators, PipelineConfig::from_env())
    }

    pub fn with_config(collaborators: Collaborators, config: PipelineConfig) -> Self {
        let monitor = DiagnosticMonitor::new(config.allow_list());
        Self {
            collaborators,
            config,
            monitor,
            reporter: ResultReporter::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the whole pipeline for one set of options
    #[instrument(skip_all)]
    pub async fn run(&self, options: OptionMap) -> PipelineOutcome {
        match self.try_run(options).await {
            Ok(outcome) => outcome,
            Err(error) => {
                error!(error = %error, exit_code = error.exit_code(), "build pipeline failed");
                PipelineOutcome::Failed { error }
            }
        }
    }

    /// Run and print the summary in the configured format.
    ///
    /// Nothing is printed unless a build ran. A quiet run skips the summary
    /// on success.
    pub async fn run_with_output(&self, options: OptionMap) -> PipelineOutcome {
        let outcome = self.run(options).await;
        if let Some(output) = outcome.output() {
            if !(self.config.quiet && output.success) {
                output.print(self.config.output_format);
            }
        }
        outcome
    }

    /// Validate options and assemble the request without touching the backend
    pub fn plan(&self, options: OptionMap) -> Result<BuildRequest> {
        let options = options.validated()?;
        let scenes = self.collaborators.scenes.enabled_scenes()?;
        BuildRequest::assemble(&options, scenes)
    }

    async fn try_run(&self, options: OptionMap) -> Result<PipelineOutcome> {
        let c = &self.collaborators;

        let options = options.validated()?;
        info!(options = ?options.redacted(), "starting build");

        if self.config.reset_meta_files {
            if let Some(reset) = c.meta_reset.as_ref() {
                reset.reset_meta_files().await?;
                debug!("meta files reset");
            }
        }

        let verdict = self.validate().await?;
        if verdict.abort_requested {
            error!(
                triggers = verdict.trigger_count,
                "fatal diagnostics during validation, aborting build"
            );
            return Ok(PipelineOutcome::Aborted { verdict });
        }

        let scenes = c.scenes.enabled_scenes()?;
        let request = BuildRequest::assemble(&options, scenes)?;

        PlatformConfigurator::new(Arc::clone(&c.settings))
            .configure(&request, &options)
            .await?;

        let extension = ExtensionInvoker::new(c.extension.clone()).run().await;

        info!(platform = %request.target(), location = %request.location_path_name().display(), "building player");
        let outcome = c.executor.execute(&request).await?;
        info!(status = outcome.status.as_str(), "build finished");

        let mut output = self.reporter.report(&outcome);
        if let Some(warning) = extension.warning() {
            output = output.with_warning(warning);
        }

        Ok(PipelineOutcome::Completed { outcome, output })
    }

    /// Run validation with the monitor attached for exactly its duration.
    ///
    /// A runner error only wins when no fatal diagnostic was seen; an abort
    /// is the more specific answer.
    #[instrument(skip_all, fields(strict = self.config.strict_validation))]
    async fn validate(&self) -> Result<MonitorVerdict> {
        let subscription = self.monitor.attach();
        let result = self
            .collaborators
            .validator
            .validate(self.config.strict_validation, subscription.sink())
            .await;
        let verdict = subscription.detach();

        match result {
            Err(e) if !verdict.abort_requested => Err(e),
            _ => Ok(verdict),
        }
    }
}
