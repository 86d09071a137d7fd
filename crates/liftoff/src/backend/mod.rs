//! Process-backed collaborators
//!
//! The engine runs out of process. [`ExternalBackend`] drives it through the
//! JSON protocol in [`protocol`] and implements every pipeline collaborator
//! except the scene catalog, which reads the project directly.

mod extension;
mod process;
pub mod protocol;

pub use extension::ExternalContentExtension;
pub use process::BackendProcess;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, instrument};

use liftoff_core::{
    BuildExecutor, BuildOutcome, BuildRequest, DiagnosticSink, LiftoffError, MetaFileReset,
    OptionMap, PlatformSettingsApplier, Result, ValidationRunner,
};

use protocol::Action;

/// Engine backend reached through a child process per action
#[derive(Debug, Clone)]
pub struct ExternalBackend {
    process: BackendProcess,
}

impl ExternalBackend {
    pub fn new(process: BackendProcess) -> Self {
        Self { process }
    }
}

#[async_trait]
impl ValidationRunner for ExternalBackend {
    #[instrument(skip(self, diagnostics))]
    async fn validate(&self, strict: bool, diagnostics: DiagnosticSink) -> Result<()> {
        self.process
            .call(Action::Validate, json!({ "strict": strict }), Some(diagnostics))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl BuildExecutor for ExternalBackend {
    #[instrument(skip_all, fields(platform = %request.target()))]
    async fn execute(&self, request: &BuildRequest) -> Result<BuildOutcome> {
        let output = self
            .process
            .call(Action::Build, serde_json::to_value(request)?, None)
            .await?;
        let outcome: BuildOutcome = serde_json::from_value(output)
            .map_err(|e| LiftoffError::protocol(format!("invalid build outcome: {e}")))?;
        debug!(status = outcome.status.as_str(), "backend reported build outcome");
        Ok(outcome)
    }
}

#[async_trait]
impl PlatformSettingsApplier for ExternalBackend {
    async fn set_version(&self, version: &str) -> Result<()> {
        self.process
            .call(Action::SetVersion, json!({ "version": version }), None)
            .await?;
        Ok(())
    }

    async fn set_android_version_code(&self, version_code: u32) -> Result<()> {
        self.process
            .call(
                Action::SetAndroidVersionCode,
                json!({ "versionCode": version_code }),
                None,
            )
            .await?;
        Ok(())
    }

    async fn apply_android_settings(&self, options: &OptionMap) -> Result<()> {
        // Full options, secrets included; the backend needs the keystore passwords
        self.process
            .call(
                Action::ApplyAndroidSettings,
                json!({ "options": options }),
                None,
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl MetaFileReset for ExternalBackend {
    async fn reset_meta_files(&self) -> Result<()> {
        self.process
            .call(Action::ResetMeta, serde_json::Value::Null, None)
            .await?;
        Ok(())
    }
}
