//! Collaborator traits
//!
//! The pipeline never talks to the engine directly. Every side effect goes
//! through one of these traits so the CLI can plug in a process-backed
//! implementation and tests can plug in fakes.

use async_trait::async_trait;

use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::options::OptionMap;
use crate::outcome::BuildOutcome;
use crate::request::BuildRequest;

/// Pre-build project checks
#[async_trait]
pub trait ValidationRunner: Send + Sync {
    /// Run the checks. Anything the checks log must be delivered to
    /// `diagnostics` before this returns.
    async fn validate(&self, strict: bool, diagnostics: DiagnosticSink) -> Result<()>;
}

/// Performs the actual build
#[async_trait]
pub trait BuildExecutor: Send + Sync {
    /// Build a player. A build that ran but failed is an `Ok` outcome with a
    /// failed status; `Err` means the backend could not be driven at all.
    async fn execute(&self, request: &BuildRequest) -> Result<BuildOutcome>;
}

/// Writes platform settings into the project
#[async_trait]
pub trait PlatformSettingsApplier: Send + Sync {
    /// Set the project version string
    async fn set_version(&self, version: &str) -> Result<()>;

    /// Set the Android bundle version code
    async fn set_android_version_code(&self, version_code: u32) -> Result<()>;

    /// Apply Android settings (signing, SDK levels, export type) from options
    async fn apply_android_settings(&self, options: &OptionMap) -> Result<()>;
}

/// Optional content build step, only present when installed
#[async_trait]
pub trait ContentExtension: Send + Sync {
    /// Name for logs
    fn name(&self) -> &str;

    /// Remove content produced by a previous run
    async fn clean_content(&self) -> Result<()>;

    /// Build content for the upcoming player build
    async fn build_content(&self) -> Result<()>;
}

/// Resets generated metadata files before a build
#[async_trait]
pub trait MetaFileReset: Send + Sync {
    async fn reset_meta_files(&self) -> Result<()>;
}

/// Source of the scenes included in the build
pub trait SceneCatalog: Send + Sync {
    /// Enabled scene paths, in build order
    fn enabled_scenes(&self) -> Result<Vec<String>>;
}
