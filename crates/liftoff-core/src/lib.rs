//! Liftoff Core - Headless build pipeline for game engine projects
//!
//! Drives one player build from command-line style options to an exit code:
//!
//! 1. Parse and validate the options (`-buildTarget`, `-customBuildPath`,
//!    `-buildVersion`, ...)
//! 2. Run project validation while a diagnostic monitor watches for fatal
//!    log events, and abort if any are seen
//! 3. Assemble an immutable [`BuildRequest`] from the options and the
//!    project's enabled scenes
//! 4. Apply version and platform settings
//! 5. Run the optional content extension (best effort)
//! 6. Build, then report the outcome and map it to an exit code
//!
//! # CI/CD First
//!
//! The engine itself sits behind the traits in [`traits`], so the same pipeline
//! runs against a real editor process in CI and against fakes in tests. Every
//! failure class has its own exit code (see [`exit_codes`]).

pub mod config;
pub mod configure;
pub mod diagnostics;
pub mod error;
pub mod exit_codes;
pub mod extension;
pub mod flags;
pub mod options;
pub mod orchestration;
pub mod outcome;
pub mod output;
pub mod platform;
pub mod report;
pub mod request;
pub mod scenes;
pub mod traits;

pub use config::{find_config, load_config, load_config_or_default, FileConfig};
pub use configure::PlatformConfigurator;
pub use diagnostics::{
    AllowList, DiagnosticEvent, DiagnosticMonitor, DiagnosticSink, DiagnosticSubscription,
    MessagePattern, MonitorVerdict, Severity,
};
pub use error::{LiftoffError, Result};
pub use extension::{ExtensionInvoker, ExtensionReport};
pub use flags::BuildFlags;
pub use options::OptionMap;
pub use orchestration::{Collaborators, Orchestrator, PipelineConfig, PipelineOutcome};
pub use outcome::{BuildOutcome, BuildStatus, BuildStep, BuildSummary};
pub use output::{Output, OutputFormat};
pub use platform::{BuildTarget, StandaloneSubtarget, TargetSettings};
pub use report::ResultReporter;
pub use request::BuildRequest;
pub use scenes::{BuildSettingsCatalog, StaticScenes};
pub use traits::{
    BuildExecutor, ContentExtension, MetaFileReset, PlatformSettingsApplier, SceneCatalog,
    ValidationRunner,
};
