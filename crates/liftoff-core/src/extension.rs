//! Optional content build step
//!
//! Whether the extension is installed is decided once at startup and handed in
//! as an `Option`. Running it never fails the pipeline.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::traits::ContentExtension;

/// What happened when the extension step ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionReport {
    /// No extension installed
    Absent,
    /// Clean and build both succeeded
    Completed { name: String },
    /// Clean or build failed; the player build continues anyway
    Failed { name: String, message: String },
}

impl ExtensionReport {
    /// Warning to surface in the build summary, if any
    pub fn warning(&self) -> Option<String> {
        match self {
            Self::Failed { name, message } => {
                Some(format!("Failed to run {name} content build: {message}"))
            }
            _ => None,
        }
    }
}

/// Runs the content extension if one is present
#[derive(Clone, Default)]
pub struct ExtensionInvoker {
    extension: Option<Arc<dyn ContentExtension>>,
}

impl ExtensionInvoker {
    pub fn new(extension: Option<Arc<dyn ContentExtension>>) -> Self {
        Self { extension }
    }

    pub fn is_present(&self) -> bool {
        self.extension.is_some()
    }

    /// Clean previous content, then build new content.
    ///
    /// Both calls share one failure boundary: if cleaning fails, building is
    /// skipped. Failures are logged and reported, never propagated.
    #[instrument(skip_all)]
    pub async fn run(&self) -> ExtensionReport {
        let Some(extension) = self.extension.as_ref() else {
            debug!("no content extension installed");
            return ExtensionReport::Absent;
        };
        let name = extension.name().to_string();

        let result = async {
            extension.clean_content().await?;
            extension.build_content().await
        }
        .await;

        match result {
            Ok(()) => {
                info!(extension = %name, "content build completed");
                ExtensionReport::Completed { name }
            }
            Err(e) => {
                warn!(extension = %name, error = %e, "content build failed, continuing with player build");
                ExtensionReport::Failed {
                    name,
                    message: e.to_string(),
                }
            }
        }
    }
}

impl std::fmt::Debug for ExtensionInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionInvoker")
            .field("extension", &self.extension.as_ref().map(|e| e.name().to_string()))
            .finish()
    }
}
