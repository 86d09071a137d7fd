//! Configuration validation

use tracing::debug;

use crate::error::{LiftoffError, Result};
use crate::platform::BuildTarget;
use crate::options;

use super::types::FileConfig;

/// Validate a loaded configuration file
pub fn validate_config(config: &FileConfig) -> Result<()> {
    debug!("validating configuration");

    if config.backend.command.trim().is_empty() {
        return Err(LiftoffError::config("backend.command cannot be empty"));
    }

    if config.extension.enabled && config.extension.command.trim().is_empty() {
        return Err(LiftoffError::config(
            "extension.command cannot be empty while the extension is enabled",
        ));
    }

    // An empty pattern matches every message and would silence the monitor
    let empty_pattern = config
        .diagnostics
        .ignore_prefixes
        .iter()
        .chain(&config.diagnostics.ignore_contains)
        .any(|p| p.is_empty());
    if empty_pattern {
        return Err(LiftoffError::config(
            "diagnostics ignore patterns cannot be empty",
        ));
    }

    if let Some(target) = config.options.get(options::BUILD_TARGET) {
        if BuildTarget::parse(target).is_none() {
            return Err(LiftoffError::config(format!(
                "options.{}: {target} is not a defined build target",
                options::BUILD_TARGET
            )));
        }
    }

    debug!("configuration validation passed");
    Ok(())
}
