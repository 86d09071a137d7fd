//! Platform-specific project configuration
//!
//! Runs after the request is assembled and before anything is built. Every
//! failure here is fatal.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::error::{LiftoffError, Result};
use crate::options::{self, OptionMap};
use crate::platform::BuildTarget;
use crate::request::BuildRequest;
use crate::traits::PlatformSettingsApplier;

/// Version value meaning "leave the project version alone"
pub const VERSION_NONE: &str = "none";

/// Applies version and platform settings for a request
pub struct PlatformConfigurator {
    applier: Arc<dyn PlatformSettingsApplier>,
}

impl PlatformConfigurator {
    pub fn new(applier: Arc<dyn PlatformSettingsApplier>) -> Self {
        Self { applier }
    }

    #[instrument(skip_all, fields(platform = %request.target()))]
    pub async fn configure(&self, request: &BuildRequest, options: &OptionMap) -> Result<()> {
        let target = request.target();
        let version = options.require(options::BUILD_VERSION)?;

        if version.eq_ignore_ascii_case(VERSION_NONE) {
            debug!("build version is 'none', keeping project version");
        } else {
            self.applier
                .set_version(version)
                .await
                .map_err(|e| wrap(target, e))?;
            info!(version, "applied build version");
        }

        if target == BuildTarget::Android {
            match android_version_code(options)? {
                Some(code) => {
                    self.applier
                        .set_android_version_code(code)
                        .await
                        .map_err(|e| wrap(target, e))?;
                    info!(version_code = code, "applied android version code");
                }
                None => debug!("android version code left unchanged"),
            }

            self.applier
                .apply_android_settings(options)
                .await
                .map_err(|e| wrap(target, e))?;
            info!("applied android settings");
        }

        Ok(())
    }
}

fn wrap(target: BuildTarget, err: LiftoffError) -> LiftoffError {
    match err {
        LiftoffError::PlatformConfig { .. } => err,
        other => LiftoffError::platform_config(target.as_str(), other.to_string()),
    }
}

/// Resolve the Android version code.
///
/// An explicit `androidVersionCode` wins; zero or a negative value means
/// "don't touch". Without one the code is derived from `buildVersion`.
pub fn android_version_code(options: &OptionMap) -> Result<Option<u32>> {
    if let Some(raw) = options.get(options::ANDROID_VERSION_CODE) {
        let code: i64 = raw.trim().parse().map_err(|_| {
            LiftoffError::platform_config(
                BuildTarget::Android.as_str(),
                format!("androidVersionCode '{raw}' is not an integer"),
            )
        })?;
        if code <= 0 {
            return Ok(None);
        }
        return u32::try_from(code).map(Some).map_err(|_| {
            LiftoffError::platform_config(
                BuildTarget::Android.as_str(),
                format!("androidVersionCode {code} is out of range"),
            )
        });
    }

    let version = options.require(options::BUILD_VERSION)?;
    version_code_from_version(version).map(Some)
}

/// `major * 1_000_000 + minor * 1_000 + patch`, so codes grow with versions
pub fn version_code_from_version(version: &str) -> Result<u32> {
    let parsed = semver::Version::parse(version.trim_start_matches('v')).map_err(|e| {
        LiftoffError::platform_config(
            BuildTarget::Android.as_str(),
            format!("cannot derive a version code from '{version}': {e}"),
        )
    })?;

    if parsed.minor >= 1000 || parsed.patch >= 1000 {
        return Err(LiftoffError::platform_config(
            BuildTarget::Android.as_str(),
            format!("minor and patch of '{version}' must be below 1000"),
        ));
    }

    let code = parsed
        .major
        .checked_mul(1_000_000)
        .and_then(|c| c.checked_add(parsed.minor * 1_000 + parsed.patch))
        .and_then(|c| u32::try_from(c).ok());
    code.ok_or_else(|| {
        LiftoffError::platform_config(
            BuildTarget::Android.as_str(),
            format!("version code for '{version}' is out of range"),
        )
    })
}
