//! Build request assembly
//!
//! A [`BuildRequest`] is assembled once per run from the validated options and
//! the project's enabled scenes, and is read-only afterwards.

use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};
use tracing::{debug, instrument};

use crate::error::{LiftoffError, Result};
use crate::flags::BuildFlags;
use crate::options::{self, OptionMap};
use crate::platform::{BuildTarget, StandaloneSubtarget, TargetSettings};

/// Everything the build backend needs to produce a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequest {
    target: BuildTarget,
    location_path_name: PathBuf,
    scenes: Vec<String>,
    #[serde(serialize_with = "serialize_flags")]
    options: BuildFlags,
    settings: TargetSettings,
}

impl BuildRequest {
    /// Assemble a request from options and the enabled scene list.
    ///
    /// An unknown `buildTarget` is an error. An unknown or missing
    /// `standaloneBuildSubtarget` is not: it falls back to the default
    /// subtarget.
    #[instrument(skip_all, fields(scene_count = scenes.len()))]
    pub fn assemble(options: &OptionMap, scenes: Vec<String>) -> Result<Self> {
        let target_name = options.require(options::BUILD_TARGET)?;
        let target = BuildTarget::parse(target_name).ok_or_else(|| {
            LiftoffError::UnknownBuildTarget {
                name: target_name.to_string(),
            }
        })?;

        let location_path_name = PathBuf::from(options.require(options::CUSTOM_BUILD_PATH)?);

        let flags = BuildFlags::from_options(options);

        let settings = if target.is_standalone() {
            let subtarget = options
                .get(options::STANDALONE_SUBTARGET)
                .and_then(StandaloneSubtarget::parse)
                .unwrap_or_default();
            TargetSettings::Standalone { subtarget }
        } else {
            TargetSettings::Generic
        };

        debug!(
            platform = %target,
            location = %location_path_name.display(),
            flags = ?flags.names(),
            settings = ?settings,
            "assembled build request"
        );

        Ok(Self {
            target,
            location_path_name,
            scenes,
            options: flags,
            settings,
        })
    }

    pub fn target(&self) -> BuildTarget {
        self.target
    }

    pub fn location_path_name(&self) -> &Path {
        &self.location_path_name
    }

    pub fn scenes(&self) -> &[String] {
        &self.scenes
    }

    pub fn flags(&self) -> BuildFlags {
        self.options
    }

    pub fn settings(&self) -> TargetSettings {
        self.settings
    }
}

fn serialize_flags<S: Serializer>(flags: &BuildFlags, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(flags.names())
}
