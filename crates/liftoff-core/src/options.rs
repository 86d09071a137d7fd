//! Build options
//!
//! Options arrive as `-name value` pairs on the command line and are kept as a
//! flat string map. Typing happens later, in the request assembler and the
//! platform configurator; this module only tokenizes and checks that the
//! options every build needs are present.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{LiftoffError, Result};
use crate::platform::BuildTarget;

/// Platform to build for
pub const BUILD_TARGET: &str = "buildTarget";
/// Output location of the player
pub const CUSTOM_BUILD_PATH: &str = "customBuildPath";
/// File name of the player inside the output location
pub const CUSTOM_BUILD_NAME: &str = "customBuildName";
/// Version string applied to the project
pub const BUILD_VERSION: &str = "buildVersion";
/// Project root handed to the backend
pub const PROJECT_PATH: &str = "projectPath";
/// Standalone subtarget (`Player` or `Server`)
pub const STANDALONE_SUBTARGET: &str = "standaloneBuildSubtarget";
/// Explicit Android version code
pub const ANDROID_VERSION_CODE: &str = "androidVersionCode";

/// Build name used when none is supplied
pub const DEFAULT_BUILD_NAME: &str = "TestBuild";

/// Options whose values are never written to logs or output
pub const SECRET_OPTIONS: &[&str] = &[
    "androidKeystorePass",
    "androidKeyaliasName",
    "androidKeyaliasPass",
];

const HIDDEN: &str = "*HIDDEN*";

/// Flat option name to value mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionMap {
    values: BTreeMap<String, String>,
}

impl OptionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize `-flag value` style arguments.
    ///
    /// A flag followed by another flag (or nothing) gets an empty value.
    /// Arguments that are neither a flag nor a flag's value are ignored. A
    /// repeated flag keeps its last value.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        let mut values = BTreeMap::new();

        for (current, arg) in args.iter().enumerate() {
            let arg = arg.as_ref();
            if !arg.starts_with('-') {
                continue;
            }

            let flag = arg.trim_start_matches('-');
            if flag.is_empty() {
                continue;
            }

            let value = match args.get(current + 1).map(AsRef::as_ref) {
                Some(next) if !next.starts_with('-') => next.to_string(),
                _ => String::new(),
            };

            debug!(
                flag,
                value = %display_value(flag, &value),
                "found option"
            );
            values.insert(flag.to_string(), value);
        }

        Self { values }
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Fill in options that are not already set
    pub fn with_defaults(mut self, defaults: &HashMap<String, String>) -> Self {
        for (name, value) in defaults {
            self.values
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Whether the option was supplied at all, regardless of its value
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Get an option that must be present
    pub fn require(&self, name: &str) -> Result<&str> {
        self.get(name)
            .ok_or_else(|| LiftoffError::missing_option(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check required options and fill in defaults.
    ///
    /// Checks run in a fixed order so the first missing option decides the
    /// exit code: build target, build path, build version.
    pub fn validated(mut self) -> Result<Self> {
        let target = self.require(BUILD_TARGET)?;
        if BuildTarget::parse(target).is_none() {
            return Err(LiftoffError::UnknownBuildTarget {
                name: target.to_string(),
            });
        }

        self.require(CUSTOM_BUILD_PATH)?;
        self.require(BUILD_VERSION)?;

        match self.values.get(CUSTOM_BUILD_NAME) {
            Some(name) if !name.is_empty() => {}
            _ => {
                info!(
                    default = DEFAULT_BUILD_NAME,
                    "no customBuildName given, using default"
                );
                self.values
                    .insert(CUSTOM_BUILD_NAME.to_string(), DEFAULT_BUILD_NAME.to_string());
            }
        }

        Ok(self)
    }

    /// Copy of the options with secret values masked
    pub fn redacted(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), display_value(k, v)))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OptionMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

pub fn is_secret(name: &str) -> bool {
    SECRET_OPTIONS.contains(&name)
}

fn display_value(name: &str, value: &str) -> String {
    if is_secret(name) {
        HIDDEN.to_string()
    } else {
        value.to_string()
    }
}
