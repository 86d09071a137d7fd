//! Error types for the build pipeline

use std::path::PathBuf;

use thiserror::Error;

use crate::exit_codes;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, LiftoffError>;

/// Pipeline errors
#[derive(Error, Debug)]
pub enum LiftoffError {
    /// A required option was not supplied
    #[error("Missing argument -{option}")]
    MissingOption { option: String },

    /// The build target name is not a known platform
    #[error("{name} is not a defined build target")]
    UnknownBuildTarget { name: String },

    /// An option was supplied but its value is unusable
    #[error("Invalid value for -{option}: {message}")]
    InvalidOption { option: String, message: String },

    /// Applying platform settings failed
    #[error("Platform configuration failed for {platform}: {message}")]
    PlatformConfig { platform: String, message: String },

    /// The validation runner itself failed (not a diagnostic abort)
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// A backend call failed
    #[error("Backend action '{action}' failed: {message}")]
    Backend { action: String, message: String },

    /// The backend replied with something we could not understand
    #[error("Protocol error: {message}")]
    Protocol { message: String },

    /// A project file could not be read or parsed
    #[error("Cannot read {}: {message}", path.display())]
    ProjectFile { path: PathBuf, message: String },

    /// Invalid configuration file or environment
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl LiftoffError {
    pub fn missing_option(option: impl Into<String>) -> Self {
        Self::MissingOption {
            option: option.into(),
        }
    }

    pub fn invalid_option(option: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            message: message.into(),
        }
    }

    pub fn platform_config(platform: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PlatformConfig {
            platform: platform.into(),
            message: message.into(),
        }
    }

    pub fn backend(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            action: action.into(),
            message: message.into(),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error was caused by the supplied options rather than the
    /// environment
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingOption { .. } | Self::UnknownBuildTarget { .. } | Self::InvalidOption { .. }
        )
    }

    /// Get exit code for CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingOption { option } => match option.as_str() {
                "buildTarget" => exit_codes::MISSING_BUILD_TARGET,
                "customBuildPath" => exit_codes::MISSING_BUILD_PATH,
                "buildVersion" => exit_codes::MISSING_BUILD_VERSION,
                _ => exit_codes::INVALID_OPTION,
            },
            Self::UnknownBuildTarget { .. } => exit_codes::INVALID_BUILD_TARGET,
            Self::InvalidOption { .. } => exit_codes::INVALID_OPTION,
            Self::PlatformConfig { .. } => exit_codes::PLATFORM_CONFIG,
            Self::Config { .. } | Self::Toml(_) => exit_codes::CONFIG_ERROR,
            Self::Validation { .. }
            | Self::Backend { .. }
            | Self::Protocol { .. }
            | Self::ProjectFile { .. }
            | Self::Io(_)
            | Self::Json(_) => exit_codes::ERROR,
        }
    }
}
