//! Process exit codes
//!
//! Build outcome codes (101-103) and option codes (120-141) keep the values CI
//! scripts already match on.

/// Build succeeded
pub const SUCCESS: i32 = 0;

/// A fatal diagnostic was logged during validation
pub const DIAGNOSTIC_ABORT: i32 = 1;

/// General error (backend unreachable, protocol violation, validation crash)
pub const ERROR: i32 = 2;

/// Build finished with status `failed`
pub const BUILD_FAILED: i32 = 101;

/// Build finished with status `cancelled`
pub const BUILD_CANCELLED: i32 = 102;

/// Build finished with a status we do not recognize
pub const BUILD_UNKNOWN: i32 = 103;

/// `-buildTarget` was not supplied
pub const MISSING_BUILD_TARGET: i32 = 120;

/// `-buildTarget` names no known platform
pub const INVALID_BUILD_TARGET: i32 = 121;

/// `-customBuildPath` was not supplied
pub const MISSING_BUILD_PATH: i32 = 130;

/// `-buildVersion` was not supplied
pub const MISSING_BUILD_VERSION: i32 = 140;

/// Some other option was missing or malformed
pub const INVALID_OPTION: i32 = 141;

/// Platform settings could not be applied
pub const PLATFORM_CONFIG: i32 = 150;

/// Configuration file or environment is invalid
pub const CONFIG_ERROR: i32 = 160;
