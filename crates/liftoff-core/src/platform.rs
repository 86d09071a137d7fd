//! Build targets and platform-specific request settings

use serde::{Deserialize, Serialize};

/// Platforms the backend can build for.
///
/// Names match the backend's own identifiers exactly; parsing is
/// case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildTarget {
    StandaloneOSX,
    StandaloneWindows,
    StandaloneWindows64,
    StandaloneLinux64,
    #[serde(rename = "iOS")]
    Ios,
    Android,
    WebGL,
    WSAPlayer,
    #[serde(rename = "tvOS")]
    TvOs,
    #[serde(rename = "VisionOS")]
    VisionOs,
    PS4,
    PS5,
    XboxOne,
    Switch,
    LinuxHeadlessSimulation,
}

impl BuildTarget {
    /// Every supported target
    pub const ALL: &'static [BuildTarget] = &[
        Self::StandaloneOSX,
        Self::StandaloneWindows,
        Self::StandaloneWindows64,
        Self::StandaloneLinux64,
        Self::Ios,
        Self::Android,
        Self::WebGL,
        Self::WSAPlayer,
        Self::TvOs,
        Self::VisionOs,
        Self::PS4,
        Self::PS5,
        Self::XboxOne,
        Self::Switch,
        Self::LinuxHeadlessSimulation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StandaloneOSX => "StandaloneOSX",
            Self::StandaloneWindows => "StandaloneWindows",
            Self::StandaloneWindows64 => "StandaloneWindows64",
            Self::StandaloneLinux64 => "StandaloneLinux64",
            Self::Ios => "iOS",
            Self::Android => "Android",
            Self::WebGL => "WebGL",
            Self::WSAPlayer => "WSAPlayer",
            Self::TvOs => "tvOS",
            Self::VisionOs => "VisionOS",
            Self::PS4 => "PS4",
            Self::PS5 => "PS5",
            Self::XboxOne => "XboxOne",
            Self::Switch => "Switch",
            Self::LinuxHeadlessSimulation => "LinuxHeadlessSimulation",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }

    /// Desktop players, the only targets with a subtarget
    pub fn is_standalone(&self) -> bool {
        matches!(
            self,
            Self::StandaloneOSX
                | Self::StandaloneWindows
                | Self::StandaloneWindows64
                | Self::StandaloneLinux64
        )
    }
}

impl std::fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flavor of a standalone player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandaloneSubtarget {
    /// Regular player with graphics
    #[default]
    Player,
    /// Dedicated server build
    Server,
}

impl StandaloneSubtarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "Player",
            Self::Server => "Server",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Player" => Some(Self::Player),
            "Server" => Some(Self::Server),
            _ => None,
        }
    }
}

/// Settings that only exist for some targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetSettings {
    /// Desktop players
    Standalone { subtarget: StandaloneSubtarget },
    /// Everything else
    Generic,
}

impl TargetSettings {
    pub fn subtarget(&self) -> Option<StandaloneSubtarget> {
        match self {
            Self::Standalone { subtarget } => Some(*subtarget),
            Self::Generic => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(BuildTarget::parse("Android"), Some(BuildTarget::Android));
        assert_eq!(BuildTarget::parse("iOS"), Some(BuildTarget::Ios));
        assert_eq!(BuildTarget::parse("android"), None);
        assert_eq!(BuildTarget::parse("LinuxServer"), None);
        assert_eq!(BuildTarget::parse(""), None);
    }

    #[test]
    fn test_every_target_parses_from_its_name() {
        for target in BuildTarget::ALL {
            assert_eq!(BuildTarget::parse(target.as_str()), Some(*target));
        }
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for target in BuildTarget::ALL {
            let json = serde_json::to_string(target).unwrap();
            assert_eq!(json, format!("\"{}\"", target.as_str()));
        }
    }

    #[test]
    fn test_standalone_targets() {
        assert!(BuildTarget::StandaloneLinux64.is_standalone());
        assert!(BuildTarget::StandaloneOSX.is_standalone());
        assert!(!BuildTarget::Android.is_standalone());
        assert!(!BuildTarget::LinuxHeadlessSimulation.is_standalone());
    }

    #[test]
    fn test_subtarget_parse() {
        assert_eq!(StandaloneSubtarget::parse("Server"), Some(StandaloneSubtarget::Server));
        assert_eq!(StandaloneSubtarget::parse("server"), None);
        assert_eq!(StandaloneSubtarget::default(), StandaloneSubtarget::Player);
    }
}
