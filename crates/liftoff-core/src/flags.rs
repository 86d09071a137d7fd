//! Backend build flags
//!
//! Each flag is switched on by passing an option with the flag's exact name.
//! Only the presence of the option matters: `-Development false` still
//! enables `Development`, because the flag name is present as a key.

#![allow(non_upper_case_globals)]

use bitflags::bitflags;

use crate::options::OptionMap;

bitflags! {
    /// Switches forwarded to the build backend
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct BuildFlags: u32 {
        const Development = 1 << 0;
        const AutoRunPlayer = 1 << 1;
        const ShowBuiltPlayer = 1 << 2;
        const BuildAdditionalStreamedScenes = 1 << 3;
        const AcceptExternalModificationsToPlayer = 1 << 4;
        const InstallInBuildFolder = 1 << 5;
        const CleanBuildCache = 1 << 6;
        const ConnectWithProfiler = 1 << 7;
        const AllowDebugging = 1 << 8;
        const SymlinkSources = 1 << 9;
        const UncompressedAssetBundle = 1 << 10;
        const ConnectToHost = 1 << 11;
        const CustomConnectionID = 1 << 12;
        const BuildScriptsOnly = 1 << 13;
        const PatchPackage = 1 << 14;
        const CompressWithLz4 = 1 << 15;
        const CompressWithLz4HC = 1 << 16;
        const StrictMode = 1 << 17;
        const IncludeTestAssemblies = 1 << 18;
        const NoUniqueIdentifier = 1 << 19;
        const WaitForPlayerConnection = 1 << 20;
        const EnableCodeCoverage = 1 << 21;
        const EnableDeepProfilingSupport = 1 << 22;
        const DetailedBuildReport = 1 << 23;
        const ShaderLivelinkSupport = 1 << 24;
    }
}

impl BuildFlags {
    /// Union of every flag whose name is an option key
    pub fn from_options(options: &OptionMap) -> Self {
        BuildFlags::all()
            .iter_names()
            .filter(|(name, _)| options.contains(name))
            .fold(BuildFlags::empty(), |acc, (_, flag)| acc | flag)
    }

    /// Names of the flags that are set, in declaration order
    pub fn names(&self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flag_options() {
        let options = OptionMap::new()
            .with_option("buildTarget", "Android")
            .with_option("customBuildPath", "/tmp/out");
        assert_eq!(BuildFlags::from_options(&options), BuildFlags::empty());
    }

    #[test]
    fn test_union_of_present_names() {
        let options = OptionMap::new()
            .with_option("Development", "")
            .with_option("AllowDebugging", "true")
            .with_option("CompressWithLz4HC", "");

        let flags = BuildFlags::from_options(&options);
        assert_eq!(
            flags,
            BuildFlags::Development | BuildFlags::AllowDebugging | BuildFlags::CompressWithLz4HC
        );
        assert_eq!(
            flags.names(),
            vec!["Development", "AllowDebugging", "CompressWithLz4HC"]
        );
    }

    #[test]
    fn test_presence_not_value_enables_flag() {
        // "false" is a value like any other; the key being present is what counts.
        let options = OptionMap::new().with_option("Development", "false");
        assert!(BuildFlags::from_options(&options).contains(BuildFlags::Development));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let options = OptionMap::new()
            .with_option("development", "")
            .with_option("strictmode", "");
        assert!(BuildFlags::from_options(&options).is_empty());
    }

    #[test]
    fn test_every_flag_is_reachable_by_name() {
        let options: OptionMap = BuildFlags::all()
            .iter_names()
            .map(|(name, _)| (name, ""))
            .collect();
        assert_eq!(BuildFlags::from_options(&options), BuildFlags::all());
    }
}
