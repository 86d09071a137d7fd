//! Scene catalogs
//!
//! The editor keeps the build scene list in
//! `ProjectSettings/EditorBuildSettings.asset`, a YAML document with engine
//! specific directives that plain YAML parsers reject. Those directive lines are
//! stripped before parsing.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{LiftoffError, Result};
use crate::traits::SceneCatalog;

/// Location of the build settings asset, relative to the project root
pub const BUILD_SETTINGS_PATH: &str = "ProjectSettings/EditorBuildSettings.asset";

/// Scenes read from the project's build settings asset
#[derive(Debug, Clone)]
pub struct BuildSettingsCatalog {
    path: PathBuf,
}

impl BuildSettingsCatalog {
    pub fn for_project(project_path: &Path) -> Self {
        Self {
            path: project_path.join(BUILD_SETTINGS_PATH),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SceneCatalog for BuildSettingsCatalog {
    fn enabled_scenes(&self) -> Result<Vec<String>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| LiftoffError::ProjectFile {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let scenes = parse_enabled_scenes(&content).map_err(|e| LiftoffError::ProjectFile {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        debug!(path = %self.path.display(), count = scenes.len(), "loaded enabled scenes");
        Ok(scenes)
    }
}

/// A fixed scene list
#[derive(Debug, Clone, Default)]
pub struct StaticScenes(pub Vec<String>);

impl SceneCatalog for StaticScenes {
    fn enabled_scenes(&self) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(rename = "EditorBuildSettings")]
    settings: Settings,
}

#[derive(Debug, Deserialize)]
struct Settings {
    #[serde(rename = "m_Scenes", default)]
    scenes: Vec<SceneEntry>,
}

#[derive(Debug, Deserialize)]
struct SceneEntry {
    enabled: u8,
    path: String,
}

/// Enabled scene paths from a build settings document, in file order
pub fn parse_enabled_scenes(content: &str) -> std::result::Result<Vec<String>, serde_yaml::Error> {
    let yaml: String = content
        .lines()
        .filter(|line| !line.starts_with('%') && !line.starts_with("---"))
        .map(|line| format!("{line}\n"))
        .collect();

    let document: Document = serde_yaml::from_str(&yaml)?;
    Ok(document
        .settings
        .scenes
        .into_iter()
        .filter(|scene| scene.enabled != 0)
        .map(|scene| scene.path)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SETTINGS: &str = r#"%YAML 1.1
%TAG !u! tag:unity3d.com,2011:
--- !u!1045 &1
EditorBuildSettings:
  m_ObjectHideFlags: 0
  serializedVersion: 2
  m_Scenes:
  - enabled: 1
    path: Assets/Scenes/Boot.unity
    guid: 9fc0d4010bbf28b4594072e72b8655ab
  - enabled: 0
    path: Assets/Scenes/Sandbox.unity
    guid: 2cda990e2423bbf4892e6590ba056729
  - enabled: 1
    path: Assets/Scenes/Main.unity
    guid: 8c9cfa26abfee488c85f1582747f6a02
  m_configObjects: {}
"#;

    #[test]
    fn test_parse_enabled_scenes() {
        let scenes = parse_enabled_scenes(SETTINGS).unwrap();
        assert_eq!(
            scenes,
            vec!["Assets/Scenes/Boot.unity", "Assets/Scenes/Main.unity"]
        );
    }

    #[test]
    fn test_parse_empty_scene_list() {
        let content = "EditorBuildSettings:\n  serializedVersion: 2\n  m_Scenes: []\n";
        assert!(parse_enabled_scenes(content).unwrap().is_empty());
    }

    #[test]
    fn test_catalog_reads_project_file() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("ProjectSettings")).unwrap();
        std::fs::write(temp.path().join(BUILD_SETTINGS_PATH), SETTINGS).unwrap();

        let catalog = BuildSettingsCatalog::for_project(temp.path());
        assert_eq!(catalog.enabled_scenes().unwrap().len(), 2);
    }

    #[test]
    fn test_catalog_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = BuildSettingsCatalog::for_project(temp.path())
            .enabled_scenes()
            .unwrap_err();
        assert!(matches!(err, LiftoffError::ProjectFile { .. }));
    }
}
