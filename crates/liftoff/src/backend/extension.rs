//! Content extension executable

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use liftoff_core::config::ExtensionConfig;
use liftoff_core::{ContentExtension, Result};

use super::process::BackendProcess;
use super::protocol::Action;

/// Content build step provided by an installed executable
#[derive(Debug, Clone)]
pub struct ExternalContentExtension {
    name: String,
    process: BackendProcess,
}

impl ExternalContentExtension {
    pub fn new(name: impl Into<String>, process: BackendProcess) -> Self {
        Self {
            name: name.into(),
            process,
        }
    }

    /// Look up the configured executable. `None` when disabled or not installed.
    pub fn detect(config: &ExtensionConfig, project_path: &Path) -> Option<Self> {
        if !config.enabled {
            debug!("content extension disabled in config");
            return None;
        }

        let path = resolve(&config.command)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| config.command.clone());
        debug!(path = %path.display(), "found content extension");
        Some(Self::new(name, BackendProcess::new(path, project_path)))
    }
}

fn resolve(command: &str) -> Option<PathBuf> {
    let candidate = Path::new(command);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    which::which(command).ok()
}

#[async_trait]
impl ContentExtension for ExternalContentExtension {
    fn name(&self) -> &str {
        &self.name
    }

    async fn clean_content(&self) -> Result<()> {
        self.process
            .call(Action::CleanContent, serde_json::Value::Null, None)
            .await?;
        Ok(())
    }

    async fn build_content(&self) -> Result<()> {
        self.process
            .call(Action::BuildContent, serde_json::Value::Null, None)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_disabled_extension_is_not_detected() {
        let config = ExtensionConfig {
            command: "sh".into(),
            enabled: false,
        };
        assert!(ExternalContentExtension::detect(&config, Path::new(".")).is_none());
    }

    #[test]
    fn test_missing_extension_is_not_detected() {
        let config = ExtensionConfig {
            command: "liftoff-content-that-does-not-exist".into(),
            enabled: true,
        };
        assert!(ExternalContentExtension::detect(&config, Path::new(".")).is_none());
    }

    #[test]
    fn test_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("addressables");
        std::fs::write(&path, "").unwrap();

        let config = ExtensionConfig {
            command: path.to_string_lossy().into_owned(),
            enabled: true,
        };
        let extension = ExternalContentExtension::detect(&config, dir.path()).unwrap();
        assert_eq!(extension.name(), "addressables");

        std::fs::remove_file(&path).unwrap();
        assert!(ExternalContentExtension::detect(&config, dir.path()).is_none());
    }
}
