//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Result;

use super::types::{config_file_names, FileConfig};
use super::validation::validate_config;

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<FileConfig> {
    info!(path = %path.display(), "loading config");

    let content = std::fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&content)?;

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Find configuration file in directory or parent directories.
///
/// At each directory level the search checks:
///   1. `<dir>/<name>`          (e.g. `liftoff.toml`)
///   2. `<dir>/.github/<name>`  (e.g. `.github/liftoff.toml`)
///
/// The first match wins. Parents are walked until the filesystem root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.is_file() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }

            let github_path = current.join(".github").join(name);
            if github_path.is_file() {
                info!(path = %github_path.display(), "found config file in .github/");
                return Some(github_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load the nearest configuration file, or defaults when there is none.
///
/// A file that exists but does not parse is an error, not a fallback.
pub fn load_config_or_default(dir: &Path) -> Result<(FileConfig, Option<PathBuf>)> {
    match find_config(dir) {
        Some(path) => {
            let config = load_config(&path)?;
            Ok((config, Some(path)))
        }
        None => {
            debug!(dir = %dir.display(), "no config found, using defaults");
            Ok((FileConfig::default(), None))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LiftoffError;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("liftoff.toml");
        std::fs::write(&config_path, "[backend]\ncommand = \"editor\"\n").unwrap();

        assert_eq!(find_config(temp.path()).unwrap(), config_path);
    }

    #[test]
    fn test_find_config_in_parent() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("liftoff.toml");
        std::fs::write(&config_path, "").unwrap();
        let nested = temp.path().join("Assets").join("Scenes");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config(&nested).unwrap(), config_path);
    }

    #[test]
    fn test_find_config_in_github_dir() {
        let temp = TempDir::new().unwrap();
        let github_dir = temp.path().join(".github");
        std::fs::create_dir_all(&github_dir).unwrap();
        let config_path = github_dir.join("liftoff.toml");
        std::fs::write(&config_path, "").unwrap();

        assert_eq!(find_config(temp.path()).unwrap(), config_path);
    }

    #[test]
    fn test_root_level_preferred_over_github_dir() {
        let temp = TempDir::new().unwrap();
        let root_path = temp.path().join("liftoff.toml");
        let github_dir = temp.path().join(".github");
        std::fs::create_dir_all(&github_dir).unwrap();
        std::fs::write(&root_path, "").unwrap();
        std::fs::write(github_dir.join("liftoff.toml"), "").unwrap();

        assert_eq!(find_config(temp.path()).unwrap(), root_path);
    }

    #[test]
    fn test_load_config() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("liftoff.toml");
        std::fs::write(
            &config_path,
            "[options]\nbuildTarget = \"WebGL\"\n\n[extension]\nenabled = false\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.options.get("buildTarget").unwrap(), "WebGL");
        assert!(!config.extension.enabled);
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("liftoff.toml");
        std::fs::write(&config_path, "[backend\ncommand = ").unwrap();

        let err = load_config(&config_path).unwrap_err();
        assert!(matches!(err, LiftoffError::Toml(_)));
        assert_eq!(err.exit_code(), crate::exit_codes::CONFIG_ERROR);
    }

    #[test]
    fn test_load_config_or_default_without_file() {
        let temp = TempDir::new().unwrap();
        let (config, path) = load_config_or_default(temp.path()).unwrap();
        assert!(path.is_none());
        assert_eq!(config.backend.command, "liftoff-backend");
    }
}
