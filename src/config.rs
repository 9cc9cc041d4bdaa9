//! Configuration for lessonquiz.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (LESSONQUIZ_CATALOG)
//! 2. Project config file (.lessonquiz/config.yaml)
//! 3. User config file (<config dir>/lessonquiz/config.yaml)
//! 4. Defaults (built-in catalog, default session settings)
//!
//! Config file discovery:
//! - Searches current directory and parents for .lessonquiz/config.yaml
//! - The catalog path is relative to the project root (parent of .lessonquiz/)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::{BackwardSeekPolicy, SessionSettings};

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Environment variable overriding the catalog path
pub const CATALOG_ENV: &str = "LESSONQUIZ_CATALOG";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    /// Catalog file (relative to the project root)
    #[serde(default)]
    pub catalog: Option<String>,
    #[serde(default)]
    pub playback: Option<PlaybackConfig>,
    #[serde(default)]
    pub grading: Option<GradingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackConfig {
    pub replay_rewind_seconds: Option<f64>,
    pub seek_debounce_ms: Option<u64>,
    pub backward_seek: Option<BackwardSeekPolicy>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GradingConfig {
    pub fallback_hint: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Catalog file (None = built-in catalog)
    pub catalog: Option<PathBuf>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Session settings
    pub settings: SessionSettings,
}

impl ConfigFile {
    /// Merge file values over default session settings
    fn settings(&self) -> Result<SessionSettings> {
        let mut settings = SessionSettings::default();

        if let Some(ref playback) = self.playback {
            if let Some(rewind) = playback.replay_rewind_seconds {
                if !rewind.is_finite() || rewind < 0.0 {
                    anyhow::bail!(
                        "playback.replay_rewind_seconds must be a non-negative number, got {}",
                        rewind
                    );
                }
                settings.replay_rewind_seconds = rewind;
            }
            if let Some(ms) = playback.seek_debounce_ms {
                settings.seek_debounce_ms = ms;
            }
            if let Some(policy) = playback.backward_seek {
                settings.backward_seek = policy;
            }
        }

        if let Some(hint) = self.grading.as_ref().and_then(|g| g.fallback_hint.clone()) {
            settings.fallback_hint = hint;
        }

        Ok(settings)
    }
}

/// Find config file by searching current directory and parents, then the
/// user config directory
fn find_config_file() -> Option<PathBuf> {
    if let Ok(mut current) = std::env::current_dir() {
        loop {
            let config_path = current.join(".lessonquiz").join("config.yaml");
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }
    }

    let user_config = dirs::config_dir()?.join("lessonquiz").join("config.yaml");
    user_config.exists().then_some(user_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Load configuration from a specific (or no) config file
fn resolve(config_file: Option<PathBuf>) -> Result<ResolvedConfig> {
    let (catalog, settings) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        // Base directory is the parent of .lessonquiz/ (i.e., grandparent of config.yaml)
        let base_dir = config_path
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));

        let catalog = config.catalog.as_deref().map(|c| resolve_path(base_dir, c));
        let settings = config
            .settings()
            .with_context(|| format!("Invalid config file: {}", config_path.display()))?;
        (catalog, settings)
    } else {
        (None, SessionSettings::default())
    };

    let catalog = std::env::var(CATALOG_ENV).map(PathBuf::from).ok().or(catalog);

    Ok(ResolvedConfig {
        catalog,
        config_file,
        settings,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    resolve(find_config_file())
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

/// Load configuration from an explicit config file, bypassing discovery
pub fn load_from(path: &Path) -> Result<ResolvedConfig> {
    resolve(Some(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let config_dir = temp.path().join(".lessonquiz");
        std::fs::create_dir_all(&config_dir).unwrap();

        let config_path = config_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
catalog: lessons/catalog.yaml
playback:
  replay_rewind_seconds: 6
  backward_seek: relaxed
grading:
  fallback_hint: Have another look.
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.catalog.as_deref(), Some("lessons/catalog.yaml"));

        let settings = config.settings().unwrap();
        assert_eq!(settings.replay_rewind_seconds, 6.0);
        assert_eq!(settings.backward_seek, BackwardSeekPolicy::Relaxed);
        assert_eq!(settings.seek_debounce_ms, 100);
        assert_eq!(settings.fallback_hint, "Have another look.");
    }

    #[test]
    fn test_catalog_relative_to_project_root() {
        let temp = TempDir::new().unwrap();
        let config_dir = temp.path().join(".lessonquiz");
        std::fs::create_dir_all(&config_dir).unwrap();
        let config_path = config_dir.join("config.yaml");
        std::fs::write(&config_path, "version: \"1\"\ncatalog: catalog.yaml\n").unwrap();

        let resolved = load_from(&config_path).unwrap();
        if std::env::var(CATALOG_ENV).is_err() {
            assert_eq!(
                resolved.catalog.unwrap().file_name().unwrap(),
                "catalog.yaml"
            );
        }
        assert_eq!(resolved.config_file, Some(config_path));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: ConfigFile = serde_yaml::from_str("version: \"1\"\n").unwrap();
        assert_eq!(config.settings().unwrap(), SessionSettings::default());
    }

    #[test]
    fn test_invalid_rewind_rejected() {
        for value in ["-2", ".nan", ".inf"] {
            let yaml = format!("version: \"1\"\nplayback:\n  replay_rewind_seconds: {}\n", value);
            let config: ConfigFile = serde_yaml::from_str(&yaml).unwrap();
            assert!(config.settings().is_err(), "accepted {}", value);
        }

        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.yaml");
        std::fs::write(
            &config_path,
            "version: \"1\"\nplayback:\n  replay_rewind_seconds: -4\n",
        )
        .unwrap();

        let err = load_from(&config_path).unwrap_err();
        assert!(format!("{:#}", err).contains("replay_rewind_seconds"));
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
