// src/core/config_manager.rs
//! Application configuration: optional YAML file with per-environment sections

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::FsOps;
use crate::export::ExportOptions;

pub const DEFAULT_CONFIG_FILE: &str = "cvdraft.yaml";
pub const DEFAULT_STORAGE_KEY: &str = "main-store";
pub const DEFAULT_PROFILE_ID: &str = "local";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub output_path: PathBuf,
    pub profile_id: String,
    pub storage_key: String,
    pub compile_pdf: bool,
    pub export: ExportOptions,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data/resume.db"),
            output_path: PathBuf::from("out"),
            profile_id: DEFAULT_PROFILE_ID.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            compile_pdf: true,
            export: ExportOptions::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: Option<AppConfig>,
    #[serde(default)]
    production: Option<AppConfig>,
}

pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from `path` (or `cvdraft.yaml`), falling back to defaults
    pub fn load(path: Option<&Path>) -> Result<AppConfig> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            Self::parse(&content, &environment)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?
        } else if path.is_some() {
            anyhow::bail!("Config file not found: {}", config_path.display());
        } else {
            info!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
            AppConfig::default()
        };

        if let Ok(db) = std::env::var("CVDRAFT_DATABASE") {
            config.database_path = PathBuf::from(db);
        }

        let base = std::env::current_dir().context("Failed to get current directory")?;
        config.database_path = FsOps::normalize_path(&base, &config.database_path);
        config.output_path = FsOps::normalize_path(&base, &config.output_path);
        config.logging.file = config
            .logging
            .file
            .map(|file| FsOps::normalize_path(&base, &file));

        Ok(config)
    }

    /// Pick the section for `environment`; unknown environments use `local`
    pub fn parse(content: &str, environment: &str) -> Result<AppConfig> {
        let file: ConfigFile = serde_yaml::from_str(content).context("Invalid YAML")?;
        let selected = match environment {
            "production" => file.production,
            _ => file.local,
        };
        Ok(selected.unwrap_or_default())
    }

    fn get_environment() -> String {
        std::env::var("CVDRAFT_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub async fn ensure_directories(config: &AppConfig) -> Result<()> {
        FsOps::ensure_dir_exists(&config.output_path).await?;
        if let Some(db_parent) = config.database_path.parent() {
            FsOps::ensure_dir_exists(db_parent).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
local:
  database_path: data/dev.db
  profile_id: jane
  compile_pdf: false
  export:
    paper_size: Letter
    scale: 1.0
    file_name: jane.pdf
production:
  database_path: /var/lib/cvdraft/resume.db
  logging:
    level: warn
    json: true
"#;

    #[test]
    fn test_parse_selects_local_section() {
        let config = ConfigManager::parse(SAMPLE, "local").unwrap();
        assert_eq!(config.database_path, PathBuf::from("data/dev.db"));
        assert_eq!(config.profile_id, "jane");
        assert!(!config.compile_pdf);
        assert_eq!(config.export.paper_size, "Letter");
        assert_eq!(config.export.file_name, "jane.pdf");
        assert_eq!(config.export.margins, 0.0);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_parse_selects_production_section() {
        let config = ConfigManager::parse(SAMPLE, "production").unwrap();
        assert_eq!(config.database_path, PathBuf::from("/var/lib/cvdraft/resume.db"));
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.json);
        assert_eq!(config.profile_id, DEFAULT_PROFILE_ID);
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let config = ConfigManager::parse("local:\n  profile_id: x\n", "production").unwrap();
        assert_eq!(config.profile_id, DEFAULT_PROFILE_ID);
        assert!(config.compile_pdf);
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        assert!(ConfigManager::parse("local: [unclosed", "local").is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(ConfigManager::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_load_from_file_resolves_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.yaml");
        std::fs::write(&path, "local:\n  output_path: exports\n").unwrap();

        let config = ConfigManager::load(Some(&path)).unwrap();
        assert!(config.output_path.is_absolute());
        assert!(config.output_path.ends_with("exports"));
    }
}
