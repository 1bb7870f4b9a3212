//! Configuration loading, validation, and management for relharmony.
//!
//! Loads configuration from `~/.relharmony/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use relharmony_core::{PairingStrategy, Product};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.relharmony/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Product assumed when a request does not name one (`WST` or `TM`)
    #[serde(default = "default_product")]
    pub default_product: String,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub sanitize: SanitizeConfig,
}

fn default_product() -> String {
    "WST".into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// `per_fragment` or `positional`
    #[serde(default)]
    pub pairing: PairingStrategy,

    /// Characters of the harmonized document echoed to the log
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

fn default_preview_chars() -> usize {
    1000
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pairing: PairingStrategy::default(),
            preview_chars: default_preview_chars(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SanitizeConfig {
    #[serde(default = "default_true")]
    pub escape_backslashes: bool,

    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Drop line feeds too, as the legacy request sanitizer did
    #[serde(default)]
    pub strip_newlines: bool,
}

fn default_true() -> bool {
    true
}
fn default_tab_width() -> usize {
    4
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            escape_backslashes: true,
            tab_width: default_tab_width(),
            strip_newlines: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.relharmony/config.toml).
    ///
    /// Environment variables override file values:
    /// - `RELHARMONY_PRODUCT`
    /// - `RELHARMONY_PAIRING`
    /// - `RELHARMONY_PREVIEW_CHARS`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(&Self::config_path())
    }

    /// Load from `path`, then apply environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(product) = lookup("RELHARMONY_PRODUCT") {
            self.default_product = product;
        }

        if let Some(pairing) = lookup("RELHARMONY_PAIRING") {
            self.pipeline.pairing = pairing
                .parse()
                .map_err(|e| ConfigError::ValidationError(format!("RELHARMONY_PAIRING: {e}")))?;
        }

        if let Some(chars) = lookup("RELHARMONY_PREVIEW_CHARS") {
            self.pipeline.preview_chars = chars.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "RELHARMONY_PREVIEW_CHARS must be a positive integer, got {chars:?}"
                ))
            })?;
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".relharmony")
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.default_product
            .parse::<Product>()
            .map_err(|e| ConfigError::ValidationError(format!("default_product: {e}")))?;

        if self.pipeline.preview_chars == 0 {
            return Err(ConfigError::ValidationError(
                "pipeline.preview_chars must be > 0".into(),
            ));
        }

        if !(1..=16).contains(&self.sanitize.tab_width) {
            return Err(ConfigError::ValidationError(
                "sanitize.tab_width must be between 1 and 16".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `config init`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }

    /// Write the default configuration to `path`, creating parent
    /// directories. An existing file is kept unless `force` is set.
    pub fn write_default(path: &Path, force: bool) -> Result<(), ConfigError> {
        let write_error = |reason: String| ConfigError::WriteError {
            path: path.to_path_buf(),
            reason,
        };

        if path.exists() && !force {
            return Err(write_error("file already exists".into()));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }
        std::fs::write(path, Self::default_toml()).map_err(|e| write_error(e.to_string()))?;

        tracing::info!("Wrote default config to {}", path.display());
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_product: default_product(),
            pipeline: PipelineConfig::default(),
            sanitize: SanitizeConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("Failed to write config file at {path}: {reason}")]
    WriteError { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.default_product, "WST");
        assert_eq!(config.pipeline.pairing, PairingStrategy::PerFragment);
        assert_eq!(config.pipeline.preview_chars, 1000);
        assert!(config.sanitize.escape_backslashes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: AppConfig = toml::from_str("[pipeline]\npairing = \"positional\"\n").unwrap();
        assert_eq!(parsed.pipeline.pairing, PairingStrategy::Positional);
        assert_eq!(parsed.pipeline.preview_chars, 1000);
        assert_eq!(parsed.sanitize.tab_width, 4);
        assert_eq!(parsed.default_product, "WST");
    }

    #[test]
    fn invalid_values_rejected() {
        let bad_tab = AppConfig {
            sanitize: SanitizeConfig {
                tab_width: 0,
                ..SanitizeConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(bad_tab.validate().is_err());

        let bad_preview = AppConfig {
            pipeline: PipelineConfig {
                preview_chars: 0,
                ..PipelineConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(bad_preview.validate().is_err());

        let bad_product = AppConfig {
            default_product: "ABC".into(),
            ..AppConfig::default()
        };
        assert!(bad_product.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), AppConfig::default());
    }

    #[test]
    fn load_from_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(&path, "default_product = \"tm\"\n[sanitize]\ntab_width = 2\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.default_product, "tm");
        assert_eq!(config.sanitize.tab_width, 2);

        std::fs::write(&path, "[sanitize]\ntab_width = 40\n").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ValidationError(_))
        ));

        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = AppConfig::default();
        config
            .apply_env_overrides(env(&[
                ("RELHARMONY_PRODUCT", "TM"),
                ("RELHARMONY_PAIRING", "positional"),
                ("RELHARMONY_PREVIEW_CHARS", " 250 "),
            ]))
            .unwrap();
        assert_eq!(config.default_product, "TM");
        assert_eq!(config.pipeline.pairing, PairingStrategy::Positional);
        assert_eq!(config.pipeline.preview_chars, 250);
    }

    #[test]
    fn pairing_spellings_agree_across_file_and_env() {
        let mut config = AppConfig::default();
        config
            .apply_env_overrides(env(&[("RELHARMONY_PAIRING", "Positional")]))
            .unwrap();
        assert_eq!(config.pipeline.pairing, PairingStrategy::Positional);
        config
            .apply_env_overrides(env(&[("RELHARMONY_PAIRING", "per-fragment")]))
            .unwrap();
        assert_eq!(config.pipeline.pairing, PairingStrategy::PerFragment);
        assert!(config.validate().is_ok());

        let parsed: AppConfig = toml::from_str("[pipeline]\npairing = \"per-fragment\"\n").unwrap();
        assert_eq!(parsed.pipeline.pairing, PairingStrategy::PerFragment);
    }

    #[test]
    fn unknown_pairing_is_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env_overrides(env(&[("RELHARMONY_PAIRING", "zip")]))
            .unwrap_err();
        assert!(err.to_string().contains("RELHARMONY_PAIRING"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[pipeline]\npairing = \"zip\"\n").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn env_override_with_bad_number_is_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env_overrides(env(&[("RELHARMONY_PREVIEW_CHARS", "lots")]))
            .unwrap_err();
        assert!(err.to_string().contains("RELHARMONY_PREVIEW_CHARS"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("per_fragment"));
        assert!(toml_str.contains("[sanitize]"));
        assert!(toml_str.contains("preview_chars = 1000"));
    }

    #[test]
    fn write_default_respects_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        AppConfig::write_default(&path, false).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), AppConfig::default());

        assert!(matches!(
            AppConfig::write_default(&path, false),
            Err(ConfigError::WriteError { .. })
        ));
        assert!(AppConfig::write_default(&path, true).is_ok());
    }
}
