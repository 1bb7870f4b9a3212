//! Subcommand implementations.

use crate::input;
use relharmony_config::{AppConfig, ConfigError};
use relharmony_engine::{SanitizeOptions, sanitize_markdown};
use std::path::{Path, PathBuf};

pub mod analyze;
pub mod audit;
pub mod config_cmd;
pub mod extract;
pub mod judge;
pub mod split;
pub mod versions;

/// Global options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub json: bool,
    pub config_path: Option<PathBuf>,
}

impl Context {
    pub fn new(json: bool, config_path: Option<PathBuf>) -> Self {
        Self { json, config_path }
    }

    /// Config file in effect: `--config` if given, else the default location.
    pub fn config_path(&self) -> PathBuf {
        self.config_path.clone().unwrap_or_else(AppConfig::config_path)
    }

    /// Load the effective configuration, environment overrides included.
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        AppConfig::load_with_env(&self.config_path())
    }

    /// Read a report and run it through the configured sanitizer, as
    /// `analyze` does before the engine sees it.
    pub async fn read_report(&self, path: &Path) -> Result<String, Box<dyn std::error::Error>> {
        let config = self.load_config()?;
        let raw = input::read_input(path).await?;
        Ok(sanitize_markdown(&raw, &sanitize_options(&config)))
    }
}

pub fn sanitize_options(config: &AppConfig) -> SanitizeOptions {
    SanitizeOptions {
        escape_backslashes: config.sanitize.escape_backslashes,
        tab_width: config.sanitize.tab_width,
        strip_newlines: config.sanitize.strip_newlines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relharmony_core::SectionKey;
    use relharmony_engine::extract_sections;

    #[tokio::test]
    async fn read_report_normalizes_crlf_input() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("report.md");
        tokio::fs::write(
            &report,
            "**Key Stakeholders:**\r\n---\r\n**Engineering**\r\n\r\nFunctional Group\r\nAlice\r\n\r\n\
             Approver\r\nDan\r\n\r\nFunctional Lead\r\nErin\r\n",
        )
        .await
        .unwrap();
        let ctx = Context::new(false, Some(dir.path().join("missing.toml")));

        let text = ctx.read_report(&report).await.unwrap();
        assert!(!text.contains('\r'));
        let sections = extract_sections(&text);
        assert!(sections.get(SectionKey::KeyStakeholders).is_found());
    }

    #[test]
    fn sanitize_options_follow_config() {
        let mut config = AppConfig::default();
        assert_eq!(sanitize_options(&config), SanitizeOptions::default());
        config.sanitize.tab_width = 2;
        config.sanitize.escape_backslashes = false;
        let options = sanitize_options(&config);
        assert_eq!(options.tab_width, 2);
        assert!(!options.escape_backslashes);
    }
}
