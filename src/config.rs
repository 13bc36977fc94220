use crate::types::{Preset, SortKey};
use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_PER_PAGE: u8 = 9;

/// Settings read from `~/.config/gitfind/config.json`. The API token never
/// lives here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GitFindConfig {
    pub api_base: String,
    pub per_page: u8,
    pub default_preset: Preset,
    pub default_sort: SortKey,
    pub color: bool,
    pub user_agent: String,
}

impl Default for GitFindConfig {
    fn default() -> Self {
        GitFindConfig {
            api_base: DEFAULT_API_BASE.to_string(),
            per_page: DEFAULT_PER_PAGE,
            default_preset: Preset::Popular,
            default_sort: SortKey::Stars,
            color: true,
            user_agent: concat!("gitfind/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl GitFindConfig {
    /// Load the config file, falling back to defaults when it is missing or
    /// unusable.
    pub fn load() -> Self {
        let Some(config_path) = Self::config_path() else {
            warn!("HOME is not set, using default settings");
            return Self::default();
        };
        if !config_path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&config_path)
            .map_err(anyhow::Error::from)
            .and_then(|contents| Self::parse(&contents))
        {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring {}: {:#}", config_path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: GitFindConfig =
            serde_json::from_str(contents).context("config is not valid JSON")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.per_page) {
            return Err(anyhow!("per_page must be between 1 and 100, got {}", self.per_page));
        }
        if self.api_base.trim().is_empty() {
            return Err(anyhow!("api_base must not be empty"));
        }
        Ok(())
    }

    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path().ok_or_else(|| anyhow!("HOME is not set"))?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("can't create {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)
            .with_context(|| format!("can't write {}", config_path.display()))?;
        Ok(config_path)
    }

    pub fn config_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(PathBuf::from(home).join(".config").join("gitfind").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = GitFindConfig::parse(r#"{"per_page": 30, "default_preset": "trending"}"#).unwrap();
        assert_eq!(config.per_page, 30);
        assert_eq!(config.default_preset, Preset::Trending);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.default_sort, SortKey::Stars);
    }

    #[test]
    fn sort_keys_use_kebab_case() {
        let config = GitFindConfig::parse(r#"{"default_sort": "best-match"}"#).unwrap();
        assert_eq!(config.default_sort, SortKey::BestMatch);
    }

    #[test]
    fn out_of_range_page_size_is_rejected() {
        assert!(GitFindConfig::parse(r#"{"per_page": 0}"#).is_err());
        assert!(GitFindConfig::parse(r#"{"per_page": 101}"#).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(GitFindConfig::parse("not json").is_err());
    }
}
