use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analysis;
use crate::catalog;
use crate::error::ConfigError;

/// Environment variable that overrides the configured API key
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Application configuration loaded from ~/.config/gutenbergctl/config.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub groq: GroqConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Configuration for the completion API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    /// API key; the GROQ_API_KEY environment variable takes precedence
    pub api_key: Option<String>,

    #[serde(default = "default_groq_base_url")]
    pub base_url: String,
}

fn default_groq_base_url() -> String {
    analysis::DEFAULT_BASE_URL.to_string()
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_groq_base_url(),
        }
    }
}

/// Configuration for the e-book catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,
}

fn default_catalog_base_url() -> String {
    catalog::DEFAULT_BASE_URL.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_base_url(),
        }
    }
}

/// Configuration for the local book cache
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheConfig {
    /// Cache file location (default: <data dir>/gutenbergctl/books.json)
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `path`, or the default path if none is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&Self::config_path()?),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("gutenbergctl").join("config.toml"))
    }

    /// Resolve the API key from the environment, falling back to the config file
    pub fn api_key(&self) -> Result<String, ConfigError> {
        resolve_api_key(std::env::var(API_KEY_ENV).ok(), self.groq.api_key.as_deref())
    }

    /// Get the cache path, with CLI override taking precedence
    pub fn cache_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        match cli_override.or(self.cache.path.as_deref()) {
            Some(path) => Ok(path.to_path_buf()),
            None => crate::cache::BookCache::default_path(),
        }
    }
}

/// Pick the first non-blank key, environment first
fn resolve_api_key(from_env: Option<String>, from_file: Option<&str>) -> Result<String, ConfigError> {
    from_env
        .filter(|key| !key.trim().is_empty())
        .or_else(|| {
            from_file
                .filter(|key| !key.trim().is_empty())
                .map(String::from)
        })
        .map(|key| key.trim().to_string())
        .ok_or(ConfigError::MissingApiKey)
}
