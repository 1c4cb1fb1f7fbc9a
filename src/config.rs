//! Configuration: named documentation sources, site branding and cache sizing.
//!
//! Configuration is read from a TOML file. Every field has a default, so a missing
//! file (or an empty one) yields a working setup pointed at the Hypixel API Reborn docs.

use crate::error::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV_VAR: &str = "DOCGEN_INDEX_CONFIG";

/// Name of the source used when a request does not specify one.
pub const DEFAULT_SOURCE: &str = "master";

const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/Hypixel-API-Reborn/hypixel-api-reborn/docs/master.json";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Branding and link targets for rendered documentation.
    pub site: SiteConfig,
    /// Named sources: name → docgen JSON URL.
    pub sources: BTreeMap<String, String>,
    /// Source used when a request names none.
    pub default_source: String,
    /// Maximum number of built documentation trees kept in memory.
    pub cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            sources: BTreeMap::from([(DEFAULT_SOURCE.to_string(), DEFAULT_SOURCE_URL.to_string())]),
            default_source: DEFAULT_SOURCE.to_string(),
            cache_size: 16,
        }
    }
}

/// Site branding used for links and embeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    /// Root of the hosted documentation site. `None` disables element links.
    pub base_url: Option<String>,
    pub color: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Hypixel API • Reborn".to_string(),
            base_url: Some("https://hypixel-api-reborn.github.io".to_string()),
            color: 0xff8c00,
        }
    }
}

impl Config {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration at {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration at {}", path.display()))
    }

    /// Load configuration from `$DOCGEN_INDEX_CONFIG` or the user config directory,
    /// falling back to defaults when no file exists.
    pub fn load_or_default() -> Result<Self> {
        let Some(path) = Self::default_path() else {
            return Ok(Self::default());
        };

        if path.exists() {
            tracing::info!("Loading configuration from {}", path.display());
            Self::load(&path)
        } else {
            tracing::debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// The configuration file location, if one can be determined.
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("docgen-index").join("config.toml"))
    }

    /// Resolve a source argument to a URL.
    ///
    /// Known source names map to their configured URL; anything else is taken as
    /// a URL verbatim. `None` selects the default source.
    pub fn source_url<'a>(&'a self, source: Option<&'a str>) -> &'a str {
        let source = source.unwrap_or(self.default_source.as_str());
        self.sources.get(source).map_or(source, String::as_str)
    }
}
