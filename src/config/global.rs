//! User configuration for brackt.
//!
//! The configuration file (`~/.brackt/config.toml` by default) sets defaults
//! for the template pipeline. Every value can be overridden per invocation
//! by the matching CLI flag.
//!
//! # Configuration File Location
//!
//! Resolution order:
//!
//! 1. the `--config <PATH>` flag
//! 2. the `BRACKT_CONFIG` environment variable
//! 3. `~/.brackt/config.toml` (`%LOCALAPPDATA%\brackt\config.toml` on Windows)
//!
//! A missing file yields the defaults. A file that exists but does not parse
//! is an error.
//!
//! # File Format
//!
//! ```toml
//! [templates]
//! strict = false         # fail on missing variables
//! escape_html = true     # HTML-escape interpolated values
//! wrap_paragraph = true  # wrap translated output in <p>
//!
//! [cache]
//! capacity = 64          # compiled templates kept per run
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::BracktError;
use crate::templating::{DEFAULT_CACHE_CAPACITY, TemplateOptions};

/// Environment variable naming an alternative configuration file.
pub const CONFIG_ENV_VAR: &str = "BRACKT_CONFIG";

/// brackt configuration loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Template pipeline defaults
    pub templates: TemplateOptions,

    /// Compiled template cache settings
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of compiled templates kept in memory
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The default path cannot be determined
    /// - The file exists but cannot be read
    /// - The file contains invalid TOML syntax
    pub async fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional explicit path.
    ///
    /// An explicit path must exist; without one this behaves like [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit path does not exist, or if the
    /// selected file cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(BracktError::ConfigNotFound {
                        path: path.display().to_string(),
                    }
                    .into());
                }
                Self::load_from(&path).await
            }
            None => Self::load().await,
        }
    }

    /// Load configuration from a specific file path.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use brackt::config::Config;
    /// use std::path::Path;
    ///
    /// # async fn example() -> anyhow::Result<()> {
    /// let config = Config::load_from(Path::new("/custom/config.toml")).await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (permissions, not found, etc.)
    /// - The file contains invalid TOML syntax
    /// - The TOML structure doesn't match the expected schema
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|e| BracktError::ConfigError {
            path: path.display().to_string(),
            reason: e.message().to_string(),
        })?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Default configuration path.
    ///
    /// `BRACKT_CONFIG` wins over the platform location.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }

        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("brackt")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".brackt")
        };

        Ok(config_dir.join("config.toml"))
    }
}
