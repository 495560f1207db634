//! Configuration loading and resolution
//!
//! Every setting is resolved in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory name used under the platform config and data directories
pub const APP_DIR: &str = "record-catalog";

pub const ENV_DATABASE_URL: &str = "CATALOG_DATABASE_URL";
pub const ENV_BIND: &str = "CATALOG_BIND";
pub const ENV_UPLOAD_DIR: &str = "CATALOG_UPLOAD_DIR";
pub const ENV_STORE_NAME: &str = "CATALOG_STORE_NAME";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub database_url: Option<String>,
    pub bind: Option<String>,
    pub upload_dir: Option<PathBuf>,
    pub store_name: Option<String>,
}

/// Values supplied by a higher-priority source (command line or environment)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub database_url: Option<String>,
    pub bind: Option<String>,
    pub upload_dir: Option<PathBuf>,
    pub store_name: Option<String>,
}

impl ConfigOverrides {
    /// Read overrides from `CATALOG_*` environment variables
    pub fn from_env() -> Self {
        Self {
            database_url: non_empty_env(ENV_DATABASE_URL),
            bind: non_empty_env(ENV_BIND),
            upload_dir: non_empty_env(ENV_UPLOAD_DIR).map(PathBuf::from),
            store_name: non_empty_env(ENV_STORE_NAME),
        }
    }

    /// Fill unset values from `lower`, keeping values already present
    pub fn or(self, lower: ConfigOverrides) -> Self {
        Self {
            database_url: self.database_url.or(lower.database_url),
            bind: self.bind.or(lower.bind),
            upload_dir: self.upload_dir.or(lower.upload_dir),
            store_name: self.store_name.or(lower.store_name),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// OS-dependent compiled defaults
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub data_dir: PathBuf,
    pub bind: String,
    pub store_name: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        let data_dir = dirs::data_local_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("./catalog_data"));

        Self {
            data_dir,
            bind: "127.0.0.1:3000".to_string(),
            store_name: "Record Store".to_string(),
        }
    }

    pub fn database_url(&self) -> String {
        format!(
            "sqlite://{}?mode=rwc",
            self.data_dir.join("catalog.db").display()
        )
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.data_dir.join("images")
    }
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub database_url: String,
    pub bind: String,
    pub upload_dir: PathBuf,
    pub store_name: String,
}

impl CatalogConfig {
    /// Merge the sources; `overrides` already combines command line and environment
    pub fn resolve(
        overrides: ConfigOverrides,
        file: TomlConfig,
        defaults: &CompiledDefaults,
    ) -> Self {
        Self {
            database_url: overrides
                .database_url
                .or(file.database_url)
                .unwrap_or_else(|| defaults.database_url()),
            bind: overrides
                .bind
                .or(file.bind)
                .unwrap_or_else(|| defaults.bind.clone()),
            upload_dir: overrides
                .upload_dir
                .or(file.upload_dir)
                .unwrap_or_else(|| defaults.upload_dir()),
            store_name: overrides
                .store_name
                .or(file.store_name)
                .unwrap_or_else(|| defaults.store_name.clone()),
        }
    }

    /// Resolve from command-line values, the environment, and a config file
    ///
    /// `config_path` of `None` means the platform default location.
    pub fn load(cli: ConfigOverrides, config_path: Option<&Path>) -> Result<Self> {
        let overrides = cli.or(ConfigOverrides::from_env());

        let file = match config_path
            .map(Path::to_path_buf)
            .or_else(default_config_path)
        {
            Some(path) => load_toml_config(&path)?,
            None => TomlConfig::default(),
        };

        Ok(Self::resolve(
            overrides,
            file,
            &CompiledDefaults::for_current_platform(),
        ))
    }
}

/// Platform location of `config.toml` (e.g. `~/.config/record-catalog/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Load a TOML config file
///
/// A missing file yields the empty config; an unreadable or malformed file is an error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Loaded config file: {}", path.display());
    Ok(config)
}
