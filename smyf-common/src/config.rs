//! Configuration loading and database path resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the store under the user's home directory
pub const DEFAULT_DATABASE_FILE: &str = "smyf-refresh2024.db";

/// Environment variable overriding the database path
pub const DATABASE_ENV_VAR: &str = "SMYF_DATABASE";

/// Optional TOML config file contents
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Path to the store file
    pub database_path: Option<PathBuf>,
}

impl TomlConfig {
    /// Parse a config file; missing keys fall back to `None`
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Resolves the store file location
///
/// Priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. `<home>/smyf-refresh2024.db` (fallback)
#[derive(Debug, Clone)]
pub struct DatabasePathResolver {
    cli_arg: Option<PathBuf>,
    env_var_name: String,
    config_file: Option<PathBuf>,
}

impl DatabasePathResolver {
    pub fn new(cli_arg: Option<PathBuf>) -> Self {
        Self {
            cli_arg,
            env_var_name: DATABASE_ENV_VAR.to_string(),
            config_file: default_config_file(),
        }
    }

    /// Use a specific config file instead of the platform default
    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    pub fn resolve(&self) -> PathBuf {
        // Priority 1: Command-line argument
        if let Some(path) = &self.cli_arg {
            debug!("Database path from command line: {}", path.display());
            return path.clone();
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var(&self.env_var_name) {
            if !path.is_empty() {
                debug!("Database path from {}: {}", self.env_var_name, path);
                return PathBuf::from(path);
            }
        }

        // Priority 3: TOML config file
        if let Some(config_path) = &self.config_file {
            if config_path.exists() {
                match TomlConfig::load(config_path) {
                    Ok(TomlConfig {
                        database_path: Some(path),
                    }) => {
                        debug!("Database path from {}", config_path.display());
                        return path;
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Ignoring config file: {}", e),
                }
            }
        }

        // Priority 4: home directory default
        default_database_path()
    }
}

/// `<config_dir>/smyf/config.toml`, if the platform has a config directory
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("smyf").join("config.toml"))
}

/// `<home>/smyf-refresh2024.db`, or the working directory when no home exists
pub fn default_database_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DATABASE_FILE)
}
