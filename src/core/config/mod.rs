//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order; the first existing file wins:
//! 1. Explicit path (from `--config`), which must exist
//! 2. `$METAGATE_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/metagate/config.toml`
//! 4. `~/.metagate/config.toml` (canonical)
//! 5. `~/.metagate.toml` (compatibility, warns)
//!
//! # Example
//!
//! ```no_run
//! use metagate::core::config::Config;
//!
//! let result = Config::load(None).unwrap();
//! let config = result.config;
//!
//! println!("Lock token: {}", config.lock_token());
//! println!("Show reasons: {}", config.show_reasons());
//! ```

pub mod schema;

pub use schema::{ConfigFile, OutputFormat, PresenterConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::types::LockToken;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Loaded configuration with defaults applied by the accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// File contents (default when no file was found)
    pub file: ConfigFile,
    /// Path the file was loaded from
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the first existing location.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path is missing, or if a config file
    /// exists but cannot be read, parsed or validated. Missing default
    /// locations are not an error (defaults are used).
    pub fn load(explicit: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::find(&mut warnings),
        };

        let file = match &path {
            Some(path) => Self::read_config(path)?,
            None => ConfigFile::default(),
        };
        file.validate()?;

        for warning in &warnings {
            tracing::warn!(path = %warning.path.display(), "{}", warning.message);
        }

        Ok(ConfigLoadResult {
            config: Config { file, path },
            warnings,
        })
    }

    /// Find the config file in the default locations.
    fn find(warnings: &mut Vec<ConfigWarning>) -> Option<PathBuf> {
        // 1. Check $METAGATE_CONFIG
        if let Ok(path) = std::env::var("METAGATE_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/metagate/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("metagate/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        let home = dirs::home_dir()?;

        // 3. Check ~/.metagate/config.toml
        let canonical = home.join(".metagate/config.toml");
        if canonical.exists() {
            return Some(canonical);
        }

        // 4. Check ~/.metagate.toml (compatibility)
        let compat = home.join(".metagate.toml");
        if compat.exists() {
            warnings.push(ConfigWarning {
                message: format!(
                    "Using deprecated config location. Please move to '{}'",
                    canonical.display()
                ),
                path: compat.clone(),
            });
            return Some(compat);
        }

        None
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Get the publish lock token.
    ///
    /// Defaults to `custom-meta-validation` if not configured.
    pub fn lock_token(&self) -> LockToken {
        self.file
            .lock_token
            .as_deref()
            .and_then(|t| LockToken::new(t).ok())
            .unwrap_or_default()
    }

    /// Get the default output format.
    ///
    /// Defaults to text if not configured.
    pub fn format(&self) -> OutputFormat {
        self.file.format.unwrap_or_default()
    }

    /// Check if per-check reasons are shown after presenter messages.
    ///
    /// Defaults to `false` if not configured.
    pub fn show_reasons(&self) -> bool {
        self.file
            .presenter
            .as_ref()
            .and_then(|p| p.show_reasons)
            .unwrap_or(false)
    }

    /// Get the path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
