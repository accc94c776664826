//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Location
//!
//! Searched in order:
//! 1. `--config <path>` on the command line
//! 2. `$METAGATE_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/metagate/config.toml`
//! 4. `~/.metagate/config.toml` (canonical write location)
//!
//! # Validation
//!
//! Config values are validated after parsing to ensure they conform to
//! expected formats (e.g., the lock token must be a slug).

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::LockToken;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Configuration file contents.
///
/// # Example
///
/// ```toml
/// lock_token = "custom-meta-validation"
/// format = "text"
///
/// [presenter]
/// show_reasons = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Token passed to the host publish lock
    pub lock_token: Option<String>,

    /// Default output format
    pub format: Option<OutputFormat>,

    /// Warning presenter settings
    pub presenter: Option<PresenterConfig>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(token) = &self.lock_token {
            LockToken::new(token.as_str())
                .map_err(|e| ConfigError::InvalidValue(format!("invalid lock_token: {}", e)))?;
        }
        Ok(())
    }
}

/// Warning presenter settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PresenterConfig {
    /// Append the per-check reasons after the presenter messages
    pub show_reasons: Option<bool>,
}
