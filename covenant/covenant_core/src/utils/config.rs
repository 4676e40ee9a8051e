//! Configuration for Covenant.
//!
//! Configuration is read from a TOML file. Every key is optional; missing
//! keys take their defaults, and a missing file yields the default
//! configuration. Command-line flags are layered on top with
//! [`CovenantConfig::merge`].

use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::logging::LogLevel;
use crate::error::{ConfigError, Result};

/// JSON-LD context of the ODRL 2.2 vocabulary.
pub const DEFAULT_ODRL_CONTEXT: &str = "http://www.w3.org/ns/odrl.jsonld";

/// Prefix of generated ODRL policy identifiers.
pub const DEFAULT_KEY_PREFIX: &str = "urn:uuid:";

/// Canonical export configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalConfig {
    /// `@context` emitted on ODRL documents
    #[serde(default = "default_odrl_context")]
    pub odrl_context: String,

    /// Profile applied to ODRL policies that do not name one
    #[serde(default)]
    pub default_profile: Option<String>,

    /// Whether exported JSON is pretty-printed
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_odrl_context() -> String {
    DEFAULT_ODRL_CONTEXT.to_string()
}

fn default_pretty() -> bool {
    true
}

impl Default for CanonicalConfig {
    fn default() -> Self {
        Self {
            odrl_context: default_odrl_context(),
            default_profile: None,
            pretty: default_pretty(),
        }
    }
}

/// Policy store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Prefix of identifiers generated for ODRL policies saved without a uid
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

fn default_key_prefix() -> String {
    DEFAULT_KEY_PREFIX.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level that is emitted
    #[serde(default)]
    pub level: LogLevel,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CovenantConfig {
    /// Canonical export settings
    #[serde(default)]
    pub canonical: CanonicalConfig,

    /// Policy store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values that override a loaded configuration, typically from flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Override for `logging.level`
    pub log_level: Option<LogLevel>,

    /// Override for `canonical.pretty`
    pub pretty: Option<bool>,

    /// Override for `canonical.default_profile`
    pub default_profile: Option<String>,
}

impl CovenantConfig {
    /// Load configuration from a file
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            info!("No configuration file specified, using defaults");
            return Ok(Self::default());
        };

        info!("Loading configuration from {}", path.display());

        if !path.exists() {
            warn!("Configuration file not found: {}", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadFailed(format!("{}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.canonical.odrl_context.trim().is_empty() {
            return Err(
                ConfigError::Invalid("canonical.odrl_context cannot be empty".to_string()).into(),
            );
        }

        if self.store.key_prefix.trim().is_empty() {
            return Err(
                ConfigError::Invalid("store.key_prefix cannot be empty".to_string()).into(),
            );
        }

        if let Some(profile) = &self.canonical.default_profile {
            if profile.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "canonical.default_profile cannot be blank when set".to_string(),
                )
                .into());
            }
        }

        Ok(())
    }

    /// Merge overrides into this configuration
    pub fn merge(&mut self, overrides: ConfigOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }

        if let Some(pretty) = overrides.pretty {
            self.canonical.pretty = pretty;
        }

        if let Some(profile) = overrides.default_profile {
            self.canonical.default_profile = Some(profile);
        }
    }
}
