//! Service Configuration - server, model artifact and city tier lists
//!
//! Each struct implements `Default`, so the service runs unchanged when no
//! config file is present.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;
use crate::features::CityTierTable;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a service deployment.
///
/// Load with `ServiceConfig::load()` which searches:
/// 1. explicit path
/// 2. `$PREMIUM_CONFIG` env var
/// 3. `./premium_config.toml`
/// 4. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Model artifact location
    #[serde(default)]
    pub model: ModelConfig,

    /// Tier membership lists
    #[serde(default)]
    pub city_tiers: CityTierConfig,
}

impl ServiceConfig {
    /// Load configuration using the standard search order.
    ///
    /// An explicitly requested file must load; the env var and local file
    /// fall back to the next source with a warning.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        // 1. Explicit path
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            info!(path = %path.display(), "Loaded service config");
            return Ok(config);
        }

        // 2. Check env var
        if let Ok(path) = std::env::var("PREMIUM_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded service config from PREMIUM_CONFIG");
                        return Ok(config);
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from PREMIUM_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "PREMIUM_CONFIG points to non-existent file, falling back");
            }
        }

        // 3. Check ./premium_config.toml
        let local = PathBuf::from("premium_config.toml");
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded service config from ./premium_config.toml");
                    return Ok(config);
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./premium_config.toml, using defaults");
                }
            }
        }

        // 4. Defaults
        info!("No premium_config.toml found — using built-in defaults");
        Ok(Self::default())
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate TOML text. Unknown keys only produce warnings.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate semantic constraints.
    ///
    /// Rules:
    /// - Server address must be non-empty, body limit must be positive
    /// - Model path must be non-empty
    /// - Tier entries must be non-blank and a city may sit in only one tier
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.server.addr.trim().is_empty() {
            errors.push("server.addr must not be empty".to_string());
        }
        if self.server.max_body_bytes == 0 {
            errors.push("server.max_body_bytes must be > 0".to_string());
        }
        if self.model.path.as_os_str().is_empty() {
            errors.push("model.path must not be empty".to_string());
        }
        if let Some(v) = &self.model.version_override {
            if v.trim().is_empty() {
                errors.push("model.version_override must not be blank when set".to_string());
            }
        }

        let (tier_errors, tier_warnings) = super::validation::validate_city_tiers(&self.city_tiers);
        errors.extend(tier_errors);
        for w in &tier_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Server
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Bind address (e.g. "0.0.0.0:8000")
    #[serde(default = "default_addr")]
    pub addr: String,
    /// Request body limit in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_addr() -> String {
    defaults::DEFAULT_SERVER_ADDR.to_string()
}

fn default_max_body_bytes() -> usize {
    defaults::DEFAULT_MAX_BODY_BYTES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

// ============================================================================
// Model
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    /// Path to the JSON model artifact
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
    /// Reported in `/health` instead of the artifact's version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_override: Option<String>,
}

fn default_model_path() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_MODEL_PATH)
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            version_override: None,
        }
    }
}

// ============================================================================
// City Tiers
// ============================================================================

/// Raw tier membership lists as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CityTierConfig {
    #[serde(default = "default_tier_1")]
    pub tier_1: Vec<String>,
    #[serde(default = "default_tier_2")]
    pub tier_2: Vec<String>,
}

fn default_tier_1() -> Vec<String> {
    defaults::DEFAULT_TIER_1_CITIES.iter().map(|c| (*c).to_string()).collect()
}

fn default_tier_2() -> Vec<String> {
    defaults::DEFAULT_TIER_2_CITIES.iter().map(|c| (*c).to_string()).collect()
}

impl Default for CityTierConfig {
    fn default() -> Self {
        Self {
            tier_1: default_tier_1(),
            tier_2: default_tier_2(),
        }
    }
}

impl CityTierConfig {
    /// Build the lookup table; entries are normalized to title case.
    pub fn table(&self) -> CityTierTable {
        CityTierTable::new(&self.tier_1, &self.tier_2)
    }
}
