//! Service Configuration Module
//!
//! Server, model and city-tier settings loaded from TOML, so tier lists can
//! be extended without touching validation code.
//!
//! ## Loading Order
//!
//! 1. Explicit path (`--config` flag)
//! 2. `PREMIUM_CONFIG` environment variable (path to TOML file)
//! 3. `premium_config.toml` in the current working directory
//! 4. Built-in defaults
//!
//! ## Usage
//!
//! Call `config::init()` once at startup, then `config::get()` anywhere:
//!
//! ```ignore
//! config::init(ServiceConfig::load(None)?);
//! let tiers = config::get().city_tiers.table();
//! ```

mod service_config;
pub mod defaults;
pub mod validation;

pub use service_config::*;

use std::sync::OnceLock;

/// Global service configuration, initialized once at startup.
static SERVICE_CONFIG: OnceLock<ServiceConfig> = OnceLock::new();

/// Initialize the global service configuration.
///
/// Later calls are ignored with a warning.
pub fn init(config: ServiceConfig) {
    if SERVICE_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once — ignoring");
    }
}

/// Get a reference to the global service configuration.
///
/// Panics if `init()` has not been called; a missing config is a startup bug.
#[allow(clippy::expect_used)]
pub fn get() -> &'static ServiceConfig {
    SERVICE_CONFIG
        .get()
        .expect("config::get() called before config::init() — this is a startup bug")
}
