//! # sysrev-config
//!
//! Layered configuration loading for the Sysrev mirror using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SYSREV_*` prefix, `__` as separator)
//! 2. Project-level `.sysrev/config.toml`
//! 3. User-level `~/.config/sysrev/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SYSREV_API__API_KEY` -> `api.api_key`,
//! `SYSREV_SYNC__PAGE_LIMIT` -> `sync.page_limit`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use sysrev_config::SysrevConfig;
//!
//! let config = SysrevConfig::load_with_dotenv().expect("config");
//! if config.api.is_configured() {
//!     println!("API: {}", config.api.base_url);
//! }
//! ```

mod api;
mod error;
mod store;
mod sync;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use store::StoreConfig;
pub use sync::SyncConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local directory holding config, the store and its lock file.
pub const LOCAL_DIR: &str = ".sysrev";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SysrevConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl SysrevConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be read or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after loading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(LOCAL_DIR).join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SYSREV_").split("__"))
    }

    /// Reject values that would make a sync loop forever or never start.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero page limit or an
    /// unknown sort direction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sync.page_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sync.page_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        if let Some(dir) = &self.sync.sort_dir
            && !matches!(dir.as_str(), "asc" | "desc")
        {
            return Err(ConfigError::InvalidValue {
                field: "sync.sort_dir".into(),
                reason: format!("expected \"asc\" or \"desc\", got \"{dir}\""),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sysrev").join("config.toml"))
    }
}
