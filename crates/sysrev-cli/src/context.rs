use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use sysrev_client::{ArticleSort, SysrevClient};
use sysrev_config::{StoreConfig, SysrevConfig};
use sysrev_store::SysrevStore;

use crate::cli::GlobalFlags;

/// Loaded configuration plus the global flags that override it.
pub struct AppContext {
    pub config: SysrevConfig,
    pub flags: GlobalFlags,
}

impl AppContext {
    pub fn new(mut config: SysrevConfig, flags: GlobalFlags) -> Self {
        if let Some(path) = &flags.store {
            config.store = StoreConfig { path: path.clone() };
        }
        Self { config, flags }
    }

    /// API client built from `[api]`. Fails when no API key is configured.
    pub fn client(&self) -> anyhow::Result<SysrevClient> {
        let api = &self.config.api;
        let key = api.require_api_key()?;
        SysrevClient::new(key, &api.base_url, Duration::from_secs(api.timeout_secs))
            .context("failed to build HTTP client")
    }

    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(&self.config.store.path)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.config.store.lock_path()
    }

    pub fn open_store(&self) -> anyhow::Result<SysrevStore> {
        let path = self.store_path();
        SysrevStore::open_local(&path)
            .with_context(|| format!("failed to open store at {}", path.display()))
    }

    /// Sort from the command line, falling back to `[sync]`.
    pub fn sort(&self, sort_by: Option<&String>, sort_dir: Option<&String>) -> ArticleSort {
        ArticleSort {
            sort_by: sort_by.or(self.config.sync.sort_by.as_ref()).cloned(),
            sort_dir: sort_dir.or(self.config.sync.sort_dir.as_ref()).cloned(),
        }
    }
}
