//! Synchronizer configuration.

use serde::{Deserialize, Serialize};

/// Default number of articles requested per page.
const fn default_page_limit() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Articles requested per `project-articles` call.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,

    /// Server-side sort key passed as `sort-by`.
    #[serde(default)]
    pub sort_by: Option<String>,

    /// `asc` or `desc`, passed as `sort-dir`.
    #[serde(default)]
    pub sort_dir: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            page_limit: default_page_limit(),
            sort_by: None,
            sort_dir: None,
        }
    }
}
