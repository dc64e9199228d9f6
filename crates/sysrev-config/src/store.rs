//! Local store configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    format!("{}/sysrev.duckdb", crate::LOCAL_DIR)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// `DuckDB` file the mirror is written to.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl StoreConfig {
    /// Lock file guarding concurrent writers, next to the store file.
    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        let mut path = PathBuf::from(&self.path);
        path.set_file_name("store.write.lock");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_sits_next_to_store() {
        let config = StoreConfig {
            path: "/tmp/mirror/review.duckdb".into(),
        };
        assert_eq!(
            config.lock_path(),
            PathBuf::from("/tmp/mirror/store.write.lock")
        );
        assert_eq!(StoreConfig::default().path, ".sysrev/sysrev.duckdb");
    }
}
