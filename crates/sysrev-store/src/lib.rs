//! # sysrev-store
//!
//! `DuckDB` storage for the local project mirror.
//!
//! ## Tables
//!
//! - `labels`, `article_data`, `article_label`, `full_texts`, `auto_labels`,
//!   `csl_citations`: the mirror. Every sync replaces each of them whole,
//!   one transaction per table. A table is left alone when the sync has no
//!   rows for it.
//! - `sync_log`: one row per sync attempt, appended and updated in place.
//!
//! The default location is `.sysrev/sysrev.duckdb`. Only one process may
//! write at a time; the CLI enforces this with a lock file next to the
//! database.

pub mod error;
pub mod schemas;
pub mod store;
pub mod sync_log;
pub mod table;

pub use error::StoreError;
pub use store::{ReplaceOutcome, TableSummary};
pub use sync_log::SyncRun;
pub use table::{Cell, Column, ColumnType, Table, normalize_column_name};

use std::path::Path;

use duckdb::Connection;

/// Handle on the local mirror database.
pub struct SysrevStore {
    conn: Connection,
}

impl SysrevStore {
    /// Open or create a store file, creating its parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created and
    /// [`StoreError::DuckDb`] if the file cannot be opened.
    pub fn open_local(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        tracing::debug!(path = %path.display(), "opening store");
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory store (for testing).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if `DuckDB` cannot start.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Access the underlying `DuckDB` connection for ad-hoc queries.
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Create the fixed tables if they do not exist yet.
    ///
    /// Never drops or alters anything, so it is safe on a populated store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if a `CREATE` statement fails.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(schemas::CREATE_ARTICLE_DATA)?;
        self.conn.execute_batch(schemas::CREATE_ARTICLE_LABEL)?;
        self.conn.execute_batch(schemas::CREATE_SYNC_LOG)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_schema_creates_fixed_tables() {
        let store = SysrevStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        assert!(store.table_exists(schemas::ARTICLE_DATA).unwrap());
        assert!(store.table_exists(schemas::ARTICLE_LABEL).unwrap());
        assert!(store.table_exists(schemas::SYNC_LOG).unwrap());
        assert!(!store.table_exists(schemas::LABELS).unwrap());
    }

    #[test]
    fn ensure_schema_is_non_destructive() {
        let store = SysrevStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store
            .conn()
            .execute("INSERT INTO article_data (article_id) VALUES (1)", [])
            .unwrap();
        store.ensure_schema().unwrap();
        assert_eq!(store.row_count(schemas::ARTICLE_DATA).unwrap(), 1);
    }

    #[test]
    fn open_local_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("mirror.duckdb");
        let store = SysrevStore::open_local(&path).unwrap();
        store.ensure_schema().unwrap();
        assert!(path.exists());
    }
}
