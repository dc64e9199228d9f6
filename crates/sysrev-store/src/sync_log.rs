//! The `sync_log` table: one row per sync attempt.

use chrono::{SecondsFormat, Utc};
use duckdb::params;
use serde::Serialize;

use crate::{StoreError, SysrevStore, schemas};

/// A recorded sync attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncRun {
    pub id: i64,
    pub project_id: i64,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub state: String,
    pub expected_articles: Option<i64>,
    pub articles: Option<i64>,
    pub error: Option<String>,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn to_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl SysrevStore {
    /// Append a sync attempt in `state` and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if the insert fails.
    pub fn begin_sync_run(&self, project_id: u64, state: &str) -> Result<i64, StoreError> {
        let id: i64 = self.conn.query_row(
            "INSERT INTO sync_log (project_id, started_at, state)
             VALUES (?, ?, ?) RETURNING id",
            params![to_i64(project_id), now(), state],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Record the final state of a sync attempt.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if the update fails.
    pub fn finish_sync_run(
        &self,
        id: i64,
        state: &str,
        expected_articles: Option<u64>,
        articles: Option<u64>,
        error: Option<&str>,
    ) -> Result<(), StoreError> {
        self.conn.execute(
            "UPDATE sync_log
             SET finished_at = ?, state = ?, expected_articles = ?, articles = ?, error = ?
             WHERE id = ?",
            params![
                now(),
                state,
                expected_articles.map(to_i64),
                articles.map(to_i64),
                error,
                id
            ],
        )?;
        Ok(())
    }

    /// Most recent sync attempts, newest first. Empty if the store has never
    /// been synced.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if the query fails.
    pub fn recent_sync_runs(&self, limit: usize) -> Result<Vec<SyncRun>, StoreError> {
        if !self.table_exists(schemas::SYNC_LOG)? {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare(
            "SELECT id, project_id, started_at, finished_at, state,
                    expected_articles, articles, error
             FROM sync_log ORDER BY id DESC LIMIT ?",
        )?;
        let runs = stmt
            .query_map([i64::try_from(limit).unwrap_or(i64::MAX)], |row| {
                Ok(SyncRun {
                    id: row.get(0)?,
                    project_id: row.get(1)?,
                    started_at: row.get(2)?,
                    finished_at: row.get(3)?,
                    state: row.get(4)?,
                    expected_articles: row.get(5)?,
                    articles: row.get(6)?,
                    error: row.get(7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(runs)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn store() -> SysrevStore {
        let store = SysrevStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store
    }

    #[test]
    fn runs_are_appended_with_increasing_ids() {
        let store = store();
        let first = store.begin_sync_run(120, "schema_ready").unwrap();
        let second = store.begin_sync_run(120, "schema_ready").unwrap();
        assert!(second > first);
        assert_eq!(store.recent_sync_runs(10).unwrap().len(), 2);
    }

    #[test]
    fn finish_records_outcome() {
        let store = store();
        let id = store.begin_sync_run(120, "schema_ready").unwrap();
        store
            .finish_sync_run(id, "done", Some(3), Some(2), None)
            .unwrap();

        let runs = store.recent_sync_runs(1).unwrap();
        assert_eq!(runs[0].id, id);
        assert_eq!(runs[0].project_id, 120);
        assert_eq!(runs[0].state, "done");
        assert_eq!(runs[0].expected_articles, Some(3));
        assert_eq!(runs[0].articles, Some(2));
        assert!(runs[0].finished_at.is_some());
        assert_eq!(runs[0].error, None);
    }

    #[test]
    fn failed_run_keeps_error_text() {
        let store = store();
        let id = store.begin_sync_run(7, "schema_ready").unwrap();
        store
            .finish_sync_run(id, "articles_fetched", None, Some(5), Some("HTTP 500"))
            .unwrap();
        let runs = store.recent_sync_runs(1).unwrap();
        assert_eq!(runs[0].error.as_deref(), Some("HTTP 500"));
    }

    #[test]
    fn unsynced_store_reads_without_creating_tables() {
        let store = SysrevStore::open_in_memory().unwrap();
        assert!(store.recent_sync_runs(5).unwrap().is_empty());
        assert!(store.table_summaries().unwrap().is_empty());
        assert!(!store.table_exists(schemas::SYNC_LOG).unwrap());
    }
}
