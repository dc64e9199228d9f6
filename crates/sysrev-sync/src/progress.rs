//! Progress events emitted while a sync runs.

use serde::Serialize;
use sysrev_core::ArticleId;

use crate::SyncReport;

/// One step of a running sync, in the order they occur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SyncProgress {
    Started {
        project_id: u64,
    },
    /// Article count reported by the server. May be stale by the time
    /// enumeration finishes.
    ProjectInfo {
        expected: u64,
    },
    Labels {
        count: usize,
    },
    ArticlePage {
        offset: u64,
        fetched: usize,
    },
    ArticleDetail {
        article_id: ArticleId,
        done: usize,
        expected: usize,
    },
    TableWritten {
        table: String,
        rows: usize,
    },
    /// No rows this run; the stored table was kept.
    TableSkipped {
        table: String,
    },
    Finished {
        report: SyncReport,
    },
}

pub(crate) type ProgressFn<'a> = Box<dyn FnMut(&SyncProgress) + Send + 'a>;

pub(crate) fn trace(event: &SyncProgress) {
    match event {
        SyncProgress::Started { project_id } => tracing::debug!(project_id, "sync started"),
        SyncProgress::ProjectInfo { expected } => {
            tracing::debug!(expected, "project info fetched");
        }
        SyncProgress::Labels { count } => tracing::debug!(count, "labels fetched"),
        SyncProgress::ArticlePage { offset, fetched } => {
            tracing::debug!(offset, fetched, "article page fetched");
        }
        SyncProgress::ArticleDetail {
            article_id,
            done,
            expected,
        } => tracing::trace!(article_id, done, expected, "article detail fetched"),
        SyncProgress::TableWritten { table, rows } => {
            tracing::debug!(table = %table, rows, "table written");
        }
        SyncProgress::TableSkipped { table } => {
            tracing::debug!(table = %table, "table skipped");
        }
        SyncProgress::Finished { report } => tracing::debug!(
            articles = report.articles,
            judgments = report.judgments,
            "sync finished"
        ),
    }
}
