//! Table names and DDL for the local mirror.
//!
//! `article_data` and `article_label` have a fixed shape and are created up
//! front. `labels`, `full_texts`, `auto_labels` and `csl_citations` take
//! their columns from whatever the server sent and only exist after their
//! first non-empty write. `sync_log` is append-only and never replaced.

use crate::table::ColumnType;

pub const LABELS: &str = "labels";
pub const ARTICLE_DATA: &str = "article_data";
pub const ARTICLE_LABEL: &str = "article_label";
pub const FULL_TEXTS: &str = "full_texts";
pub const AUTO_LABELS: &str = "auto_labels";
pub const CSL_CITATIONS: &str = "csl_citations";
pub const SYNC_LOG: &str = "sync_log";

/// The six tables a sync replaces, in write order.
pub const MIRROR_TABLES: [&str; 6] = [
    LABELS,
    ARTICLE_DATA,
    ARTICLE_LABEL,
    FULL_TEXTS,
    AUTO_LABELS,
    CSL_CITATIONS,
];

pub const CREATE_ARTICLE_DATA: &str = "
CREATE TABLE IF NOT EXISTS article_data (
    article_id BIGINT PRIMARY KEY,
    primary_title TEXT,
    consensus TEXT,
    updated_time TEXT,
    notes TEXT,
    resolve TEXT
);
";

pub const CREATE_ARTICLE_LABEL: &str = "
CREATE TABLE IF NOT EXISTS article_label (
    article_id BIGINT,
    label_id TEXT,
    user_id BIGINT,
    answer TEXT,
    inclusion BOOLEAN,
    updated_time TEXT,
    confirm_time TEXT,
    resolve TEXT
);
";

/// One row per sync attempt.
pub const CREATE_SYNC_LOG: &str = "
CREATE SEQUENCE IF NOT EXISTS sync_log_seq;
CREATE TABLE IF NOT EXISTS sync_log (
    id BIGINT PRIMARY KEY DEFAULT nextval('sync_log_seq'),
    project_id BIGINT NOT NULL,
    started_at TEXT NOT NULL,
    finished_at TEXT,
    state TEXT NOT NULL,
    expected_articles BIGINT,
    articles BIGINT,
    error TEXT
);
";

/// Column layout of `article_data`, matching [`CREATE_ARTICLE_DATA`].
pub const ARTICLE_DATA_COLUMNS: [(&str, ColumnType); 6] = [
    ("article_id", ColumnType::BigInt),
    ("primary_title", ColumnType::Text),
    ("consensus", ColumnType::Text),
    ("updated_time", ColumnType::Text),
    ("notes", ColumnType::Text),
    ("resolve", ColumnType::Text),
];

/// Column layout of `article_label`, matching [`CREATE_ARTICLE_LABEL`].
pub const ARTICLE_LABEL_COLUMNS: [(&str, ColumnType); 8] = [
    ("article_id", ColumnType::BigInt),
    ("label_id", ColumnType::Text),
    ("user_id", ColumnType::BigInt),
    ("answer", ColumnType::Text),
    ("inclusion", ColumnType::Boolean),
    ("updated_time", ColumnType::Text),
    ("confirm_time", ColumnType::Text),
    ("resolve", ColumnType::Text),
];
