use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde_json::Value;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Mirror a project into the local store.
    Sync(SyncArgs),
    /// Show project metadata.
    Info(ProjectArgs),
    /// List a project's label definitions.
    Labels(ProjectArgs),
    /// List a project's articles with their judgments.
    Articles(ArticlesArgs),
    /// Show full texts, auto-labels and citation data for one article.
    Article(ArticleArgs),
    /// Submit label values for one article.
    SetLabels(SetLabelsArgs),
    /// Import articles from a JSON Lines file.
    Upload(UploadArgs),
    /// Download a stored article file.
    Download(DownloadArgs),
    /// List a project's text annotations.
    Annotations(ProjectArgs),
    /// Summarize the local store.
    Tables(TablesArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ProjectArgs {
    pub project_id: u64,
}

#[derive(Clone, Debug, Args)]
pub struct SyncArgs {
    pub project_id: u64,

    /// Articles per page (defaults to sync.page_limit)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_limit: Option<u32>,

    /// Server-side sort field
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Server-side sort direction
    #[arg(long, value_parser = ["asc", "desc"])]
    pub sort_dir: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ArticlesArgs {
    pub project_id: u64,

    #[arg(long, default_value_t = 0)]
    pub offset: u64,

    /// Page size
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: u32,

    /// Page through the whole project instead of returning one page
    #[arg(long)]
    pub all: bool,

    #[arg(long)]
    pub sort_by: Option<String>,

    #[arg(long, value_parser = ["asc", "desc"])]
    pub sort_dir: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ArticleArgs {
    pub project_id: u64,
    pub article_id: u64,
}

/// One `--label` value: `<label-id>:<type>:<value>`.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelAssignment {
    pub label_id: String,
    pub label_type: String,
    pub value: Value,
}

/// Parse `<label-id>:<type>:<value>`. The value is read as JSON when it
/// parses (`true`, `["a","b"]`) and as a plain string otherwise.
pub fn parse_label_assignment(raw: &str) -> Result<LabelAssignment, String> {
    let mut parts = raw.splitn(3, ':');
    let (Some(label_id), Some(label_type), Some(value)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected <label-id>:<type>:<value>, got '{raw}'"));
    };
    if label_id.is_empty() || label_type.is_empty() {
        return Err(format!("label id and type must not be empty in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok(LabelAssignment {
        label_id: label_id.to_string(),
        label_type: label_type.to_string(),
        value,
    })
}

#[derive(Clone, Debug, Args)]
pub struct SetLabelsArgs {
    pub project_id: u64,
    pub article_id: u64,

    /// Label value as <label-id>:<type>:<value> (repeatable)
    #[arg(long = "label", required = true, value_parser = parse_label_assignment)]
    pub labels: Vec<LabelAssignment>,

    /// Confirm the answers instead of saving a draft
    #[arg(long)]
    pub confirm: bool,

    /// Overwrite previously confirmed answers
    #[arg(long)]
    pub change: bool,

    /// Record the answers as the conflict resolution
    #[arg(long)]
    pub resolve: bool,
}

#[derive(Clone, Debug, Args)]
pub struct UploadArgs {
    pub project_id: u64,
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct DownloadArgs {
    pub project_id: u64,
    pub article_id: u64,
    /// Content hash of the file
    pub hash: String,

    /// Write to this path instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct TablesArgs {
    /// Also list this many recent sync runs
    #[arg(long, default_value_t = 5)]
    pub runs: usize,
}
