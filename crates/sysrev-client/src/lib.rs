//! # sysrev-client
//!
//! HTTP client for the Sysrev JSON API.
//!
//! [`SysrevApi`] is the read surface the synchronizer depends on:
//! - `project-info` (article count, label definitions)
//! - `project-articles` (one page of articles with their judgments)
//! - `article-info/{id}` (full texts, auto-labels, citation data)
//!
//! [`fetch_all_articles`] enumerates a whole project on top of any
//! [`SysrevApi`] implementation. [`SysrevClient`] additionally exposes
//! label submission, file upload/download and project annotations.

pub mod annotations;
pub mod article_info;
pub mod articles;
pub mod files;
pub mod labels;
pub mod pagination;
pub mod project;

mod error;
mod http;

pub use annotations::Annotation;
pub use error::ClientError;
pub use labels::SetLabelFlags;
pub use pagination::{ArticlePage, article_pages, fetch_all_articles};

use std::future::Future;
use std::time::Duration;

use sysrev_core::{Article, ArticleDetail, ArticleId, Label, ProjectId, ProjectInfo};

/// Default server root.
pub const DEFAULT_BASE_URL: &str = "https://www.sysrev.com";

// ── Types ──────────────────────────────────────────────────────────

/// Optional server-side ordering for `project-articles`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleSort {
    /// Sent as `sort-by`.
    pub sort_by: Option<String>,
    /// Sent as `sort-dir` (`asc` / `desc`).
    pub sort_dir: Option<String>,
}

// ── API surface ────────────────────────────────────────────────────

/// Read operations against a Sysrev project.
///
/// Every call is idempotent on the server. Implementations must fail on
/// any non-success status; nothing here retries.
pub trait SysrevApi: Sync {
    /// Fetch project metadata, including the article count and label map.
    fn get_project_info(
        &self,
        project_id: ProjectId,
    ) -> impl Future<Output = Result<ProjectInfo, ClientError>> + Send;

    /// Fetch one page of up to `limit` articles starting at `offset`.
    fn get_project_articles(
        &self,
        project_id: ProjectId,
        offset: u64,
        limit: u32,
        sort: &ArticleSort,
    ) -> impl Future<Output = Result<Vec<Article>, ClientError>> + Send;

    /// Fetch full texts, auto-labels and citation data for one article.
    fn get_article_info(
        &self,
        project_id: ProjectId,
        article_id: ArticleId,
    ) -> impl Future<Output = Result<ArticleDetail, ClientError>> + Send;

    /// Label definitions, flattened from the project-info label map.
    fn get_labels(
        &self,
        project_id: ProjectId,
    ) -> impl Future<Output = Result<Vec<Label>, ClientError>> + Send {
        async move {
            let info = self.get_project_info(project_id).await?;
            Ok(info.labels()?)
        }
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// Stateless request/response wrapper around the Sysrev JSON API.
#[derive(Debug, Clone)]
pub struct SysrevClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SysrevClient {
    /// Create a client for `base_url` authenticating with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be built (e.g. TLS backend initialization fails).
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("sysrev-mirror/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Server root this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.get(self.endpoint(path)).bearer_auth(&self.api_key)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.post(self.endpoint(path)).bearer_auth(&self.api_key)
    }
}

impl SysrevApi for SysrevClient {
    async fn get_project_info(&self, project_id: ProjectId) -> Result<ProjectInfo, ClientError> {
        self.fetch_project_info(project_id).await
    }

    async fn get_project_articles(
        &self,
        project_id: ProjectId,
        offset: u64,
        limit: u32,
        sort: &ArticleSort,
    ) -> Result<Vec<Article>, ClientError> {
        self.fetch_project_articles(project_id, offset, limit, sort)
            .await
    }

    async fn get_article_info(
        &self,
        project_id: ProjectId,
        article_id: ArticleId,
    ) -> Result<ArticleDetail, ClientError> {
        self.fetch_article_info(project_id, article_id).await
    }
}
