//! `project-articles` endpoint: one page of articles with their judgments.

use serde_json::{Map, Value, json};
use sysrev_core::{Article, ProjectId};

use crate::http::{decode, send_json};
use crate::{ArticleSort, ClientError, SysrevClient};

const ENDPOINT: &str = "api-json/project-articles";

/// Request body for one page.
fn page_body(project_id: ProjectId, offset: u64, limit: u32, sort: &ArticleSort) -> Value {
    let mut body = Map::new();
    body.insert("project-id".into(), json!(project_id));
    body.insert("n-offset".into(), json!(offset));
    body.insert("n-count".into(), json!(limit));
    if let Some(sort_by) = &sort.sort_by {
        body.insert("sort-by".into(), json!(sort_by));
    }
    if let Some(sort_dir) = &sort.sort_dir {
        body.insert("sort-dir".into(), json!(sort_dir));
    }
    Value::Object(body)
}

/// Decode a page body. A missing or `null` `result` is an empty page.
fn parse_page(body: Value) -> Result<Vec<Article>, ClientError> {
    match body.get("result") {
        None => {
            tracing::warn!(
                endpoint = ENDPOINT,
                "response has no result key, treating as empty page"
            );
            Ok(Vec::new())
        }
        Some(Value::Null) => Ok(Vec::new()),
        Some(_) => decode(ENDPOINT, body),
    }
}

impl SysrevClient {
    fn project_articles_request(
        &self,
        project_id: ProjectId,
        offset: u64,
        limit: u32,
        sort: &ArticleSort,
    ) -> reqwest::RequestBuilder {
        self.post(ENDPOINT)
            .json(&page_body(project_id, offset, limit, sort))
    }

    /// Fetch one page of articles (`POST /api-json/project-articles`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the server returns a
    /// non-success status, or an article lacks `article-id`.
    pub async fn fetch_project_articles(
        &self,
        project_id: ProjectId,
        offset: u64,
        limit: u32,
        sort: &ArticleSort,
    ) -> Result<Vec<Article>, ClientError> {
        tracing::debug!(project_id, offset, limit, "fetching article page");
        let body = send_json(self.project_articles_request(project_id, offset, limit, sort)).await?;
        parse_page(body)
    }
}
