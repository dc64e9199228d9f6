//! `article-info/{id}` endpoint.

use serde_json::json;
use sysrev_core::{ArticleDetail, ArticleId, ProjectId};

use crate::http::{decode, send_json};
use crate::{ClientError, SysrevClient};

const ENDPOINT: &str = "api-json/article-info";

impl SysrevClient {
    fn article_info_request(
        &self,
        project_id: ProjectId,
        article_id: ArticleId,
    ) -> reqwest::RequestBuilder {
        self.get(&format!("{ENDPOINT}/{article_id}"))
            .json(&json!({ "project-id": project_id }))
    }

    /// Fetch per-article detail (`GET /api-json/article-info/{id}`).
    ///
    /// The server accepts the project id as a JSON body on this GET.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the server returns a
    /// non-success status, or the payload has no `article` object.
    pub async fn fetch_article_info(
        &self,
        project_id: ProjectId,
        article_id: ArticleId,
    ) -> Result<ArticleDetail, ClientError> {
        tracing::debug!(project_id, article_id, "fetching article info");
        let body = send_json(self.article_info_request(project_id, article_id)).await?;
        decode(ENDPOINT, body)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{body_json, client};

    const FIXTURE: &str = r#"{
        "article": {
            "article-id": 11,
            "full-texts": [
                {"full-text/url": "https://example.org/a.pdf", "filename": "a.pdf", "key": "k1"}
            ],
            "auto-labels": {
                "a1": {"answer": true, "confidence": 0.92, "model": "m-3"}
            },
            "csl": {
                "citation": {
                    "title": "Vitamin D and bone density",
                    "author": [{"family": "Doe", "given": "J"}],
                    "issued": {"date-parts": [[2020, 5]]}
                }
            }
        }
    }"#;

    #[test]
    fn builds_get_with_article_path_and_project_body() {
        let request = client().article_info_request(3, 11).build().unwrap();
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://www.sysrev.com/api-json/article-info/11"
        );
        assert_eq!(body_json(&request), json!({"project-id": 3}));
    }

    #[test]
    fn decodes_detail_with_or_without_envelope() {
        let bare: serde_json::Value = serde_json::from_str(FIXTURE).unwrap();
        let wrapped = json!({ "result": bare.clone() });

        let a: ArticleDetail = decode(ENDPOINT, bare).unwrap();
        let b: ArticleDetail = decode(ENDPOINT, wrapped).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.article.full_texts.len(), 1);
        assert_eq!(a.article.auto_labels["a1"]["confidence"], json!(0.92));
    }
}
