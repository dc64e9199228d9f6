//! `project-info` endpoint.

use sysrev_core::{ProjectId, ProjectInfo};

use crate::http::{decode, send_json};
use crate::{ClientError, SysrevClient};

const ENDPOINT: &str = "api-json/project-info";

impl SysrevClient {
    fn project_info_request(&self, project_id: ProjectId) -> reqwest::RequestBuilder {
        self.get(ENDPOINT)
            .query(&[("project-id", project_id.to_string())])
    }

    /// Fetch project metadata (`GET /api-json/project-info`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the server returns a
    /// non-success status, or the payload has no `project` object.
    pub async fn fetch_project_info(
        &self,
        project_id: ProjectId,
    ) -> Result<ProjectInfo, ClientError> {
        tracing::debug!(project_id, "fetching project info");
        let body = send_json(self.project_info_request(project_id)).await?;
        decode(ENDPOINT, body)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::test_support::{auth_header, client};

    const FIXTURE: &str = r#"{
        "result": {
            "project": {
                "project-id": 123,
                "name": "Test Project",
                "stats": {"articles": 40},
                "labels": {
                    "a1": {"value-type": "boolean", "name": "include", "definition": {}}
                }
            }
        }
    }"#;

    #[test]
    fn builds_authorized_get_with_project_query() {
        let request = client().project_info_request(123).build().unwrap();
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://www.sysrev.com/api-json/project-info?project-id=123"
        );
        assert_eq!(auth_header(&request), "Bearer fake_api_key");
    }

    #[test]
    fn decodes_enveloped_project_info() {
        let body: serde_json::Value = serde_json::from_str(FIXTURE).unwrap();
        let info: ProjectInfo = decode(ENDPOINT, body).unwrap();
        assert_eq!(info.article_count(), 40);
        let labels = info.labels().unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].label_id, "a1");
    }

    #[test]
    fn missing_project_is_shape_error() {
        let err = decode::<ProjectInfo>(ENDPOINT, json!({"result": {}})).unwrap_err();
        assert!(matches!(err, ClientError::Shape { .. }));
    }
}
