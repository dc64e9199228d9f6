//! Article import and file download endpoints.

use std::path::Path;

use serde_json::Value;
use sysrev_core::{ArticleId, ProjectId};

use crate::http::check_response;
use crate::{ClientError, SysrevClient};

fn import_path(project_id: ProjectId) -> String {
    format!("api-json/import-files/{project_id}")
}

fn download_path(project_id: ProjectId, article_id: ArticleId, hash: &str) -> String {
    format!(
        "api-json/files/{project_id}/article/{article_id}/download/{}",
        urlencoding::encode(hash)
    )
}

impl SysrevClient {
    /// Upload a JSON Lines file of articles into a project.
    ///
    /// Sent as a multipart form with a single `file` part. Returns the
    /// decoded response body, or `null` if the server sent none.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] if the file cannot be read, and
    /// [`ClientError`] if the upload fails or is rejected.
    pub async fn upload_jsonlines(
        &self,
        file_path: &Path,
        project_id: ProjectId,
    ) -> Result<Value, ClientError> {
        let bytes = tokio::fs::read(file_path).await?;
        let file_name = file_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload.jsonl")
            .to_string();
        tracing::info!(project_id, file = %file_name, size = bytes.len(), "uploading articles");

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/octet-stream")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = check_response(self.post(&import_path(project_id)).multipart(form).send().await?)
            .await?;
        let text = resp.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ClientError::shape("import-files", e))
    }

    /// Download a stored article file by its content hash.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the file is missing.
    pub async fn get_article_file(
        &self,
        project_id: ProjectId,
        article_id: ArticleId,
        hash: &str,
    ) -> Result<Vec<u8>, ClientError> {
        tracing::debug!(project_id, article_id, hash, "downloading article file");
        let resp = check_response(
            self.get(&download_path(project_id, article_id, hash))
                .send()
                .await?,
        )
        .await?;
        Ok(resp.bytes().await?.to_vec())
    }
}
