//! Project annotations (`GET /web-api/project-annotations`).
//!
//! Text-span annotations reviewers attached to article abstracts, flattened
//! into one record per annotation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sysrev_core::{ArticleId, ProjectId};

use crate::http::{decode, send_json};
use crate::{ClientError, SysrevClient};

const ENDPOINT: &str = "web-api/project-annotations";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawAnnotation {
    #[serde(default)]
    selection: Option<String>,
    #[serde(default)]
    annotation: Option<String>,
    #[serde(default)]
    semantic_class: Option<String>,
    #[serde(default)]
    pmid: Option<Value>,
    article_id: ArticleId,
    #[serde(default)]
    context: RawContext,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawContext {
    #[serde(default)]
    text_context: Option<String>,
    #[serde(default)]
    start_offset: Option<u64>,
    #[serde(default)]
    end_offset: Option<u64>,
}

/// One annotated text span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub selection: Option<String>,
    pub annotation: Option<String>,
    pub semantic_class: Option<String>,
    /// Identifier in the source database (`PubMed` id).
    pub external_id: Option<String>,
    pub article_id: ArticleId,
    pub text: Option<String>,
    pub start: Option<u64>,
    pub end: Option<u64>,
    pub datasource: String,
}

impl From<RawAnnotation> for Annotation {
    fn from(raw: RawAnnotation) -> Self {
        let external_id = raw.pmid.and_then(|pmid| match pmid {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        });
        Self {
            selection: raw.selection,
            annotation: raw.annotation,
            semantic_class: raw.semantic_class,
            external_id,
            article_id: raw.article_id,
            text: raw.context.text_context,
            start: raw.context.start_offset,
            end: raw.context.end_offset,
            datasource: "pubmed".to_string(),
        }
    }
}

impl SysrevClient {
    /// Fetch all text annotations of a project.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the server returns a
    /// non-success status, or an entry has no `article-id`.
    pub async fn get_project_annotations(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<Annotation>, ClientError> {
        let request = self
            .get(ENDPOINT)
            .query(&[("project-id", project_id.to_string())]);
        let raw: Vec<RawAnnotation> = decode(ENDPOINT, send_json(request).await?)?;
        Ok(raw.into_iter().map(Annotation::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FIXTURE: &str = r#"{
        "result": [
            {
                "selection": "cholecalciferol",
                "annotation": "vitamin D3",
                "semantic-class": "compound",
                "pmid": 31234567,
                "article-id": 11,
                "context": {"text-context": "Cholecalciferol was given daily", "start-offset": 0, "end-offset": 15}
            },
            {
                "selection": "bone",
                "annotation": null,
                "semantic-class": "tissue",
                "pmid": "31234568",
                "article-id": 12,
                "context": {"text-context": "bone density"}
            }
        ]
    }"#;

    #[test]
    fn flattens_annotation_context() {
        let raw: Vec<RawAnnotation> =
            decode(ENDPOINT, serde_json::from_str(FIXTURE).unwrap()).unwrap();
        let annotations: Vec<Annotation> = raw.into_iter().map(Annotation::from).collect();

        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].external_id.as_deref(), Some("31234567"));
        assert_eq!(annotations[0].start, Some(0));
        assert_eq!(annotations[0].end, Some(15));
        assert_eq!(annotations[1].external_id.as_deref(), Some("31234568"));
        assert_eq!(annotations[1].start, None);
        assert_eq!(annotations[1].text.as_deref(), Some("bone density"));
        assert!(annotations.iter().all(|a| a.datasource == "pubmed"));
    }
}
