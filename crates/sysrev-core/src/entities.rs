//! Wire entities returned by the Sysrev JSON API.
//!
//! Field names on the wire are kebab-case (`article-id`, `primary-title`).
//! Only the fields the mirror relies on are typed; everything else a
//! response carries is kept in a flattened `extra` map where it matters
//! (labels, article detail) and ignored elsewhere.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::errors::CoreError;

pub type ProjectId = u64;
pub type ArticleId = u64;

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// Payload of `GET /api-json/project-info` (inside the `result` envelope).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub project: Project,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Project {
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stats: ProjectStats,
    /// Label definitions keyed by global label id.
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectStats {
    #[serde(default)]
    pub articles: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProjectInfo {
    /// Article count reported by the server. Only good for progress display:
    /// the count can change before enumeration finishes.
    #[must_use]
    pub const fn article_count(&self) -> u64 {
        self.project.stats.articles
    }

    /// Flatten the label mapping into an ordered list, injecting each key as
    /// the label's `label_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Shape`] if a label definition is not an object.
    pub fn labels(&self) -> Result<Vec<Label>, CoreError> {
        self.project
            .labels
            .iter()
            .map(|(label_id, definition)| Label::from_entry(label_id, definition.clone()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

/// A project label definition.
///
/// `fields` holds the definition as received (`value-type`, `question`,
/// `definition`, `enabled`, ...) minus any id field, which is replaced by
/// the mapping key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub label_id: String,
    pub fields: Map<String, Value>,
}

impl Label {
    /// Build a label from one entry of the project-info label mapping.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Shape`] if `definition` is not a JSON object.
    pub fn from_entry(label_id: &str, definition: Value) -> Result<Self, CoreError> {
        let Value::Object(fields) = definition else {
            return Err(CoreError::Shape(format!(
                "label {label_id}: definition is not an object"
            )));
        };
        Ok(Self {
            label_id: label_id.to_string(),
            fields: fields
                .into_iter()
                .filter(|(key, _)| key != "label-id" && key != "label_id")
                .collect(),
        })
    }

    /// Declared value type (`boolean`, `categorical`, `string`), if present.
    #[must_use]
    pub fn value_type(&self) -> Option<&str> {
        self.fields.get("value-type").and_then(Value::as_str)
    }

    /// The label as one flat record, `label_id` first.
    #[must_use]
    pub fn to_record(&self) -> Map<String, Value> {
        let mut record = Map::with_capacity(self.fields.len() + 1);
        record.insert("label_id".to_string(), Value::String(self.label_id.clone()));
        record.extend(self.fields.clone());
        record
    }
}

// ---------------------------------------------------------------------------
// Article
// ---------------------------------------------------------------------------

/// One article from `POST /api-json/project-articles`, with its judgments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Article {
    pub article_id: ArticleId,
    #[serde(default)]
    pub primary_title: Option<String>,
    #[serde(default)]
    pub consensus: Option<Value>,
    #[serde(default)]
    pub updated_time: Option<Value>,
    #[serde(default)]
    pub notes: Option<Value>,
    #[serde(default)]
    pub resolve: Option<Value>,
    /// `null` or absent means the article has no judgments yet.
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<ArticleLabel>,
}

/// One user's judgment for one label on one article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArticleLabel {
    pub label_id: String,
    #[serde(default)]
    pub user_id: Option<u64>,
    /// Shape depends on the label's value type.
    #[serde(default)]
    pub answer: Value,
    #[serde(default)]
    pub inclusion: Option<bool>,
    #[serde(default)]
    pub updated_time: Option<Value>,
    #[serde(default)]
    pub confirm_time: Option<Value>,
    #[serde(default)]
    pub resolve: Option<Value>,
}

// ---------------------------------------------------------------------------
// Article detail
// ---------------------------------------------------------------------------

/// Payload of `GET /api-json/article-info/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleDetail {
    pub article: ArticleDetailBody,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArticleDetailBody {
    #[serde(default)]
    pub article_id: Option<ArticleId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_texts: Vec<Map<String, Value>>,
    /// Keyed by label id, or a list of entries each carrying `label-id`.
    #[serde(default)]
    pub auto_labels: Value,
    /// CSL-JSON citation data: `{"citation": item | [item]}` or the bare item(s).
    #[serde(default)]
    pub csl: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
