//! Label submission (`POST /api-json/set-labels`).

use serde_json::{Map, Value, json};
use sysrev_core::{ArticleId, ProjectId, transform_label};

use crate::http::{send_json, unwrap_result};
use crate::{ClientError, SysrevClient};

const ENDPOINT: &str = "api-json/set-labels";

/// Review flags sent alongside label values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetLabelFlags {
    /// Mark the answers as confirmed rather than saved as a draft.
    pub confirm: bool,
    /// Overwrite a previously confirmed answer.
    pub change: bool,
    /// Record the answers as the conflict resolution.
    pub resolve: bool,
}

/// Build the `set-labels` payload.
///
/// The three slices are parallel: entry `i` of each describes one label.
/// Every value is normalized by [`transform_label`] for its declared type.
///
/// # Errors
///
/// Returns [`ClientError::LengthMismatch`] if the slices differ in length
/// and [`ClientError::Label`] if a value does not fit its type.
pub fn set_labels_payload(
    project_id: ProjectId,
    article_id: ArticleId,
    label_ids: &[String],
    label_values: &[Value],
    label_types: &[String],
    flags: SetLabelFlags,
) -> Result<Value, ClientError> {
    if label_ids.len() != label_values.len() || label_ids.len() != label_types.len() {
        return Err(ClientError::LengthMismatch {
            ids: label_ids.len(),
            values: label_values.len(),
            types: label_types.len(),
        });
    }

    let mut values = Map::new();
    for ((label_id, value), label_type) in label_ids.iter().zip(label_values).zip(label_types) {
        let normalized = transform_label(label_type, value)?;
        values.insert(label_id.clone(), json!(normalized));
    }

    Ok(json!({
        "project-id": project_id,
        "article-id": article_id,
        "label-values": values,
        "confirm?": flags.confirm,
        "change?": flags.change,
        "resolve?": flags.resolve,
    }))
}

impl SysrevClient {
    /// Submit label values for one article.
    ///
    /// # Errors
    ///
    /// See [`set_labels_payload`]; also returns [`ClientError`] if the
    /// request fails or the server returns a non-success status.
    pub async fn set_labels(
        &self,
        project_id: ProjectId,
        article_id: ArticleId,
        label_ids: &[String],
        label_values: &[Value],
        label_types: &[String],
        flags: SetLabelFlags,
    ) -> Result<Value, ClientError> {
        let payload = set_labels_payload(
            project_id,
            article_id,
            label_ids,
            label_values,
            label_types,
            flags,
        )?;
        tracing::debug!(project_id, article_id, labels = label_ids.len(), "submitting labels");
        let body = send_json(self.post(ENDPOINT).json(&payload)).await?;
        Ok(unwrap_result(body))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sysrev_core::LabelError;

    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn payload_maps_ids_to_transformed_values() {
        let payload = set_labels_payload(
            456,
            789,
            &strings(&["l1", "l2", "l3"]),
            &[json!("yes"), json!("no"), json!("RCT")],
            &strings(&["boolean", "boolean", "categorical"]),
            SetLabelFlags {
                confirm: true,
                ..SetLabelFlags::default()
            },
        )
        .unwrap();

        assert_eq!(
            payload,
            json!({
                "project-id": 456,
                "article-id": 789,
                "label-values": {"l1": true, "l2": false, "l3": ["RCT"]},
                "confirm?": true,
                "change?": false,
                "resolve?": false,
            })
        );
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = set_labels_payload(
            1,
            2,
            &strings(&["l1", "l2"]),
            &[json!("yes")],
            &strings(&["boolean", "boolean"]),
            SetLabelFlags::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ClientError::LengthMismatch {
                ids: 2,
                values: 1,
                types: 2
            }
        ));
    }

    #[test]
    fn invalid_value_surfaces_label_error() {
        let err = set_labels_payload(
            1,
            2,
            &strings(&["l1"]),
            &[json!("maybe")],
            &strings(&["boolean"]),
            SetLabelFlags::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Label(LabelError::InvalidValue { .. })
        ));
    }

    #[test]
    fn unsupported_type_surfaces_label_error() {
        let err = set_labels_payload(
            1,
            2,
            &strings(&["l1"]),
            &[json!(3)],
            &strings(&["numeric"]),
            SetLabelFlags::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Label(LabelError::UnsupportedLabelType(_))
        ));
    }
}
