//! Flatten fetched entities into the six mirror tables.
//!
//! Every function here is pure: it only reshapes what the API returned.
//! Column naming and cell typing are left to [`Table`].

use serde_json::{Map, Value};
use sysrev_core::opaque::encode_value;
use sysrev_core::{Article, ArticleDetail, ArticleId, Label};
use sysrev_store::{Table, schemas};

/// Per-article detail, in enumeration order.
pub type Details = [(ArticleId, ArticleDetail)];

fn with_article_id(article_id: ArticleId, fields: Map<String, Value>) -> Map<String, Value> {
    let mut record = Map::with_capacity(fields.len() + 1);
    record.insert("article_id".to_string(), Value::from(article_id));
    record.extend(fields);
    record
}

fn opt(value: Option<&Value>) -> Value {
    value.cloned().unwrap_or(Value::Null)
}

/// `labels`, keyed by `label_id`.
#[must_use]
pub fn labels_table(labels: &[Label]) -> Table {
    Table::from_records(
        schemas::LABELS,
        Some("label_id"),
        labels.iter().map(Label::to_record).collect(),
    )
}

/// `article_data`: one row per article, judgments left out.
#[must_use]
pub fn article_data_table(articles: &[Article]) -> Table {
    let records = articles
        .iter()
        .map(|article| {
            let mut record = Map::new();
            record.insert("article_id".into(), Value::from(article.article_id));
            record.insert(
                "primary_title".into(),
                article
                    .primary_title
                    .clone()
                    .map_or(Value::Null, Value::String),
            );
            record.insert("consensus".into(), opt(article.consensus.as_ref()));
            record.insert("updated_time".into(), opt(article.updated_time.as_ref()));
            record.insert("notes".into(), opt(article.notes.as_ref()));
            record.insert("resolve".into(), opt(article.resolve.as_ref()));
            record
        })
        .collect();
    Table::with_columns(
        schemas::ARTICLE_DATA,
        Some("article_id"),
        &schemas::ARTICLE_DATA_COLUMNS,
        records,
    )
}

/// `article_label`: every judgment of every article, `answer` JSON-encoded.
///
/// A judgment naming a label that is not in the label set is kept.
#[must_use]
pub fn article_label_table(articles: &[Article]) -> Table {
    let records = articles
        .iter()
        .flat_map(|article| {
            article.labels.iter().map(move |judgment| {
                let mut record = Map::new();
                record.insert("article_id".into(), Value::from(article.article_id));
                record.insert("label_id".into(), Value::String(judgment.label_id.clone()));
                record.insert(
                    "user_id".into(),
                    judgment.user_id.map_or(Value::Null, Value::from),
                );
                record.insert("answer".into(), encode_value(&judgment.answer));
                record.insert(
                    "inclusion".into(),
                    judgment.inclusion.map_or(Value::Null, Value::Bool),
                );
                record.insert("updated_time".into(), opt(judgment.updated_time.as_ref()));
                record.insert("confirm_time".into(), opt(judgment.confirm_time.as_ref()));
                record.insert("resolve".into(), opt(judgment.resolve.as_ref()));
                record
            })
        })
        .collect();
    Table::with_columns(
        schemas::ARTICLE_LABEL,
        None,
        &schemas::ARTICLE_LABEL_COLUMNS,
        records,
    )
}

/// `full_texts`: one row per full-text resource.
#[must_use]
pub fn full_texts_table(details: &Details) -> Table {
    let records = details
        .iter()
        .flat_map(|(article_id, detail)| {
            detail
                .article
                .full_texts
                .iter()
                .map(|fields| with_article_id(*article_id, fields.clone()))
        })
        .collect();
    Table::from_records(schemas::FULL_TEXTS, None, records)
}

fn auto_label_record(
    article_id: ArticleId,
    label_id: Option<Value>,
    entry: &Value,
) -> Map<String, Value> {
    let mut record = Map::new();
    record.insert("article_id".into(), Value::from(article_id));
    match entry {
        Value::Object(fields) => {
            let label_id = label_id
                .or_else(|| fields.get("label-id").cloned())
                .or_else(|| fields.get("label_id").cloned());
            record.insert("label_id".into(), label_id.unwrap_or(Value::Null));
            record.insert(
                "answer".into(),
                encode_value(fields.get("answer").unwrap_or(&Value::Null)),
            );
            for (key, value) in fields {
                if !matches!(key.as_str(), "label-id" | "label_id" | "answer") {
                    record.insert(key.clone(), value.clone());
                }
            }
        }
        answer => {
            record.insert("label_id".into(), label_id.unwrap_or(Value::Null));
            record.insert("answer".into(), encode_value(answer));
        }
    }
    record
}

/// `auto_labels`: machine answers per article and label.
///
/// Accepts the detail's `auto-labels` either as a map keyed by label id or
/// as a list of entries each carrying its own `label-id`. A map entry that
/// is not an object is taken as the bare answer.
#[must_use]
pub fn auto_labels_table(details: &Details) -> Table {
    let mut records = Vec::new();
    for (article_id, detail) in details {
        match &detail.article.auto_labels {
            Value::Object(by_label) => {
                for (label_id, entry) in by_label {
                    records.push(auto_label_record(
                        *article_id,
                        Some(Value::String(label_id.clone())),
                        entry,
                    ));
                }
            }
            Value::Array(entries) => {
                for entry in entries {
                    records.push(auto_label_record(*article_id, None, entry));
                }
            }
            Value::Null => {}
            other => {
                tracing::warn!(article_id, value = %other, "ignoring unrecognized auto-labels");
            }
        }
    }
    Table::from_records(schemas::AUTO_LABELS, None, records)
}

/// `csl_citations`: one row per citation item.
///
/// The detail's `csl` may wrap the item(s) in a `citation` field or be the
/// item(s) directly. Nested fields such as `author` and `issued` end up as
/// JSON text.
#[must_use]
pub fn csl_citations_table(details: &Details) -> Table {
    let mut records = Vec::new();
    for (article_id, detail) in details {
        let csl = &detail.article.csl;
        let items = match csl {
            Value::Object(fields) => fields.get("citation").unwrap_or(csl),
            _ => csl,
        };
        match items {
            Value::Object(item) => records.push(with_article_id(*article_id, item.clone())),
            Value::Array(list) => {
                for item in list {
                    if let Value::Object(item) = item {
                        records.push(with_article_id(*article_id, item.clone()));
                    }
                }
            }
            _ => {}
        }
    }
    Table::from_records(schemas::CSL_CITATIONS, None, records)
}

/// All six tables, in write order.
#[must_use]
pub fn mirror_tables(labels: &[Label], articles: &[Article], details: &Details) -> [Table; 6] {
    [
        labels_table(labels),
        article_data_table(articles),
        article_label_table(articles),
        full_texts_table(details),
        auto_labels_table(details),
        csl_citations_table(details),
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use sysrev_store::Cell;

    use super::*;

    fn article(value: Value) -> Article {
        serde_json::from_value(value).unwrap()
    }

    fn detail(value: Value) -> ArticleDetail {
        serde_json::from_value(json!({ "article": value })).unwrap()
    }

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn labels_keep_id_first_and_encode_definition() {
        let label = Label::from_entry(
            "b3c1",
            json!({"value-type": "boolean", "definition": {"inclusion-values": [true]}}),
        )
        .unwrap();
        let table = labels_table(&[label]);
        assert_eq!(table.column_names(), vec!["label_id", "value_type", "definition"]);
        assert_eq!(table.rows[0][2], text("{\"inclusion-values\":[true]}"));
    }

    #[test]
    fn article_data_has_fixed_columns() {
        let table = article_data_table(&[article(json!({
            "article-id": 7,
            "primary-title": "T",
            "consensus": "include",
            "labels": [{"label-id": "x", "answer": true}]
        }))]);
        assert_eq!(
            table.column_names(),
            vec![
                "article_id",
                "primary_title",
                "consensus",
                "updated_time",
                "notes",
                "resolve"
            ]
        );
        assert_eq!(
            table.rows[0],
            vec![
                Cell::BigInt(7),
                text("T"),
                text("include"),
                Cell::Null,
                Cell::Null,
                Cell::Null
            ]
        );
    }

    #[test]
    fn judgments_carry_article_id_and_encoded_answer() {
        let table = article_label_table(&[
            article(json!({
                "article-id": 7,
                "labels": [
                    {"label-id": "inc", "user-id": 1, "answer": true, "inclusion": true},
                    {"label-id": "design", "user-id": 1, "answer": ["RCT"]}
                ]
            })),
            article(json!({"article-id": 8, "labels": null})),
        ]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], Cell::BigInt(7));
        assert_eq!(table.rows[0][3], text("true"));
        assert_eq!(table.rows[0][4], Cell::Boolean(true));
        assert_eq!(table.rows[1][3], text("[\"RCT\"]"));
        assert_eq!(table.rows[1][4], Cell::Null);
    }

    #[test]
    fn judgments_for_unknown_labels_are_kept() {
        let table = article_label_table(&[article(json!({
            "article-id": 1,
            "labels": [{"label-id": "not-in-label-set", "answer": "x"}]
        }))]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][1], text("not-in-label-set"));
    }

    #[test]
    fn full_text_paths_reduce_to_last_segment() {
        let details = vec![(
            7,
            detail(json!({
                "full-texts": [{"full-text/url": "https://x/a.pdf", "url": "dup", "key": "k1"}]
            })),
        )];
        let table = full_texts_table(&details);
        assert_eq!(table.column_names(), vec!["article_id", "url", "key"]);
        assert_eq!(
            table.rows[0],
            vec![Cell::BigInt(7), text("https://x/a.pdf"), text("k1")]
        );
    }

    #[test]
    fn auto_labels_accept_map_and_list() {
        let details = vec![
            (
                1,
                detail(json!({"auto-labels": {"inc": {"answer": true, "confidence": 0.9}}})),
            ),
            (
                2,
                detail(json!({"auto-labels": [{"label-id": "design", "answer": ["RCT"]}]})),
            ),
            (3, detail(json!({"auto-labels": {"inc": false}}))),
        ];
        let table = auto_labels_table(&details);

        assert_eq!(
            table.column_names(),
            vec!["article_id", "label_id", "answer", "confidence"]
        );
        assert_eq!(
            table.rows,
            vec![
                vec![Cell::BigInt(1), text("inc"), text("true"), Cell::Double(0.9)],
                vec![Cell::BigInt(2), text("design"), text("[\"RCT\"]"), Cell::Null],
                vec![Cell::BigInt(3), text("inc"), text("false"), Cell::Null],
            ]
        );
    }

    #[test]
    fn citations_unwrap_and_flatten_items() {
        let details = vec![
            (
                1,
                detail(json!({"csl": {"citation": {
                    "title": "A",
                    "author": [{"family": "Doe"}],
                    "issued": {"date-parts": [[2020]]}
                }}})),
            ),
            (2, detail(json!({"csl": [{"title": "B"}, {"title": "C"}]}))),
            (3, detail(json!({"csl": null}))),
        ];
        let table = csl_citations_table(&details);

        assert_eq!(
            table.column_names(),
            vec!["article_id", "title", "author", "issued"]
        );
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0][2], text("[{\"family\":\"Doe\"}]"));
        assert_eq!(table.rows[0][3], text("{\"date-parts\":[[2020]]}"));
        assert_eq!(table.rows[2][0], Cell::BigInt(2));
    }

    #[test]
    fn no_detail_data_gives_empty_tables() {
        let details = vec![(1, detail(json!({"article-id": 1})))];
        assert!(full_texts_table(&details).is_empty());
        assert!(auto_labels_table(&details).is_empty());
        assert!(csl_citations_table(&details).is_empty());
    }
}
