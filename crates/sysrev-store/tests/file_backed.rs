//! Store behavior across process restarts, against a real database file.

use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};
use sysrev_store::{ReplaceOutcome, SysrevStore, Table, schemas};

fn record(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

fn citations(items: Vec<Value>) -> Table {
    Table::from_records(
        schemas::CSL_CITATIONS,
        None,
        items.into_iter().map(record).collect(),
    )
}

#[test]
fn replaced_tables_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".sysrev").join("sysrev.duckdb");

    {
        let mut store = SysrevStore::open_local(&path).unwrap();
        store.ensure_schema().unwrap();
        store
            .replace_table(&citations(vec![json!({
                "article_id": 1,
                "title": "Vitamin D and bone health",
                "author": [{"family": "Doe", "given": "J"}]
            })]))
            .unwrap();
    }

    let store = SysrevStore::open_local(&path).unwrap();
    assert_eq!(
        store.dump_table(schemas::CSL_CITATIONS).unwrap(),
        vec![vec![
            "1".to_string(),
            "Vitamin D and bone health".to_string(),
            "[{\"family\":\"Doe\",\"given\":\"J\"}]".to_string(),
        ]]
    );
}

#[test]
fn replacing_with_same_rows_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mirror.duckdb");
    let mut store = SysrevStore::open_local(&path).unwrap();
    let rows = vec![
        json!({"article_id": 2, "title": "B"}),
        json!({"article_id": 1, "title": "A"}),
    ];

    store.replace_table(&citations(rows.clone())).unwrap();
    let first = store.dump_table(schemas::CSL_CITATIONS).unwrap();
    store.replace_table(&citations(rows)).unwrap();
    let second = store.dump_table(schemas::CSL_CITATIONS).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn empty_write_after_reopen_keeps_previous_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mirror.duckdb");
    {
        let mut store = SysrevStore::open_local(&path).unwrap();
        store
            .replace_table(&citations(vec![json!({"article_id": 1, "title": "A"})]))
            .unwrap();
    }

    let mut store = SysrevStore::open_local(&path).unwrap();
    assert_eq!(
        store.replace_table(&citations(Vec::new())).unwrap(),
        ReplaceOutcome::Skipped
    );
    assert_eq!(store.row_count(schemas::CSL_CITATIONS).unwrap(), 1);
}
