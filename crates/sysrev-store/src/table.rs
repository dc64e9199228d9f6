//! Flat tables built from JSON records.
//!
//! Records coming from the API have kebab-case and path-like keys and
//! their set of fields varies from row to row. [`Table::from_records`]
//! turns them into a fixed column list with storage-safe names and one
//! inferred type per column.

use std::collections::HashMap;

use serde_json::{Map, Value};
use sysrev_core::opaque::scalarize;

/// Storage type of a column, inferred from its non-null values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Boolean,
    BigInt,
    Double,
    Text,
}

impl ColumnType {
    /// `DuckDB` type name.
    #[must_use]
    pub const fn sql(self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::BigInt => "BIGINT",
            Self::Double => "DOUBLE",
            Self::Text => "TEXT",
        }
    }

    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(Self::Boolean),
            Value::Number(n) if n.is_i64() => Some(Self::BigInt),
            Value::Number(_) => Some(Self::Double),
            _ => Some(Self::Text),
        }
    }

    fn widen(self, other: Self) -> Self {
        match (self, other) {
            (a, b) if a == b => a,
            (Self::BigInt, Self::Double) | (Self::Double, Self::BigInt) => Self::Double,
            _ => Self::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnType,
}

/// A named table ready to be written: columns plus rows of scalar cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub primary_key: Option<String>,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
}

/// One stored value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Boolean(bool),
    BigInt(i64),
    Double(f64),
    Text(String),
}

impl Cell {
    fn convert(value: Value, kind: ColumnType) -> Self {
        match (kind, value) {
            (_, Value::Null) => Self::Null,
            (ColumnType::Boolean, Value::Bool(b)) => Self::Boolean(b),
            (ColumnType::BigInt, Value::Number(n)) if n.is_i64() => {
                n.as_i64().map_or(Self::Null, Self::BigInt)
            }
            (ColumnType::Double, Value::Number(n)) => n.as_f64().map_or(Self::Null, Self::Double),
            (_, Value::String(s)) => Self::Text(s),
            (_, other) => Self::Text(other.to_string()),
        }
    }

    pub(crate) fn to_sql(&self) -> duckdb::types::Value {
        use duckdb::types::Value as Sql;
        match self {
            Self::Null => Sql::Null,
            Self::Boolean(b) => Sql::Boolean(*b),
            Self::BigInt(i) => Sql::BigInt(*i),
            Self::Double(d) => Sql::Double(*d),
            Self::Text(s) => Sql::Text(s.clone()),
        }
    }
}

/// Reduce a response field name to a storage column identifier.
///
/// Keeps the segment after the last `/` (`full-text/url` → `url`) and
/// replaces every character other than ASCII letters, digits and `_` with
/// `_` (`primary-title` → `primary_title`).
#[must_use]
pub fn normalize_column_name(raw: &str) -> String {
    let segment = match raw.rsplit_once('/') {
        Some((_, last)) if !last.is_empty() => last,
        _ => raw,
    };
    let name: String = segment
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if name.is_empty() {
        String::from("_")
    } else {
        name
    }
}

impl Table {
    /// Build a table from JSON records.
    ///
    /// Columns appear in first-seen order across all records. Field names
    /// are normalized with [`normalize_column_name`]; when two distinct
    /// fields normalize to the same name (compared case-insensitively, as
    /// `DuckDB` does) the field seen first owns the column and the other is
    /// dropped. Nested values are stored as their JSON text.
    #[must_use]
    pub fn from_records(
        name: &str,
        primary_key: Option<&str>,
        records: Vec<Map<String, Value>>,
    ) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut owners: HashMap<String, (String, usize)> = HashMap::new();

        for record in &records {
            for key in record.keys() {
                let column = normalize_column_name(key);
                let folded = column.to_ascii_lowercase();
                if !owners.contains_key(&folded) {
                    owners.insert(folded, (key.clone(), columns.len()));
                    columns.push(column);
                }
            }
        }

        let width = columns.len();
        let mut kinds: Vec<Option<ColumnType>> = vec![None; width];
        let mut raw_rows: Vec<Vec<Value>> = Vec::with_capacity(records.len());

        for record in records {
            let mut row = vec![Value::Null; width];
            for (key, value) in record {
                let folded = normalize_column_name(&key).to_ascii_lowercase();
                let Some((owner, index)) = owners.get(&folded) else {
                    continue;
                };
                if *owner != key {
                    continue;
                }
                let value = scalarize(value);
                if let Some(kind) = ColumnType::of(&value) {
                    kinds[*index] = Some(kinds[*index].map_or(kind, |k| k.widen(kind)));
                }
                row[*index] = value;
            }
            raw_rows.push(row);
        }

        let kinds: Vec<ColumnType> = kinds
            .into_iter()
            .map(|kind| kind.unwrap_or(ColumnType::Text))
            .collect();

        let rows = raw_rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .zip(&kinds)
                    .map(|(value, kind)| Cell::convert(value, *kind))
                    .collect()
            })
            .collect();

        Self {
            name: name.to_string(),
            primary_key: primary_key.map(normalize_column_name),
            columns: columns
                .into_iter()
                .zip(kinds)
                .map(|(name, kind)| Column { name, kind })
                .collect(),
            rows,
        }
    }

    /// Build a table with a fixed column layout.
    ///
    /// Record fields are matched to columns by normalized name. Fields with
    /// no matching column are ignored, and columns a record lacks are null.
    /// Values that do not fit the column type are stored as text.
    #[must_use]
    pub fn with_columns(
        name: &str,
        primary_key: Option<&str>,
        layout: &[(&str, ColumnType)],
        records: Vec<Map<String, Value>>,
    ) -> Self {
        let columns: Vec<Column> = layout
            .iter()
            .map(|(name, kind)| Column {
                name: (*name).to_string(),
                kind: *kind,
            })
            .collect();

        let rows = records
            .into_iter()
            .map(|record| {
                let mut fields: HashMap<String, Value> = HashMap::with_capacity(record.len());
                for (key, value) in record {
                    fields
                        .entry(normalize_column_name(&key).to_ascii_lowercase())
                        .or_insert(value);
                }
                columns
                    .iter()
                    .map(|column| {
                        let value = fields
                            .remove(&column.name.to_ascii_lowercase())
                            .map_or(Value::Null, scalarize);
                        Cell::convert(value, column.kind)
                    })
                    .collect()
            })
            .collect();

        Self {
            name: name.to_string(),
            primary_key: primary_key.map(normalize_column_name),
            columns,
            rows,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Index of a column by its (normalized) name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }
}

/// Quote an identifier for use in SQL.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
