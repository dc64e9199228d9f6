//! Whole-table replacement and read helpers.
//!
//! A replace runs `DROP`, `CREATE` and the inserts inside one `DuckDB`
//! transaction, so readers see either the old table or the complete new
//! one. Tables are independent: there is no transaction spanning several.

use duckdb::params_from_iter;
use duckdb::types::Value as SqlValue;
use serde::Serialize;

use crate::table::{Cell, Table, quote_ident};
use crate::{StoreError, SysrevStore, schemas};

/// Result of [`SysrevStore::replace_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    Written { rows: usize },
    /// The table had no rows and the stored copy was left as it was.
    Skipped,
}

/// Row and column counts of one stored table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub rows: u64,
    pub columns: usize,
}

fn create_sql(table: &Table) -> String {
    let columns: Vec<String> = table
        .columns
        .iter()
        .map(|column| {
            let mut def = format!("{} {}", quote_ident(&column.name), column.kind.sql());
            if table
                .primary_key
                .as_deref()
                .is_some_and(|pk| pk.eq_ignore_ascii_case(&column.name))
            {
                def.push_str(" PRIMARY KEY");
            }
            def
        })
        .collect();
    format!(
        "CREATE TABLE {} ({})",
        quote_ident(&table.name),
        columns.join(", ")
    )
}

fn insert_sql(table: &Table) -> String {
    let names: Vec<String> = table.columns.iter().map(|c| quote_ident(&c.name)).collect();
    let placeholders = vec!["?"; table.columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({placeholders})",
        quote_ident(&table.name),
        names.join(", ")
    )
}

fn render(value: SqlValue) -> String {
    match value {
        SqlValue::Null => "NULL".to_string(),
        SqlValue::Boolean(b) => b.to_string(),
        SqlValue::TinyInt(i) => i.to_string(),
        SqlValue::SmallInt(i) => i.to_string(),
        SqlValue::Int(i) => i.to_string(),
        SqlValue::BigInt(i) => i.to_string(),
        SqlValue::HugeInt(i) => i.to_string(),
        SqlValue::UTinyInt(i) => i.to_string(),
        SqlValue::USmallInt(i) => i.to_string(),
        SqlValue::UInt(i) => i.to_string(),
        SqlValue::UBigInt(i) => i.to_string(),
        SqlValue::Float(f) => f.to_string(),
        SqlValue::Double(f) => f.to_string(),
        SqlValue::Text(s) => s,
        other => format!("{other:?}"),
    }
}

impl SysrevStore {
    /// Replace a stored table with `table`.
    ///
    /// Empty tables are not written: the previous copy, if any, survives.
    /// On any failure the transaction rolls back and the previous copy is
    /// left intact.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidTable`] if the table has rows but no
    /// columns or its primary key is not one of its columns, and
    /// [`StoreError::DuckDb`] if a statement fails (for example a duplicate
    /// primary key).
    pub fn replace_table(&mut self, table: &Table) -> Result<ReplaceOutcome, StoreError> {
        if table.is_empty() {
            tracing::debug!(table = %table.name, "no rows, keeping stored table");
            return Ok(ReplaceOutcome::Skipped);
        }
        if table.columns.is_empty() {
            return Err(StoreError::InvalidTable {
                table: table.name.clone(),
                reason: "rows have no fields".to_string(),
            });
        }
        if let Some(pk) = &table.primary_key
            && table.column_index(pk).is_none()
        {
            return Err(StoreError::InvalidTable {
                table: table.name.clone(),
                reason: format!("primary key column {pk} is missing"),
            });
        }

        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {}",
            quote_ident(&table.name)
        ))?;
        tx.execute_batch(&create_sql(table))?;
        {
            let mut stmt = tx.prepare(&insert_sql(table))?;
            for row in &table.rows {
                stmt.execute(params_from_iter(row.iter().map(Cell::to_sql)))?;
            }
        }
        tx.commit()?;

        let rows = table.rows.len();
        tracing::debug!(table = %table.name, rows, "table replaced");
        Ok(ReplaceOutcome::Written { rows })
    }

    /// Whether a table exists in the main schema.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if the catalog query fails.
    pub fn table_exists(&self, name: &str) -> Result<bool, StoreError> {
        let count: i64 = self.conn.query_row(
            "SELECT count(*) FROM information_schema.tables
             WHERE table_schema = 'main' AND table_name = ?",
            [name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Column names of a table in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if the catalog query fails.
    pub fn table_columns(&self, name: &str) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT column_name FROM information_schema.columns
             WHERE table_schema = 'main' AND table_name = ?
             ORDER BY ordinal_position",
        )?;
        let columns = stmt
            .query_map([name], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(columns)
    }

    /// Number of rows in a table.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if the table does not exist.
    pub fn row_count(&self, name: &str) -> Result<u64, StoreError> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT count(*) FROM {}", quote_ident(name)),
            [],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// All rows of a table rendered as text, in a stable order.
    ///
    /// Rows are sorted on every column so two stores holding the same data
    /// dump identically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if the table does not exist.
    pub fn dump_table(&self, name: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let width = self.table_columns(name)?.len();
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {} ORDER BY ALL", quote_ident(name)))?;
        let rows = stmt
            .query_map([], |row| {
                (0..width)
                    .map(|i| row.get::<_, SqlValue>(i).map(render))
                    .collect::<Result<Vec<_>, _>>()
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Counts for every mirror table present, plus `sync_log`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if a catalog or count query fails.
    pub fn table_summaries(&self) -> Result<Vec<TableSummary>, StoreError> {
        let mut summaries = Vec::new();
        for name in schemas::MIRROR_TABLES.iter().chain([&schemas::SYNC_LOG]) {
            if !self.table_exists(name)? {
                continue;
            }
            summaries.push(TableSummary {
                name: (*name).to_string(),
                rows: self.row_count(name)?,
                columns: self.table_columns(name)?.len(),
            });
        }
        Ok(summaries)
    }
}
