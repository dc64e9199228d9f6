//! Store error types.

/// Errors that can occur in the local mirror storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// `DuckDB` operation failed (unwritable file, constraint violation, ...).
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    /// I/O error (file operations on `DuckDB` files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A table cannot be written as described.
    #[error("Invalid table {table}: {reason}")]
    InvalidTable { table: String, reason: String },
}
