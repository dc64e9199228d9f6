//! Cross-cutting error types.
//!
//! Transport and storage errors live in their own crates (`ClientError`,
//! `StoreError`). The CLI is where they all converge into `anyhow`.

use thiserror::Error;

/// Errors raised while normalizing a label value for submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    /// The value does not have the shape its declared type accepts.
    #[error("Invalid value for {label_type} label: {reason}")]
    InvalidValue { label_type: String, reason: String },

    /// The declared label type is not one of boolean, categorical, string.
    #[error("Unsupported label type: {0}")]
    UnsupportedLabelType(String),
}

/// Errors that can be raised by any crate in the workspace.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A response payload is missing a required field or has the wrong shape.
    #[error("Unexpected response shape: {0}")]
    Shape(String),

    #[error(transparent)]
    Label(#[from] LabelError),
}
