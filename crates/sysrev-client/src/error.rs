//! Client error types.

use sysrev_core::{CoreError, LabelError};
use thiserror::Error;

/// Errors that can occur when talking to the Sysrev API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the server.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API returned a 429 Too Many Requests response. Not retried.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds the server asked us to wait.
        retry_after_secs: u64,
    },

    /// A response was missing a required field or had the wrong shape.
    #[error("unexpected response from {endpoint}: {message}")]
    Shape {
        /// Endpoint path the response came from.
        endpoint: String,
        message: String,
    },

    /// `label_ids`, `label_values` and `label_types` differ in length.
    #[error(
        "label_ids ({ids}), label_values ({values}) and label_types ({types}) must have the same length"
    )]
    LengthMismatch {
        ids: usize,
        values: usize,
        types: usize,
    },

    #[error(transparent)]
    Label(#[from] LabelError),

    /// Local file I/O (uploads).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub(crate) fn shape(endpoint: &str, message: impl std::fmt::Display) -> Self {
        Self::Shape {
            endpoint: endpoint.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Label(label) => Self::Label(label),
            other => Self::shape("project-info", other),
        }
    }
}
