//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks (429 with `Retry-After` parsing,
//! non-success → [`ClientError::Api`]) and the `result` envelope most
//! endpoints wrap their payload in.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;

/// Check an HTTP response for error statuses.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`ClientError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s).
/// - **Non-success status** → [`ClientError::Api`] with the response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(ClientError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(ClientError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Send a request, check its status and decode the body as JSON.
pub async fn send_json(request: reqwest::RequestBuilder) -> Result<Value, ClientError> {
    let resp = check_response(request.send().await?).await?;
    Ok(resp.json::<Value>().await?)
}

/// Take the payload out of a `{"result": ...}` envelope.
///
/// Bodies without the envelope are returned as they are.
#[must_use]
pub fn unwrap_result(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("result") => {
            map.remove("result").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Decode an enveloped payload into `T`, reporting failures against `endpoint`.
pub fn decode<T: DeserializeOwned>(endpoint: &str, body: Value) -> Result<T, ClientError> {
    serde_json::from_value(unwrap_result(body)).map_err(|e| ClientError::shape(endpoint, e))
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
