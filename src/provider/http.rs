//! HTTP client construction, SSE parsing, and status mapping.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, RETRY_AFTER};

use crate::error::UiForgeError;

/// Build the reqwest client used for provider calls.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, UiForgeError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(UiForgeError::Network)
}

/// Build Anthropic-style headers (x-api-key).
pub fn anthropic_headers(api_key: &str, version: &str) -> Result<HeaderMap, UiForgeError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let key = HeaderValue::from_str(api_key)
        .map_err(|_| UiForgeError::Configuration("API key contains invalid header characters".into()))?;
    headers.insert("x-api-key", key);
    headers.insert(
        "anthropic-version",
        HeaderValue::from_str(version)
            .map_err(|_| UiForgeError::Configuration(format!("invalid API version '{version}'")))?,
    );
    Ok(headers)
}

/// Parse an SSE "data:" line, returning None for "[DONE]" and non-data lines.
pub fn parse_sse_data(line: &str) -> Option<&str> {
    let data = line.strip_prefix("data:")?.trim_start();
    if data == "[DONE]" {
        return None;
    }
    Some(data)
}

/// Map a non-success HTTP status to an error.
///
/// The `retry-after` header wins over a `retry_after` field in the body.
pub fn status_to_error(status: u16, headers: &HeaderMap, body: &str) -> UiForgeError {
    let message = extract_error_message(body).unwrap_or_else(|| body.to_string());
    match status {
        401 | 403 => UiForgeError::Authentication(message),
        429 => UiForgeError::RateLimited {
            retry_after_ms: retry_after_header(headers).or_else(|| extract_retry_after(body)),
        },
        _ => UiForgeError::api(status, message),
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

/// `retry-after` in delay-seconds form. HTTP-date values are ignored.
fn retry_after_header(headers: &HeaderMap) -> Option<u64> {
    let seconds: f64 = headers.get(RETRY_AFTER)?.to_str().ok()?.trim().parse().ok()?;
    (seconds >= 0.0).then(|| (seconds * 1000.0) as u64)
}

fn extract_retry_after(body: &str) -> Option<u64> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("retry_after"))
                .and_then(|r| r.as_f64())
                .map(|s| (s * 1000.0) as u64)
        })
}
