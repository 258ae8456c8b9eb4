//! Shared HTTP error mapping for the gateway and CA clients.

use serde::Deserialize;

use ledgerlink_core::error::{LinkError, Result};

/// Classify a reqwest transport failure. Timeouts and refused connections
/// map to `Connect` so callers can tell "remote unreachable" apart from
/// "remote said no".
pub(crate) fn transport_error(context: &str, err: reqwest::Error) -> LinkError {
    if err.is_timeout() || err.is_connect() {
        LinkError::Connect(format!("{context}: {err}"))
    } else if err.is_decode() {
        LinkError::Decode(format!("{context}: {err}"))
    } else {
        LinkError::Internal(format!("{context}: {err}"))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Turn a non-success response into the matching error kind, pulling the
/// remote's `{"error": ...}` detail into the message when present.
pub(crate) async fn check_status(context: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed.error,
        Err(_) => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                status.to_string()
            } else {
                trimmed.to_string()
            }
        }
    };
    match status.as_u16() {
        401 | 403 => Err(LinkError::Auth(format!("{context}: {detail}"))),
        _ => Err(LinkError::Rejected(format!("{context}: {detail}"))),
    }
}
