//! Gateway error taxonomy.

use thiserror::Error;

/// Errors surfaced by remote service calls.
///
/// The taxonomy is deliberately small: transport failures, expired
/// sessions, logical failures with whatever message the service provided,
/// and bodies that would not decode. Nothing is retried.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No response at all (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered 401; the stored token is no longer valid.
    #[error("session expired")]
    SessionExpired,

    /// Non-2xx response with the service's message, or a generic fallback
    /// when the body carried none.
    #[error("{message} (status {status})")]
    Status { status: u16, message: String },

    /// 2xx response whose body did not decode as the expected JSON.
    #[error("invalid response body: {0}")]
    Body(String),
}

impl GatewayError {
    /// Map a non-2xx response to an error. The message is taken from the
    /// body's `message` field when present.
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 401 {
            return GatewayError::SessionExpired;
        }

        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| "request failed".to_string());

        GatewayError::Status { status, message }
    }

    /// True when the error means the stored token should be discarded.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, GatewayError::SessionExpired)
    }
}
