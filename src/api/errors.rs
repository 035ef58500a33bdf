/// Errors from the HTTP transport layer.
use thiserror::Error;

/// A failed call to the API: connection error, timeout, non-2xx status, or a
/// 2xx body that is not a JSON object.
///
/// Carries whatever detail was obtained before the failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportFailure {
    /// Human-readable description.
    pub message: String,
    /// HTTP status, if a response was received.
    pub status_code: Option<u16>,
    /// Raw response body text, if one was read.
    pub response_body: Option<String>,
}

#[cfg(test)]
impl TransportFailure {
    /// A failure with no response at all.
    pub fn without_response(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            response_body: None,
        }
    }
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            status_code: err.status().map(|s| s.as_u16()),
            response_body: None,
        }
    }
}
