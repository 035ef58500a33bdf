/// Serializable error envelope written to stderr in `--json` mode.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AskError;

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// HTTP status, when the API answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Raw response text from a failed call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_body: Option<String>,
    /// The decoded response, for shape errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

impl ErrorOutput {
    /// Construct from an `AskError`.
    #[must_use]
    pub fn from_ask_error(err: &AskError) -> Self {
        let (status_code, response_body, raw) = match err {
            AskError::Transport(failure) => {
                (failure.status_code, failure.response_body.clone(), None)
            }
            AskError::ResponseShape { raw, .. } => (None, None, Some(raw.clone())),
            AskError::MissingApiKey => (None, None, None),
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
                status_code,
                response_body,
                raw,
            },
        }
    }
}
