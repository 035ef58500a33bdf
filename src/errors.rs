/// User-facing error taxonomy for one invocation.
use serde_json::Value;
use thiserror::Error;

use crate::api::TransportFailure;
use crate::render::RenderError;

/// Environment variable consulted when `--api-key` is not given.
pub const API_KEY_ENV: &str = "PERPLEXITY_API_KEY";

/// Everything that ends a run unsuccessfully.
///
/// A failed `--save` is not here: it is a warning and never changes the exit code.
#[derive(Debug, Error)]
pub enum AskError {
    /// No API key from the flag or the environment. Detected before any network call.
    #[error("Perplexity API key is required! Either set PERPLEXITY_API_KEY environment variable or use --api-key")]
    MissingApiKey,

    /// The HTTP call failed.
    #[error(transparent)]
    Transport(#[from] TransportFailure),

    /// The response decoded but lacks fields text mode needs.
    #[error("Unexpected response shape: {source}")]
    ResponseShape {
        source: RenderError,
        /// The full decoded response, printed for diagnosis.
        raw: Value,
    },
}

impl AskError {
    /// Map a renderer error, attaching the raw body for diagnosis.
    #[must_use]
    pub fn from_render(err: RenderError, raw: Value) -> Self {
        Self::ResponseShape { source: err, raw }
    }

    /// Machine-readable code for the JSON error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "missing_api_key",
            Self::Transport(_) => "transport_failure",
            Self::ResponseShape { .. } => "response_shape",
        }
    }

    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingApiKey | Self::Transport(_) | Self::ResponseShape { .. } => 1,
        }
    }
}
