/// Blocking HTTP client for the `/chat/completions` endpoint.
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

use super::errors::TransportFailure;
use super::request::Payload;

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";

/// Outcome of one API call: the decoded JSON object, or the failure.
///
/// The `Ok` value is always a `Value::Object`; its contents are not checked.
pub type ApiResult = Result<Value, TransportFailure>;

/// Sends one request per call. Holds the credential it was constructed with
/// and never consults the environment.
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    /// Client for the production host.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Client for an arbitrary host (e.g. a local stand-in).
    #[must_use]
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Full URL requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// POST `payload` and decode the response.
    ///
    /// # Errors
    ///
    /// Returns `TransportFailure` on connection errors, timeouts, non-2xx
    /// statuses, and 2xx bodies that are not a JSON object. Never panics on
    /// network input.
    pub fn send(&self, payload: &Payload) -> ApiResult {
        let url = self.endpoint();
        debug!(%url, model = %payload.model, "sending chat completion request");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()?;

        let status = response.status();
        debug!(status = status.as_u16(), "response received");

        let body = response.text().map_err(|e| TransportFailure {
            message: format!("Failed to read response body: {e}"),
            status_code: Some(status.as_u16()),
            response_body: None,
        })?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "API returned an error status");
            return Err(TransportFailure {
                message: format!("HTTP {status} from {url}"),
                status_code: Some(status.as_u16()),
                response_body: Some(body),
            });
        }

        decode_object(status.as_u16(), body)
    }
}

#[cfg(test)]
impl ApiClient {
    /// Client that reaches a local host directly, ignoring proxy env vars.
    pub(crate) fn without_proxy(api_key: &str, base_url: String) -> Self {
        Self {
            client: Client::builder().no_proxy().build().unwrap(),
            base_url,
            api_key: api_key.to_owned(),
        }
    }
}

/// Parse a successful body, requiring a top-level JSON object.
fn decode_object(status: u16, body: String) -> ApiResult {
    match serde_json::from_str::<Value>(&body) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err(TransportFailure {
            message: "Response body is not a JSON object".to_owned(),
            status_code: Some(status),
            response_body: Some(body),
        }),
        Err(e) => Err(TransportFailure {
            message: format!("Failed to parse response as JSON: {e}"),
            status_code: Some(status),
            response_body: Some(body),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::{RequestConfig, build};
    use crate::api::stand_in::{capture_logs, local_client, serve_once};
    use serde_json::json;
    use std::net::TcpListener;
    use tracing::Level;

    #[test]
    fn test_success_returns_body_verbatim() {
        let body = r#"{"choices":[{"message":{"content":"hello"}}],"citations":["a","b"],"extra":{"x":1}}"#;
        let (base_url, rx) = serve_once("200 OK", body);
        let client = local_client("test-key", base_url);

        let result = client.send(&build("hi", &RequestConfig::default()));

        assert_eq!(result.unwrap(), serde_json::from_str::<Value>(body).unwrap());
        let captured = rx.recv().unwrap();
        assert_eq!(captured.request_line, "POST /chat/completions HTTP/1.1");
    }

    #[test]
    fn test_sends_auth_and_payload() {
        let (base_url, rx) = serve_once("200 OK", r#"{"choices":[]}"#);
        let client = local_client("secret-123", base_url);
        let payload = build("What is Rust?", &RequestConfig::default());

        client.send(&payload).unwrap();

        let captured = rx.recv().unwrap();
        assert_eq!(captured.header("authorization"), Some("Bearer secret-123"));
        assert_eq!(captured.header("content-type"), Some("application/json"));
        let sent: Value = serde_json::from_str(&captured.body).unwrap();
        assert_eq!(sent, serde_json::to_value(&payload).unwrap());
    }

    #[test]
    fn test_unauthorized_is_failure_with_status_and_body() {
        let (base_url, _rx) = serve_once("401 Unauthorized", r#"{"error":"invalid key"}"#);
        let client = local_client("bad", base_url);

        let failure = client
            .send(&build("q", &RequestConfig::default()))
            .unwrap_err();

        assert_eq!(failure.status_code, Some(401));
        assert_eq!(failure.response_body.as_deref(), Some(r#"{"error":"invalid key"}"#));
        assert!(failure.message.contains("401"));
    }

    #[test]
    fn test_error_status_is_not_logged_at_warn() {
        let (base_url, _rx) = serve_once("401 Unauthorized", "denied");
        let client = local_client("bad", base_url);

        let (result, logged) =
            capture_logs(Level::WARN, || client.send(&build("q", &RequestConfig::default())));

        assert_eq!(result.unwrap_err().status_code, Some(401));
        assert!(logged.is_empty(), "unexpected log output: {logged}");
    }

    #[test]
    fn test_server_error_is_failure() {
        let (base_url, _rx) = serve_once("503 Service Unavailable", "busy");
        let client = local_client("k", base_url);

        let failure = client
            .send(&build("q", &RequestConfig::default()))
            .unwrap_err();

        assert_eq!(failure.status_code, Some(503));
        assert_eq!(failure.response_body.as_deref(), Some("busy"));
    }

    #[test]
    fn test_unparseable_body_is_failure() {
        let (base_url, _rx) = serve_once("200 OK", "<html>not json</html>");
        let client = local_client("k", base_url);

        let failure = client
            .send(&build("q", &RequestConfig::default()))
            .unwrap_err();

        assert_eq!(failure.status_code, Some(200));
        assert_eq!(failure.response_body.as_deref(), Some("<html>not json</html>"));
    }

    #[test]
    fn test_non_object_body_is_failure() {
        let (base_url, _rx) = serve_once("200 OK", "[1,2,3]");
        let client = local_client("k", base_url);

        let failure = client
            .send(&build("q", &RequestConfig::default()))
            .unwrap_err();

        assert!(failure.message.contains("not a JSON object"));
    }

    #[test]
    fn test_connection_refused_is_failure_without_status() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let client = local_client("k", base_url);

        let failure = client
            .send(&build("q", &RequestConfig::default()))
            .unwrap_err();

        assert_eq!(failure.status_code, None);
        assert_eq!(failure.response_body, None);
        assert!(!failure.message.is_empty());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = ApiClient::with_base_url("k", "https://example.test/");
        assert_eq!(client.endpoint(), "https://example.test/chat/completions");
        assert_eq!(
            ApiClient::new("k").endpoint(),
            "https://api.perplexity.ai/chat/completions"
        );
    }

    #[test]
    fn test_decode_object_accepts_objects_only() {
        assert_eq!(decode_object(200, "{}".to_owned()).unwrap(), json!({}));
        assert!(decode_object(200, "\"text\"".to_owned()).is_err());
    }
}
