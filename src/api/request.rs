/// Request construction: options bag → `/chat/completions` payload.
///
/// Every optional option is an explicit `Option` (or an empty `Vec` for the
/// domain filter). Unset options are skipped during serialization; set ones
/// are always sent, including legitimate zeros such as `temperature = 0`.
use clap::ValueEnum;
use serde::Serialize;

/// Model used when none is given.
pub const DEFAULT_MODEL: &str = "sonar";

/// Time window for the remote search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecencyFilter {
    Hour,
    Day,
    Week,
    Month,
}

/// Options for a single question, built once per invocation from CLI input.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfig {
    pub model: String,
    /// `None` means no limit; the key is then omitted.
    pub max_tokens: Option<u32>,
    pub temperature: f64,
    pub top_p: f64,
    pub return_citations: bool,
    /// Empty means no filter; the key is then omitted.
    pub search_domain_filter: Vec<String>,
    pub return_images: bool,
    pub return_related_questions: bool,
    pub search_recency_filter: Option<RecencyFilter>,
    pub top_k: u32,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_owned(),
            max_tokens: None,
            temperature: 0.2,
            top_p: 0.9,
            return_citations: true,
            search_domain_filter: Vec::new(),
            return_images: false,
            return_related_questions: false,
            search_recency_filter: None,
            top_k: 0,
            presence_penalty: 0.0,
            frequency_penalty: 1.0,
        }
    }
}

/// One conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    /// A `user` turn carrying `content`.
    #[must_use]
    pub fn user(content: &str) -> Self {
        Self {
            role: "user",
            content: content.to_owned(),
        }
    }
}

/// The serialized request body. Field order here is the key order on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub temperature: f64,
    pub top_p: f64,
    pub return_citations: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub search_domain_filter: Vec<String>,
    pub return_images: bool,
    pub return_related_questions: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_recency_filter: Option<RecencyFilter>,
    pub top_k: u32,
    /// Always `false`; streamed responses are not consumed.
    pub stream: bool,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
}

/// Build the payload for `question` from `config`.
///
/// No range checks are done here; the API validates numeric options.
#[must_use]
pub fn build(question: &str, config: &RequestConfig) -> Payload {
    Payload {
        model: config.model.clone(),
        messages: vec![ChatMessage::user(question)],
        max_tokens: config.max_tokens,
        temperature: config.temperature,
        top_p: config.top_p,
        return_citations: config.return_citations,
        search_domain_filter: config.search_domain_filter.clone(),
        return_images: config.return_images,
        return_related_questions: config.return_related_questions,
        search_recency_filter: config.search_recency_filter,
        top_k: config.top_k,
        stream: false,
        presence_penalty: config.presence_penalty,
        frequency_penalty: config.frequency_penalty,
    }
}
