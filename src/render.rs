/// Turning a decoded response into display text.
///
/// Two modes: the raw JSON object re-serialized (`as_json`), or the answer
/// text with optional citation and related-question sections.
use serde_json::Value;
use thiserror::Error;

/// Errors while rendering a successful response.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The response lacks a field text mode needs.
    #[error("Response is missing `{0}`")]
    MissingField(&'static str),
}

/// What to include and how to lay it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub as_json: bool,
    pub show_citations: bool,
    pub show_related_questions: bool,
    pub pretty: bool,
}

/// Render a successful response body.
///
/// Failures never reach here; the caller reports them instead.
///
/// # Errors
///
/// JSON mode never fails. Text mode returns `RenderError::MissingField` when
/// `choices[0].message.content` is absent, `choices` is empty, or the content
/// is not a string.
pub fn render(body: &Value, opts: &RenderOptions) -> Result<String, RenderError> {
    if opts.as_json {
        // `Value`'s `Display` is infallible; `{:#}` is the two-space pretty form.
        let text = if opts.pretty {
            format!("{body:#}")
        } else {
            body.to_string()
        };
        return Ok(text);
    }

    let content = answer_content(body)?;
    let mut parts = vec![content.to_owned()];

    if opts.show_citations {
        if let Some(citations) = non_empty_list(body, "citations") {
            parts.push("\nCitations:".to_owned());
            for (i, citation) in citations.iter().enumerate() {
                parts.push(format!("{}. {}", i + 1, display_item(citation)));
            }
        }
    }

    if opts.show_related_questions {
        if let Some(questions) = non_empty_list(body, "related_questions") {
            parts.push("\nRelated Questions:".to_owned());
            for question in questions {
                parts.push(format!("• {}", display_item(question)));
            }
        }
    }

    Ok(parts.join("\n"))
}

/// `choices[0].message.content`, walking one level at a time so the error
/// names the first missing piece.
fn answer_content(body: &Value) -> Result<&str, RenderError> {
    let first = body
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|c| c.first())
        .ok_or(RenderError::MissingField("choices[0]"))?;
    let message = first
        .get("message")
        .ok_or(RenderError::MissingField("choices[0].message"))?;
    message
        .get("content")
        .and_then(Value::as_str)
        .ok_or(RenderError::MissingField("choices[0].message.content"))
}

fn non_empty_list<'a>(body: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    body.get(key)
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
}

/// Strings verbatim; anything else as compact JSON.
fn display_item(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
