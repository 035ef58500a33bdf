/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::Parser;
use clap::builder::NonEmptyStringValueParser;

use crate::api::{RecencyFilter, RequestConfig};
use crate::api::request::DEFAULT_MODEL;
use crate::errors::API_KEY_ENV;
use crate::render::RenderOptions;

/// pplx — ask the Perplexity search API a question.
#[derive(Debug, Parser)]
#[command(
    name = "pplx",
    about = "Ask the Perplexity AI search API a question from the CLI",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Question to ask.
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub question: String,

    /// Perplexity API key. Prefer the environment variable.
    #[arg(long, env = API_KEY_ENV, hide_env_values = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Model to use.
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Maximum tokens in the response.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    #[arg(long, default_value_t = 0.2)]
    pub temperature: f64,

    /// Nucleus sampling threshold.
    #[arg(long, default_value_t = 0.9)]
    pub top_p: f64,

    /// Top-k sampling (0 disables).
    #[arg(long, default_value_t = 0)]
    pub top_k: u32,

    /// Presence penalty.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub presence_penalty: f64,

    /// Frequency penalty.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub frequency_penalty: f64,

    /// Include citations (default).
    #[arg(long, overrides_with = "no_citations")]
    pub citations: bool,

    /// Exclude citations from the request and the output.
    #[arg(long, overrides_with = "citations")]
    pub no_citations: bool,

    /// Ask for images in the response.
    #[arg(long)]
    pub images: bool,

    /// Ask for and print related questions.
    #[arg(long)]
    pub related_questions: bool,

    /// Restrict search to these domains.
    #[arg(long, num_args = 0.., value_name = "DOMAIN")]
    pub domain_filter: Vec<String>,

    /// Restrict search to recent content.
    #[arg(long, value_name = "WINDOW")]
    pub recency: Option<RecencyFilter>,

    /// Print the raw JSON response.
    #[arg(long)]
    pub json: bool,

    /// Indent JSON output (default).
    #[arg(long, conflicts_with = "compact")]
    pub pretty: bool,

    /// Print JSON output on a single line.
    #[arg(long)]
    pub compact: bool,

    /// Also write the output to this file.
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,

    /// Log requests and step timings to stderr.
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// API key from the flag or the environment; empty counts as missing.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// `--citations` and `--no-citations` override each other; citations are on by default.
    fn citations_enabled(&self) -> bool {
        self.citations || !self.no_citations
    }

    /// Request options derived from the flags.
    #[must_use]
    pub fn request_config(&self) -> RequestConfig {
        RequestConfig {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            return_citations: self.citations_enabled(),
            search_domain_filter: self.domain_filter.clone(),
            return_images: self.images,
            return_related_questions: self.related_questions,
            search_recency_filter: self.recency,
            top_k: self.top_k,
            presence_penalty: self.presence_penalty,
            frequency_penalty: self.frequency_penalty,
        }
    }

    /// Rendering options derived from the flags.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            as_json: self.json,
            show_citations: self.citations_enabled(),
            show_related_questions: self.related_questions,
            pretty: self.pretty || !self.compact,
        }
    }
}
