/// Output: the answer to stdout, errors to stderr, optional save to a file.
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::errors::AskError;
use crate::types::ErrorOutput;

/// Output context passed to all writers.
pub struct OutputCtx {
    /// Errors are written as a JSON envelope instead of plain lines.
    pub json: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Start a named timer that logs elapsed time at debug level on drop.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label)
    }
}

// --- Answer output ---

/// Write rendered output to stdout.
pub fn write_output(text: &str) {
    println!("{text}");
}

/// Write `text` to `path`, replacing any existing file.
///
/// The handle is closed when this returns, on success or failure.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_output(path: &Path, text: &str) -> anyhow::Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(text.as_bytes())
        .and_then(|()| file.flush())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Report the outcome of a save step on stderr. Never affects the exit code.
pub fn report_save(path: &Path, result: &anyhow::Result<()>) {
    match result {
        Ok(()) => eprintln!("\nResponse saved to: {}", path.display()),
        Err(e) => eprintln!("Warning: error saving file: {e:#}"),
    }
}

// --- Error output ---

/// Write an error to stderr.
pub fn write_error(err: &AskError, ctx: &OutputCtx) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    let _ = write_error_to(&mut out, err, ctx.json);
}

/// Write an error as a JSON envelope or as plain lines with all available detail.
///
/// # Errors
///
/// Returns an I/O error if `out` cannot be written.
pub fn write_error_to<W: Write>(out: &mut W, err: &AskError, json: bool) -> std::io::Result<()> {
    if json {
        let envelope = ErrorOutput::from_ask_error(err);
        let s = serde_json::to_string_pretty(&envelope).unwrap_or_default();
        return writeln!(out, "{s}");
    }

    writeln!(out, "Error: {err}")?;
    match err {
        AskError::Transport(failure) => {
            if let Some(code) = failure.status_code {
                writeln!(out, "Status Code: {code}")?;
            }
            if let Some(body) = &failure.response_body {
                writeln!(out, "Response: {body}")?;
            }
        }
        AskError::ResponseShape { raw, .. } => {
            let s = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
            writeln!(out, "{s}")?;
        }
        AskError::MissingApiKey => {}
    }
    Ok(())
}

// --- Debug timer ---

/// A RAII timer that logs elapsed milliseconds on drop.
///
/// Created via [`OutputCtx::timer`]. Visible with `--debug` or `RUST_LOG=debug`.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        let ms = self.start.elapsed().as_secs_f64() * 1000.0;
        debug!(step = self.label, "finished in {ms:.2}ms");
    }
}
