/// Tracing subscriber setup. Logs go to stderr so stdout carries only the answer.
use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--debug` selects debug output for this
/// crate and the default is warnings only.
pub fn init(debug: bool) {
    let fallback = if debug { "pplx=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
