/// The ask flow: flags → payload → one API call → rendered output → stdout (and file).
use tracing::debug;

use crate::api::{self, ApiClient};
use crate::cli::Cli;
use crate::cli::OutputCtx;
use crate::cli::output::{report_save, save_output, write_output};
use crate::errors::AskError;
use crate::render::render;

/// Run `pplx <question>` against the production API.
///
/// # Errors
///
/// Returns `AskError::MissingApiKey` before any network activity when no key
/// was given, otherwise whatever [`run_with`] returns.
pub fn run(cli: &Cli, ctx: &OutputCtx) -> Result<(), AskError> {
    let api_key = cli.api_key().ok_or(AskError::MissingApiKey)?;
    let client = ApiClient::new(api_key);
    run_with(&client, cli, ctx)
}

/// Ask through `client`, print the answer, then save it if `--save` was given.
///
/// The answer is printed before any save is attempted; a failed save is only
/// reported.
///
/// # Errors
///
/// Returns `AskError` when the call fails or the response cannot be rendered.
pub fn run_with(client: &ApiClient, cli: &Cli, ctx: &OutputCtx) -> Result<(), AskError> {
    let output = answer(client, cli, ctx)?;
    write_output(&output);

    if let Some(path) = &cli.save {
        let result = save_output(path, &output);
        report_save(path, &result);
    }

    Ok(())
}

/// Send the question through `client` and render the response.
///
/// # Errors
///
/// `AskError::Transport` for a failed call, `AskError::ResponseShape` when
/// text mode cannot find the answer.
pub fn answer(client: &ApiClient, cli: &Cli, ctx: &OutputCtx) -> Result<String, AskError> {
    let payload = api::build(&cli.question, &cli.request_config());

    let t_send = ctx.timer("send");
    let body = client.send(&payload)?;
    drop(t_send);

    let _t_render = ctx.timer("render");
    match render(&body, &cli.render_options()) {
        Ok(text) => {
            debug!(bytes = text.len(), "rendered response");
            Ok(text)
        }
        Err(e) => Err(AskError::from_render(e, body)),
    }
}
