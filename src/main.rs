#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! pplx — ask the Perplexity search API a question from the CLI.

mod api;
mod ask;
mod cli;
mod errors;
mod logging;
mod render;
mod types;

use clap::Parser;

use cli::{Cli, OutputCtx, write_error};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.debug);

    let ctx = OutputCtx::new(cli.json);

    if let Err(err) = ask::run(&cli, &ctx) {
        write_error(&err, &ctx);
        std::process::exit(err.exit_code());
    }
}
