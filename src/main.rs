mod app;
mod cli;
mod config;
mod endpoint;
mod error;
mod extract;
mod history;
mod output;
mod utils;
mod viewer;

use std::process::ExitCode;

use clap::Parser;

use app::{CommandContext, run};
use cli::Cli;
use config::Config;
use utils::{Timezone, init_logging};

fn main() -> ExitCode {
    let config = Config::load();
    let cli = Cli::parse().with_config(&config);
    init_logging(cli.debug);

    if let Some(path) = &config.source {
        log::debug!("loaded config from {}", path.display());
    }

    let timezone = match Timezone::parse(cli.timezone.as_deref()) {
        Ok(tz) => tz,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let ctx = CommandContext {
        cli: &cli,
        timezone,
    };
    match run(&ctx) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
