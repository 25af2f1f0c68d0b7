use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use chrono::Utc;

use crate::cli::{Cli, Commands, SESSION_HELP, SessionAction};
use crate::endpoint::{Endpoint, GradioEndpoint};
use crate::error::AppError;
use crate::extract::extract;
use crate::output::{
    HistoryTableOptions, PanelOptions, history_json, panel_json, print_banner,
    print_history_table, print_panel,
};
use crate::utils::{Timezone, filter_json};
use crate::viewer::{DisplayState, FETCHING, FetchOutcome, Viewer};

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) timezone: Timezone,
}

impl CommandContext<'_> {
    fn panel_options(&self) -> PanelOptions {
        PanelOptions {
            use_color: self.cli.use_color(),
        }
    }

    /// Print JSON output, optionally filtering through jq
    fn print_json(&self, json: &str) -> Result<(), AppError> {
        match self.cli.jq.as_deref() {
            Some(filter) => print!("{}", filter_json(json, filter)?),
            None => println!("{json}"),
        }
        Ok(())
    }
}

pub(crate) fn run(ctx: &CommandContext<'_>) -> Result<ExitCode, AppError> {
    match &ctx.cli.command {
        Some(Commands::Extract { file }) => handle_extract(file.as_deref(), ctx),
        Some(Commands::Interactive) => {
            let endpoint = connect(ctx.cli)?;
            let stdin = io::stdin();
            handle_interactive(Viewer::new(endpoint, ctx.timezone), stdin.lock(), ctx)
        }
        Some(Commands::Fetch) | None => {
            let endpoint = connect(ctx.cli)?;
            handle_fetch(Viewer::new(endpoint, ctx.timezone), ctx)
        }
    }
}

fn connect(cli: &Cli) -> Result<GradioEndpoint, AppError> {
    GradioEndpoint::new(cli.endpoint_url(), cli.request_timeout())
}

fn read_input(file: Option<&Path>) -> Result<String, AppError> {
    match file {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).map_err(|source| AppError::ReadInput {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .map_err(AppError::Stdin)?;
            Ok(raw)
        }
    }
}

fn handle_extract(file: Option<&Path>, ctx: &CommandContext<'_>) -> Result<ExitCode, AppError> {
    let raw = read_input(file)?;
    let result = extract(&raw, ctx.timezone.format_time(Utc::now()));
    show(&DisplayState::Showing(result), None, ctx)?;
    Ok(ExitCode::SUCCESS)
}

fn handle_fetch<E: Endpoint>(mut viewer: Viewer<E>, ctx: &CommandContext<'_>) -> Result<ExitCode, AppError> {
    let outcome = fetch_with_progress(&mut viewer, ctx);
    let now = Instant::now();
    show(viewer.display(), viewer.banner(now), ctx)?;
    Ok(match outcome {
        FetchOutcome::Extracted => ExitCode::SUCCESS,
        FetchOutcome::Failed | FetchOutcome::Busy => ExitCode::FAILURE,
    })
}

fn handle_interactive<E: Endpoint, R: BufRead>(
    mut viewer: Viewer<E>,
    input: R,
    ctx: &CommandContext<'_>,
) -> Result<ExitCode, AppError> {
    let interactive = !ctx.cli.json_output();
    if interactive {
        println!("{SESSION_HELP}");
    }

    let mut lines = input.lines();
    loop {
        if interactive {
            print!("archview> ");
            if let Err(e) = io::stdout().flush() {
                log::debug!("prompt flush failed: {e}");
            }
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.map_err(AppError::Stdin)?;

        match SessionAction::parse(&line) {
            SessionAction::Fetch => {
                fetch_with_progress(&mut viewer, ctx);
                show(viewer.display(), viewer.banner(Instant::now()), ctx)?;
            }
            SessionAction::Select(index) => {
                if viewer.select(index) {
                    show(viewer.display(), viewer.banner(Instant::now()), ctx)?;
                } else {
                    eprintln!(
                        "No history entry {} ({} stored).",
                        index + 1,
                        viewer.history().len()
                    );
                }
            }
            SessionAction::History => {
                if ctx.cli.json_output() {
                    ctx.print_json(&history_json(viewer.history()))?;
                } else {
                    print_history_table(
                        viewer.history(),
                        HistoryTableOptions {
                            use_color: ctx.cli.use_color(),
                        },
                    );
                }
                // A banner raised by an earlier fetch stays up until it expires
                if let Some(message) = viewer.banner(Instant::now()) {
                    print_banner(message, ctx.cli.use_color());
                }
            }
            SessionAction::Help => println!("{SESSION_HELP}"),
            SessionAction::Quit => break,
            SessionAction::Nothing => {}
            SessionAction::Unknown(text) => {
                eprintln!("Unknown command \"{text}\". Type ? for help.");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn fetch_with_progress<E: Endpoint>(viewer: &mut Viewer<E>, ctx: &CommandContext<'_>) -> FetchOutcome {
    let start = Instant::now();
    if !ctx.cli.json_output() {
        eprint!("{FETCHING}");
    }
    let outcome = viewer.fetch(start, Utc::now());
    if !ctx.cli.json_output() {
        match outcome {
            FetchOutcome::Extracted => {
                eprintln!(" done ({:.2}ms)", start.elapsed().as_secs_f64() * 1000.0);
            }
            FetchOutcome::Failed => eprintln!(" failed"),
            FetchOutcome::Busy => eprintln!(" already in progress"),
        }
    }
    outcome
}

fn show(display: &DisplayState, banner: Option<&str>, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let Some(panel) = display.panel() else {
        return Ok(());
    };
    if ctx.cli.json_output() {
        ctx.print_json(&panel_json(&panel, banner))?;
        return Ok(());
    }
    print_panel(&panel, ctx.panel_options());
    if let Some(message) = banner {
        print_banner(message, ctx.cli.use_color());
    }
    Ok(())
}
