//! update-discord CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use update_discord::cli::{Cli, CommandDispatcher, Commands};
use update_discord::config::load_config;
use update_discord::shell::{is_ci, SystemRunner};
use update_discord::ui::{create_ui, OutputMode};

/// Exit code for any fatal error.
const EXIT_FAILURE: u8 = 2;

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("update_discord=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("update_discord=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("update-discord starting with args: {:?}", cli);

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // needs-update is meant for scripts and never prompts
    let is_interactive = match &cli.command {
        Some(Commands::NeedsUpdate) => false,
        _ => cli.is_interactive() && !is_ci(),
    };

    let mut ui = create_ui(is_interactive, output_mode);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let runner = SystemRunner;
    let dispatcher = CommandDispatcher::new(&config, &runner);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) if e.is_declined() => {
            ui.message("Cancelled");
            ExitCode::SUCCESS
        }
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
