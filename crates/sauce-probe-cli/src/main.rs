//! sauce-probe: CLI for the Swag Labs storefront suites
//!
//! Usage:
//!   sauce-probe run                  # Run every suite in Chromium
//!   sauce-probe run -s cart --json   # One suite, JSON results on stdout
//!   sauce-probe users                # List test accounts
//!   sauce-probe selectors            # Print the selector registry
//!   sauce-probe config               # Show resolved configuration

use clap::Parser;
use sauce_probe::logging;
use sauce_probe_cli::{handlers, Cli, CliConfig, CliResult, ColorChoice, Commands};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    logging::init(&config.log_directive());

    match cli.command {
        Commands::Run(ref args) => handlers::run_suites(&config, args),
        Commands::Users => {
            handlers::list_users();
            Ok(())
        }
        Commands::Selectors(ref args) => handlers::list_selectors(args),
        Commands::Config(ref args) => handlers::show_config(args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let color: ColorChoice = cli.color.into();
    console::set_colors_enabled(color.should_color());
    console::set_colors_enabled_stderr(color.should_color());
    CliConfig::new()
        .with_flags(cli.verbose, cli.quiet)
        .with_color(color)
}
