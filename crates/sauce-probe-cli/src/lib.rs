//! sauce-probe command-line runner
//!
//! Wraps the scenario suites of the `sauce-probe` crate: `run` drives them
//! through Chromium, the other subcommands print fixtures and configuration.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;

pub use commands::{Cli, ColorArg, Commands, ConfigArgs, RunArgs, SelectorsArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{ProgressReporter, RunReport};
