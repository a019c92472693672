//! CLI command definitions using clap

use crate::config::ColorChoice;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// sauce-probe: end-to-end checks for the Swag Labs storefront
#[derive(Parser, Debug)]
#[command(name = "sauce-probe")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run scenario suites against a real browser
    Run(RunArgs),

    /// List the storefront test accounts
    Users,

    /// Print the selector registry
    Selectors(SelectorsArgs),

    /// Show the resolved suite configuration
    Config(ConfigArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Suite to run (repeatable; default: all)
    #[arg(short, long = "suite", value_name = "NAME")]
    pub suites: Vec<String>,

    /// Only run tests whose name contains this text
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Stop on first failure
    #[arg(long)]
    pub fail_fast: bool,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Storefront origin
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print results as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the selectors command
#[derive(Parser, Debug, Default)]
pub struct SelectorsArgs {
    /// Show the per-product controls for this product key
    #[arg(short, long, value_name = "KEY")]
    pub product: Option<String>,
}

/// Arguments for the config command
#[derive(Parser, Debug, Default)]
pub struct ConfigArgs {
    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Automatic detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
