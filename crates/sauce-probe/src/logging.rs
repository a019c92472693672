//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins when set; otherwise `default_directive` applies.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Level for a `-v` count: 0 = warn, 1 = info, 2 = debug, 3+ = trace
#[must_use]
pub fn level_for_verbosity(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Directive that applies `level` to this crate and `warn` to everything else
#[must_use]
pub fn crate_directive(level: &str) -> String {
    format!("warn,sauce_probe={level}")
}

fn filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the global subscriber, writing to stderr. Returns false when one is already set.
pub fn init(default_directive: &str) -> bool {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter(default_directive))
        .try_init()
        .is_ok()
}

/// Install a subscriber that writes through the test harness capture
pub fn init_for_tests() -> bool {
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(filter("sauce_probe=debug"))
        .try_init()
        .is_ok()
}
