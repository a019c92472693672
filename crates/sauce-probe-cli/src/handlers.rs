//! Subcommand handlers

use crate::commands::{ConfigArgs, RunArgs, SelectorsArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{render_product_controls, render_selectors, render_users, RunReport};
use sauce_probe::fixtures::TestUser;
use sauce_probe::scenarios;
use sauce_probe::selectors::Element;
use sauce_probe::{Product, SuiteConfig, TestSuite};
use std::path::Path;

/// Suites named on the command line, or every suite when none are
pub fn select_suites(names: &[String]) -> CliResult<Vec<TestSuite>> {
    if names.is_empty() {
        return Ok(scenarios::all_suites());
    }
    names
        .iter()
        .map(|name| scenarios::suite_by_name(name).map_err(CliError::from))
        .collect()
}

/// File, then environment, then command-line overrides
pub fn resolve_suite_config(
    path: Option<&Path>,
    base_url: Option<&str>,
    headed: bool,
) -> CliResult<SuiteConfig> {
    let mut config = SuiteConfig::load(path)?;
    if let Some(url) = base_url {
        config = config.with_base_url(url);
    }
    if headed {
        config = config.with_headless(false);
    }
    config.validate()?;
    Ok(config)
}

/// `run`
pub fn run_suites(cli: &CliConfig, args: &RunArgs) -> CliResult<()> {
    let suites = select_suites(&args.suites)?;
    let config = resolve_suite_config(args.config.as_deref(), args.base_url.as_deref(), args.headed)?;
    execute(cli, args, &suites, config)
}

#[cfg(feature = "browser")]
fn execute(cli: &CliConfig, args: &RunArgs, suites: &[TestSuite], config: SuiteConfig) -> CliResult<()> {
    use crate::output::ProgressReporter;
    use sauce_probe::{ChromiumFactory, TestHarness, TestResult};
    use std::time::Instant;

    let mut harness = TestHarness::new();
    if args.fail_fast {
        harness = harness.with_fail_fast();
    }
    if let Some(ref filter) = args.filter {
        harness = harness.with_filter(filter.clone());
    }

    let quiet = cli.verbosity.is_quiet() || args.json;
    let mut reporter = ProgressReporter::new(cli.color.should_color(), quiet)
        .with_verbose(cli.verbosity.is_verbose());
    let started_at = chrono::Utc::now();
    let start = Instant::now();
    let base_url = config.base_url.clone();
    tracing::info!(%base_url, suites = suites.len(), "run started");

    let factory = ChromiumFactory::new(config);
    let runtime = tokio::runtime::Runtime::new()?;
    let mut all = Vec::new();
    for suite in suites {
        let selected = suite.tests.iter().filter(|t| harness.selects(t)).count();
        if selected == 0 {
            continue;
        }
        reporter.header(&suite.name);
        reporter.start_progress(selected as u64, &suite.name);
        let results = runtime.block_on(harness.run_observed(suite, &factory, &mut |result: &TestResult| {
            reporter.record(result);
        }));
        reporter.finish();
        let failed = !results.all_passed();
        all.push(results);
        if failed && args.fail_fast {
            break;
        }
    }

    let report = RunReport::new(started_at, &base_url, &all);
    if args.json {
        println!("{}", report.to_json()?);
    }
    reporter.summary(report.passed, report.failed, start.elapsed());

    if report.failed > 0 {
        return Err(CliError::TestsFailed {
            failed: report.failed,
            total: report.passed + report.failed,
        });
    }
    Ok(())
}

#[cfg(not(feature = "browser"))]
fn execute(_cli: &CliConfig, _args: &RunArgs, _suites: &[TestSuite], _config: SuiteConfig) -> CliResult<()> {
    Err(CliError::BrowserUnavailable)
}

/// `users`
pub fn list_users() {
    print!("{}", render_users(&TestUser::ALL));
}

/// `selectors`
pub fn list_selectors(args: &SelectorsArgs) -> CliResult<()> {
    match args.product {
        Some(ref key) => {
            let product: Product = key.parse()?;
            print!("{}", render_product_controls(product));
        }
        None => print!("{}", render_selectors(&Element::ALL)),
    }
    Ok(())
}

/// `config`
pub fn show_config(args: &ConfigArgs) -> CliResult<()> {
    let config = SuiteConfig::load(args.config.as_deref())?;
    print!("{}", config.to_yaml()?);
    Ok(())
}
