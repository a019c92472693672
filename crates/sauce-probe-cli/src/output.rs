//! Output formatting and progress reporting

use chrono::{DateTime, Utc};
use console::{style, Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use sauce_probe::fixtures::TestUser;
use sauce_probe::selectors::{Element, ProductControl};
use sauce_probe::{Product, SuiteResults, TestResult};
use serde::Serialize;
use std::fmt::Write as _;
use std::time::Duration;

/// Progress reporter for suite execution
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
    /// Print a line per finished test
    pub verbose: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
            verbose: false,
        }
    }

    /// Print a line per finished test
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Start a progress bar for a suite
    pub fn start_progress(&mut self, total: u64, message: &str) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(message.to_string());
        self.progress_bar = Some(pb);
    }

    /// Record a finished test
    pub fn record(&self, result: &TestResult) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(1);
        }
        let line = format!("{} ({} ms)", result.name, result.duration.as_millis());
        if result.passed {
            if self.verbose {
                self.println(&format!("{} {line}", self.pass_prefix()));
            }
        } else {
            let error = result.error.as_deref().unwrap_or("unknown error");
            self.println(&format!("{} {line}\n    {error}", self.fail_prefix()));
        }
    }

    /// Finish the progress bar
    pub fn finish(&mut self) {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_and_clear();
        }
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&styled);
    }

    /// Print the run summary
    pub fn summary(&self, passed: usize, failed: usize, duration: Duration) {
        if self.quiet && failed == 0 {
            return;
        }

        let _ = self.term.write_line("");

        let total = passed + failed;
        let duration_secs = duration.as_secs_f64();

        if self.use_color {
            let passed_style = Style::new().green().bold();
            let failed_style = Style::new().red().bold();

            let status = if failed > 0 {
                failed_style.apply_to("FAILED")
            } else {
                passed_style.apply_to("PASSED")
            };

            let _ = self.term.write_line(&format!(
                "{} {} tests in {:.2}s ({} passed, {} failed)",
                status,
                total,
                duration_secs,
                passed_style.apply_to(passed),
                if failed > 0 {
                    failed_style.apply_to(failed).to_string()
                } else {
                    failed.to_string()
                },
            ));
        } else {
            let status = if failed > 0 { "FAILED" } else { "PASSED" };
            let _ = self.term.write_line(&format!(
                "{status} {total} tests in {duration_secs:.2}s ({passed} passed, {failed} failed)"
            ));
        }
    }

    fn println(&self, line: &str) {
        match self.progress_bar {
            Some(ref pb) => pb.println(line),
            None => {
                let _ = self.term.write_line(line);
            }
        }
    }

    fn pass_prefix(&self) -> String {
        if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "PASS".to_string()
        }
    }

    fn fail_prefix(&self) -> String {
        if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        }
    }
}

/// Machine-readable record of a run
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Storefront origin the run targeted
    pub base_url: &'a str,
    /// Passed test count across suites
    pub passed: usize,
    /// Failed test count across suites
    pub failed: usize,
    /// Per-suite results
    pub suites: &'a [SuiteResults],
}

impl<'a> RunReport<'a> {
    /// Summarize `suites`
    #[must_use]
    pub fn new(started_at: DateTime<Utc>, base_url: &'a str, suites: &'a [SuiteResults]) -> Self {
        Self {
            started_at,
            base_url,
            passed: suites.iter().map(SuiteResults::passed_count).sum(),
            failed: suites.iter().map(SuiteResults::failed_count).sum(),
            suites,
        }
    }

    /// Render as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Table of test accounts
#[must_use]
pub fn render_users(users: &[TestUser]) -> String {
    let width = users.iter().map(|u| u.username.len()).max().unwrap_or(0);
    let mut out = String::new();
    for user in users {
        let _ = writeln!(
            out,
            "{:<width$}  {}  {}",
            user.username, user.password, user.description
        );
    }
    out
}

/// Table of registry elements and their selectors
#[must_use]
pub fn render_selectors(elements: &[Element]) -> String {
    let width = elements.iter().map(|e| e.name().len()).max().unwrap_or(0);
    let mut out = String::new();
    for element in elements {
        let _ = writeln!(out, "{:<width$}  {}", element.name(), element.selector());
    }
    out
}

/// The per-product controls of `product`
#[must_use]
pub fn render_product_controls(product: Product) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} (id {}, ${:.2})",
        product.display_name(),
        product.id(),
        product.price()
    );
    for (label, control) in [
        ("add to cart", ProductControl::AddToCart(product)),
        ("remove", ProductControl::Remove(product)),
    ] {
        let _ = writeln!(out, "  {label:<12} {}", control.selector());
    }
    out
}
