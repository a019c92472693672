//! Scenario harness.
//!
//! A [`TestCase`] is an async scenario over a [`SharedDriver`]. The
//! [`TestHarness`] asks a [`DriverFactory`] for a fresh driver per case, runs
//! the scenario under the case timeout and closes the driver afterwards, so
//! no state leaks from one case into the next.

use crate::driver::SharedDriver;
use crate::result::{ProbeError, ProbeResult};
use crate::storefront::MockStorefront;
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use serde::{Serialize, Serializer};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Default per-case timeout (30 seconds)
pub const DEFAULT_CASE_TIMEOUT_MS: u64 = 30_000;

/// Produces one isolated driver per test case
#[async_trait]
pub trait DriverFactory: Send + Sync {
    /// Create a driver with a fresh browser context
    async fn create(&self) -> ProbeResult<SharedDriver>;
}

/// Hands out fresh in-memory storefronts
#[derive(Debug, Clone)]
pub struct MockFactory {
    base_url: String,
}

impl MockFactory {
    /// Storefronts served at `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for MockFactory {
    fn default() -> Self {
        Self::new(crate::fixtures::BASE_URL)
    }
}

#[async_trait]
impl DriverFactory for MockFactory {
    async fn create(&self) -> ProbeResult<SharedDriver> {
        Ok(Arc::new(MockStorefront::with_base_url(self.base_url.clone())))
    }
}

type ScenarioFn = Arc<dyn Fn(SharedDriver) -> BoxFuture<'static, ProbeResult<()>> + Send + Sync>;

/// A test suite containing multiple tests
#[derive(Debug, Clone)]
pub struct TestSuite {
    /// Suite name
    pub name: String,
    /// Tests in this suite
    pub tests: Vec<TestCase>,
}

impl TestSuite {
    /// Create a new test suite
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: Vec::new(),
        }
    }

    /// Add a test case
    pub fn add_test(&mut self, test: TestCase) {
        self.tests.push(test);
    }

    /// Add a test case, builder style
    #[must_use]
    pub fn with_test(mut self, test: TestCase) -> Self {
        self.add_test(test);
        self
    }

    /// Get the number of tests
    #[must_use]
    pub fn test_count(&self) -> usize {
        self.tests.len()
    }

    /// Names of the tests, in run order
    #[must_use]
    pub fn test_names(&self) -> Vec<&str> {
        self.tests.iter().map(|t| t.name.as_str()).collect()
    }
}

/// A single scenario
#[derive(Clone)]
pub struct TestCase {
    /// Test name
    pub name: String,
    /// Test timeout in milliseconds
    pub timeout_ms: u64,
    scenario: ScenarioFn,
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}

impl TestCase {
    /// Wrap an async scenario
    #[must_use]
    pub fn new<F, Fut>(name: impl Into<String>, scenario: F) -> Self
    where
        F: Fn(SharedDriver) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ProbeResult<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            timeout_ms: DEFAULT_CASE_TIMEOUT_MS,
            scenario: Arc::new(move |driver| scenario(driver).boxed()),
        }
    }

    /// Set timeout
    #[must_use]
    pub const fn with_timeout(mut self, ms: u64) -> Self {
        self.timeout_ms = ms;
        self
    }

    /// Run the scenario against `driver`, failing with
    /// [`ProbeError::Timeout`] when it overruns
    pub async fn run(&self, driver: SharedDriver) -> ProbeResult<()> {
        let timeout = Duration::from_millis(self.timeout_ms);
        tokio::time::timeout(timeout, (self.scenario)(driver))
            .await
            .map_err(|_| ProbeError::Timeout {
                ms: self.timeout_ms,
            })?
    }
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// Result of a single test
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    /// Test name
    pub name: String,
    /// Whether the test passed
    pub passed: bool,
    /// Error message if failed
    pub error: Option<String>,
    /// Test duration
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl TestResult {
    /// Create a passing result
    #[must_use]
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            error: None,
            duration: Duration::ZERO,
        }
    }

    /// Create a failing result
    #[must_use]
    pub fn fail(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            error: Some(error.into()),
            duration: Duration::ZERO,
        }
    }

    /// Set duration
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Results from running a test suite
#[derive(Debug, Clone, Serialize)]
pub struct SuiteResults {
    /// Suite name
    pub suite_name: String,
    /// Individual test results
    pub results: Vec<TestResult>,
    /// Total duration
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl SuiteResults {
    /// Check if all tests passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Count passed tests
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// Count failed tests
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }

    /// Total number of tests
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Get failed tests
    #[must_use]
    pub fn failures(&self) -> Vec<&TestResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }
}

/// Test harness for running suites
#[derive(Debug, Clone, Default)]
pub struct TestHarness {
    /// Whether to stop on first failure
    pub fail_fast: bool,
    /// Only run tests whose name contains this text
    pub filter: Option<String>,
}

impl TestHarness {
    /// Create a new test harness
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable fail-fast mode
    #[must_use]
    pub const fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Only run tests whose name contains `filter`
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Whether the filter selects `test`
    #[must_use]
    pub fn selects(&self, test: &TestCase) -> bool {
        self.filter
            .as_deref()
            .map_or(true, |filter| test.name.contains(filter))
    }

    /// Run a test suite
    pub async fn run(&self, suite: &TestSuite, factory: &dyn DriverFactory) -> SuiteResults {
        self.run_observed(suite, factory, &mut |_| {}).await
    }

    /// Run a test suite, reporting every result to `observer` as it lands
    pub async fn run_observed(
        &self,
        suite: &TestSuite,
        factory: &dyn DriverFactory,
        observer: &mut (dyn FnMut(&TestResult) + Send),
    ) -> SuiteResults {
        let start = Instant::now();
        let mut results = Vec::new();
        info!(suite = %suite.name, tests = suite.test_count(), "suite started");

        for test in suite.tests.iter().filter(|t| self.selects(t)) {
            let result = run_case(test, factory).await;
            observer(&result);
            let failed = !result.passed;
            results.push(result);
            if failed && self.fail_fast {
                warn!(suite = %suite.name, "stopping after first failure");
                break;
            }
        }

        let results = SuiteResults {
            suite_name: suite.name.clone(),
            results,
            duration: start.elapsed(),
        };
        info!(
            suite = %suite.name,
            passed = results.passed_count(),
            failed = results.failed_count(),
            "suite finished"
        );
        results
    }

    /// Run suites in order; with fail-fast, stop after the first failing suite
    pub async fn run_all(
        &self,
        suites: &[TestSuite],
        factory: &dyn DriverFactory,
    ) -> Vec<SuiteResults> {
        let mut all = Vec::new();
        for suite in suites {
            let results = self.run(suite, factory).await;
            let failed = !results.all_passed();
            all.push(results);
            if failed && self.fail_fast {
                break;
            }
        }
        all
    }
}

async fn run_case(test: &TestCase, factory: &dyn DriverFactory) -> TestResult {
    let start = Instant::now();
    info!(test = %test.name, "test started");
    let driver = match factory.create().await {
        Ok(driver) => driver,
        Err(error) => {
            warn!(test = %test.name, %error, "could not create driver");
            return TestResult::fail(&test.name, error.to_string()).with_duration(start.elapsed());
        }
    };

    let outcome = test.run(driver.clone()).await;
    if let Err(error) = driver.close().await {
        warn!(test = %test.name, %error, "driver did not close cleanly");
    }

    let result = match outcome {
        Ok(()) => TestResult::pass(&test.name),
        Err(error) => TestResult::fail(&test.name, error.to_string()),
    }
    .with_duration(start.elapsed());
    info!(test = %test.name, passed = result.passed, duration = ?result.duration, "test finished");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::paths;

    async fn open_login(driver: SharedDriver) -> ProbeResult<()> {
        driver.goto(paths::LOGIN).await
    }

    async fn always_fails(_driver: SharedDriver) -> ProbeResult<()> {
        Err(ProbeError::assertion("badge hidden"))
    }

    async fn sleeps(_driver: SharedDriver) -> ProbeResult<()> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok(())
    }

    struct BrokenFactory;

    #[async_trait]
    impl DriverFactory for BrokenFactory {
        async fn create(&self) -> ProbeResult<SharedDriver> {
            Err(ProbeError::BrowserNotFound)
        }
    }

    fn mixed_suite() -> TestSuite {
        TestSuite::new("mixed")
            .with_test(TestCase::new("opens login", open_login))
            .with_test(TestCase::new("fails on purpose", always_fails))
            .with_test(TestCase::new("opens login again", open_login))
    }

    mod suite_tests {
        use super::*;

        #[test]
        fn test_suite_bookkeeping() {
            let mut suite = TestSuite::new("auth");
            assert_eq!(suite.test_count(), 0);
            suite.add_test(TestCase::new("a", open_login));
            assert_eq!(suite.test_count(), 1);
            assert_eq!(suite.test_names(), vec!["a"]);
        }

        #[test]
        fn test_case_timeout() {
            let case = TestCase::new("slow", sleeps).with_timeout(60_000);
            assert_eq!(case.timeout_ms, 60_000);
            assert_eq!(TestCase::new("x", sleeps).timeout_ms, DEFAULT_CASE_TIMEOUT_MS);
            assert!(format!("{case:?}").contains("slow"));
        }

        #[test]
        fn test_result_json_uses_millis() {
            let result = TestResult::fail("t", "boom").with_duration(Duration::from_millis(1500));
            let json = serde_json::to_value(&result).unwrap();
            assert_eq!(json["duration_ms"], 1500);
            assert_eq!(json["error"], "boom");
            assert_eq!(json["passed"], false);
        }
    }

    mod harness_tests {
        use super::*;

        #[tokio::test]
        async fn test_runs_every_case() {
            let results = TestHarness::new().run(&mixed_suite(), &MockFactory::default()).await;
            assert_eq!(results.total(), 3);
            assert_eq!(results.passed_count(), 2);
            assert_eq!(results.failed_count(), 1);
            assert!(!results.all_passed());
            let failure = results.failures()[0];
            assert_eq!(failure.name, "fails on purpose");
            assert!(failure.error.as_deref().unwrap_or_default().contains("badge hidden"));
        }

        #[tokio::test]
        async fn test_fail_fast_stops() {
            let results = TestHarness::new()
                .with_fail_fast()
                .run(&mixed_suite(), &MockFactory::default())
                .await;
            assert_eq!(results.total(), 2);
        }

        #[tokio::test]
        async fn test_filter_selects_by_name() {
            let harness = TestHarness::new().with_filter("opens");
            let results = harness.run(&mixed_suite(), &MockFactory::default()).await;
            assert_eq!(results.total(), 2);
            assert!(results.all_passed());
        }

        #[tokio::test]
        async fn test_timeout_fails_case() {
            let suite = TestSuite::new("slow").with_test(TestCase::new("sleeps", sleeps).with_timeout(10));
            let results = TestHarness::new().run(&suite, &MockFactory::default()).await;
            assert_eq!(
                results.results[0].error.as_deref(),
                Some("Operation timed out after 10ms")
            );
        }

        #[tokio::test]
        async fn test_factory_failure_fails_case() {
            let results = TestHarness::new().run(&mixed_suite(), &BrokenFactory).await;
            assert_eq!(results.failed_count(), 3);
            assert!(results.results[0]
                .error
                .as_deref()
                .unwrap_or_default()
                .contains("Browser not found"));
        }

        #[tokio::test]
        async fn test_observer_sees_each_result() {
            let mut seen = Vec::new();
            TestHarness::new()
                .run_observed(&mixed_suite(), &MockFactory::default(), &mut |r| {
                    seen.push(r.passed);
                })
                .await;
            assert_eq!(seen, vec![true, false, true]);
        }

        #[tokio::test]
        async fn test_run_all_fail_fast_skips_later_suites() {
            let suites = vec![mixed_suite(), mixed_suite()];
            let harness = TestHarness::new().with_fail_fast();
            let all = harness.run_all(&suites, &MockFactory::default()).await;
            assert_eq!(all.len(), 1);
            let all = TestHarness::new().run_all(&suites, &MockFactory::default()).await;
            assert_eq!(all.len(), 2);
        }
    }
}
