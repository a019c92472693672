//! Every scenario suite passes against the in-memory storefront.

use sauce_probe::scenarios::{all_suites, suite_by_name, SUITE_NAMES};
use sauce_probe::{MockFactory, TestHarness};

#[tokio::test]
async fn test_all_suites_pass_offline() {
    sauce_probe::logging::init_for_tests();
    let results = TestHarness::new()
        .run_all(&all_suites(), &MockFactory::default())
        .await;
    assert_eq!(results.len(), SUITE_NAMES.len());
    for suite in &results {
        let failures: Vec<String> = suite
            .failures()
            .iter()
            .map(|r| format!("{}: {}", r.name, r.error.as_deref().unwrap_or_default()))
            .collect();
        assert!(failures.is_empty(), "{} failed: {failures:#?}", suite.suite_name);
        assert!(suite.total() > 0);
    }
}

#[tokio::test]
async fn test_filter_narrows_a_suite() {
    let suite = suite_by_name("checkout").unwrap();
    let results = TestHarness::new()
        .with_filter("step one rejects")
        .run(&suite, &MockFactory::default())
        .await;
    assert_eq!(results.total(), 3);
    assert!(results.all_passed());
}

#[tokio::test]
async fn test_results_serialize_for_reports() {
    let suite = suite_by_name("navigation").unwrap();
    let results = TestHarness::new()
        .with_filter("page title")
        .run(&suite, &MockFactory::default())
        .await;
    let json = serde_json::to_value(&results).unwrap();
    assert_eq!(json["suite_name"], "navigation");
    assert_eq!(json["results"][0]["name"], "page title");
    assert_eq!(json["results"][0]["passed"], true);
}
