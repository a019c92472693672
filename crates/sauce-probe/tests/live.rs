//! Scenario suites against the live storefront in Chromium.
//!
//! Run with `cargo test -p sauce-probe --features browser -- --ignored`.

#![cfg(feature = "browser")]

use sauce_probe::scenarios::suite_by_name;
use sauce_probe::{ChromiumFactory, SuiteConfig, TestHarness};

async fn run_live(name: &str) {
    sauce_probe::logging::init_for_tests();
    let config = SuiteConfig::load(None).unwrap();
    let factory = ChromiumFactory::new(config);
    let suite = suite_by_name(name).unwrap();
    let results = TestHarness::new().run(&suite, &factory).await;
    let failures: Vec<_> = results.failures().iter().map(|r| (&r.name, &r.error)).collect();
    assert!(results.all_passed(), "{name}: {failures:#?}");
}

#[tokio::test]
#[ignore = "requires Chromium and network access"]
async fn test_live_auth() {
    run_live("auth").await;
}

#[tokio::test]
#[ignore = "requires Chromium and network access"]
async fn test_live_inventory() {
    run_live("inventory").await;
}

#[tokio::test]
#[ignore = "requires Chromium and network access"]
async fn test_live_cart() {
    run_live("cart").await;
}

#[tokio::test]
#[ignore = "requires Chromium and network access"]
async fn test_live_checkout() {
    run_live("checkout").await;
}

#[tokio::test]
#[ignore = "requires Chromium and network access"]
async fn test_live_navigation() {
    run_live("navigation").await;
}

#[tokio::test]
#[ignore = "requires Chromium and network access"]
async fn test_live_data_layer() {
    run_live("data_layer").await;
}
