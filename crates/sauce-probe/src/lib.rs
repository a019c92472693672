//! sauce-probe: page-object end-to-end suite for the Swag Labs storefront
//!
//! Page objects translate storefront-level intents ("add the backpack to the
//! cart", "read the order total") into element lookups against a
//! [`PageDriver`]. Scenario suites compose page objects and assert on what
//! they read back.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   sauce-probe Architecture                       │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌──────────────────────┐  │
//! │   │ Scenario   │    │ Page       │    │ PageDriver           │  │
//! │   │ suites     │───►│ objects    │───►│  MockStorefront      │  │
//! │   │ (harness)  │    │ + NavBar   │    │  ChromiumDriver (CDP)│  │
//! │   └────────────┘    └────────────┘    └──────────────────────┘  │
//! │                          │                                       │
//! │                          ▼                                       │
//! │                  Selector registry (data-test hooks)             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The offline test suite runs every scenario against [`MockStorefront`];
//! the `browser` feature adds `ChromiumDriver` for runs against the live
//! site.

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

mod assertion;
#[cfg(feature = "browser")]
mod browser;
mod catalog;
mod config;
mod driver;
mod harness;
mod locator;
mod page_object;
mod result;
mod storefront;

/// Static test data: credentials, checkout forms, expected copy and paths
pub mod fixtures;

/// Tracing subscriber setup
pub mod logging;

/// Price parsing and order arithmetic
pub mod money;

/// Page objects for every storefront page
pub mod pages;

/// Scenario suites shared by the integration tests and the CLI
pub mod scenarios;

/// Selector registry: the DOM hooks page objects rely on
#[allow(clippy::doc_markdown)]
pub mod selectors;

/// Polling waits and load states
pub mod wait;

pub use assertion::{Assertion, AssertionResult};
#[cfg(feature = "browser")]
pub use browser::{ChromiumDriver, ChromiumFactory};
pub use catalog::{slugify, Product, SortOption};
pub use config::{SuiteConfig, ENV_BASE_URL, ENV_CHROMIUM_PATH, ENV_HEADLESS, ENV_NO_SANDBOX};
pub use driver::{resolve_url, PageDriver, PageSnapshot, SharedDriver, StorageArea};
pub use harness::{
    DriverFactory, MockFactory, SuiteResults, TestCase, TestHarness, TestResult, TestSuite,
    DEFAULT_CASE_TIMEOUT_MS,
};
pub use locator::{Locator, LocatorOptions, Selector, DEFAULT_TIMEOUT_MS};
pub use page_object::{url_path, NavBar, PageObject, EXTERNAL_NAVIGATION_TIMEOUT_MS};
pub use result::{Observation, ProbeError, ProbeResult};
pub use storefront::MockStorefront;
