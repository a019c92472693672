//! PageDriver - the browser automation contract page objects are written against.
//!
//! Page objects hold a [`SharedDriver`] and never touch a browser library
//! directly. Two implementations ship with the crate:
//!
//! - [`crate::storefront::MockStorefront`]: deterministic in-memory model of
//!   the storefront, used by the offline test suite
//! - `ChromiumDriver` (feature `browser`): Chrome DevTools Protocol via
//!   chromiumoxide
//!
//! Every method takes `&self`; implementations serialize access to the page
//! internally, so actions issued through one driver execute in issue order.

use crate::locator::{Locator, Selector};
use crate::page_object::EXTERNAL_NAVIGATION_TIMEOUT_MS;
use crate::result::{Observation, ProbeResult};
use crate::wait::{poll_until, LoadState, UrlPattern, WaitOptions};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Shared handle to a driver, cloned into every page object of a test
pub type SharedDriver = Arc<dyn PageDriver>;

/// Web storage area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageArea {
    /// `window.localStorage`
    Local,
    /// `window.sessionStorage`
    Session,
}

impl StorageArea {
    /// Name of the storage object in page script
    #[must_use]
    pub const fn js_name(self) -> &'static str {
        match self {
            Self::Local => "localStorage",
            Self::Session => "sessionStorage",
        }
    }
}

impl fmt::Display for StorageArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.js_name())
    }
}

/// Page-level texts and a row count captured together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// Text of the first match of each requested selector
    pub texts: Vec<Option<String>>,
    /// Number of elements matching the row selector
    pub row_count: usize,
}

/// Browser automation contract
///
/// Queries (`count`, `is_visible`, `is_enabled`) answer for the current DOM
/// without waiting. Actions (`click`, `fill`, `select_option`) wait up to the
/// locator's timeout for the element to become actionable and propagate
/// every failure. `text_content` reports a missing element as
/// [`Observation::Absent`] instead of an error.
#[async_trait]
pub trait PageDriver: Send + Sync + fmt::Debug {
    /// Origin relative paths are resolved against
    fn base_url(&self) -> &str;

    /// How long a navigation off the storefront may take
    fn external_navigation_timeout(&self) -> Duration {
        Duration::from_millis(EXTERNAL_NAVIGATION_TIMEOUT_MS)
    }

    /// Navigate to an absolute URL or a path relative to [`Self::base_url`]
    async fn goto(&self, url: &str) -> ProbeResult<()>;

    /// Click the first matching element
    async fn click(&self, locator: &Locator) -> ProbeResult<()>;

    /// Replace the value of an input
    async fn fill(&self, locator: &Locator, value: &str) -> ProbeResult<()>;

    /// Empty an input
    async fn clear(&self, locator: &Locator) -> ProbeResult<()> {
        self.fill(locator, "").await
    }

    /// Choose an option of a `<select>` by its value
    async fn select_option(&self, locator: &Locator, value: &str) -> ProbeResult<()>;

    /// Current value of an input or select
    async fn input_value(&self, locator: &Locator) -> ProbeResult<String>;

    /// Text content of the first match
    async fn text_content(&self, locator: &Locator) -> ProbeResult<Observation<String>>;

    /// Text content of every match, in document order
    async fn all_text_contents(&self, locator: &Locator) -> ProbeResult<Vec<String>>;

    /// Number of matching elements
    async fn count(&self, locator: &Locator) -> ProbeResult<usize>;

    /// Whether the first match exists and is rendered visibly
    async fn is_visible(&self, locator: &Locator) -> ProbeResult<bool>;

    /// Whether the first match exists and accepts interaction
    async fn is_enabled(&self, locator: &Locator) -> ProbeResult<bool>;

    /// Texts of several page-level elements read in one atomic snapshot
    async fn snapshot_texts(&self, selectors: &[Selector]) -> ProbeResult<Vec<Option<String>>>;

    /// For every element matching `rows`, the text of the first match of each
    /// field selector inside it, read in one atomic snapshot
    async fn snapshot_rows(
        &self,
        rows: &Selector,
        fields: &[Selector],
    ) -> ProbeResult<Vec<Vec<Option<String>>>>;

    /// Texts of page-level elements plus the number of `rows` matches, read
    /// in one atomic snapshot
    async fn snapshot_page(&self, selectors: &[Selector], rows: &Selector)
        -> ProbeResult<PageSnapshot>;

    /// URL of the page
    async fn current_url(&self) -> ProbeResult<String>;

    /// Document title
    async fn title(&self) -> ProbeResult<String>;

    /// Block until the page reaches `state`
    async fn wait_for_load_state(&self, state: LoadState) -> ProbeResult<()>;

    /// Go back in history
    async fn go_back(&self) -> ProbeResult<()>;

    /// Go forward in history
    async fn go_forward(&self) -> ProbeResult<()>;

    /// Reload the page
    async fn reload(&self) -> ProbeResult<()>;

    /// Read a web storage item
    async fn storage_get(&self, area: StorageArea, key: &str) -> ProbeResult<Option<String>>;

    /// Write a web storage item
    async fn storage_set(&self, area: StorageArea, key: &str, value: &str) -> ProbeResult<()>;

    /// Remove a web storage item
    async fn storage_remove(&self, area: StorageArea, key: &str) -> ProbeResult<()>;

    /// Clear a storage area
    async fn storage_clear(&self, area: StorageArea) -> ProbeResult<()>;

    /// Close the underlying page or browser
    async fn close(&self) -> ProbeResult<()>;

    /// Block until the first match is visible, or fail with a timeout
    async fn wait_for_visible(&self, locator: &Locator) -> ProbeResult<()> {
        let options = WaitOptions::new()
            .with_timeout(locator.timeout_ms())
            .with_poll_interval(locator.options().poll_interval.as_millis() as u64);
        let what = format!("{locator} visible");
        poll_until(move || self.is_visible(locator), options, &what).await?;
        Ok(())
    }

    /// Block until the URL matches `pattern`
    async fn wait_for_url(&self, pattern: &UrlPattern, timeout: Duration) -> ProbeResult<()> {
        let options = WaitOptions::new().with_timeout(timeout.as_millis() as u64);
        let what = pattern.to_string();
        poll_until(
            move || async move { Ok(pattern.matches(&self.current_url().await?)) },
            options,
            &what,
        )
        .await?;
        Ok(())
    }

    /// Whether at least one element matches
    async fn element_exists(&self, locator: &Locator) -> ProbeResult<bool> {
        Ok(self.count(locator).await? > 0)
    }
}

/// Resolve a path against an origin; absolute URLs pass through
#[must_use]
pub fn resolve_url(base_url: &str, url: &str) -> String {
    if url.contains("://") {
        url.to_string()
    } else {
        let base = base_url.trim_end_matches('/');
        if url.starts_with('/') {
            format!("{base}{url}")
        } else {
            format!("{base}/{url}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_paths() {
        assert_eq!(
            resolve_url("https://www.saucedemo.com", "/cart.html"),
            "https://www.saucedemo.com/cart.html"
        );
        assert_eq!(
            resolve_url("https://www.saucedemo.com/", "inventory.html"),
            "https://www.saucedemo.com/inventory.html"
        );
        assert_eq!(
            resolve_url("https://www.saucedemo.com", "/"),
            "https://www.saucedemo.com/"
        );
    }

    #[test]
    fn test_resolve_absolute_url() {
        assert_eq!(
            resolve_url("https://www.saucedemo.com", "https://saucelabs.com/"),
            "https://saucelabs.com/"
        );
    }

    #[test]
    fn test_storage_area_names() {
        assert_eq!(StorageArea::Local.js_name(), "localStorage");
        assert_eq!(StorageArea::Session.to_string(), "sessionStorage");
    }
}
