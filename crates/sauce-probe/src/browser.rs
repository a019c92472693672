//! Chromium driver over the Chrome DevTools Protocol.
//!
//! Launches Chromium through chromiumoxide on the tokio runtime and
//! implements [`PageDriver`] by evaluating the JavaScript that
//! [`Selector::to_query_all`] compiles. Actions poll until the element is
//! visible and enabled, then act in page script; React-controlled inputs
//! are filled through the native value setter so the app sees the change.

use crate::config::SuiteConfig;
use crate::driver::{resolve_url, PageDriver, PageSnapshot, SharedDriver, StorageArea};
use crate::harness::DriverFactory;
use crate::locator::{js_string, Locator, LocatorOptions, Selector};
use crate::result::{Observation, ProbeError, ProbeResult};
use crate::wait::{LoadState, NETWORK_IDLE_THRESHOLD_MS};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

/// Visibility test shared by every script
const VISIBLE_FN: &str = "const visible = el => { \
    if (el.closest('[aria-hidden=\"true\"]')) return false; \
    const style = window.getComputedStyle(el); \
    if (style.visibility === 'hidden' || style.display === 'none') return false; \
    const rect = el.getBoundingClientRect(); \
    return rect.width > 0 && rect.height > 0; };";

/// Global set on the old document before a reload; gone once the new one runs
const STALE_MARKER: &str = "__sauceProbeStale";

/// Status an action script reports when it performed the action
const ACTED: &str = "ok";
const MISSING: &str = "missing";

/// Script that checks actionability of the first match, runs `action` with
/// the element bound to `el`, and reports a status string
fn action_script(selector: &Selector, action: &str) -> String {
    format!(
        "(() => {{ {VISIBLE_FN} const el = {query}; \
         if (!el) return '{MISSING}'; \
         if (!visible(el)) return 'element is not visible'; \
         if (el.disabled) return 'element is disabled'; \
         {action} \
         return '{ACTED}'; }})()",
        query = selector.to_query(),
    )
}

fn fill_action(value: &str) -> String {
    format!(
        "if (!('value' in el)) return 'element is not an input'; \
         const setter = Object.getOwnPropertyDescriptor(Object.getPrototypeOf(el), 'value').set; \
         el.focus(); setter.call(el, {value}); \
         el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
         el.dispatchEvent(new Event('change', {{ bubbles: true }}));",
        value = js_string(value)
    )
}

fn select_action(value: &str) -> String {
    let value = js_string(value);
    format!(
        "if (el.tagName !== 'SELECT') return 'element is not a <select>'; \
         if (!Array.from(el.options).some(o => o.value === {value})) \
             return 'no option with value ' + {value}; \
         const setter = Object.getOwnPropertyDescriptor(HTMLSelectElement.prototype, 'value').set; \
         setter.call(el, {value}); \
         el.dispatchEvent(new Event('change', {{ bubbles: true }}));"
    )
}

fn launch_error(message: String) -> ProbeError {
    if message.contains("auto detect") || message.contains("executable") {
        ProbeError::BrowserNotFound
    } else {
        ProbeError::BrowserLaunch { message }
    }
}

fn page_error(error: impl std::fmt::Display) -> ProbeError {
    ProbeError::page(error.to_string())
}

/// A Chromium page driven over CDP
#[derive(Debug)]
pub struct ChromiumDriver {
    config: SuiteConfig,
    browser: Mutex<Browser>,
    page: Mutex<Page>,
    handler: JoinHandle<()>,
}

impl ChromiumDriver {
    /// Launch Chromium and open a blank page
    pub async fn launch(config: SuiteConfig) -> ProbeResult<Self> {
        config.validate()?;
        let mut builder = BrowserConfig::builder()
            .window_size(config.viewport_width, config.viewport_height);
        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }
        let cdp_config = builder.build().map_err(launch_error)?;

        info!(headless = config.headless, "launching chromium");
        let (browser, mut handler) = Browser::launch(cdp_config)
            .await
            .map_err(|e| launch_error(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ProbeError::BrowserLaunch {
                message: e.to_string(),
            })?;

        Ok(Self {
            config,
            browser: Mutex::new(browser),
            page: Mutex::new(page),
            handler,
        })
    }

    /// Configuration the browser was launched with
    #[must_use]
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Evaluate `expression` and decode its JSON-serialized result
    async fn eval<T: DeserializeOwned>(&self, expression: &str) -> ProbeResult<T> {
        let script = format!("JSON.stringify(({expression}) ?? null)");
        let page = self.page.lock().await;
        let raw: String = page
            .evaluate(script.as_str())
            .await
            .map_err(|e| ProbeError::Script {
                message: e.to_string(),
            })?
            .into_value()
            .map_err(|e| ProbeError::Script {
                message: e.to_string(),
            })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Run an action script until it reports success or the wait runs out.
    /// Locators left at default options wait for the configured action timeout.
    async fn act(&self, locator: &Locator, action: &str) -> ProbeResult<()> {
        let script = action_script(locator.selector(), action);
        let (timeout, poll_interval) = if *locator.options() == LocatorOptions::default() {
            (self.config.action_timeout(), self.config.poll_interval())
        } else {
            (locator.options().timeout, locator.options().poll_interval)
        };
        let deadline = Instant::now() + timeout;
        loop {
            let status: String = self.eval(&script).await?;
            if status == ACTED {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(if status == MISSING {
                    ProbeError::ElementNotFound {
                        selector: locator.to_string(),
                    }
                } else {
                    ProbeError::NotActionable {
                        selector: locator.to_string(),
                        reason: status,
                    }
                });
            }
            tokio::time::sleep(poll_interval).await;
        }
    }

    async fn wait_for_ready_state(&self, ready: &str, timeout: Duration) -> ProbeResult<()> {
        self.wait_for_script(&format!("document.readyState {ready}"), timeout)
            .await
    }

    /// Poll `condition` until it holds. A failed evaluation counts as not
    /// yet: the execution context is replaced while a document swaps.
    async fn wait_for_script(&self, condition: &str, timeout: Duration) -> ProbeResult<()> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.eval::<bool>(condition).await {
                Ok(true) => return Ok(()),
                Ok(false) => {}
                Err(error) => debug!(%error, "condition not evaluable yet"),
            }
            if Instant::now() >= deadline {
                return Err(ProbeError::Timeout {
                    ms: timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(self.config.poll_interval()).await;
        }
    }

    /// Run a history traversal, then wait for the URL to move and the new
    /// document to parse
    async fn traverse_history(&self, script: &str) -> ProbeResult<()> {
        let from: String = self.eval("location.href").await?;
        self.eval::<Option<bool>>(script).await?;
        let timeout = self.config.navigation_timeout();
        self.wait_for_script(&url_changed_check(&from), timeout)
            .await
            .map_err(|_| ProbeError::Navigation {
                url: from,
                message: format!("history did not move within {}ms", timeout.as_millis()),
            })?;
        self.wait_for_load_state(LoadState::DomContentLoaded).await
    }

    /// Wait until no new resource entries appear for the idle threshold
    async fn wait_for_network_idle(&self, timeout: Duration) -> ProbeResult<()> {
        let deadline = Instant::now() + timeout;
        let idle = Duration::from_millis(NETWORK_IDLE_THRESHOLD_MS);
        let count = "performance.getEntriesByType('resource').length";
        let mut last: u64 = self.eval(count).await?;
        let mut quiet_since = Instant::now();
        loop {
            if quiet_since.elapsed() >= idle {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(ProbeError::Timeout {
                    ms: timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(self.config.poll_interval()).await;
            let now: u64 = self.eval(count).await?;
            if now != last {
                last = now;
                quiet_since = Instant::now();
            }
        }
    }
}

#[async_trait]
impl PageDriver for ChromiumDriver {
    fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn external_navigation_timeout(&self) -> Duration {
        self.config.external_navigation_timeout()
    }

    async fn goto(&self, url: &str) -> ProbeResult<()> {
        let url = resolve_url(&self.config.base_url, url);
        debug!(%url, "goto");
        let page = self.page.lock().await;
        let navigation = tokio::time::timeout(self.config.navigation_timeout(), page.goto(url.as_str()));
        match navigation.await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(ProbeError::Navigation {
                url,
                message: e.to_string(),
            }),
            Err(_) => Err(ProbeError::Navigation {
                url,
                message: format!("timed out after {}ms", self.config.navigation_timeout_ms),
            }),
        }
    }

    async fn click(&self, locator: &Locator) -> ProbeResult<()> {
        debug!(%locator, "click");
        self.act(locator, "el.click();").await
    }

    async fn fill(&self, locator: &Locator, value: &str) -> ProbeResult<()> {
        debug!(%locator, "fill");
        self.act(locator, &fill_action(value)).await
    }

    async fn select_option(&self, locator: &Locator, value: &str) -> ProbeResult<()> {
        debug!(%locator, value, "select_option");
        self.act(locator, &select_action(value)).await
    }

    async fn input_value(&self, locator: &Locator) -> ProbeResult<String> {
        let script = format!(
            "(() => {{ const el = {}; return el && 'value' in el ? el.value : null; }})()",
            locator.selector().to_query()
        );
        self.eval::<Option<String>>(&script)
            .await?
            .ok_or_else(|| ProbeError::ElementNotFound {
                selector: locator.to_string(),
            })
    }

    async fn text_content(&self, locator: &Locator) -> ProbeResult<Observation<String>> {
        let script = format!(
            "(() => {{ const el = {}; return el ? el.textContent : null; }})()",
            locator.selector().to_query()
        );
        Ok(self.eval::<Option<String>>(&script).await?.into())
    }

    async fn all_text_contents(&self, locator: &Locator) -> ProbeResult<Vec<String>> {
        let script = format!(
            "{}.map(el => el.textContent || '')",
            locator.selector().to_query_all("document")
        );
        self.eval(&script).await
    }

    async fn count(&self, locator: &Locator) -> ProbeResult<usize> {
        self.eval(&locator.selector().to_count_query()).await
    }

    async fn is_visible(&self, locator: &Locator) -> ProbeResult<bool> {
        let script = format!(
            "(() => {{ {VISIBLE_FN} const el = {}; return !!el && visible(el); }})()",
            locator.selector().to_query()
        );
        self.eval(&script).await
    }

    async fn is_enabled(&self, locator: &Locator) -> ProbeResult<bool> {
        let script = format!(
            "(() => {{ const el = {}; return !!el && !el.disabled; }})()",
            locator.selector().to_query()
        );
        self.eval(&script).await
    }

    async fn snapshot_texts(&self, selectors: &[Selector]) -> ProbeResult<Vec<Option<String>>> {
        self.eval(&first_texts_script(selectors)).await
    }

    async fn snapshot_page(
        &self,
        selectors: &[Selector],
        rows: &Selector,
    ) -> ProbeResult<PageSnapshot> {
        let script = format!(
            "({{ texts: {}, row_count: {}.length }})",
            first_texts_script(selectors),
            rows.to_query_all("document")
        );
        self.eval(&script).await
    }

    async fn snapshot_rows(
        &self,
        rows: &Selector,
        fields: &[Selector],
    ) -> ProbeResult<Vec<Vec<Option<String>>>> {
        let reads: Vec<String> = fields
            .iter()
            .map(|f| format!("(({})[0] || {{}}).textContent ?? null", f.to_query_all("row")))
            .collect();
        let script = format!(
            "{}.map(row => [{}])",
            rows.to_query_all("document"),
            reads.join(", ")
        );
        self.eval(&script).await
    }

    async fn current_url(&self) -> ProbeResult<String> {
        let page = self.page.lock().await;
        Ok(page
            .url()
            .await
            .map_err(page_error)?
            .unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn title(&self) -> ProbeResult<String> {
        let page = self.page.lock().await;
        Ok(page.get_title().await.map_err(page_error)?.unwrap_or_default())
    }

    async fn wait_for_load_state(&self, state: LoadState) -> ProbeResult<()> {
        let timeout = Duration::from_millis(state.default_timeout_ms());
        debug!(%state, "waiting for load state");
        match state {
            LoadState::DomContentLoaded => self.wait_for_ready_state("!== 'loading'", timeout).await,
            LoadState::Load => self.wait_for_ready_state("=== 'complete'", timeout).await,
            LoadState::NetworkIdle => self.wait_for_network_idle(timeout).await,
        }
    }

    async fn go_back(&self) -> ProbeResult<()> {
        debug!("history back");
        self.traverse_history("history.back()").await
    }

    async fn go_forward(&self) -> ProbeResult<()> {
        debug!("history forward");
        self.traverse_history("history.forward()").await
    }

    async fn reload(&self) -> ProbeResult<()> {
        debug!("reload");
        self.eval::<Option<bool>>(&format!("window.{STALE_MARKER} = true"))
            .await?;
        {
            let page = self.page.lock().await;
            tokio::time::timeout(self.config.navigation_timeout(), page.reload())
                .await
                .map_err(|_| ProbeError::Timeout {
                    ms: self.config.navigation_timeout_ms,
                })?
                .map_err(page_error)?;
        }
        self.wait_for_script(
            &format!("window.{STALE_MARKER} === undefined"),
            self.config.navigation_timeout(),
        )
        .await?;
        self.wait_for_load_state(LoadState::DomContentLoaded).await
    }

    async fn storage_get(&self, area: StorageArea, key: &str) -> ProbeResult<Option<String>> {
        self.eval(&format!("{}.getItem({})", area.js_name(), js_string(key)))
            .await
    }

    async fn storage_set(&self, area: StorageArea, key: &str, value: &str) -> ProbeResult<()> {
        self.eval::<Option<bool>>(&format!(
            "{}.setItem({}, {})",
            area.js_name(),
            js_string(key),
            js_string(value)
        ))
        .await
        .map(|_| ())
    }

    async fn storage_remove(&self, area: StorageArea, key: &str) -> ProbeResult<()> {
        self.eval::<Option<bool>>(&format!("{}.removeItem({})", area.js_name(), js_string(key)))
            .await
            .map(|_| ())
    }

    async fn storage_clear(&self, area: StorageArea) -> ProbeResult<()> {
        self.eval::<Option<bool>>(&format!("{}.clear()", area.js_name()))
            .await
            .map(|_| ())
    }

    async fn close(&self) -> ProbeResult<()> {
        info!("closing chromium");
        let page = self.page.lock().await.clone();
        page.close().await.map_err(page_error)?;
        let mut browser = self.browser.lock().await;
        browser.close().await.map_err(page_error)?;
        self.handler.abort();
        Ok(())
    }
}

/// Launches one Chromium per test case
#[derive(Debug, Clone)]
pub struct ChromiumFactory {
    config: SuiteConfig,
}

impl ChromiumFactory {
    /// Launch browsers with `config`
    #[must_use]
    pub const fn new(config: SuiteConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl DriverFactory for ChromiumFactory {
    async fn create(&self) -> ProbeResult<SharedDriver> {
        let driver = ChromiumDriver::launch(self.config.clone()).await?;
        Ok(Arc::new(driver))
    }
}

/// Condition that holds once the page has left `from`
fn url_changed_check(from: &str) -> String {
    format!("location.href !== {}", js_string(from))
}

/// Array expression of the first match's text for each selector
fn first_texts_script(selectors: &[Selector]) -> String {
    let reads: Vec<String> = selectors
        .iter()
        .map(|s| format!("(({}) || {{}}).textContent ?? null", s.to_query()))
        .collect();
    format!("[{}]", reads.join(", "))
}
