//! MockStorefront - an in-memory double of the Swag Labs storefront.
//!
//! The double keeps the application state the live site keeps (session,
//! cart in `localStorage`, open menu, form values and validation copy,
//! browser history) and renders it into an element tree carrying the same
//! ids, classes and `data-test` hooks. Page objects drive it through
//! [`PageDriver`] exactly as they drive a real browser, so every scenario
//! runs offline and deterministically.
//!
//! Like the live site it answers instantly and never animates, so no action
//! needs to wait for actionability: an element is either actionable now or
//! the action fails.

mod dom;
mod render;
mod state;

use crate::driver::{PageDriver, PageSnapshot, StorageArea};
use crate::fixtures::BASE_URL;
use crate::locator::{Locator, Selector};
use crate::result::{Observation, ProbeError, ProbeResult};
use crate::wait::LoadState;
use async_trait::async_trait;
use dom::{query_all, Field, Hit, Node};
use state::{Route, StoreState};
use std::sync::{Mutex, MutexGuard};

/// In-memory storefront implementing [`PageDriver`]
#[derive(Debug)]
pub struct MockStorefront {
    base_url: String,
    state: Mutex<StoreState>,
    call_history: Mutex<Vec<String>>,
}

impl Default for MockStorefront {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStorefront {
    /// Storefront served at the default origin
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Storefront served at a custom origin
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            state: Mutex::new(StoreState::new(&base_url)),
            base_url,
            call_history: Mutex::new(Vec::new()),
        }
    }

    /// Driver calls made so far, e.g. `click:[data-test="checkout"]`
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.call_history
            .lock()
            .map(|h| h.clone())
            .unwrap_or_default()
    }

    /// Check if a driver method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.history().iter().any(|c| c.starts_with(method))
    }

    /// Number of calls whose record starts with `prefix`
    #[must_use]
    pub fn call_count(&self, prefix: &str) -> usize {
        self.history().iter().filter(|c| c.starts_with(prefix)).count()
    }

    /// Product ids in the cart, read from storage without going through the page
    pub fn cart_ids(&self) -> ProbeResult<Vec<u32>> {
        Ok(self.lock()?.cart_ids())
    }

    /// Username of the logged-in session, if any
    pub fn session_user(&self) -> ProbeResult<Option<&'static str>> {
        Ok(self.lock()?.user.map(|u| u.username))
    }

    fn record(&self, call: String) {
        tracing::debug!(target: "sauce_probe::storefront", %call);
        if let Ok(mut history) = self.call_history.lock() {
            history.push(call);
        }
    }

    fn lock(&self) -> ProbeResult<MutexGuard<'_, StoreState>> {
        let state = self
            .state
            .lock()
            .map_err(|_| ProbeError::page("storefront state lock poisoned"))?;
        if state.closed {
            return Err(ProbeError::page("page has been closed"));
        }
        Ok(state)
    }

    /// Resolve the first match, rendering the current page
    fn first<'a>(dom: &'a Node, locator: &Locator) -> ProbeResult<Hit<'a>> {
        query_all(Hit::root(dom), locator.selector())?
            .into_iter()
            .next()
            .ok_or_else(|| ProbeError::ElementNotFound {
                selector: locator.to_string(),
            })
    }

    /// First match, checked for visibility and enabled state
    fn actionable<'a>(dom: &'a Node, locator: &Locator) -> ProbeResult<&'a Node> {
        let hit = Self::first(dom, locator)?;
        let refuse = |reason: &str| ProbeError::NotActionable {
            selector: locator.to_string(),
            reason: reason.to_string(),
        };
        if !hit.visible {
            return Err(refuse("element is not visible"));
        }
        if hit.node.disabled {
            return Err(refuse("element is disabled"));
        }
        Ok(hit.node)
    }

    fn input_field(node: &Node, locator: &Locator) -> ProbeResult<Field> {
        node.field.ok_or_else(|| ProbeError::NotActionable {
            selector: locator.to_string(),
            reason: format!("<{}> is not an editable form control", node.tag),
        })
    }
}

#[async_trait]
impl PageDriver for MockStorefront {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn goto(&self, url: &str) -> ProbeResult<()> {
        self.record(format!("goto:{url}"));
        let mut state = self.lock()?;
        let route = Route::parse(&self.base_url, url);
        state.navigate(route);
        Ok(())
    }

    async fn click(&self, locator: &Locator) -> ProbeResult<()> {
        self.record(format!("click:{locator}"));
        let mut state = self.lock()?;
        let dom = render::render(&state);
        let action = Self::actionable(&dom, locator)?.action;
        if let Some(action) = action {
            state.perform(action)?;
        }
        Ok(())
    }

    async fn fill(&self, locator: &Locator, value: &str) -> ProbeResult<()> {
        self.record(format!("fill:{locator}"));
        let mut state = self.lock()?;
        let dom = render::render(&state);
        let node = Self::actionable(&dom, locator)?;
        let field = Self::input_field(node, locator)?;
        if field == Field::Sort {
            return Err(ProbeError::NotActionable {
                selector: locator.to_string(),
                reason: "cannot fill a <select>".to_string(),
            });
        }
        state.set_field(field, value)
    }

    async fn select_option(&self, locator: &Locator, value: &str) -> ProbeResult<()> {
        self.record(format!("select_option:{locator}={value}"));
        let mut state = self.lock()?;
        let dom = render::render(&state);
        let node = Self::actionable(&dom, locator)?;
        if Self::input_field(node, locator)? != Field::Sort {
            return Err(ProbeError::NotActionable {
                selector: locator.to_string(),
                reason: "element is not a <select>".to_string(),
            });
        }
        state.set_field(Field::Sort, value).map_err(|_| ProbeError::NotActionable {
            selector: locator.to_string(),
            reason: format!("no option with value '{value}'"),
        })
    }

    async fn input_value(&self, locator: &Locator) -> ProbeResult<String> {
        let state = self.lock()?;
        let dom = render::render(&state);
        let hit = Self::first(&dom, locator)?;
        hit.node.value.clone().ok_or_else(|| ProbeError::NotActionable {
            selector: locator.to_string(),
            reason: "element has no value".to_string(),
        })
    }

    async fn text_content(&self, locator: &Locator) -> ProbeResult<Observation<String>> {
        let state = self.lock()?;
        let dom = render::render(&state);
        Ok(query_all(Hit::root(&dom), locator.selector())?
            .first()
            .map(|hit| hit.node.text_content())
            .into())
    }

    async fn all_text_contents(&self, locator: &Locator) -> ProbeResult<Vec<String>> {
        let state = self.lock()?;
        let dom = render::render(&state);
        Ok(query_all(Hit::root(&dom), locator.selector())?
            .iter()
            .map(|hit| hit.node.text_content())
            .collect())
    }

    async fn count(&self, locator: &Locator) -> ProbeResult<usize> {
        let state = self.lock()?;
        let dom = render::render(&state);
        Ok(query_all(Hit::root(&dom), locator.selector())?.len())
    }

    async fn is_visible(&self, locator: &Locator) -> ProbeResult<bool> {
        let state = self.lock()?;
        let dom = render::render(&state);
        Ok(query_all(Hit::root(&dom), locator.selector())?
            .first()
            .is_some_and(|hit| hit.visible))
    }

    async fn is_enabled(&self, locator: &Locator) -> ProbeResult<bool> {
        let state = self.lock()?;
        let dom = render::render(&state);
        Ok(query_all(Hit::root(&dom), locator.selector())?
            .first()
            .is_some_and(|hit| !hit.node.disabled))
    }

    async fn snapshot_texts(&self, selectors: &[Selector]) -> ProbeResult<Vec<Option<String>>> {
        let state = self.lock()?;
        let dom = render::render(&state);
        first_texts(&dom, selectors)
    }

    async fn snapshot_page(
        &self,
        selectors: &[Selector],
        rows: &Selector,
    ) -> ProbeResult<PageSnapshot> {
        let state = self.lock()?;
        let dom = render::render(&state);
        Ok(PageSnapshot {
            texts: first_texts(&dom, selectors)?,
            row_count: query_all(Hit::root(&dom), rows)?.len(),
        })
    }

    async fn snapshot_rows(
        &self,
        rows: &Selector,
        fields: &[Selector],
    ) -> ProbeResult<Vec<Vec<Option<String>>>> {
        let state = self.lock()?;
        let dom = render::render(&state);
        query_all(Hit::root(&dom), rows)?
            .into_iter()
            .map(|row| {
                fields
                    .iter()
                    .map(|field| {
                        Ok(query_all(row, field)?
                            .first()
                            .map(|hit| hit.node.text_content()))
                    })
                    .collect()
            })
            .collect()
    }

    async fn current_url(&self) -> ProbeResult<String> {
        Ok(self.lock()?.current_url())
    }

    async fn title(&self) -> ProbeResult<String> {
        Ok(render::title(&*self.lock()?))
    }

    async fn wait_for_load_state(&self, state: LoadState) -> ProbeResult<()> {
        self.record(format!("wait_for_load_state:{state}"));
        self.lock().map(|_| ())
    }

    async fn go_back(&self) -> ProbeResult<()> {
        self.record("go_back".to_string());
        self.lock()?.go_back();
        Ok(())
    }

    async fn go_forward(&self) -> ProbeResult<()> {
        self.record("go_forward".to_string());
        self.lock()?.go_forward();
        Ok(())
    }

    async fn reload(&self) -> ProbeResult<()> {
        self.record("reload".to_string());
        self.lock()?.reload();
        Ok(())
    }

    async fn storage_get(&self, area: StorageArea, key: &str) -> ProbeResult<Option<String>> {
        self.lock()?.storage_get(area, key)
    }

    async fn storage_set(&self, area: StorageArea, key: &str, value: &str) -> ProbeResult<()> {
        self.record(format!("storage_set:{area}:{key}"));
        self.lock()?.storage_set(area, key, value)
    }

    async fn storage_remove(&self, area: StorageArea, key: &str) -> ProbeResult<()> {
        self.record(format!("storage_remove:{area}:{key}"));
        self.lock()?.storage_remove(area, key)
    }

    async fn storage_clear(&self, area: StorageArea) -> ProbeResult<()> {
        self.record(format!("storage_clear:{area}"));
        self.lock()?.storage_clear(area)
    }

    async fn close(&self) -> ProbeResult<()> {
        self.record("close".to_string());
        self.lock()?.closed = true;
        Ok(())
    }
}

fn first_texts(dom: &Node, selectors: &[Selector]) -> ProbeResult<Vec<Option<String>>> {
    selectors
        .iter()
        .map(|selector| {
            Ok(query_all(Hit::root(dom), selector)?
                .first()
                .map(|hit| hit.node.text_content()))
        })
        .collect()
}
