//! Page Object Model support.
//!
//! Every page object owns a [`NavBar`], the header and slide-out menu shared
//! by all logged-in pages, and exposes it through [`PageObject::nav`]. The
//! nav bar holds the [`SharedDriver`], so a page object is nothing more than
//! a driver handle plus the knowledge of which registry elements to touch.

use crate::driver::{resolve_url, SharedDriver};
use crate::fixtures::{paths, ABOUT_HOST};
use crate::locator::Locator;
use crate::result::{Observation, ProbeError, ProbeResult};
use crate::selectors::Element;
use crate::wait::{poll_until, LoadState, UrlPattern, WaitOptions, DEFAULT_WAIT_TIMEOUT_MS};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// Default wait for navigation off the storefront (30 seconds)
pub const EXTERNAL_NAVIGATION_TIMEOUT_MS: u64 = 30_000;

/// A page or component of the storefront
#[async_trait]
pub trait PageObject: Send + Sync {
    /// Shared navigation capability
    fn nav(&self) -> &NavBar;

    /// Path the page is served at, without query string
    fn url_path(&self) -> &'static str;

    /// Page name for logging
    fn page_name(&self) -> &'static str;

    /// Driver the page acts through
    fn driver(&self) -> &SharedDriver {
        self.nav().driver()
    }

    /// How long [`PageObject::wait_until_loaded`] waits
    fn load_timeout_ms(&self) -> u64 {
        DEFAULT_WAIT_TIMEOUT_MS
    }

    /// Whether the browser currently shows this page
    async fn is_loaded(&self) -> ProbeResult<bool> {
        let url = self.driver().current_url().await?;
        Ok(url_path(&url) == self.url_path())
    }

    /// Block until the browser shows this page
    async fn wait_until_loaded(&self) -> ProbeResult<()> {
        let options = WaitOptions::new().with_timeout(self.load_timeout_ms());
        let what = format!("{} loaded", self.page_name());
        poll_until(|| self.is_loaded(), options, &what).await?;
        Ok(())
    }
}

/// Path component of an absolute URL
#[must_use]
pub fn url_path(url: &str) -> &str {
    let after_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = after_scheme
        .find('/')
        .map_or("/", |start| &after_scheme[start..]);
    path.split(['?', '#']).next().unwrap_or(path)
}

/// Header, cart badge and slide-out menu shared by every logged-in page
#[derive(Debug, Clone)]
pub struct NavBar {
    driver: SharedDriver,
    external_navigation_timeout: Duration,
}

impl NavBar {
    /// Bind the nav bar to a driver
    #[must_use]
    pub fn new(driver: SharedDriver) -> Self {
        Self {
            external_navigation_timeout: driver.external_navigation_timeout(),
            driver,
        }
    }

    /// Override the wait used for the external "About" navigation
    #[must_use]
    pub const fn with_external_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.external_navigation_timeout = timeout;
        self
    }

    /// Underlying driver
    #[must_use]
    pub const fn driver(&self) -> &SharedDriver {
        &self.driver
    }

    /// Open the slide-out menu and wait until its entries are usable
    pub async fn open_menu(&self) -> ProbeResult<()> {
        debug!("opening menu");
        self.driver.click(&Element::BurgerMenuButton.locator()).await?;
        self.driver
            .wait_for_visible(&Element::LogoutLink.locator())
            .await
    }

    /// Close the slide-out menu
    pub async fn close_menu(&self) -> ProbeResult<()> {
        debug!("closing menu");
        self.driver.click(&Element::CloseMenuButton.locator()).await
    }

    /// Log out through the menu
    pub async fn logout(&self) -> ProbeResult<()> {
        self.open_menu().await?;
        debug!("logging out");
        self.driver.click(&Element::LogoutLink.locator()).await
    }

    /// Reset the application state through the menu, then close the menu
    pub async fn reset_app_state(&self) -> ProbeResult<()> {
        self.open_menu().await?;
        debug!("resetting app state");
        self.driver.click(&Element::ResetAppLink.locator()).await?;
        self.close_menu().await
    }

    /// Back to the product listing through the menu
    pub async fn go_to_all_items(&self) -> ProbeResult<()> {
        self.open_menu().await?;
        self.driver.click(&Element::AllItemsLink.locator()).await?;
        self.driver
            .wait_for_url(
                &UrlPattern::Contains(paths::INVENTORY.to_string()),
                Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            )
            .await
    }

    /// Follow the "About" entry off the storefront
    pub async fn open_about(&self) -> ProbeResult<()> {
        self.open_menu().await?;
        debug!(timeout = ?self.external_navigation_timeout, "following about link");
        self.driver.click(&Element::AboutLink.locator()).await?;
        self.driver
            .wait_for_url(
                &UrlPattern::Contains(ABOUT_HOST.to_string()),
                self.external_navigation_timeout,
            )
            .await
    }

    /// Open the cart through the header link
    pub async fn go_to_cart(&self) -> ProbeResult<()> {
        debug!("opening cart");
        self.driver.click(&Element::ShoppingCartLink.locator()).await
    }

    /// Navigate to a path on the storefront
    pub async fn goto_path(&self, path: &str) -> ProbeResult<()> {
        let url = resolve_url(self.driver.base_url(), path);
        debug!(%url, "navigating");
        self.driver.goto(&url).await
    }

    /// Number on the cart badge; a missing badge is [`Observation::Absent`]
    pub async fn cart_badge(&self) -> ProbeResult<Observation<u32>> {
        match self
            .driver
            .text_content(&Element::ShoppingCartBadge.locator())
            .await?
        {
            Observation::Present(text) => text
                .trim()
                .parse()
                .map(Observation::Present)
                .map_err(|_| ProbeError::parse("cart badge", text)),
            Observation::Absent => Ok(Observation::Absent),
        }
    }

    /// Number on the cart badge, 0 when it is missing or unreadable
    pub async fn cart_item_count(&self) -> u32 {
        match self.cart_badge().await {
            Ok(badge) => badge.or_closed(0),
            Err(error) => {
                warn!(%error, "cart badge unreadable, reporting an empty cart");
                0
            }
        }
    }

    /// Whether the cart badge is shown
    pub async fn is_cart_badge_visible(&self) -> bool {
        self.visible_or_closed(&Element::ShoppingCartBadge.locator())
            .await
    }

    /// Whether a menu entry is currently visible
    pub async fn is_menu_item_visible(&self, element: Element) -> bool {
        self.visible_or_closed(&element.locator()).await
    }

    /// Current page URL
    pub async fn current_url(&self) -> ProbeResult<String> {
        self.driver.current_url().await
    }

    /// Current document title
    pub async fn page_title(&self) -> ProbeResult<String> {
        self.driver.title().await
    }

    /// Block until the DOM is parsed and the network has gone quiet
    pub async fn wait_for_page_load(&self) -> ProbeResult<()> {
        self.driver
            .wait_for_load_state(LoadState::DomContentLoaded)
            .await?;
        self.driver.wait_for_load_state(LoadState::NetworkIdle).await
    }

    /// Visibility of `locator`; a failed check reads as hidden
    pub(crate) async fn visible_or_closed(&self, locator: &Locator) -> bool {
        match self.driver.is_visible(locator).await {
            Ok(visible) => visible,
            Err(error) => {
                warn!(%locator, %error, "visibility check failed, reporting hidden");
                false
            }
        }
    }
}
