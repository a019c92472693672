//! Order confirmation.

use super::CheckoutStep;
use crate::driver::SharedDriver;
use crate::page_object::{NavBar, PageObject};
use crate::result::{Observation, ProbeResult};
use crate::selectors::Element;
use tracing::warn;

/// Phrase the confirmation header must contain, compared case-insensitively
pub const CONFIRMATION_PHRASE: &str = "thank you";

/// The confirmation at `/checkout-complete.html`
#[derive(Debug, Clone)]
pub struct CheckoutCompletePage {
    nav: NavBar,
}

impl PageObject for CheckoutCompletePage {
    fn nav(&self) -> &NavBar {
        &self.nav
    }

    fn url_path(&self) -> &'static str {
        CheckoutStep::Complete.path()
    }

    fn page_name(&self) -> &'static str {
        "checkout complete"
    }
}

impl CheckoutCompletePage {
    /// Bind the page to a driver
    #[must_use]
    pub fn new(driver: SharedDriver) -> Self {
        Self {
            nav: NavBar::new(driver),
        }
    }

    /// Confirmation header
    pub async fn complete_header_text(&self) -> ProbeResult<Observation<String>> {
        self.driver()
            .text_content(&Element::CompleteHeader.locator())
            .await
    }

    /// Confirmation body
    pub async fn complete_message_text(&self) -> ProbeResult<Observation<String>> {
        self.driver()
            .text_content(&Element::CompleteText.locator())
            .await
    }

    /// True when the header thanks the buyer; false when it is missing
    pub async fn verify_checkout_complete(&self) -> bool {
        match self.complete_header_text().await {
            Ok(header) => header
                .or_default()
                .to_lowercase()
                .contains(CONFIRMATION_PHRASE),
            Err(error) => {
                warn!(%error, "confirmation header unreadable");
                false
            }
        }
    }

    /// Whether the browser is on the confirmation and it shows its header
    pub async fn is_order_complete(&self) -> ProbeResult<bool> {
        Ok(self.is_loaded().await?
            && self
                .driver()
                .is_visible(&Element::CompleteHeader.locator())
                .await?)
    }

    /// Back to the listing
    pub async fn back_home(&self) -> ProbeResult<()> {
        self.driver()
            .click(&Element::BackToProductsButton.locator())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::fixtures::{messages, paths, CheckoutInfo, TestUser};
    use crate::pages::{CartPage, CheckoutStepOnePage, CheckoutStepTwoPage, InventoryPage, LoginPage};
    use crate::storefront::MockStorefront;
    use std::sync::Arc;

    async fn completed_order() -> CheckoutCompletePage {
        let driver: SharedDriver = Arc::new(MockStorefront::new());
        let login = LoginPage::new(driver.clone());
        login.navigate().await.unwrap();
        login.login_as(&TestUser::STANDARD).await.unwrap();
        InventoryPage::new(driver.clone())
            .add_item_to_cart(Product::Backpack)
            .await
            .unwrap();
        let cart = CartPage::new(driver.clone());
        cart.nav().go_to_cart().await.unwrap();
        cart.checkout().await.unwrap();
        CheckoutStepOnePage::new(driver.clone())
            .complete_step_one(&CheckoutInfo::VALID)
            .await
            .unwrap();
        CheckoutStepTwoPage::new(driver.clone()).finish().await.unwrap();
        CheckoutCompletePage::new(driver)
    }

    #[tokio::test]
    async fn test_confirmation_copy() {
        let page = completed_order().await;
        assert!(page.is_order_complete().await.unwrap());
        assert!(page.verify_checkout_complete().await);
        assert_eq!(
            page.complete_header_text().await.unwrap(),
            Observation::Present(messages::ORDER_COMPLETE.to_string())
        );
        assert_eq!(
            page.complete_message_text().await.unwrap(),
            Observation::Present(messages::ORDER_DISPATCHED.to_string())
        );
        assert!(!page.nav().is_cart_badge_visible().await);
    }

    #[tokio::test]
    async fn test_back_home() {
        let page = completed_order().await;
        page.back_home().await.unwrap();
        assert!(page.nav().current_url().await.unwrap().ends_with(paths::INVENTORY));
        assert!(!page.is_order_complete().await.unwrap());
        assert!(!page.verify_checkout_complete().await);
    }
}
