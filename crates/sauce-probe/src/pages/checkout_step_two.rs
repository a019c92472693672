//! Checkout step two: order overview.
//!
//! Money labels carry a caption (`"Item total: $12.99"`); amounts are pulled
//! out with [`extract_amount`] and a label without one is a parse error.

use super::{CheckoutStep, OrderSummary};
use crate::driver::SharedDriver;
use crate::money::extract_amount;
use crate::page_object::{NavBar, PageObject};
use crate::result::{ProbeError, ProbeResult};
use crate::selectors::Element;
use tracing::debug;

/// The overview at `/checkout-step-two.html`
#[derive(Debug, Clone)]
pub struct CheckoutStepTwoPage {
    nav: NavBar,
}

impl PageObject for CheckoutStepTwoPage {
    fn nav(&self) -> &NavBar {
        &self.nav
    }

    fn url_path(&self) -> &'static str {
        CheckoutStep::StepTwo.path()
    }

    fn page_name(&self) -> &'static str {
        "checkout step two"
    }
}

impl CheckoutStepTwoPage {
    /// Bind the page to a driver
    #[must_use]
    pub fn new(driver: SharedDriver) -> Self {
        Self {
            nav: NavBar::new(driver),
        }
    }

    /// Item total before tax
    pub async fn item_total(&self) -> ProbeResult<f64> {
        extract_amount(&self.read(Element::SubtotalLabel).await?)
    }

    /// Tax line
    pub async fn tax(&self) -> ProbeResult<f64> {
        extract_amount(&self.read(Element::TaxLabel).await?)
    }

    /// Grand total
    pub async fn total(&self) -> ProbeResult<f64> {
        extract_amount(&self.read(Element::TotalLabel).await?)
    }

    /// Payment information line
    pub async fn payment_info(&self) -> ProbeResult<String> {
        self.read(Element::PaymentInfo).await
    }

    /// Shipping information line
    pub async fn shipping_info(&self) -> ProbeResult<String> {
        self.read(Element::ShippingInfo).await
    }

    /// Names of the ordered items
    pub async fn cart_item_names(&self) -> ProbeResult<Vec<String>> {
        self.driver()
            .all_text_contents(&Element::CartItem.locator().locator(Element::ItemName))
            .await
    }

    /// Number of ordered rows
    pub async fn cart_item_count(&self) -> ProbeResult<usize> {
        self.driver().count(&Element::CartItem.locator()).await
    }

    /// Every figure on the overview, read from one snapshot of the page
    pub async fn order_summary(&self) -> ProbeResult<OrderSummary> {
        let labels = [
            Element::SubtotalLabel,
            Element::TaxLabel,
            Element::TotalLabel,
            Element::PaymentInfo,
            Element::ShippingInfo,
        ];
        let snapshot = self
            .driver()
            .snapshot_page(&labels.map(Element::selector), &Element::CartItem.selector())
            .await?;

        let mut values = labels.into_iter().zip(snapshot.texts).map(|(label, text)| {
            text.ok_or_else(|| ProbeError::ElementNotFound {
                selector: label.name().to_string(),
            })
        });
        let mut next = || {
            values
                .next()
                .unwrap_or_else(|| Err(ProbeError::page("order summary snapshot was short")))
        };
        let summary = OrderSummary {
            item_total: extract_amount(&next()?)?,
            tax: extract_amount(&next()?)?,
            total: extract_amount(&next()?)?,
            payment_info: next()?,
            shipping_info: next()?,
            item_count: snapshot.row_count,
        };
        debug!(?summary, "read order summary");
        Ok(summary)
    }

    /// Place the order
    pub async fn finish(&self) -> ProbeResult<()> {
        debug!("finishing checkout");
        self.driver().click(&Element::FinishButton.locator()).await
    }

    /// Abandon the order; lands on the listing
    pub async fn cancel(&self) -> ProbeResult<()> {
        self.driver().click(&Element::CancelButton.locator()).await
    }

    async fn read(&self, element: Element) -> ProbeResult<String> {
        self.driver()
            .text_content(&element.locator())
            .await?
            .required(element.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::fixtures::{paths, CheckoutInfo, TestUser, PAYMENT_INFO, SHIPPING_INFO};
    use crate::money::approx_eq;
    use crate::pages::{CheckoutStepOnePage, InventoryPage, LoginPage};
    use crate::storefront::MockStorefront;
    use std::sync::Arc;

    async fn overview(products: &[Product]) -> CheckoutStepTwoPage {
        let driver: SharedDriver = Arc::new(MockStorefront::new());
        let login = LoginPage::new(driver.clone());
        login.navigate().await.unwrap();
        login.login_as(&TestUser::STANDARD).await.unwrap();
        InventoryPage::new(driver.clone())
            .add_multiple_items_to_cart(products)
            .await
            .unwrap();
        let step_one = CheckoutStepOnePage::new(driver.clone());
        step_one.navigate().await.unwrap();
        step_one.complete_step_one(&CheckoutInfo::VALID).await.unwrap();
        CheckoutStepTwoPage::new(driver)
    }

    #[tokio::test]
    async fn test_order_summary_adds_up() {
        let page = overview(&[Product::Backpack, Product::BikeLight]).await;
        assert!(page.is_loaded().await.unwrap());
        let summary = page.order_summary().await.unwrap();
        assert!(approx_eq(summary.item_total, 39.98));
        assert!(approx_eq(summary.tax, 3.20));
        assert!(approx_eq(summary.total, 43.18));
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.payment_info, PAYMENT_INFO);
        assert_eq!(summary.shipping_info, SHIPPING_INFO);
        assert!(summary.is_consistent());
    }

    #[tokio::test]
    async fn test_individual_reads_match_summary() {
        let page = overview(&[Product::FleeceJacket]).await;
        let summary = page.order_summary().await.unwrap();
        assert!(approx_eq(page.item_total().await.unwrap(), summary.item_total));
        assert!(approx_eq(page.tax().await.unwrap(), summary.tax));
        assert!(approx_eq(page.total().await.unwrap(), summary.total));
        assert_eq!(page.shipping_info().await.unwrap(), summary.shipping_info);
        assert_eq!(page.payment_info().await.unwrap(), summary.payment_info);
        assert_eq!(page.cart_item_names().await.unwrap(), vec!["Sauce Labs Fleece Jacket"]);
        assert_eq!(page.cart_item_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_cancel_returns_to_inventory() {
        let page = overview(&[Product::Onesie]).await;
        page.cancel().await.unwrap();
        assert!(page.nav().current_url().await.unwrap().ends_with(paths::INVENTORY));
        assert_eq!(page.nav().cart_item_count().await, 1);
    }

    #[tokio::test]
    async fn test_finish_empties_cart() {
        let page = overview(&[Product::Onesie]).await;
        page.finish().await.unwrap();
        let url = page.nav().current_url().await.unwrap();
        assert_eq!(CheckoutStep::from_url(&url), Some(CheckoutStep::Complete));
        assert!(!page.nav().is_cart_badge_visible().await);
    }

    #[tokio::test]
    async fn test_summary_off_page_is_absence() {
        let page = overview(&[Product::Onesie]).await;
        page.cancel().await.unwrap();
        assert!(page.order_summary().await.unwrap_err().is_absence());
    }

    mod snapshot_tests {
        use super::*;
        use crate::driver::{PageDriver, PageSnapshot, StorageArea};
        use crate::fixtures::CART_STORAGE_KEY;
        use crate::locator::{Locator, Selector};
        use crate::result::Observation;
        use crate::wait::LoadState;
        use async_trait::async_trait;
        use std::sync::atomic::{AtomicBool, Ordering};

        /// Storefront that, once armed, adds a second item to the cart and
        /// re-renders right after the next snapshot read
        #[derive(Debug, Default)]
        struct ChangingStorefront {
            inner: MockStorefront,
            armed: AtomicBool,
        }

        impl ChangingStorefront {
            async fn change_after_read(&self) -> ProbeResult<()> {
                if self.armed.swap(false, Ordering::SeqCst) {
                    self.inner
                        .storage_set(StorageArea::Local, CART_STORAGE_KEY, "[4,0]")
                        .await?;
                    self.inner.reload().await?;
                }
                Ok(())
            }
        }

        #[async_trait]
        impl PageDriver for ChangingStorefront {
            fn base_url(&self) -> &str {
                self.inner.base_url()
            }
            async fn goto(&self, url: &str) -> ProbeResult<()> {
                self.inner.goto(url).await
            }
            async fn click(&self, locator: &Locator) -> ProbeResult<()> {
                self.inner.click(locator).await
            }
            async fn fill(&self, locator: &Locator, value: &str) -> ProbeResult<()> {
                self.inner.fill(locator, value).await
            }
            async fn select_option(&self, locator: &Locator, value: &str) -> ProbeResult<()> {
                self.inner.select_option(locator, value).await
            }
            async fn input_value(&self, locator: &Locator) -> ProbeResult<String> {
                self.inner.input_value(locator).await
            }
            async fn text_content(&self, locator: &Locator) -> ProbeResult<Observation<String>> {
                self.inner.text_content(locator).await
            }
            async fn all_text_contents(&self, locator: &Locator) -> ProbeResult<Vec<String>> {
                self.inner.all_text_contents(locator).await
            }
            async fn count(&self, locator: &Locator) -> ProbeResult<usize> {
                self.inner.count(locator).await
            }
            async fn is_visible(&self, locator: &Locator) -> ProbeResult<bool> {
                self.inner.is_visible(locator).await
            }
            async fn is_enabled(&self, locator: &Locator) -> ProbeResult<bool> {
                self.inner.is_enabled(locator).await
            }
            async fn snapshot_texts(
                &self,
                selectors: &[Selector],
            ) -> ProbeResult<Vec<Option<String>>> {
                let texts = self.inner.snapshot_texts(selectors).await?;
                self.change_after_read().await?;
                Ok(texts)
            }
            async fn snapshot_rows(
                &self,
                rows: &Selector,
                fields: &[Selector],
            ) -> ProbeResult<Vec<Vec<Option<String>>>> {
                let rows = self.inner.snapshot_rows(rows, fields).await?;
                self.change_after_read().await?;
                Ok(rows)
            }
            async fn snapshot_page(
                &self,
                selectors: &[Selector],
                rows: &Selector,
            ) -> ProbeResult<PageSnapshot> {
                let snapshot = self.inner.snapshot_page(selectors, rows).await?;
                self.change_after_read().await?;
                Ok(snapshot)
            }
            async fn current_url(&self) -> ProbeResult<String> {
                self.inner.current_url().await
            }
            async fn title(&self) -> ProbeResult<String> {
                self.inner.title().await
            }
            async fn wait_for_load_state(&self, state: LoadState) -> ProbeResult<()> {
                self.inner.wait_for_load_state(state).await
            }
            async fn go_back(&self) -> ProbeResult<()> {
                self.inner.go_back().await
            }
            async fn go_forward(&self) -> ProbeResult<()> {
                self.inner.go_forward().await
            }
            async fn reload(&self) -> ProbeResult<()> {
                self.inner.reload().await
            }
            async fn storage_get(&self, area: StorageArea, key: &str) -> ProbeResult<Option<String>> {
                self.inner.storage_get(area, key).await
            }
            async fn storage_set(&self, area: StorageArea, key: &str, value: &str) -> ProbeResult<()> {
                self.inner.storage_set(area, key, value).await
            }
            async fn storage_remove(&self, area: StorageArea, key: &str) -> ProbeResult<()> {
                self.inner.storage_remove(area, key).await
            }
            async fn storage_clear(&self, area: StorageArea) -> ProbeResult<()> {
                self.inner.storage_clear(area).await
            }
            async fn close(&self) -> ProbeResult<()> {
                self.inner.close().await
            }
        }

        #[tokio::test]
        async fn test_summary_does_not_tear_across_rerender() {
            let store = Arc::new(ChangingStorefront::default());
            let driver: SharedDriver = store.clone();
            let login = LoginPage::new(driver.clone());
            login.navigate().await.unwrap();
            login.login_as(&TestUser::STANDARD).await.unwrap();
            InventoryPage::new(driver.clone())
                .add_item_to_cart(Product::Backpack)
                .await
                .unwrap();
            let step_one = CheckoutStepOnePage::new(driver.clone());
            step_one.navigate().await.unwrap();
            step_one.complete_step_one(&CheckoutInfo::VALID).await.unwrap();
            let page = CheckoutStepTwoPage::new(driver);

            store.armed.store(true, Ordering::SeqCst);
            let summary = page.order_summary().await.unwrap();
            assert!(approx_eq(summary.item_total, 29.99));
            assert_eq!(summary.item_count, 1);
            assert!(summary.is_consistent());

            // the page did change underneath the read
            assert_eq!(page.nav().cart_item_count().await, 2);
        }
    }
}
