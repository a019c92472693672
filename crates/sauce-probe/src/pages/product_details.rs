//! Product details page.
//!
//! A single toggle button serves both "Add to cart" and "Remove". Whether the
//! product is in the cart is always read from the button's live label.

use super::ProductSummary;
use crate::catalog::Product;
use crate::driver::SharedDriver;
use crate::fixtures::paths;
use crate::money::parse_price;
use crate::page_object::{NavBar, PageObject};
use crate::result::{ProbeError, ProbeResult};
use crate::selectors::Element;
use tracing::debug;

const REMOVE_LABEL: &str = "Remove";
const ADD_LABEL: &str = "Add to cart";

/// Details of one product at `/inventory-item.html?id={id}`
#[derive(Debug, Clone)]
pub struct ProductDetailsPage {
    nav: NavBar,
}

impl PageObject for ProductDetailsPage {
    fn nav(&self) -> &NavBar {
        &self.nav
    }

    fn url_path(&self) -> &'static str {
        paths::INVENTORY_ITEM
    }

    fn page_name(&self) -> &'static str {
        "product details"
    }
}

impl ProductDetailsPage {
    /// Bind the page to a driver
    #[must_use]
    pub fn new(driver: SharedDriver) -> Self {
        Self {
            nav: NavBar::new(driver),
        }
    }

    /// Open the details of a product by its numeric id
    pub async fn navigate_to(&self, product: Product) -> ProbeResult<()> {
        self.nav.goto_path(&paths::inventory_item(product.id())).await
    }

    /// Return to the listing
    pub async fn back_to_products(&self) -> ProbeResult<()> {
        self.driver()
            .click(&Element::BackToProductsButton.locator())
            .await
    }

    /// Product name
    pub async fn product_name(&self) -> ProbeResult<String> {
        self.read(Element::DetailsName).await
    }

    /// Product description
    pub async fn product_description(&self) -> ProbeResult<String> {
        self.read(Element::DetailsDescription).await
    }

    /// Product price
    pub async fn product_price(&self) -> ProbeResult<f64> {
        parse_price(&self.read(Element::DetailsPrice).await?)
    }

    /// Name, description and price in one snapshot
    pub async fn details(&self) -> ProbeResult<ProductSummary> {
        let texts = self
            .driver()
            .snapshot_texts(&[
                Element::DetailsName.selector(),
                Element::DetailsDescription.selector(),
                Element::DetailsPrice.selector(),
            ])
            .await?;
        match texts.as_slice() {
            [Some(name), Some(description), Some(price)] => Ok(ProductSummary {
                name: name.clone(),
                description: description.clone(),
                price: parse_price(price)?,
            }),
            _ => Err(ProbeError::ElementNotFound {
                selector: "product details".to_string(),
            }),
        }
    }

    /// Press the toggle while it reads "Add to cart"
    pub async fn add_to_cart(&self) -> ProbeResult<()> {
        self.press_toggle(ADD_LABEL).await
    }

    /// Press the toggle while it reads "Remove"
    pub async fn remove_from_cart(&self) -> ProbeResult<()> {
        self.press_toggle(REMOVE_LABEL).await
    }

    /// Whether the toggle currently reads "Remove"
    pub async fn is_product_in_cart(&self) -> ProbeResult<bool> {
        Ok(self.read(Element::DetailsToggleButton).await?.trim() == REMOVE_LABEL)
    }

    async fn press_toggle(&self, label: &str) -> ProbeResult<()> {
        debug!(label, "pressing details toggle");
        let toggle = Element::DetailsToggleButton.locator().with_text(label);
        self.driver().click(&toggle).await
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
    use crate::fixtures::TestUser;
    use crate::pages::{InventoryPage, LoginPage};
    use crate::storefront::MockStorefront;
    use std::sync::Arc;

    async fn details_of(product: Product) -> ProductDetailsPage {
        let driver: SharedDriver = Arc::new(MockStorefront::new());
        let login = LoginPage::new(driver.clone());
        login.navigate().await.unwrap();
        login.login_as(&TestUser::STANDARD).await.unwrap();
        let page = ProductDetailsPage::new(driver);
        page.navigate_to(product).await.unwrap();
        page
    }

    #[tokio::test]
    async fn test_reads_product() {
        let page = details_of(Product::Onesie).await;
        assert!(page.is_loaded().await.unwrap());
        let details = page.details().await.unwrap();
        assert_eq!(details.name, Product::Onesie.display_name());
        assert_eq!(details.description, Product::Onesie.description());
        assert!((page.product_price().await.unwrap() - 7.99).abs() < f64::EPSILON);
        assert_eq!(page.product_name().await.unwrap(), details.name);
    }

    #[tokio::test]
    async fn test_toggle_follows_live_label() {
        let page = details_of(Product::BoltTShirt).await;
        assert!(!page.is_product_in_cart().await.unwrap());
        page.add_to_cart().await.unwrap();
        assert!(page.is_product_in_cart().await.unwrap());
        assert_eq!(page.nav().cart_item_count().await, 1);
        assert!(page.add_to_cart().await.unwrap_err().is_absence());
        page.remove_from_cart().await.unwrap();
        assert!(!page.is_product_in_cart().await.unwrap());
    }

    #[tokio::test]
    async fn test_back_to_products() {
        let page = details_of(Product::Backpack).await;
        page.back_to_products().await.unwrap();
        let inventory = InventoryPage::new(page.driver().clone());
        assert!(inventory.is_loaded().await.unwrap());
    }

    #[tokio::test]
    async fn test_state_shared_with_listing() {
        let page = details_of(Product::RedTShirt).await;
        page.add_to_cart().await.unwrap();
        page.back_to_products().await.unwrap();
        let inventory = InventoryPage::new(page.driver().clone());
        assert!(inventory.is_item_in_cart(Product::RedTShirt).await.unwrap());
    }
}
