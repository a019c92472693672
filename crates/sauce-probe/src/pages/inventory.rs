//! Product listing.

use super::ProductSummary;
use crate::catalog::{Product, SortOption};
use crate::driver::SharedDriver;
use crate::fixtures::paths;
use crate::locator::Selector;
use crate::money::parse_price;
use crate::page_object::{NavBar, PageObject};
use crate::result::{ProbeError, ProbeResult};
use crate::selectors::{Element, ProductControl};
use tracing::debug;

/// The product listing at `/inventory.html`
#[derive(Debug, Clone)]
pub struct InventoryPage {
    nav: NavBar,
}

impl PageObject for InventoryPage {
    fn nav(&self) -> &NavBar {
        &self.nav
    }

    fn url_path(&self) -> &'static str {
        paths::INVENTORY
    }

    fn page_name(&self) -> &'static str {
        "inventory"
    }
}

impl InventoryPage {
    /// Bind the page to a driver
    #[must_use]
    pub fn new(driver: SharedDriver) -> Self {
        Self {
            nav: NavBar::new(driver),
        }
    }

    /// Open the listing directly
    pub async fn navigate(&self) -> ProbeResult<()> {
        self.nav.goto_path(paths::INVENTORY).await
    }

    /// Number of products listed
    pub async fn product_count(&self) -> ProbeResult<usize> {
        self.driver()
            .count(&Element::InventoryItem.locator())
            .await
    }

    /// Name, description and price of the product at `index`, read in one
    /// snapshot of the row
    pub async fn product_details(&self, index: usize) -> ProbeResult<ProductSummary> {
        let row = Element::InventoryItem.locator().nth(index);
        let fields: Vec<Selector> = [Element::ItemName, Element::ItemDescription, Element::ItemPrice]
            .into_iter()
            .map(|field| row.locator(field).selector().clone())
            .collect();
        let texts = self.driver().snapshot_texts(&fields).await?;
        let missing = || ProbeError::ElementNotFound {
            selector: format!("inventory item #{index}"),
        };
        match texts.as_slice() {
            [Some(name), Some(description), Some(price)] => Ok(ProductSummary {
                name: name.clone(),
                description: description.clone(),
                price: parse_price(price)?,
            }),
            _ => Err(missing()),
        }
    }

    /// Press the product's "Add to cart" button
    pub async fn add_item_to_cart(&self, product: Product) -> ProbeResult<()> {
        debug!(%product, "adding to cart");
        self.driver()
            .click(&ProductControl::AddToCart(product).locator())
            .await
    }

    /// Press the product's "Remove" button
    pub async fn remove_item_from_cart(&self, product: Product) -> ProbeResult<()> {
        debug!(%product, "removing from cart");
        self.driver()
            .click(&ProductControl::Remove(product).locator())
            .await
    }

    /// Add several products one after another; stops at the first failure
    /// and keeps what was already added
    pub async fn add_multiple_items_to_cart(&self, products: &[Product]) -> ProbeResult<()> {
        for product in products {
            self.add_item_to_cart(*product).await?;
        }
        Ok(())
    }

    /// Whether the listing shows the product's "Remove" button
    pub async fn is_item_in_cart(&self, product: Product) -> ProbeResult<bool> {
        self.driver()
            .is_visible(&ProductControl::Remove(product).locator())
            .await
    }

    /// Open a product's details by clicking its name
    pub async fn click_product_by_name(&self, name: &str) -> ProbeResult<()> {
        debug!(name, "opening product");
        let link = Element::ItemName.locator().with_text(name).first();
        self.driver().click(&link).await
    }

    /// Choose an ordering from the sort dropdown
    pub async fn sort_products(&self, option: SortOption) -> ProbeResult<()> {
        debug!(%option, "sorting products");
        self.driver()
            .select_option(&Element::SortContainer.locator(), option.value())
            .await
    }

    /// Ordering currently selected in the dropdown
    pub async fn current_sort_option(&self) -> ProbeResult<SortOption> {
        self.driver()
            .input_value(&Element::SortContainer.locator())
            .await?
            .parse()
    }

    /// Product names in display order
    pub async fn product_names(&self) -> ProbeResult<Vec<String>> {
        self.driver()
            .all_text_contents(&Element::ItemName.locator())
            .await
    }

    /// Product prices in display order
    pub async fn product_prices(&self) -> ProbeResult<Vec<f64>> {
        self.driver()
            .all_text_contents(&Element::ItemPrice.locator())
            .await?
            .iter()
            .map(|text| parse_price(text))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::TestUser;
    use crate::pages::LoginPage;
    use crate::storefront::MockStorefront;
    use std::sync::Arc;

    async fn inventory() -> InventoryPage {
        let driver: SharedDriver = Arc::new(MockStorefront::new());
        let login = LoginPage::new(driver.clone());
        login.navigate().await.unwrap();
        login.login_as(&TestUser::STANDARD).await.unwrap();
        InventoryPage::new(driver)
    }

    mod listing_tests {
        use super::*;

        #[tokio::test]
        async fn test_lists_whole_catalog() {
            let page = inventory().await;
            assert!(page.is_loaded().await.unwrap());
            assert_eq!(page.product_count().await.unwrap(), Product::ALL.len());
            assert_eq!(page.current_sort_option().await.unwrap(), SortOption::NameAsc);
        }

        #[tokio::test]
        async fn test_product_details_by_position() {
            let page = inventory().await;
            let first = page.product_details(0).await.unwrap();
            assert_eq!(first.name, "Sauce Labs Backpack");
            assert!((first.price - 29.99).abs() < f64::EPSILON);
            assert!(page.product_details(6).await.unwrap_err().is_absence());
        }

        #[tokio::test]
        async fn test_sort_price_descending() {
            let page = inventory().await;
            page.sort_products(SortOption::PriceDesc).await.unwrap();
            let prices = page.product_prices().await.unwrap();
            assert!(prices.windows(2).all(|w| w[0] >= w[1]));
            assert_eq!(page.current_sort_option().await.unwrap(), SortOption::PriceDesc);
        }

        #[tokio::test]
        async fn test_sort_name_descending() {
            let page = inventory().await;
            page.sort_products(SortOption::NameDesc).await.unwrap();
            let names = page.product_names().await.unwrap();
            assert_eq!(names.first().map(String::as_str), Some("Test.allTheThings() T-Shirt (Red)"));
        }
    }

    mod cart_button_tests {
        use super::*;

        #[tokio::test]
        async fn test_add_and_remove() {
            let page = inventory().await;
            page.add_item_to_cart(Product::FleeceJacket).await.unwrap();
            assert!(page.is_item_in_cart(Product::FleeceJacket).await.unwrap());
            assert_eq!(page.nav().cart_item_count().await, 1);
            page.remove_item_from_cart(Product::FleeceJacket).await.unwrap();
            assert!(!page.is_item_in_cart(Product::FleeceJacket).await.unwrap());
            assert_eq!(page.nav().cart_item_count().await, 0);
        }

        #[tokio::test]
        async fn test_add_multiple_stops_at_first_failure() {
            let page = inventory().await;
            let err = page
                .add_multiple_items_to_cart(&[Product::Onesie, Product::Onesie, Product::BikeLight])
                .await
                .unwrap_err();
            assert!(err.is_absence());
            assert_eq!(page.nav().cart_item_count().await, 1);
        }

        #[tokio::test]
        async fn test_click_product_by_name() {
            let page = inventory().await;
            page.click_product_by_name("Sauce Labs Bike Light").await.unwrap();
            let url = page.nav().current_url().await.unwrap();
            assert!(url.ends_with("/inventory-item.html?id=0"), "{url}");
        }
    }
}
