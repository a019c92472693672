//! Cart page.

use super::CartItemDetails;
use crate::catalog::Product;
use crate::driver::SharedDriver;
use crate::fixtures::paths;
use crate::locator::{Locator, Selector};
use crate::money::{parse_price, sum_prices};
use crate::page_object::{NavBar, PageObject};
use crate::result::{ProbeError, ProbeResult};
use crate::selectors::{Element, ProductControl};
use tracing::debug;

/// The cart at `/cart.html`
#[derive(Debug, Clone)]
pub struct CartPage {
    nav: NavBar,
}

impl PageObject for CartPage {
    fn nav(&self) -> &NavBar {
        &self.nav
    }

    fn url_path(&self) -> &'static str {
        paths::CART
    }

    fn page_name(&self) -> &'static str {
        "cart"
    }
}

fn row_field(field: Element) -> Locator {
    Element::CartItem.locator().locator(field)
}

impl CartPage {
    /// Bind the page to a driver
    #[must_use]
    pub fn new(driver: SharedDriver) -> Self {
        Self {
            nav: NavBar::new(driver),
        }
    }

    /// Open the cart directly
    pub async fn navigate(&self) -> ProbeResult<()> {
        self.nav.goto_path(paths::CART).await
    }

    /// Number of rows in the cart
    pub async fn cart_item_count(&self) -> ProbeResult<usize> {
        self.driver().count(&Element::CartItem.locator()).await
    }

    /// Whether the cart has no rows
    pub async fn is_cart_empty(&self) -> ProbeResult<bool> {
        Ok(self.cart_item_count().await? == 0)
    }

    /// Item names, row order
    pub async fn cart_item_names(&self) -> ProbeResult<Vec<String>> {
        self.driver()
            .all_text_contents(&row_field(Element::ItemName))
            .await
    }

    /// Item prices, aligned with [`CartPage::cart_item_names`]
    pub async fn cart_item_prices(&self) -> ProbeResult<Vec<f64>> {
        self.driver()
            .all_text_contents(&row_field(Element::ItemPrice))
            .await?
            .iter()
            .map(|text| parse_price(text))
            .collect()
    }

    /// Sum of the row prices
    pub async fn cart_subtotal(&self) -> ProbeResult<f64> {
        Ok(sum_prices(&self.cart_item_prices().await?))
    }

    /// Whether some row's name contains `fragment`
    pub async fn is_item_in_cart(&self, fragment: &str) -> ProbeResult<bool> {
        Ok(self
            .cart_item_names()
            .await?
            .iter()
            .any(|name| name.contains(fragment)))
    }

    /// Name, price and quantity of the row at `index`, read in one snapshot
    pub async fn cart_item_details(&self, index: usize) -> ProbeResult<CartItemDetails> {
        let row = Element::CartItem.locator().nth(index);
        let fields: Vec<Selector> = [Element::ItemName, Element::ItemPrice, Element::CartQuantity]
            .into_iter()
            .map(|field| row.locator(field).selector().clone())
            .collect();
        match self.driver().snapshot_texts(&fields).await?.as_slice() {
            [Some(name), Some(price), Some(quantity)] => Ok(CartItemDetails {
                name: name.clone(),
                price: parse_price(price)?,
                quantity: quantity
                    .trim()
                    .parse()
                    .map_err(|_| ProbeError::parse("quantity", quantity.as_str()))?,
            }),
            _ => Err(ProbeError::ElementNotFound {
                selector: format!("cart item #{index}"),
            }),
        }
    }

    /// Press the "Remove" button in the product's row
    pub async fn remove_item_by_name(&self, product: Product) -> ProbeResult<()> {
        debug!(%product, "removing cart row");
        let button = Element::CartItem
            .locator()
            .locator(ProductControl::Remove(product).selector());
        self.driver().click(&button).await
    }

    /// Remove rows from the top until the cart is empty.
    ///
    /// The live row count is re-read before every removal and the loop runs
    /// at most once more than the initial count.
    pub async fn remove_all_items(&self) -> ProbeResult<()> {
        let initial = self.cart_item_count().await?;
        debug!(initial, "emptying cart");
        let first_remove = Element::CartItem
            .locator()
            .first()
            .locator(Element::CartRowButton.selector());
        for _ in 0..=initial {
            if self.cart_item_count().await? == 0 {
                return Ok(());
            }
            self.driver().click(&first_remove).await?;
        }
        let left = self.cart_item_count().await?;
        if left == 0 {
            Ok(())
        } else {
            Err(ProbeError::page(format!(
                "cart still holds {left} item(s) after {} removals",
                initial + 1
            )))
        }
    }

    /// Back to the listing
    pub async fn continue_shopping(&self) -> ProbeResult<()> {
        self.driver()
            .click(&Element::ContinueShoppingButton.locator())
            .await
    }

    /// Proceed to checkout
    pub async fn checkout(&self) -> ProbeResult<()> {
        self.driver().click(&Element::CheckoutButton.locator()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::TestUser;
    use crate::pages::{InventoryPage, LoginPage};
    use crate::storefront::MockStorefront;
    use std::sync::Arc;

    async fn cart_with(products: &[Product]) -> CartPage {
        let driver: SharedDriver = Arc::new(MockStorefront::new());
        let login = LoginPage::new(driver.clone());
        login.navigate().await.unwrap();
        login.login_as(&TestUser::STANDARD).await.unwrap();
        InventoryPage::new(driver.clone())
            .add_multiple_items_to_cart(products)
            .await
            .unwrap();
        let cart = CartPage::new(driver);
        cart.nav().go_to_cart().await.unwrap();
        cart
    }

    mod reading_tests {
        use super::*;

        #[tokio::test]
        async fn test_rows_in_insertion_order() {
            let cart = cart_with(&[Product::Onesie, Product::Backpack]).await;
            assert!(cart.is_loaded().await.unwrap());
            assert_eq!(
                cart.cart_item_names().await.unwrap(),
                vec!["Sauce Labs Onesie", "Sauce Labs Backpack"]
            );
            assert_eq!(cart.cart_item_prices().await.unwrap(), vec![7.99, 29.99]);
            assert!((cart.cart_subtotal().await.unwrap() - 37.98).abs() < 0.001);
        }

        #[tokio::test]
        async fn test_item_details() {
            let cart = cart_with(&[Product::BikeLight]).await;
            let details = cart.cart_item_details(0).await.unwrap();
            assert_eq!(details.name, "Sauce Labs Bike Light");
            assert_eq!(details.quantity, 1);
            assert!(cart.cart_item_details(1).await.unwrap_err().is_absence());
            assert!(cart.is_item_in_cart("Bike").await.unwrap());
            assert!(!cart.is_item_in_cart("Backpack").await.unwrap());
        }
    }

    mod removal_tests {
        use super::*;

        #[tokio::test]
        async fn test_remove_by_name() {
            let cart = cart_with(&[Product::Backpack, Product::FleeceJacket]).await;
            cart.remove_item_by_name(Product::Backpack).await.unwrap();
            assert_eq!(cart.cart_item_names().await.unwrap(), vec!["Sauce Labs Fleece Jacket"]);
            assert_eq!(cart.nav().cart_item_count().await, 1);
        }

        #[tokio::test]
        async fn test_remove_all_items() {
            let cart = cart_with(&Product::ALL).await;
            assert_eq!(cart.cart_item_count().await.unwrap(), 6);
            cart.remove_all_items().await.unwrap();
            assert!(cart.is_cart_empty().await.unwrap());
            assert!(!cart.nav().is_cart_badge_visible().await);
        }

        #[tokio::test]
        async fn test_remove_all_on_empty_cart() {
            let cart = cart_with(&[]).await;
            cart.remove_all_items().await.unwrap();
            assert!(cart.is_cart_empty().await.unwrap());
        }
    }

    mod navigation_tests {
        use super::*;

        #[tokio::test]
        async fn test_continue_shopping_and_checkout() {
            let cart = cart_with(&[Product::Onesie]).await;
            cart.continue_shopping().await.unwrap();
            assert!(cart.nav().current_url().await.unwrap().ends_with(paths::INVENTORY));
            cart.navigate().await.unwrap();
            cart.checkout().await.unwrap();
            assert!(cart
                .nav()
                .current_url()
                .await
                .unwrap()
                .ends_with(paths::CHECKOUT_STEP_ONE));
        }
    }
}
