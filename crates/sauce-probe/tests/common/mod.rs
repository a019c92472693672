//! Shared setup for the integration tests.

#![allow(dead_code)]

use sauce_probe::fixtures::TestUser;
use sauce_probe::pages::{CartPage, InventoryPage, LoginPage};
use sauce_probe::{Product, SharedDriver};
use sauce_probe::{MockStorefront, PageObject};
use std::sync::Arc;

/// A fresh storefront, plus the same storefront as a driver handle
pub fn storefront() -> (Arc<MockStorefront>, SharedDriver) {
    sauce_probe::logging::init_for_tests();
    let store = Arc::new(MockStorefront::new());
    let driver: SharedDriver = store.clone();
    (store, driver)
}

/// Log in as `user` from the login page
pub async fn login_as(driver: &SharedDriver, user: &TestUser) -> LoginPage {
    let login = LoginPage::new(driver.clone());
    login.navigate().await.unwrap();
    login.login_as(user).await.unwrap();
    login
}

/// Log in as the standard user and return the listing
pub async fn logged_in(driver: &SharedDriver) -> InventoryPage {
    login_as(driver, &TestUser::STANDARD).await;
    InventoryPage::new(driver.clone())
}

/// Log in, add `products` from the listing and open the cart
pub async fn cart_with(driver: &SharedDriver, products: &[Product]) -> CartPage {
    let inventory = logged_in(driver).await;
    inventory.add_multiple_items_to_cart(products).await.unwrap();
    inventory.nav().go_to_cart().await.unwrap();
    CartPage::new(driver.clone())
}
