//! Cart contents and removal against the in-memory storefront.

mod common;

use common::{cart_with, logged_in, storefront};
use sauce_probe::money::{approx_eq, sum_prices};
use sauce_probe::pages::{CartItemDetails, CartPage};
use sauce_probe::{PageObject, Product};

#[tokio::test]
async fn test_backpack_lands_in_cart() {
    let (_store, driver) = storefront();
    let cart = cart_with(&driver, &[Product::Backpack]).await;
    assert!(cart.is_loaded().await.unwrap());
    let names = cart.cart_item_names().await.unwrap();
    assert_eq!(names.len(), 1);
    assert!(names[0].contains("Backpack"));
    assert_eq!(
        cart.cart_item_details(0).await.unwrap(),
        CartItemDetails {
            name: Product::Backpack.display_name().to_string(),
            price: 29.99,
            quantity: 1,
        }
    );
}

#[tokio::test]
async fn test_subtotal_sums_rows() {
    let (_store, driver) = storefront();
    let products = [Product::BoltTShirt, Product::RedTShirt, Product::Onesie];
    let cart = cart_with(&driver, &products).await;
    let expected = sum_prices(&products.map(Product::price));
    assert!(approx_eq(cart.cart_subtotal().await.unwrap(), expected));
    assert_eq!(cart.cart_item_prices().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_remove_all_items_empties_cart_and_badge() {
    let (store, driver) = storefront();
    let cart = cart_with(&driver, &Product::ALL).await;
    assert_eq!(cart.cart_item_count().await.unwrap(), 6);
    cart.remove_all_items().await.unwrap();
    assert!(cart.is_cart_empty().await.unwrap());
    assert!(!cart.nav().is_cart_badge_visible().await);
    assert!(store.cart_ids().unwrap().is_empty());
}

#[tokio::test]
async fn test_remove_all_items_on_empty_cart_is_a_no_op() {
    let (store, driver) = storefront();
    let cart = cart_with(&driver, &[]).await;
    cart.remove_all_items().await.unwrap();
    assert!(cart.is_cart_empty().await.unwrap());
    assert_eq!(store.call_count("click:"), 2);
}

#[tokio::test]
async fn test_remove_by_name_keeps_other_rows() {
    let (_store, driver) = storefront();
    let cart = cart_with(&driver, &[Product::Backpack, Product::Onesie]).await;
    cart.remove_item_by_name(Product::Onesie).await.unwrap();
    assert_eq!(
        cart.cart_item_names().await.unwrap(),
        vec![Product::Backpack.display_name()]
    );
    assert_eq!(cart.nav().cart_item_count().await, 1);
}

#[tokio::test]
async fn test_cart_survives_logout() {
    let (_store, driver) = storefront();
    let inventory = logged_in(&driver).await;
    inventory.add_item_to_cart(Product::Backpack).await.unwrap();
    inventory.nav().logout().await.unwrap();
    let inventory = logged_in(&driver).await;
    assert_eq!(inventory.nav().cart_item_count().await, 1);
    let cart = CartPage::new(driver);
    cart.navigate().await.unwrap();
    assert!(cart.is_item_in_cart("Backpack").await.unwrap());
}
