//! Web storage behind the cart, read and written through the driver.

mod common;

use common::{logged_in, storefront};
use sauce_probe::fixtures::CART_STORAGE_KEY;
use sauce_probe::pages::CartPage;
use sauce_probe::{PageObject, Product, StorageArea};

#[tokio::test]
async fn test_cart_is_stored_as_id_array() {
    let (_store, driver) = storefront();
    let inventory = logged_in(&driver).await;
    inventory
        .add_multiple_items_to_cart(&[Product::Backpack, Product::BikeLight])
        .await
        .unwrap();
    let raw = driver
        .storage_get(StorageArea::Local, CART_STORAGE_KEY)
        .await
        .unwrap()
        .unwrap();
    let ids: Vec<u32> = serde_json::from_str(&raw).unwrap();
    assert_eq!(ids, vec![Product::Backpack.id(), Product::BikeLight.id()]);
}

#[tokio::test]
async fn test_written_storage_shows_after_reload() {
    let (_store, driver) = storefront();
    let inventory = logged_in(&driver).await;
    driver
        .storage_set(StorageArea::Local, CART_STORAGE_KEY, "[1,2,3]")
        .await
        .unwrap();
    driver.reload().await.unwrap();
    assert_eq!(inventory.nav().cart_item_count().await, 3);
    assert!(inventory.is_item_in_cart(Product::Onesie).await.unwrap());
}

#[tokio::test]
async fn test_reset_and_clear_drop_cart() {
    let (store, driver) = storefront();
    let inventory = logged_in(&driver).await;
    inventory.add_item_to_cart(Product::Backpack).await.unwrap();
    inventory.nav().reset_app_state().await.unwrap();
    assert_eq!(
        driver.storage_get(StorageArea::Local, CART_STORAGE_KEY).await.unwrap(),
        None
    );

    inventory.add_item_to_cart(Product::Onesie).await.unwrap();
    driver.storage_clear(StorageArea::Local).await.unwrap();
    let cart = CartPage::new(driver.clone());
    cart.navigate().await.unwrap();
    assert!(cart.is_cart_empty().await.unwrap());
    assert!(store.cart_ids().unwrap().is_empty());
}

#[tokio::test]
async fn test_session_storage_is_separate() {
    let (_store, driver) = storefront();
    logged_in(&driver).await;
    driver
        .storage_set(StorageArea::Session, "visited", "yes")
        .await
        .unwrap();
    assert_eq!(
        driver.storage_get(StorageArea::Session, "visited").await.unwrap(),
        Some("yes".to_string())
    );
    assert_eq!(
        driver.storage_get(StorageArea::Local, "visited").await.unwrap(),
        None
    );
    driver
        .storage_remove(StorageArea::Session, "visited")
        .await
        .unwrap();
    assert_eq!(
        driver.storage_get(StorageArea::Session, "visited").await.unwrap(),
        None
    );
}

#[tokio::test]
async fn test_element_exists_and_text_lists() {
    let (_store, driver) = storefront();
    let inventory = logged_in(&driver).await;
    let names = driver
        .all_text_contents(&sauce_probe::selectors::Element::ItemName.locator())
        .await
        .unwrap();
    assert_eq!(names.len(), 6);
    assert!(driver
        .element_exists(&sauce_probe::selectors::Element::SortContainer.locator())
        .await
        .unwrap());
    assert!(!driver
        .element_exists(&sauce_probe::selectors::Element::CartItem.locator())
        .await
        .unwrap());
    assert!(inventory.is_loaded().await.unwrap());
}
